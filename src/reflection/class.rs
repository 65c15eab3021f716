//! Class descriptors: the explicit registry an Original's author supplies.
//!
//! A [`ClassDef`] names the invocable members and accessor-declared data
//! members of a type, plus an optional constructor. Classes form a single
//! inheritance chain that always ends at the root [`ClassDef::object`]
//! class, which carries the native members.

use super::instance::{Instance, Receiver};
use crate::errors::{DoubleError, Result};
use crate::value::Value;
use once_cell::sync::Lazy;
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Body of an invocable member. `this` is whatever object the member was
/// invoked on: the Original itself, or a double standing in for it.
pub type MemberFn = Arc<dyn Fn(&mut dyn Receiver, &[Value]) -> Result<Value> + Send + Sync>;

/// Box a closure as a [`MemberFn`].
pub fn member_fn<F>(body: F) -> MemberFn
where
    F: Fn(&mut dyn Receiver, &[Value]) -> Result<Value> + Send + Sync + 'static,
{
    Arc::new(body)
}

/// Body of an accessor-declared data member.
pub type GetterFn = Arc<dyn Fn(&dyn Receiver) -> Value + Send + Sync>;

/// Constructor body, run against the freshly allocated instance.
pub type ConstructorFn = Arc<dyn Fn(&mut Instance, &[Value]) -> Result<()> + Send + Sync>;

static OBJECT: Lazy<Arc<ClassDef>> = Lazy::new(|| {
    ClassDef::root_builder("Object")
        .method("constructor", |this, _| Ok(json!(this.class().name())))
        .method("to_string", |this, _| {
            Ok(json!(format!("[object {}]", this.class().name())))
        })
        .method("to_locale_string", |this, args| this.call("to_string", args))
        .method("value_of", |this, _| {
            Ok(Value::Object(this.fields().clone().into_iter().collect()))
        })
        .method("has_own_property", |this, args| {
            let name = args.first().and_then(Value::as_str).unwrap_or_default();
            Ok(json!(this.fields().contains_key(name)))
        })
        .method("property_is_enumerable", |this, args| {
            this.call("has_own_property", args)
        })
        .method("is_prototype_of", |this, args| {
            let name = args.first().and_then(Value::as_str).unwrap_or_default();
            Ok(json!(this.class().lineage().any(|c| c.name() == name)))
        })
        .method("define_getter", |_, _| Ok(Value::Null))
        .method("define_setter", |_, _| Ok(Value::Null))
        .method("lookup_getter", |this, args| {
            let name = args.first().and_then(Value::as_str).unwrap_or_default();
            Ok(json!(this.class().find_getter(name).is_some()))
        })
        .method("lookup_setter", |_, _| Ok(json!(false)))
        .build()
});

/// A named class with methods, getters, a constructor and a parent.
pub struct ClassDef {
    name: String,
    parent: Option<Arc<ClassDef>>,
    methods: BTreeMap<String, MemberFn>,
    getters: BTreeMap<String, GetterFn>,
    constructor: Option<ConstructorFn>,
}

impl ClassDef {
    /// Start describing a class whose parent is the root `Object` class.
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            parent: Some(Self::object()),
            methods: BTreeMap::new(),
            getters: BTreeMap::new(),
            constructor: None,
        }
    }

    fn root_builder(name: &str) -> ClassBuilder {
        ClassBuilder {
            name: name.to_string(),
            parent: None,
            methods: BTreeMap::new(),
            getters: BTreeMap::new(),
            constructor: None,
        }
    }

    /// The root class every chain ends at.
    pub fn object() -> Arc<ClassDef> {
        Arc::clone(&OBJECT)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<ClassDef>> {
        self.parent.as_ref()
    }

    /// This class followed by each ancestor, closest first.
    pub fn lineage(&self) -> impl Iterator<Item = &ClassDef> {
        std::iter::successors(Some(self), |class| class.parent.as_deref())
    }

    /// Names of the methods defined directly on this class.
    pub fn own_method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Names of the getters defined directly on this class.
    pub fn own_getter_names(&self) -> impl Iterator<Item = &str> {
        self.getters.keys().map(String::as_str)
    }

    /// Resolve a method by walking the chain; the closest definition wins.
    pub fn find_method(&self, name: &str) -> Option<MemberFn> {
        self.lineage()
            .find_map(|class| class.methods.get(name))
            .cloned()
    }

    pub fn find_getter(&self, name: &str) -> Option<GetterFn> {
        self.lineage()
            .find_map(|class| class.getters.get(name))
            .cloned()
    }

    /// Construct an Original. Constructors run from the root class down to
    /// this one, each receiving `args`.
    pub fn instantiate(self: &Arc<Self>, args: &[Value]) -> Result<Instance> {
        let mut instance = Instance::new(Arc::clone(self));
        let mut chain: Vec<&ClassDef> = self.lineage().collect();
        chain.reverse();
        for class in chain {
            if let Some(constructor) = &class.constructor {
                constructor(&mut instance, args)?;
            }
        }
        Ok(instance)
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("getters", &self.getters.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Fluent builder for [`ClassDef`].
///
/// # Example
///
/// ```rust
/// use understudy::reflection::{ClassDef, Receiver};
/// use serde_json::json;
///
/// let greeter = ClassDef::builder("Greeter")
///     .constructor(|this, args| {
///         this.set_field("name", args.first().cloned().unwrap_or(json!("World")));
///         Ok(())
///     })
///     .method("greet", |this, _| {
///         let name = this.field("name").unwrap_or_default();
///         Ok(json!(format!("Hello, {}", name.as_str().unwrap_or_default())))
///     })
///     .build();
///
/// let mut instance = greeter.instantiate(&[]).unwrap();
/// assert_eq!(instance.invoke("greet", &[]).unwrap(), json!("Hello, World"));
/// ```
pub struct ClassBuilder {
    name: String,
    parent: Option<Arc<ClassDef>>,
    methods: BTreeMap<String, MemberFn>,
    getters: BTreeMap<String, GetterFn>,
    constructor: Option<ConstructorFn>,
}

impl ClassBuilder {
    /// Inherit from `parent` instead of the root class.
    pub fn extends(mut self, parent: &Arc<ClassDef>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    pub fn method<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut dyn Receiver, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(body));
        self
    }

    /// Declare a data member computed by an accessor.
    pub fn getter<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&dyn Receiver) -> Value + Send + Sync + 'static,
    {
        self.getters.insert(name.into(), Arc::new(body));
        self
    }

    pub fn constructor<F>(mut self, body: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<()> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(body));
        self
    }

    pub fn build(self) -> Arc<ClassDef> {
        Arc::new(ClassDef {
            name: self.name,
            parent: self.parent,
            methods: self.methods,
            getters: self.getters,
            constructor: self.constructor,
        })
    }
}

/// Shorthand for a constructor failure carrying a thrown error.
pub fn constructor_error(kind: &str, message: impl Into<String>) -> DoubleError {
    crate::errors::Raised::new(kind, message).into()
}
