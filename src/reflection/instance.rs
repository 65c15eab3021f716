//! Originals and the `this` seen by member bodies.

use super::class::{ClassDef, MemberFn};
use crate::errors::{Raised, Result};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The object a member body runs against.
///
/// Both an [`Instance`] and every double implement this trait. A Mock runs
/// the Original's member bodies with itself as the receiver, so calls a
/// body makes through `this` are routed back through the double.
pub trait Receiver {
    /// The class whose chain resolves this object's members.
    fn class(&self) -> &Arc<ClassDef>;

    /// Own data fields, not including accessor-declared members.
    fn fields(&self) -> &BTreeMap<String, Value>;

    fn set_field(&mut self, name: &str, value: Value);

    /// Invoke a member by name.
    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value>;

    /// Read a data member: own fields first, then getters on the chain.
    fn field(&self, name: &str) -> Option<Value>;

    /// Whether `class_name` appears anywhere in this object's class chain.
    fn instance_of(&self, class_name: &str) -> bool {
        self.class().lineage().any(|class| class.name() == class_name)
    }
}

pub(crate) fn read_field(receiver: &dyn Receiver, name: &str) -> Option<Value> {
    if let Some(value) = receiver.fields().get(name) {
        return Some(value.clone());
    }
    receiver
        .class()
        .find_getter(name)
        .map(|getter| getter(receiver))
}

/// An Original: a class plus its own state.
///
/// Per-instance member overrides live in a registry keyed by member name,
/// consulted before the class chain. Stubs and single-member spies install
/// their replacements there.
#[derive(Clone)]
pub struct Instance {
    class: Arc<ClassDef>,
    fields: BTreeMap<String, Value>,
    overrides: BTreeMap<String, MemberFn>,
}

impl Instance {
    pub(crate) fn new(class: Arc<ClassDef>) -> Self {
        Self {
            class,
            fields: BTreeMap::new(),
            overrides: BTreeMap::new(),
        }
    }

    /// Invoke a member on this instance.
    pub fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        self.call(name, args)
    }

    /// Resolve an invocable member: overrides first, then the class chain.
    pub fn find_member(&self, name: &str) -> Option<MemberFn> {
        self.overrides
            .get(name)
            .cloned()
            .or_else(|| self.class.find_method(name))
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.find_member(name).is_some()
    }

    /// Whether `name` is a data member (own field or getter).
    pub fn has_data_member(&self, name: &str) -> bool {
        self.fields.contains_key(name) || self.class.find_getter(name).is_some()
    }

    /// Names of members replaced on this instance.
    pub fn override_names(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(String::as_str)
    }

    pub(crate) fn install_override(&mut self, name: &str, body: MemberFn) {
        self.overrides.insert(name.to_string(), body);
    }
}

impl Receiver for Instance {
    fn class(&self) -> &Arc<ClassDef> {
        &self.class
    }

    fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    fn field(&self, name: &str) -> Option<Value> {
        read_field(self, name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        match self.find_member(name) {
            Some(body) => body(self, args),
            None => Err(Raised::type_error(format!(
                "{}.{} is not a function",
                self.class.name(),
                name
            ))
            .into()),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name())
            .field("fields", &self.fields)
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::member_fn;
    use serde_json::json;

    fn counter_class() -> Arc<ClassDef> {
        ClassDef::builder("Counter")
            .constructor(|this, _| {
                this.set_field("count", json!(0));
                Ok(())
            })
            .method("increment", |this, _| {
                let next = this.field("count").and_then(|v| v.as_i64()).unwrap_or(0) + 1;
                this.set_field("count", json!(next));
                Ok(json!(next))
            })
            .method("twice", |this, _| {
                this.call("increment", &[])?;
                this.call("increment", &[])
            })
            .getter("label", |this| {
                json!(format!("count={}", this.field("count").unwrap_or_default()))
            })
            .build()
    }

    #[test]
    fn test_invoke_through_this() {
        let mut counter = counter_class().instantiate(&[]).unwrap();
        assert_eq!(counter.invoke("twice", &[]).unwrap(), json!(2));
        assert_eq!(counter.field("count"), Some(json!(2)));
        assert_eq!(counter.field("label"), Some(json!("count=2")));
    }

    #[test]
    fn test_missing_member_is_type_error() {
        let mut counter = counter_class().instantiate(&[]).unwrap();
        let err = counter.invoke("decrement", &[]).unwrap_err();
        assert_eq!(err.name(), "TypeError");
        assert_eq!(
            err.to_string(),
            "TypeError: Counter.decrement is not a function"
        );
    }

    #[test]
    fn test_override_takes_precedence() {
        let mut counter = counter_class().instantiate(&[]).unwrap();
        counter.install_override("increment", member_fn(|_, _| Ok(json!(-1))));
        assert_eq!(counter.invoke("increment", &[]).unwrap(), json!(-1));
        assert_eq!(counter.override_names().collect::<Vec<_>>(), vec!["increment"]);
    }

    #[test]
    fn test_instance_of_walks_chain() {
        let counter = counter_class().instantiate(&[]).unwrap();
        assert!(counter.instance_of("Counter"));
        assert!(counter.instance_of("Object"));
        assert!(!counter.instance_of("Timer"));
    }

    #[test]
    fn test_field_reads_through_trait_object() {
        let counter = counter_class().instantiate(&[]).unwrap();
        let this: &dyn Receiver = &counter;
        assert_eq!(this.field("count"), Some(json!(0)));
        assert_eq!(this.field("label"), Some(json!("count=0")));
        assert_eq!(this.field("missing"), None);
    }
}
