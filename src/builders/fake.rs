//! Fakes: working stand-ins whose members can be overridden one at a time.

use super::builder::{Builder, Flavor};
use super::core::{DefaultBehavior, DoubleCore, DoubleKind};
use crate::config::DoublesConfig;
use crate::errors::Result;
use crate::pre_programmed::PreProgrammedMethod;
use crate::reflection::{ClassDef, Instance, Receiver};
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type FakeBuilder = Builder<Fake>;

/// Start building a fake of `class`.
pub fn fake(class: &Arc<ClassDef>) -> FakeBuilder {
    Builder::new(class)
}

/// A double that behaves like the Original unless a member is
/// pre-programmed. Calls are not tracked.
pub struct Fake {
    core: DoubleCore,
}

impl Flavor for Fake {
    fn create(
        class: &Arc<ClassDef>,
        constructor_args: &[Value],
        config: &DoublesConfig,
    ) -> Result<Self> {
        Ok(Self {
            core: DoubleCore::build(
                DoubleKind::Fake,
                class,
                constructor_args,
                config,
                DefaultBehavior::Forward,
                false,
            )?,
        })
    }
}

impl Fake {
    pub fn is_fake(&self) -> bool {
        true
    }

    pub fn kind(&self) -> DoubleKind {
        self.core.kind()
    }

    pub fn original(&self) -> &Instance {
        self.core.original()
    }

    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        self.core.call(name, args)
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.core.field(name)
    }

    pub fn instance_of(&self, class_name: &str) -> bool {
        self.core.instance_of(class_name)
    }

    /// Replace the default behavior of `name`.
    pub fn method(&mut self, name: &str) -> Result<&mut PreProgrammedMethod> {
        self.core.method(name)
    }
}

impl Receiver for Fake {
    fn class(&self) -> &Arc<ClassDef> {
        self.core.class()
    }

    fn fields(&self) -> &BTreeMap<String, Value> {
        self.core.fields()
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.core.field(name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.core.set_field(name, value);
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        self.core.call(name, args)
    }
}
