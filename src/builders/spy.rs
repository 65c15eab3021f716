//! Spies: doubles that record calls without running the Original's code.
//!
//! A whole-object [`Spy`] wraps every member of a freshly constructed
//! Original and answers each call with the sentinel. [`spy_on`] instead
//! replaces a single member of an existing instance and hands back a
//! [`MemberSpy`] scoped to that member.

use super::builder::{Builder, Flavor};
use super::core::{DefaultBehavior, DoubleCore, DoubleKind};
use super::tracked::TrackedMember;
use crate::config::{active_config, DoublesConfig};
use crate::errors::{DoubleError, Result};
use crate::pre_programmed::PreProgrammedMethod;
use crate::reflection::{member_fn, ClassDef, Instance, Receiver};
use crate::value::Value;
use crate::verification::Verifier;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type SpyBuilder = Builder<Spy>;

/// Start building a whole-object spy of `class`.
pub fn spy(class: &Arc<ClassDef>) -> SpyBuilder {
    Builder::new(class)
}

/// A double whose wrapped members return the sentinel and count calls.
///
/// # Example
///
/// ```rust
/// use understudy::builders::spy;
/// use understudy::reflection::ClassDef;
/// use serde_json::json;
///
/// let class = ClassDef::builder("Mailer")
///     .method("send", |_, _| panic!("never runs under a spy"))
///     .build();
///
/// let mut mailer = spy(&class).create().unwrap();
/// assert_eq!(mailer.call("send", &[json!("hi")]).unwrap(), json!("stubbed"));
/// mailer
///     .verify("send")
///     .unwrap()
///     .to_be_called(1)
///     .unwrap()
///     .to_be_called_with_args(&[json!("hi")])
///     .unwrap();
/// ```
pub struct Spy {
    core: DoubleCore,
}

impl Flavor for Spy {
    fn create(
        class: &Arc<ClassDef>,
        constructor_args: &[Value],
        config: &DoublesConfig,
    ) -> Result<Self> {
        Ok(Self {
            core: DoubleCore::build(
                DoubleKind::Spy,
                class,
                constructor_args,
                config,
                DefaultBehavior::Sentinel,
                true,
            )?,
        })
    }
}

impl Spy {
    pub fn is_spy(&self) -> bool {
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

    pub fn calls(&self, name: &str) -> usize {
        self.core.calls().count(name)
    }

    pub fn call_counts(&self) -> BTreeMap<String, usize> {
        self.core.calls().counts()
    }

    pub fn last_args(&self, name: &str) -> &[Value] {
        self.core.calls().last_args(name)
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.core.field(name)
    }

    pub fn instance_of(&self, class_name: &str) -> bool {
        self.core.instance_of(class_name)
    }

    /// Replace the sentinel behavior of `name`.
    pub fn method(&mut self, name: &str) -> Result<&mut PreProgrammedMethod> {
        self.core.method(name)
    }

    /// Snapshot the tracked state of `name` for verification.
    pub fn verify(&self, name: &str) -> Result<Verifier> {
        self.core.require_member(name)?;
        Ok(Verifier::method(
            name,
            self.calls(name),
            self.last_args(name).to_vec(),
        ))
    }
}

impl Receiver for Spy {
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

/// Verifier handle for one member replaced by [`spy_on`].
///
/// The handle shares tracking state with the replacement installed on the
/// instance, so it sees every call made through the instance.
#[derive(Debug, Clone)]
pub struct MemberSpy {
    name: String,
    state: Arc<Mutex<TrackedMember>>,
}

impl MemberSpy {
    pub fn is_spy(&self) -> bool {
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current call count.
    pub fn calls(&self) -> usize {
        self.state.lock().count
    }

    pub fn last_args(&self) -> Vec<Value> {
        self.state.lock().last_args.clone()
    }

    /// Snapshot the tracked state for verification.
    pub fn verify(&self) -> Verifier {
        let state = self.state.lock();
        Verifier::method(&self.name, state.count, state.last_args.clone())
    }
}

/// Replace `member` on `instance` with a tracked stand-in returning
/// `return_value`, or the configured sentinel when `None`.
pub fn spy_on(instance: &mut Instance, member: &str, return_value: Option<Value>) -> Result<MemberSpy> {
    if !instance.has_member(member) {
        return Err(DoubleError::spy(format!(
            "Method \"{}\" does not exist.",
            member
        )));
    }

    let value = return_value.unwrap_or_else(|| active_config().sentinel);
    let state = Arc::new(Mutex::new(TrackedMember::default()));
    let shared = Arc::clone(&state);
    let label = member.to_string();
    instance.install_override(
        member,
        member_fn(move |_, args| {
            let mut tracked = shared.lock();
            tracked.record(args);
            log::trace!("Spy call #{} to \"{}\" with {:?}", tracked.count, label, args);
            Ok(value.clone())
        }),
    );
    log::debug!("Spying on \"{}\" of {}", member, instance.class().name());

    Ok(MemberSpy {
        name: member.to_string(),
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn class_c() -> Arc<ClassDef> {
        ClassDef::builder("C")
            .method("hello", |_, _| Ok(Value::Null))
            .method("test", |this, _| {
                this.call("hello", &[])?;
                this.call("hello", &[])?;
                Ok(json!("World"))
            })
            .build()
    }

    #[test]
    fn test_whole_object_spy_never_reaches_original() {
        let mut spy = spy(&class_c()).create().unwrap();
        assert_eq!(spy.call("test", &[]).unwrap(), json!("stubbed"));
        assert!(spy.verify("test").unwrap().to_be_called(1).is_ok());
        assert!(spy.verify("hello").unwrap().to_be_called(None).is_err());
    }

    #[test]
    fn test_verify_unknown_member() {
        let spy = spy(&class_c()).create().unwrap();
        let err = spy.verify("goodbye").unwrap_err();
        assert_eq!(err.name(), "SpyError");
    }

    #[test]
    fn test_spy_can_be_pre_programmed() {
        let mut spy = spy(&class_c()).create().unwrap();
        spy.method("test").unwrap().will_return(7);
        assert_eq!(spy.call("test", &[]).unwrap(), json!(7));
        assert_eq!(spy.calls("test"), 1);
    }

    #[test]
    fn test_spy_on_single_member() {
        let mut instance = class_c().instantiate(&[]).unwrap();
        let hello = spy_on(&mut instance, "hello", Some(json!("hi"))).unwrap();

        assert_eq!(instance.invoke("test", &[]).unwrap(), json!("World"));
        assert_eq!(hello.calls(), 2);
        assert!(hello.verify().to_be_called(2).is_ok());
        assert!(hello.verify().to_be_called_without_args().is_ok());
        assert_eq!(instance.invoke("hello", &[json!(1)]).unwrap(), json!("hi"));
        assert_eq!(hello.last_args(), vec![json!(1)]);
    }

    #[test]
    fn test_spy_on_defaults_to_sentinel() {
        let mut instance = class_c().instantiate(&[]).unwrap();
        let test = spy_on(&mut instance, "test", None).unwrap();
        assert_eq!(instance.invoke("test", &[]).unwrap(), json!("stubbed"));
        assert_eq!(test.calls(), 1);
    }

    #[test]
    fn test_spy_on_missing_member() {
        let mut instance = class_c().instantiate(&[]).unwrap();
        let err = spy_on(&mut instance, "nope", None).unwrap_err();
        assert_eq!(err.to_string(), "SpyError: Method \"nope\" does not exist.");
    }
}
