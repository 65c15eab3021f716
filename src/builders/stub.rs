//! Stubs: untracked in-place replacement of a single member.

use crate::config::active_config;
use crate::errors::{DoubleError, Result};
use crate::reflection::{member_fn, Instance, Receiver};
use crate::value::Value;

/// Replace `member` on `instance` with `value`, or the configured sentinel
/// when `None`, and hand the same instance back.
///
/// A data member is overwritten in place. An invocable member gets an
/// override that ignores its arguments and returns the value.
///
/// # Example
///
/// ```rust
/// use understudy::builders::stub;
/// use understudy::reflection::ClassDef;
/// use serde_json::json;
///
/// let class = ClassDef::builder("Clock")
///     .method("now", |_, _| Ok(json!(1_700_000_000)))
///     .build();
/// let mut clock = class.instantiate(&[]).unwrap();
/// stub(&mut clock, "now", Some(json!(0))).unwrap();
/// assert_eq!(clock.invoke("now", &[]).unwrap(), json!(0));
/// ```
pub fn stub<'a>(
    instance: &'a mut Instance,
    member: &str,
    value: Option<Value>,
) -> Result<&'a mut Instance> {
    let value = value.unwrap_or_else(|| active_config().sentinel);

    if instance.has_data_member(member) {
        log::debug!(
            "Stubbing data member \"{}\" of {}",
            member,
            instance.class().name()
        );
        instance.set_field(member, value);
        return Ok(instance);
    }

    if instance.has_member(member) {
        log::debug!(
            "Stubbing method \"{}\" of {}",
            member,
            instance.class().name()
        );
        instance.install_override(member, member_fn(move |_, _| Ok(value.clone())));
        return Ok(instance);
    }

    Err(DoubleError::stub(format!(
        "Property or method \"{}\" does not exist.",
        member
    )))
}

/// A standalone function that always returns the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct StubFn {
    value: Value,
}

/// A standalone stub returning the configured sentinel.
pub fn stub_fn() -> StubFn {
    StubFn {
        value: active_config().sentinel,
    }
}

impl StubFn {
    /// Return `value` instead of the sentinel.
    pub fn returning(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn call(&self, _args: &[Value]) -> Value {
        self.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::ClassDef;
    use serde_json::json;
    use std::sync::Arc;

    fn server() -> Arc<ClassDef> {
        ClassDef::builder("Server")
            .constructor(|this, _| {
                this.set_field("port", json!(8080));
                Ok(())
            })
            .method("run", |this, _| {
                let port = this.field("port").unwrap_or_default();
                Ok(json!(format!("listening on {}", port)))
            })
            .method("status", |this, _| this.call("run", &[]))
            .getter("address", |_| json!("127.0.0.1"))
            .build()
    }

    #[test]
    fn test_stub_method_seen_by_other_members() {
        let mut instance = server().instantiate(&[]).unwrap();
        stub(&mut instance, "run", Some(json!("offline"))).unwrap();
        assert_eq!(instance.invoke("status", &[]).unwrap(), json!("offline"));
    }

    #[test]
    fn test_stub_data_member_in_place() {
        let mut instance = server().instantiate(&[]).unwrap();
        let stubbed = stub(&mut instance, "port", Some(json!(9000))).unwrap();
        assert_eq!(
            stubbed.invoke("run", &[]).unwrap(),
            json!("listening on 9000")
        );
    }

    #[test]
    fn test_stub_getter_shadowed_by_field() {
        let mut instance = server().instantiate(&[]).unwrap();
        stub(&mut instance, "address", Some(json!("0.0.0.0"))).unwrap();
        assert_eq!(instance.field("address"), Some(json!("0.0.0.0")));
    }

    #[test]
    fn test_stub_defaults_to_sentinel() {
        let mut instance = server().instantiate(&[]).unwrap();
        stub(&mut instance, "run", None).unwrap();
        assert_eq!(instance.invoke("run", &[]).unwrap(), json!("stubbed"));
    }

    #[test]
    fn test_stub_missing_member() {
        let mut instance = server().instantiate(&[]).unwrap();
        let err = stub(&mut instance, "halt", None).unwrap_err();
        assert_eq!(err.name(), "StubError");
        assert_eq!(
            err.to_string(),
            "StubError: Property or method \"halt\" does not exist."
        );
    }

    #[test]
    fn test_stub_fn() {
        let stub = stub_fn();
        assert_eq!(stub.call(&[json!(1)]), json!("stubbed"));
        assert_eq!(stub.returning(3).call(&[]), json!(3));
    }
}
