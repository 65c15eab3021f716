//! Mocks: doubles that run the Original's real code and track every call.

use super::builder::{Builder, Flavor};
use super::core::{DefaultBehavior, DoubleCore, DoubleKind};
use crate::config::DoublesConfig;
use crate::errors::Result;
use crate::pre_programmed::PreProgrammedMethod;
use crate::reflection::{ClassDef, Instance, Receiver};
use crate::value::Value;
use crate::verification::{MethodExpectation, VerificationError};
use std::collections::BTreeMap;
use std::sync::Arc;

pub type MockBuilder = Builder<Mock>;

/// Start building a mock of `class`.
pub fn mock(class: &Arc<ClassDef>) -> MockBuilder {
    Builder::new(class)
}

/// A double that forwards every wrapped member to the Original's body,
/// with the mock itself as `this`, and counts each call.
///
/// # Example
///
/// ```rust
/// use understudy::builders::mock;
/// use understudy::reflection::ClassDef;
/// use serde_json::json;
///
/// let class = ClassDef::builder("C")
///     .method("hello", |_, _| Ok(json!(null)))
///     .method("test", |this, _| {
///         this.call("hello", &[])?;
///         this.call("hello", &[])?;
///         Ok(json!("World"))
///     })
///     .build();
///
/// let mut mock = mock(&class).create().unwrap();
/// assert_eq!(mock.call("test", &[]).unwrap(), json!("World"));
/// assert_eq!(mock.calls("test"), 1);
/// assert_eq!(mock.calls("hello"), 2);
/// ```
pub struct Mock {
    core: DoubleCore,
    expectations: Vec<MethodExpectation>,
}

impl Flavor for Mock {
    fn create(
        class: &Arc<ClassDef>,
        constructor_args: &[Value],
        config: &DoublesConfig,
    ) -> Result<Self> {
        Ok(Self {
            core: DoubleCore::build(
                DoubleKind::Mock,
                class,
                constructor_args,
                config,
                DefaultBehavior::Forward,
                true,
            )?,
            expectations: Vec::new(),
        })
    }
}

impl Mock {
    pub fn is_mock(&self) -> bool {
        true
    }

    pub fn kind(&self) -> DoubleKind {
        self.core.kind()
    }

    /// The Original this mock was built from.
    pub fn original(&self) -> &Instance {
        self.core.original()
    }

    /// Names of the wrapped (tracked) members.
    pub fn member_names(&self) -> Vec<&str> {
        self.core.members().collect()
    }

    /// Invoke a member on the mock.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        self.core.call(name, args)
    }

    /// Current call count of `name`.
    pub fn calls(&self, name: &str) -> usize {
        self.core.calls().count(name)
    }

    /// Call counts of every wrapped member.
    pub fn call_counts(&self) -> BTreeMap<String, usize> {
        self.core.calls().counts()
    }

    /// Arguments of the most recent call to `name`.
    pub fn last_args(&self, name: &str) -> &[Value] {
        self.core.calls().last_args(name)
    }

    /// Read a data member of the mock.
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

    /// Declare an expectation about `name`, checked by
    /// [`Mock::verify_expectations`].
    pub fn expects(&mut self, name: &str) -> Result<&mut MethodExpectation> {
        self.core.require_member(name)?;
        log::debug!("Mock expectation declared for \"{}\"", name);
        self.expectations.push(MethodExpectation::new(name));
        let index = self.expectations.len() - 1;
        Ok(&mut self.expectations[index])
    }

    pub fn expectations(&self) -> &[MethodExpectation] {
        &self.expectations
    }

    /// Check every declared expectation against the live call counts,
    /// failing on the first that does not hold.
    #[track_caller]
    pub fn verify_expectations(&self) -> std::result::Result<(), VerificationError> {
        for expectation in &self.expectations {
            let name = expectation.method_name();
            expectation.verify(self.calls(name), self.last_args(name))?;
        }
        Ok(())
    }
}

impl Receiver for Mock {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Raised;
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
    fn test_nested_calls_are_tracked() {
        let mut mock = mock(&class_c()).create().unwrap();
        assert_eq!(mock.call("test", &[]).unwrap(), json!("World"));
        assert_eq!(mock.calls("test"), 1);
        assert_eq!(mock.calls("hello"), 2);
    }

    #[test]
    fn test_pre_programmed_return_skips_body() {
        let mut mock = mock(&class_c()).create().unwrap();
        mock.method("test").unwrap().will_return("Hello");
        assert_eq!(mock.call("test", &[]).unwrap(), json!("Hello"));
        assert_eq!(mock.calls("hello"), 0);
        assert_eq!(mock.calls("test"), 1);
    }

    #[test]
    fn test_reprogramming_keeps_count() {
        let mut mock = mock(&class_c()).create().unwrap();
        mock.method("test").unwrap().will_return("a");
        mock.call("test", &[]).unwrap();
        mock.method("test").unwrap().will_return("b");
        assert_eq!(mock.call("test", &[]).unwrap(), json!("b"));
        assert_eq!(mock.calls("test"), 2);
    }

    #[test]
    fn test_unconfigured_method_fails_on_call() {
        let mut mock = mock(&class_c()).create().unwrap();
        mock.method("test").unwrap();
        let err = mock.call("test", &[]).unwrap_err();
        assert_eq!(err.name(), "PreProgrammedMethodError");
        assert_eq!(mock.calls("test"), 1);
    }

    #[test]
    fn test_will_throw() {
        let mut mock = mock(&class_c()).create().unwrap();
        mock.method("hello")
            .unwrap()
            .will_throw(Raised::new("IoError", "disk full"));
        let err = mock.call("test", &[]).unwrap_err();
        assert_eq!(err.as_raised(), Some(&Raised::new("IoError", "disk full")));
        assert_eq!(mock.calls("hello"), 1);
    }

    #[test]
    fn test_expects_unknown_member() {
        let mut mock = mock(&class_c()).create().unwrap();
        let err = mock.expects("goodbye").unwrap_err();
        assert_eq!(err.name(), "MockError");
        assert!(mock.expectations().is_empty());
    }

    #[test]
    fn test_verify_expectations() {
        let mut mock = mock(&class_c()).create().unwrap();
        mock.expects("hello").unwrap().to_be_called(2);
        let err = mock.verify_expectations().unwrap_err();
        assert_eq!(err.actual_results(), "Actual calls   -> 0");

        mock.call("test", &[]).unwrap();
        assert!(mock.verify_expectations().is_ok());
    }

    #[test]
    fn test_identity() {
        let mock = mock(&class_c()).create().unwrap();
        assert!(mock.is_mock());
        assert_eq!(mock.kind(), DoubleKind::Mock);
        assert!(mock.instance_of("C"));
        assert_eq!(mock.member_names(), vec!["hello", "test"]);
    }
}
