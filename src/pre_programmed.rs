//! Pre-programmed member behavior.
//!
//! A [`PreProgrammedMethod`] replaces a member's default behavior on a
//! double. It starts unset; invoking the member in that state is a
//! configuration error rather than a silent fall-through, so a forgotten
//! `will_return` shows up immediately.
//!
//! Dynamic return values only come from an explicitly registered resolver
//! ([`PreProgrammedMethod::will_return_with`]). A literal value is always
//! handed back as-is.

use crate::errors::{DoubleError, Raised, Result};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Computes a return value from the call's arguments.
pub type Resolver = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// What a pre-programmed member returns.
#[derive(Clone)]
pub enum ReturnValue {
    Literal(Value),
    Computed(Resolver),
}

impl fmt::Debug for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[derive(Debug, Clone, Default)]
enum Mode {
    #[default]
    Unset,
    Return(ReturnValue),
    Throw(Raised),
}

/// Configured behavior for one member of a double.
#[derive(Debug, Clone)]
pub struct PreProgrammedMethod {
    name: String,
    mode: Mode,
}

impl PreProgrammedMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: Mode::Unset,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return `value` from every call. The last configuration wins.
    pub fn will_return(&mut self, value: impl Into<Value>) -> &mut Self {
        self.mode = Mode::Return(ReturnValue::Literal(value.into()));
        self
    }

    /// Return whatever `resolver` computes from each call's arguments.
    pub fn will_return_with<F>(&mut self, resolver: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.mode = Mode::Return(ReturnValue::Computed(Arc::new(resolver)));
        self
    }

    /// Fail every call with `error`. The last configuration wins.
    pub fn will_throw(&mut self, error: Raised) -> &mut Self {
        self.mode = Mode::Throw(error);
        self
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self.mode, Mode::Unset)
    }

    /// The configured return value, if in return mode.
    pub fn return_value(&self) -> Option<&ReturnValue> {
        match &self.mode {
            Mode::Return(value) => Some(value),
            _ => None,
        }
    }

    /// The configured error, if in throw mode.
    pub fn error(&self) -> Option<&Raised> {
        match &self.mode {
            Mode::Throw(error) => Some(error),
            _ => None,
        }
    }

    /// Produce the outcome of one call.
    pub fn resolve(&self, args: &[Value]) -> Result<Value> {
        match &self.mode {
            Mode::Return(ReturnValue::Literal(value)) => Ok(value.clone()),
            Mode::Return(ReturnValue::Computed(resolver)) => Ok(resolver(args)),
            Mode::Throw(error) => Err(DoubleError::Raised(error.clone())),
            Mode::Unset => Err(DoubleError::pre_programmed(format!(
                "Pre-programmed method \"{}\" does not have a return value.",
                self.name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fails_with_configuration_error() {
        let method = PreProgrammedMethod::new("fetch");
        assert!(!method.is_configured());
        let err = method.resolve(&[]).unwrap_err();
        assert_eq!(err.name(), "PreProgrammedMethodError");
        assert_eq!(
            err.to_string(),
            "PreProgrammedMethodError: Pre-programmed method \"fetch\" does not have a return value."
        );
    }

    #[test]
    fn test_last_configuration_wins() {
        let mut method = PreProgrammedMethod::new("fetch");
        method.will_return("first").will_return("second");
        assert_eq!(method.resolve(&[]).unwrap(), json!("second"));

        method.will_throw(Raised::error("offline"));
        assert_eq!(
            method.resolve(&[]).unwrap_err().as_raised(),
            Some(&Raised::error("offline"))
        );

        method.will_return(3);
        assert_eq!(method.resolve(&[]).unwrap(), json!(3));
        assert!(method.error().is_none());
    }

    #[test]
    fn test_resolver_sees_call_args() {
        let mut method = PreProgrammedMethod::new("double");
        method.will_return_with(|args| {
            json!(args.first().and_then(Value::as_i64).unwrap_or(0) * 2)
        });
        assert_eq!(method.resolve(&[json!(21)]).unwrap(), json!(42));
        assert!(matches!(
            method.return_value(),
            Some(ReturnValue::Computed(_))
        ));
    }

    #[test]
    fn test_literal_is_returned_as_is() {
        let mut method = PreProgrammedMethod::new("config");
        method.will_return(json!({"retries": 3}));
        assert_eq!(method.resolve(&[json!("ignored")]).unwrap(), json!({"retries": 3}));
    }
}
