//! Tracked standalone functions.

use super::tracked::TrackedMember;
use crate::errors::Result;
use crate::observability::{enter_frame, EngineActivity};
use crate::value::Value;
use crate::verification::Verifier;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

type FunctionBody = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// A free function wrapped so every call is counted.
///
/// Clones share the same tracking state.
///
/// # Example
///
/// ```rust
/// use understudy::builders::spy_fn;
/// use serde_json::json;
///
/// let add = spy_fn("add", |args| {
///     Ok(json!(args.iter().filter_map(|v| v.as_i64()).sum::<i64>()))
/// });
/// assert_eq!(add.call(&[json!(1), json!(2)]).unwrap(), json!(3));
/// add.verify()
///     .to_be_called(1)
///     .unwrap()
///     .to_be_called_with_args(&[json!(1), json!(2)])
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct FunctionSpy {
    name: String,
    body: FunctionBody,
    state: Arc<Mutex<TrackedMember>>,
}

/// Wrap `body` as a tracked function called `name`.
pub fn spy_fn<F>(name: impl Into<String>, body: F) -> FunctionSpy
where
    F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
{
    FunctionSpy {
        name: name.into(),
        body: Arc::new(body),
        state: Arc::new(Mutex::new(TrackedMember::default())),
    }
}

impl FunctionSpy {
    pub fn is_spy(&self) -> bool {
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record the call, then run the body.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        let _frame = enter_frame(
            EngineActivity::Invoking,
            format!("FunctionSpy::call {}", self.name),
        );
        {
            let mut state = self.state.lock();
            state.record(args);
            log::trace!(
                "Function call #{} to \"{}\" with {:?}",
                state.count,
                self.name,
                args
            );
        }
        (self.body)(args)
    }

    pub fn calls(&self) -> usize {
        self.state.lock().count
    }

    pub fn last_args(&self) -> Vec<Value> {
        self.state.lock().last_args.clone()
    }

    /// Snapshot the tracked state for verification.
    pub fn verify(&self) -> Verifier {
        let state = self.state.lock();
        Verifier::function(&self.name, state.count, state.last_args.clone())
    }
}

impl fmt::Debug for FunctionSpy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSpy")
            .field("name", &self.name)
            .field("state", &*self.state.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DoubleError, Raised};
    use serde_json::json;

    #[test]
    fn test_counts_calls_and_args() {
        let echo = spy_fn("echo", |args| Ok(args.first().cloned().unwrap_or_default()));
        assert_eq!(echo.call(&[json!("a")]).unwrap(), json!("a"));
        assert_eq!(echo.call(&[json!("b")]).unwrap(), json!("b"));
        assert_eq!(echo.calls(), 2);
        assert_eq!(echo.last_args(), vec![json!("b")]);
    }

    #[test]
    fn test_clones_share_state() {
        let noop = spy_fn("noop", |_| Ok(Value::Null));
        let handle = noop.clone();
        noop.call(&[]).unwrap();
        assert_eq!(handle.calls(), 1);
    }

    #[test]
    fn test_failing_body_still_counted() {
        let fail = spy_fn("fail", |_| Err(DoubleError::from(Raised::error("boom"))));
        assert!(fail.call(&[]).is_err());
        assert_eq!(fail.calls(), 1);
    }

    #[test]
    fn test_verify_uses_function_label() {
        let noop = spy_fn("noop", |_| Ok(Value::Null));
        let err = noop.verify().to_be_called(None).unwrap_err();
        assert_eq!(err.message(), "Function \"noop\" was not called.");
    }
}
