//! Chainable call verifiers.
//!
//! A [`Verifier`] is a snapshot of one callable's tracked state: how many
//! times it ran and the arguments of its most recent call. Each check
//! returns the verifier again so checks can be chained with `?`:
//!
//! ```rust
//! use understudy::verification::Verifier;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), understudy::verification::VerificationError> {
//! let verifier = Verifier::method("save", 1, vec![json!("draft")]);
//! verifier
//!     .to_be_called(1)?
//!     .to_be_called_with_args(&[json!("draft")])?;
//! # Ok(())
//! # }
//! ```
//!
//! All checks are `#[track_caller]`: the location reported in a failure is
//! the line of test code that ran the check.

use super::error::VerificationError;
use crate::observability::{enter_frame, EngineActivity};
use crate::value::{args_as_string, args_equal, format_with_type, Value};
use std::panic::Location;

/// What kind of callable is being verified; only affects wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    Method,
    Function,
}

/// Tracked state of one callable plus how test code reached it.
#[derive(Debug, Clone, PartialEq)]
pub struct Verifier {
    kind: CallableKind,
    name: String,
    entry: String,
    calls: usize,
    last_args: Vec<Value>,
}

impl Verifier {
    /// Verifier for a member reached through `.verify("name")`.
    pub fn method(name: impl Into<String>, calls: usize, last_args: Vec<Value>) -> Self {
        let name = name.into();
        Self {
            kind: CallableKind::Method,
            entry: format!(".verify(\"{}\")", name),
            name,
            calls,
            last_args,
        }
    }

    /// Verifier for a standalone function reached through `.verify()`.
    pub fn function(name: impl Into<String>, calls: usize, last_args: Vec<Value>) -> Self {
        Self {
            kind: CallableKind::Function,
            entry: ".verify()".to_string(),
            name: name.into(),
            calls,
            last_args,
        }
    }

    /// Override how the corrective call is spelled, e.g. `.expects("m")`.
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = entry.into();
        self
    }

    pub fn kind(&self) -> CallableKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn last_args(&self) -> &[Value] {
        &self.last_args
    }

    fn label(&self) -> String {
        match self.kind {
            CallableKind::Method => format!("Method \"{}\"", self.name),
            CallableKind::Function => format!("Function \"{}\"", self.name),
        }
    }

    /// Without a count, pass when the callable ran at least once; with a
    /// count, pass only when it ran exactly that many times.
    #[track_caller]
    pub fn to_be_called(
        &self,
        expected_calls: impl Into<Option<usize>>,
    ) -> Result<&Self, VerificationError> {
        let _frame = enter_frame(EngineActivity::Verifying, "Verifier::to_be_called");
        let caller = Location::caller();
        let expected_calls: Option<usize> = expected_calls.into();

        let Some(expected) = expected_calls else {
            if self.calls > 0 {
                return Ok(self);
            }
            return Err(VerificationError::new(
                format!("{} was not called.", self.label()),
                format!("{}.to_be_called(None)", self.entry),
                "Actual calls   -> 0",
                "Expected calls -> 1 (or more)",
                caller,
            ));
        };

        if self.calls == expected {
            return Ok(self);
        }

        Err(VerificationError::new(
            format!(
                "{} was called {} instead of {}.",
                self.label(),
                times(self.calls),
                times(expected)
            ),
            format!("{}.to_be_called({})", self.entry, expected),
            format!("Actual calls   -> {}", self.calls),
            format!("Expected calls -> {}", expected),
            caller,
        ))
    }

    /// Compare the most recent call's arguments with `expected_args`.
    #[track_caller]
    pub fn to_be_called_with_args(
        &self,
        expected_args: &[Value],
    ) -> Result<&Self, VerificationError> {
        let _frame = enter_frame(EngineActivity::Verifying, "Verifier::to_be_called_with_args");
        let caller = Location::caller();

        let code_that_threw = format!(
            "{}.to_be_called_with_args(&[{}])",
            self.entry,
            expected_args
                .iter()
                .map(|arg| format!("json!({})", arg))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let actual_call = format!("Actual call   -> ({})", args_as_string(&self.last_args));
        let expected_call = format!("Expected call -> ({})", args_as_string(expected_args));

        if expected_args.len() > self.last_args.len() {
            return Err(VerificationError::new(
                format!(
                    "{} was called with {} but {} were expected.",
                    self.label(),
                    arg_count(self.last_args.len()),
                    expected_args.len()
                ),
                code_that_threw,
                actual_call,
                expected_call,
                caller,
            ));
        }

        if expected_args.len() < self.last_args.len() {
            return Err(VerificationError::new(
                format!(
                    "{} was called with {} more arg{} than expected.",
                    self.label(),
                    self.last_args.len() - expected_args.len(),
                    plural(self.last_args.len() - expected_args.len())
                ),
                code_that_threw,
                actual_call,
                expected_call,
                caller,
            ));
        }

        for (index, (actual, expected)) in self.last_args.iter().zip(expected_args).enumerate() {
            if !args_equal(actual, expected) {
                return Err(VerificationError::new(
                    format!(
                        "{} received unexpected arg `{}` at parameter position {} (expected `{}`).",
                        self.label(),
                        format_with_type(actual),
                        index + 1,
                        format_with_type(expected)
                    ),
                    code_that_threw,
                    actual_call,
                    expected_call,
                    caller,
                ));
            }
        }

        Ok(self)
    }

    /// Pass when the most recent call had no arguments.
    #[track_caller]
    pub fn to_be_called_without_args(&self) -> Result<&Self, VerificationError> {
        let _frame = enter_frame(
            EngineActivity::Verifying,
            "Verifier::to_be_called_without_args",
        );
        if self.last_args.is_empty() {
            return Ok(self);
        }

        Err(VerificationError::new(
            format!(
                "{} was called with args when expected to receive no args.",
                self.label()
            ),
            format!("{}.to_be_called_without_args()", self.entry),
            format!("Actual args   -> ({})", args_as_string(&self.last_args)),
            "Expected args -> (no args)",
            Location::caller(),
        ))
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn times(count: usize) -> String {
    format!("{} time{}", count, plural(count))
}

fn arg_count(count: usize) -> String {
    format!("{} arg{}", count, plural(count))
}
