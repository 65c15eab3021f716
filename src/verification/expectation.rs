//! Expectations declared ahead of time and checked in batch.

use super::error::VerificationError;
use super::verifier::Verifier;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
enum ArgsExpectation {
    With(Vec<Value>),
    Without,
}

/// A deferred assertion about one member of a mock.
///
/// Declaring an expectation records it without checking anything; the
/// check happens when the mock's `verify_expectations` runs, against the
/// call state at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodExpectation {
    method_name: String,
    expected_calls: Option<Option<usize>>,
    expected_args: Option<ArgsExpectation>,
}

impl MethodExpectation {
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            expected_calls: None,
            expected_args: None,
        }
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Expect exactly `expected_calls` calls, or at least one with `None`.
    pub fn to_be_called(&mut self, expected_calls: impl Into<Option<usize>>) -> &mut Self {
        self.expected_calls = Some(expected_calls.into());
        self
    }

    /// Expect the most recent call to have received `expected_args`.
    pub fn to_be_called_with_args(&mut self, expected_args: Vec<Value>) -> &mut Self {
        self.expected_args = Some(ArgsExpectation::With(expected_args));
        self
    }

    /// Expect the most recent call to have received no arguments.
    pub fn to_be_called_without_args(&mut self) -> &mut Self {
        self.expected_args = Some(ArgsExpectation::Without);
        self
    }

    /// Check this expectation against the live call state.
    #[track_caller]
    pub fn verify(&self, calls: usize, last_args: &[Value]) -> Result<(), VerificationError> {
        let verifier = Verifier::method(&self.method_name, calls, last_args.to_vec())
            .with_entry(format!(".expects(\"{}\")", self.method_name));

        if let Some(expected_calls) = self.expected_calls {
            verifier.to_be_called(expected_calls)?;
        }
        match &self.expected_args {
            Some(ArgsExpectation::With(args)) => {
                verifier.to_be_called_with_args(args)?;
            }
            Some(ArgsExpectation::Without) => {
                verifier.to_be_called_without_args()?;
            }
            None => {}
        }
        Ok(())
    }
}
