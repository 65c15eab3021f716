//! Error types raised by doubles and member bodies.
//!
//! Every misuse of the engine is reported synchronously through
//! [`DoubleError`]. Configuration mistakes (referencing a member the
//! Original does not have) are categorized by the flavor of double that
//! detected them, so that the error name tells the test author which
//! builder call to look at.
//!
//! Errors produced by the code under test travel through the same type as
//! [`DoubleError::Raised`]. The engine never swallows them: a member body
//! that fails makes the wrapped member fail with the identical error.
//!
//! # Example
//!
//! ```rust
//! use understudy::errors::{DoubleError, Raised};
//!
//! let err = DoubleError::mock("Method \"missing\" does not exist.");
//! assert_eq!(err.name(), "MockError");
//!
//! let thrown: DoubleError = Raised::new("RangeError", "out of range").into();
//! assert!(thrown.is_raised());
//! ```

use crate::verification::VerificationError;
use std::fmt;
use thiserror::Error;

/// An error value thrown by a member body or by a pre-programmed method.
///
/// `kind` plays the role of the error's class name (`"TypeError"`,
/// `"RangeError"`, or any domain name the test author chooses).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Raised {
    pub kind: String,
    pub message: String,
}

impl Raised {
    /// Create an error value of the given kind.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a plain `Error` kind error value.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        Self::new("TypeError", message)
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Raised {}

/// Main error type for double construction, configuration and invocation.
#[derive(Debug, Clone, Error)]
pub enum DoubleError {
    /// Misuse of a mock (unknown member, bad expectation target).
    #[error("MockError: {0}")]
    Mock(String),

    /// Misuse of a fake.
    #[error("FakeError: {0}")]
    Fake(String),

    /// Misuse of a spy, whole-object or single-member.
    #[error("SpyError: {0}")]
    Spy(String),

    /// Misuse of a stub.
    #[error("StubError: {0}")]
    Stub(String),

    /// A pre-programmed method was invoked before it was told what to do.
    #[error("PreProgrammedMethodError: {0}")]
    PreProgrammedMethod(String),

    /// A batch of expectations did not hold.
    #[error(transparent)]
    Verification(Box<VerificationError>),

    /// An error thrown by a member body, propagated unchanged.
    #[error(transparent)]
    Raised(#[from] Raised),
}

impl DoubleError {
    pub fn mock(message: impl Into<String>) -> Self {
        Self::Mock(message.into())
    }

    pub fn fake(message: impl Into<String>) -> Self {
        Self::Fake(message.into())
    }

    pub fn spy(message: impl Into<String>) -> Self {
        Self::Spy(message.into())
    }

    pub fn stub(message: impl Into<String>) -> Self {
        Self::Stub(message.into())
    }

    pub fn pre_programmed(message: impl Into<String>) -> Self {
        Self::PreProgrammedMethod(message.into())
    }

    /// Error class name, e.g. `"MockError"` or the thrown error's kind.
    pub fn name(&self) -> &str {
        match self {
            Self::Mock(_) => "MockError",
            Self::Fake(_) => "FakeError",
            Self::Spy(_) => "SpyError",
            Self::Stub(_) => "StubError",
            Self::PreProgrammedMethod(_) => "PreProgrammedMethodError",
            Self::Verification(_) => "VerificationError",
            Self::Raised(raised) => &raised.kind,
        }
    }

    /// Whether this error came from a member body rather than the engine.
    pub fn is_raised(&self) -> bool {
        matches!(self, Self::Raised(_))
    }

    /// The thrown error value, if this error came from a member body.
    pub fn as_raised(&self) -> Option<&Raised> {
        match self {
            Self::Raised(raised) => Some(raised),
            _ => None,
        }
    }
}

impl From<VerificationError> for DoubleError {
    fn from(err: VerificationError) -> Self {
        Self::Verification(Box::new(err))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, DoubleError>;
