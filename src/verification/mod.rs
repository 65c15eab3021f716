//! Verification subsystem.
//!
//! Compares tracked call state with what a test expects. A failure is a
//! [`VerificationError`] whose rendered stack shows the mismatch, the
//! test line that ran the check, and the call that would have passed:
//!
//! ```text
//! VerificationError: Method "m" received unexpected arg `2<number>` at parameter position 1 (expected `1<number>`).
//!     at tests/spy_test.rs:31:10
//!
//! Verification Results:
//!     Actual call   -> (2<number>)
//!     Expected call -> (1<number>)
//!
//! Check the above 'tests/spy_test.rs' file at/around line 31 for code like the following to fix this error:
//!     .verify("m").to_be_called_with_args(&[json!(1)])
//! ```

pub mod error;
pub mod expectation;
pub mod verifier;

pub use error::{Frame, FrameOrigin, MethodVerificationError, SourceLocation, VerificationError};
pub use expectation::MethodExpectation;
pub use verifier::{CallableKind, Verifier};
