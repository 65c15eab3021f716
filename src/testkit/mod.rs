//! Testing infrastructure for code that uses doubles.
//!
//! - **Assertion macros**: `Result` and call-count assertions, exported at
//!   the crate root
//! - **Fixtures**: sample classes covering nested calls, constructor state,
//!   inheritance and the empty case
//! - **Logging**: [`init_test_logging`] routes `log` and `tracing` output
//!   through the test harness
//!
//! # Quick Start
//!
//! ```rust
//! use understudy::testkit::{class_c, init_test_logging};
//! use understudy::{assert_calls, assert_result_ok, spy};
//! use serde_json::json;
//!
//! init_test_logging();
//! let mut double = assert_result_ok!(spy(&class_c()).create());
//! assert_eq!(double.call("test", &[]).unwrap(), json!("stubbed"));
//! assert_calls!(double, "test", 1);
//! assert_calls!(double, "hello", 0);
//! ```

pub mod assertions;
pub mod helpers;

// Note: Assertion macros are exported at crate root via #[macro_export]
pub use helpers::{class_c, empty_class, greeter_class, init_test_logging, vehicle_classes};
