//! Assertion macros for tests written against doubles.
//!
//! - [`crate::assert_result_ok!`] - Assert Result is Ok and extract value
//! - [`crate::assert_result_err!`] - Assert Result is Err and extract error
//! - [`crate::assert_contains_error!`] - Assert error message contains pattern
//! - [`crate::assert_calls!`] - Assert the tracked call count of a double
//!
//! # Example
//!
//! ```rust
//! use understudy::{assert_contains_error, assert_result_ok};
//!
//! let result: Result<i32, String> = Ok(42);
//! let value = assert_result_ok!(result);
//! assert_eq!(value, 42);
//!
//! let result: Result<i32, String> = Err("Method \"x\" does not exist.".to_string());
//! assert_contains_error!(result, "does not exist");
//! ```

/// Assert that a Result is Ok and extract the value.
///
/// If the Result is Err, panics with a message showing the error.
///
/// # Example
///
/// ```rust,ignore
/// use understudy::assert_result_ok;
///
/// let result: Result<i32, &str> = Ok(42);
/// let value = assert_result_ok!(result);
/// assert_eq!(value, 42);
/// ```
#[macro_export]
macro_rules! assert_result_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!(
                "Expected Ok, got Err: {:?}\n  at {}:{}:{}",
                e,
                file!(),
                line!(),
                column!()
            ),
        }
    };
    ($result:expr, $($msg:tt)+) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!(
                "{}: Expected Ok, got Err: {:?}\n  at {}:{}:{}",
                format!($($msg)+),
                e,
                file!(),
                line!(),
                column!()
            ),
        }
    };
}

/// Assert that a Result is Err and extract the error.
///
/// If the Result is Ok, panics with a message showing the value.
///
/// # Example
///
/// ```rust,ignore
/// use understudy::assert_result_err;
///
/// let result: Result<i32, String> = Err("error".to_string());
/// let err = assert_result_err!(result);
/// assert_eq!(err, "error");
/// ```
#[macro_export]
macro_rules! assert_result_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err, got Ok: {:?}\n  at {}:{}:{}",
                value,
                file!(),
                line!(),
                column!()
            ),
            Err(e) => e,
        }
    };
    ($result:expr, $($msg:tt)+) => {
        match $result {
            Ok(value) => panic!(
                "{}: Expected Err, got Ok: {:?}\n  at {}:{}:{}",
                format!($($msg)+),
                value,
                file!(),
                line!(),
                column!()
            ),
            Err(e) => e,
        }
    };
}

/// Assert that an error message contains a specific pattern.
///
/// This macro first asserts the Result is Err, then checks if the
/// error's Display representation contains the pattern.
///
/// # Example
///
/// ```rust,ignore
/// use understudy::assert_contains_error;
///
/// let result: Result<i32, String> = Err("File not found: test.rs".to_string());
/// assert_contains_error!(result, "not found");
/// ```
#[macro_export]
macro_rules! assert_contains_error {
    ($result:expr, $pattern:expr) => {{
        let err = $crate::assert_result_err!($result);
        let err_str = err.to_string();
        assert!(
            err_str.contains($pattern),
            "Error '{}' does not contain '{}'\n  at {}:{}:{}",
            err_str,
            $pattern,
            file!(),
            line!(),
            column!()
        );
        err
    }};
}

/// Assert the tracked call count of a double.
///
/// With three arguments, reads `$double.calls($name)` (mocks and
/// whole-object spies). With two, reads `$double.calls()` (single-member
/// and function spies).
///
/// # Example
///
/// ```rust
/// use understudy::{assert_calls, spy_fn};
/// use serde_json::Value;
///
/// let noop = spy_fn("noop", |_| Ok(Value::Null));
/// noop.call(&[]).unwrap();
/// assert_calls!(noop, 1);
/// ```
#[macro_export]
macro_rules! assert_calls {
    ($double:expr, $name:expr, $count:expr) => {{
        let actual = $double.calls($name);
        assert_eq!(
            actual,
            $count,
            "Expected {:?} to be called {} time(s), got {}\n  at {}:{}:{}",
            $name,
            $count,
            actual,
            file!(),
            line!(),
            column!()
        );
    }};
    ($double:expr, $count:expr) => {{
        let actual = $double.calls();
        assert_eq!(
            actual,
            $count,
            "Expected {} call(s), got {}\n  at {}:{}:{}",
            $count,
            actual,
            file!(),
            line!(),
            column!()
        );
    }};
}

// Note: Macros are exported at crate root via #[macro_export]
// They can be used as `understudy::assert_result_ok!`
