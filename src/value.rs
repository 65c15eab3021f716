//! Dynamic values passed to and returned from doubled members.
//!
//! Arguments and return values are [`serde_json::Value`]s so that a double
//! can record any call without knowing the member's static signature. This
//! module holds the comparison and formatting rules the verifiers rely on.

pub use serde_json::Value;

use serde_json::Number;

/// Runtime type tag of a value, as shown in verification output.
pub fn type_tag(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a value followed by its type tag, e.g. `1<number>` or `"a"<string>`.
pub fn format_with_type(value: &Value) -> String {
    format!("{}<{}>", value, type_tag(value))
}

/// Render an argument list as a comma-separated list of tagged values.
pub fn args_as_string(args: &[Value]) -> String {
    args.iter()
        .map(format_with_type)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compare an actual argument with an expected one.
///
/// Arrays are compared element-wise and objects key by key, both deeply.
/// Numbers compare by value: two integers must be the same integer, and
/// when either side is a float both are compared as floats, so `1` and
/// `1.0` are the same argument. Everything else is compared strictly.
pub fn args_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Array(a), Value::Array(e)) => {
            a.len() == e.len() && a.iter().zip(e).all(|(a, e)| args_equal(a, e))
        }
        (Value::Object(a), Value::Object(e)) => {
            a.len() == e.len()
                && a.iter()
                    .all(|(key, a)| e.get(key).is_some_and(|e| args_equal(a, e)))
        }
        (Value::Number(a), Value::Number(e)) => numbers_equal(a, e),
        _ => actual == expected,
    }
}

fn numbers_equal(actual: &Number, expected: &Number) -> bool {
    if actual.is_f64() || expected.is_f64() {
        return match (actual.as_f64(), expected.as_f64()) {
            (Some(a), Some(e)) => a == e,
            _ => false,
        };
    }
    if let (Some(a), Some(e)) = (actual.as_i64(), expected.as_i64()) {
        return a == e;
    }
    match (actual.as_u64(), expected.as_u64()) {
        (Some(a), Some(e)) => a == e,
        _ => false,
    }
}
