mod common;

use common::{checkout_class, class_c, greeter_class, setup};
use pretty_assertions::assert_eq;
use serde_json::json;
use understudy::{assert_calls, assert_contains_error, spy, spy_fn, spy_on, Value};

#[test]
fn test_whole_object_spy_returns_sentinel() {
    setup();
    let mut double = spy(&class_c()).create().unwrap();

    assert_eq!(double.call("test", &[]).unwrap(), json!("stubbed"));
    assert!(double.verify("test").unwrap().to_be_called(1).is_ok());

    let err = double.verify("hello").unwrap().to_be_called(None).unwrap_err();
    assert_eq!(err.message(), "Method \"hello\" was not called.");
    assert_eq!(err.expected_results(), "Expected calls -> 1 (or more)");
}

#[test]
fn test_spy_keeps_constructed_state() {
    setup();
    let double = spy(&greeter_class())
        .with_constructor_args([json!("Grace")])
        .create()
        .unwrap();
    assert_eq!(double.field("name"), Some(json!("Grace")));
    assert!(double.is_spy());
}

#[test]
fn test_spy_sentinel_follows_builder_config() {
    setup();
    let config = understudy::config::parse_config("sentinel = 0").unwrap();
    let mut double = spy(&class_c()).with_config(config).create().unwrap();
    assert_eq!(double.call("test", &[]).unwrap(), json!(0));
}

#[test]
fn test_spy_verify_chain() {
    setup();
    let mut double = spy(&checkout_class()).create().unwrap();
    double.call("charge", &[json!(10)]).unwrap();
    double.call("charge", &[json!(15)]).unwrap();

    let verifier = double.verify("charge").unwrap();
    assert!(verifier
        .to_be_called(2)
        .and_then(|v| v.to_be_called_with_args(&[json!(15)]))
        .is_ok());
    assert_calls!(double, "pay", 0);
}

#[test]
fn test_spy_on_single_member_of_instance() {
    setup();
    let mut instance = class_c().instantiate(&[]).unwrap();
    let hello = spy_on(&mut instance, "hello", None).unwrap();

    assert_eq!(instance.invoke("test", &[]).unwrap(), json!("World"));
    assert_calls!(hello, 2);
    assert!(hello.verify().to_be_called(2).is_ok());
    assert_eq!(instance.invoke("hello", &[]).unwrap(), json!("stubbed"));
}

#[test]
fn test_spy_on_with_literal_return() {
    setup();
    let mut instance = checkout_class().instantiate(&[]).unwrap();
    let charge = spy_on(&mut instance, "charge", Some(json!(-1))).unwrap();

    assert_eq!(instance.invoke("pay", &[json!(99)]).unwrap(), json!("0 EUR"));
    assert_eq!(charge.last_args(), vec![json!(99)]);
    assert!(charge.verify().to_be_called_with_args(&[json!(99)]).is_ok());
}

#[test]
fn test_spy_on_missing_member() {
    setup();
    let mut instance = class_c().instantiate(&[]).unwrap();
    assert_contains_error!(spy_on(&mut instance, "missing", None), "SpyError");
}

#[test]
fn test_function_spy_verifies_like_a_member() {
    setup();
    let double = spy_fn("double", |args| {
        Ok(json!(args.first().and_then(Value::as_i64).unwrap_or(0) * 2))
    });
    assert_eq!(double.call(&[json!(4)]).unwrap(), json!(8));

    let err = double
        .verify()
        .to_be_called_with_args(&[json!(5)])
        .unwrap_err();
    assert_eq!(
        err.message(),
        "Function \"double\" received unexpected arg `4<number>` at parameter position 1 (expected `5<number>`)."
    );
    assert_eq!(
        err.code_that_threw(),
        ".verify().to_be_called_with_args(&[json!(5)])"
    );
}
