mod common;

use common::{greeter_class, setup, vehicle_classes};
use pretty_assertions::assert_eq;
use serde_json::json;
use understudy::{assert_contains_error, assert_result_ok, stub, stub_fn, Receiver};

#[test]
fn test_stub_method_is_seen_by_callers() {
    setup();
    let mut greeter = greeter_class().instantiate(&[json!("Linus")]).unwrap();
    stub(&mut greeter, "greet", Some(json!("hey"))).unwrap();

    assert_eq!(greeter.invoke("greet", &[]).unwrap(), json!("hey"));
    assert_eq!(greeter.invoke("shout", &[]).unwrap(), json!("HEY"));
}

#[test]
fn test_stub_field_returns_same_instance() {
    setup();
    let mut greeter = greeter_class().instantiate(&[]).unwrap();
    let same = assert_result_ok!(stub(&mut greeter, "name", Some(json!("Ada"))));
    assert_eq!(same.invoke("greet", &[]).unwrap(), json!("Hello, Ada!"));
    assert_eq!(greeter.field("name"), Some(json!("Ada")));
}

#[test]
fn test_stub_inherited_members() {
    setup();
    let (_, car) = vehicle_classes();
    let mut instance = car.instantiate(&[]).unwrap();

    stub(&mut instance, "wheels", Some(json!(3))).unwrap();
    stub(&mut instance, "honk", None).unwrap();

    assert_eq!(instance.field("wheels"), Some(json!(3)));
    assert_eq!(instance.invoke("honk", &[]).unwrap(), json!("stubbed"));
}

#[test]
fn test_stub_does_not_touch_other_instances() {
    setup();
    let class = greeter_class();
    let mut stubbed = class.instantiate(&[]).unwrap();
    let mut untouched = class.instantiate(&[]).unwrap();
    stub(&mut stubbed, "greet", None).unwrap();

    assert_eq!(untouched.invoke("greet", &[]).unwrap(), json!("Hello, World!"));
}

#[test]
fn test_stub_missing_member() {
    setup();
    let mut greeter = greeter_class().instantiate(&[]).unwrap();
    let err = assert_contains_error!(stub(&mut greeter, "wave", None), "does not exist");
    assert_eq!(err.name(), "StubError");
}

#[test]
fn test_standalone_stub_function() {
    setup();
    let stub = stub_fn();
    assert_eq!(stub.call(&[]), json!("stubbed"));
    assert_eq!(stub.call(&[json!(1), json!(2)]), json!("stubbed"));
}
