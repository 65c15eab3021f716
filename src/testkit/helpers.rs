//! Sample classes for exercising doubles.
//!
//! | Helper | Shape |
//! |--------|-------|
//! | [`class_c`] | `test()` calls `hello()` twice and returns `"World"` |
//! | [`greeter_class`] | constructor stores `name`; `greet` and `shout` read it |
//! | [`vehicle_classes`] | `Vehicle` <- `Car` chain with a getter and an override |
//! | [`empty_class`] | no members of its own |
//!
//! # Example
//!
//! ```rust
//! use understudy::mock;
//! use understudy::testkit::helpers::class_c;
//! use serde_json::json;
//!
//! let mut double = mock(&class_c()).create().unwrap();
//! assert_eq!(double.call("test", &[]).unwrap(), json!("World"));
//! assert_eq!(double.calls("hello"), 2);
//! ```

use crate::reflection::{ClassDef, Receiver};
use crate::value::Value;
use serde_json::json;
use std::sync::Arc;

/// Class whose `test` member calls `hello` twice.
pub fn class_c() -> Arc<ClassDef> {
    ClassDef::builder("C")
        .method("hello", |_, _| Ok(Value::Null))
        .method("test", |this, _| {
            this.call("hello", &[])?;
            this.call("hello", &[])?;
            Ok(json!("World"))
        })
        .build()
}

/// Class with constructor-assigned state.
pub fn greeter_class() -> Arc<ClassDef> {
    ClassDef::builder("Greeter")
        .constructor(|this, args| {
            let name = args.first().cloned().unwrap_or_else(|| json!("World"));
            this.set_field("name", name);
            Ok(())
        })
        .method("greet", |this, args| {
            let name = this.field("name").unwrap_or_default();
            let greeting = args.first().and_then(Value::as_str).unwrap_or("Hello");
            Ok(json!(format!(
                "{}, {}!",
                greeting,
                name.as_str().unwrap_or_default()
            )))
        })
        .method("shout", |this, args| {
            let greeting = this.call("greet", args)?;
            Ok(json!(greeting.as_str().unwrap_or_default().to_uppercase()))
        })
        .build()
}

/// A two-level chain: `Car` extends `Vehicle`.
///
/// Returns `(vehicle, car)`. `Vehicle` declares `wheels` as a getter and
/// `describe`; `Car` overrides `describe` and adds `honk`.
pub fn vehicle_classes() -> (Arc<ClassDef>, Arc<ClassDef>) {
    let vehicle = ClassDef::builder("Vehicle")
        .constructor(|this, args| {
            this.set_field("make", args.first().cloned().unwrap_or(Value::Null));
            Ok(())
        })
        .getter("wheels", |_| json!(4))
        .method("describe", |this, _| {
            let wheels = this.field("wheels").unwrap_or_default();
            Ok(json!(format!("vehicle with {} wheels", wheels)))
        })
        .build();
    let car = ClassDef::builder("Car")
        .extends(&vehicle)
        .constructor(|this, _| {
            this.set_field("doors", json!(4));
            Ok(())
        })
        .method("describe", |this, _| {
            let make = this.field("make").unwrap_or_default();
            Ok(json!(format!("car by {}", make.as_str().unwrap_or("unknown"))))
        })
        .method("honk", |_, _| Ok(json!("beep")))
        .build();
    (vehicle, car)
}

/// Class that defines nothing beyond the root natives.
pub fn empty_class() -> Arc<ClassDef> {
    ClassDef::builder("Empty").build()
}

/// Install test logging once per process.
///
/// Output is captured by the test harness; set `RUST_LOG` to see it.
pub fn init_test_logging() {
    crate::observability::install(true);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_runs_both_constructors() {
        let (_, car) = vehicle_classes();
        let mut instance = car.instantiate(&[json!("Saab")]).unwrap();
        assert_eq!(instance.field("make"), Some(json!("Saab")));
        assert_eq!(instance.field("doors"), Some(json!(4)));
        assert_eq!(instance.field("wheels"), Some(json!(4)));
        assert_eq!(instance.invoke("describe", &[]).unwrap(), json!("car by Saab"));
        assert!(instance.instance_of("Vehicle"));
    }

    #[test]
    fn test_greeter_defaults() {
        let mut greeter = greeter_class().instantiate(&[]).unwrap();
        assert_eq!(
            greeter.invoke("shout", &[json!("Hi")]).unwrap(),
            json!("HI, WORLD!")
        );
    }
}
