// Shared fixtures for understudy integration tests
#![allow(dead_code)]

use serde_json::json;
use std::sync::Arc;
use understudy::reflection::{ClassDef, Receiver};
use understudy::Value;

pub use understudy::testkit::{class_c, empty_class, greeter_class, vehicle_classes};

/// Set up test logging once per test binary.
pub fn setup() {
    understudy::testkit::init_test_logging();
}

/// Class whose `pay` member delegates to `charge` and `receipt`.
pub fn checkout_class() -> Arc<ClassDef> {
    ClassDef::builder("Checkout")
        .constructor(|this, args| {
            this.set_field("currency", args.first().cloned().unwrap_or(json!("EUR")));
            this.set_field("total", json!(0));
            Ok(())
        })
        .method("charge", |this, args| {
            let amount = args.first().and_then(Value::as_i64).unwrap_or(0);
            let total = this.field("total").and_then(|v| v.as_i64()).unwrap_or(0) + amount;
            this.set_field("total", json!(total));
            Ok(json!(total))
        })
        .method("receipt", |this, _| {
            let total = this.field("total").unwrap_or_default();
            let currency = this.field("currency").unwrap_or_default();
            Ok(json!(format!(
                "{} {}",
                total,
                currency.as_str().unwrap_or_default()
            )))
        })
        .method("pay", |this, args| {
            this.call("charge", args)?;
            this.call("receipt", &[])
        })
        .build()
}
