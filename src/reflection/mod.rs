//! Shared reflection base.
//!
//! Rust has no runtime introspection over arbitrary types, so an Original is
//! described by an explicit registry: a [`ClassDef`] naming its methods,
//! getters and constructor, and an [`Instance`] holding its state. Doubles
//! are built by enumerating that registry.
//!
//! ## Usage
//!
//! ```rust
//! use understudy::reflection::{enumerate_invocable_members, ClassDef};
//! use serde_json::json;
//!
//! let class = ClassDef::builder("Lamp")
//!     .method("on", |_, _| Ok(json!(true)))
//!     .method("off", |_, _| Ok(json!(false)))
//!     .build();
//! let lamp = class.instantiate(&[]).unwrap();
//! assert_eq!(enumerate_invocable_members(&lamp), vec!["off", "on"]);
//! ```

pub mod class;
pub mod instance;
pub mod members;

pub use class::{
    constructor_error, member_fn, ClassBuilder, ClassDef, ConstructorFn, GetterFn, MemberFn,
};
pub use instance::{Instance, Receiver};
pub(crate) use instance::read_field;
pub use members::{
    copy_data_members, enumerate_data_members, enumerate_invocable_members,
    enumerate_invocable_members_filtered, enumerate_native_members, is_native, DataMember,
    NativeDenyList, NATIVE_MEMBERS,
};
