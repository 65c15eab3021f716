//! Test doubles with call tracking and diagnostic verification.
//!
//! `understudy` builds substitutes for objects described by a
//! [`ClassDef`](reflection::ClassDef): mocks, fakes, spies and stubs. Doubles
//! record how their members were invoked, and verifiers turn mismatches into
//! errors that point back at the failing line of test code.
//!
//! ```rust
//! use understudy::{mock, ClassDef};
//! use serde_json::json;
//!
//! let class = ClassDef::builder("Counter")
//!     .method("tick", |_, _| Ok(json!(1)))
//!     .build();
//! let mut counter = mock(&class).create().unwrap();
//! counter.call("tick", &[]).unwrap();
//! assert_eq!(counter.calls("tick"), 1);
//! ```

pub mod builders;
pub mod config;
pub mod errors;
pub mod observability;
pub mod pre_programmed;
pub mod reflection;
pub mod testkit;
pub mod value;
pub mod verification;

pub use crate::builders::{
    fake, mock, spy, spy_fn, spy_on, stub, stub_fn, Builder, DoubleKind, Fake, FunctionSpy,
    MemberSpy, Mock, Spy, StubFn,
};
pub use crate::config::{active_config, load_config, set_active_config, DoublesConfig};
pub use crate::errors::{DoubleError, Raised, Result};
pub use crate::pre_programmed::PreProgrammedMethod;
pub use crate::reflection::{ClassDef, Instance, Receiver};
pub use crate::value::Value;
pub use crate::verification::{MethodExpectation, VerificationError, Verifier};
