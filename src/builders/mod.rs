//! Double builders.
//!
//! | Flavor | Unconfigured member | Tracks calls |
//! |--------|---------------------|--------------|
//! | [`Mock`] | runs the Original's code | yes |
//! | [`Fake`] | runs the Original's code | no |
//! | [`Spy`] | returns the sentinel | yes |
//! | [`spy_on`] | returns the sentinel or a given value | yes |
//! | [`stub`] | returns the sentinel or a given value | no |
//!
//! Whole-object flavors are built from a class through [`Builder`];
//! single-member spies and stubs patch an existing [`Instance`] in place.
//!
//! [`Instance`]: crate::reflection::Instance

pub mod builder;
mod core;
pub mod fake;
pub mod function;
pub mod mock;
pub mod spy;
pub mod stub;
pub mod tracked;

pub use self::core::DoubleKind;
pub use builder::{Builder, Flavor};
pub use fake::{fake, Fake, FakeBuilder};
pub use function::{spy_fn, FunctionSpy};
pub use mock::{mock, Mock, MockBuilder};
pub use spy::{spy, spy_on, MemberSpy, Spy, SpyBuilder};
pub use stub::{stub, stub_fn, StubFn};
pub use tracked::{CallRegistry, TrackedMember};
