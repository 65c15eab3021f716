//! Observability infrastructure: engine frames and logging setup.
//!
//! ## Features
//!
//! - **Engine Frames**: Thread-local record of what the engine is doing,
//!   used to tag internal stack entries in verification errors
//! - **Logging**: One-shot `env_logger` and `tracing` initialization
//!
//! ## Usage
//!
//! ```ignore
//! use understudy::observability::init_logging;
//!
//! fn main() {
//!     init_logging();
//!     // RUST_LOG=understudy=trace shows every tracked call
//! }
//! ```

pub mod context;

pub use context::{
    enter_frame, get_current_context, reset_context, EngineActivity, EngineContext, EngineFrame,
    FrameGuard,
};

use std::sync::Once;

static INIT: Once = Once::new();

/// Install `env_logger` for `log` records and a `tracing` subscriber for
/// spans, both filtered by `RUST_LOG`. Safe to call more than once.
pub fn init_logging() {
    install(false);
}

pub(crate) fn install(is_test: bool) {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(is_test).try_init();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
        let _ = if is_test {
            subscriber.with_test_writer().try_init()
        } else {
            subscriber.try_init()
        };
    });
}
