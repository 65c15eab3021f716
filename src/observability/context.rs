//! Thread-local engine context.
//!
//! While the engine runs on behalf of a test (building a double, invoking a
//! wrapped member, checking a verifier) it pushes a frame naming what it is
//! doing. Verification errors read these frames to tag engine-internal
//! stack entries, so the rendered stack can drop them without matching on
//! file names.
//!
//! ## Thread Safety
//!
//! - Frames are per thread (via `thread_local!`)
//! - Guards use RAII for automatic cleanup on drop

use std::cell::RefCell;
use std::fmt;

thread_local! {
    static CURRENT_CONTEXT: RefCell<EngineContext> = const { RefCell::new(EngineContext::new()) };
}

/// What the engine is doing in an engine frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineActivity {
    /// Instantiating an Original and wrapping its members
    Constructing,
    /// Running a wrapped member
    Invoking,
    /// Comparing tracked calls against expectations
    Verifying,
}

impl fmt::Display for EngineActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructing => write!(f, "constructing"),
            Self::Invoking => write!(f, "invoking"),
            Self::Verifying => write!(f, "verifying"),
        }
    }
}

/// One engine-owned stack entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFrame {
    pub activity: EngineActivity,
    pub function: String,
}

/// Snapshot of the engine frames active on this thread.
#[derive(Debug, Clone, Default)]
pub struct EngineContext {
    frames: Vec<EngineFrame>,
}

impl EngineContext {
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Frames innermost first.
    pub fn frames(&self) -> impl Iterator<Item = &EngineFrame> {
        self.frames.iter().rev()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// RAII guard popping an engine frame on drop.
pub struct FrameGuard {
    depth: usize,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            ctx.borrow_mut().frames.truncate(self.depth);
        });
    }
}

/// Push an engine frame for the duration of the returned guard.
///
/// # Example
///
/// ```ignore
/// let _frame = enter_frame(EngineActivity::Verifying, "MethodVerifier::to_be_called");
/// // frames pushed here are popped when _frame drops
/// ```
#[must_use]
pub fn enter_frame(activity: EngineActivity, function: impl Into<String>) -> FrameGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        let depth = ctx.frames.len();
        ctx.frames.push(EngineFrame {
            activity,
            function: function.into(),
        });
        FrameGuard { depth }
    })
}

/// Get the current context snapshot.
#[must_use]
pub fn get_current_context() -> EngineContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Reset the current thread's context to empty.
///
/// Useful for testing.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = EngineContext::new();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_guard_pops_on_drop() {
        reset_context();

        let _outer = enter_frame(EngineActivity::Invoking, "Mock::call test");
        {
            let _inner = enter_frame(EngineActivity::Invoking, "Mock::call hello");
            let ctx = get_current_context();
            let names: Vec<&str> = ctx.frames().map(|f| f.function.as_str()).collect();
            assert_eq!(names, vec!["Mock::call hello", "Mock::call test"]);
        }

        assert_eq!(get_current_context().depth(), 1);
    }

    #[test]
    fn test_empty_context_by_default() {
        reset_context();
        assert_eq!(get_current_context().depth(), 0);
    }

    #[test]
    fn test_frames_record_activity() {
        reset_context();
        let _frame = enter_frame(EngineActivity::Verifying, "Verifier::to_be_called");
        let ctx = get_current_context();
        let frame = ctx.frames().next().unwrap();
        assert_eq!(frame.activity, EngineActivity::Verifying);
    }

    #[test]
    fn test_activity_display() {
        assert_eq!(EngineActivity::Constructing.to_string(), "constructing");
        assert_eq!(EngineActivity::Invoking.to_string(), "invoking");
        assert_eq!(EngineActivity::Verifying.to_string(), "verifying");
    }
}
