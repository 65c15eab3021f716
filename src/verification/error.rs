//! Verification failures and their concise stack rendering.
//!
//! A [`VerificationError`] carries four pieces: a sentence describing the
//! mismatch, the literal verification call that would have passed, and the
//! actual and expected results. Its stack is assembled from explicitly
//! tagged frames: engine frames come from the thread-local engine context,
//! and the external frame is the test code location captured with
//! `#[track_caller]`. Rendering drops every engine frame and keeps only the
//! error line plus the first external frame.

use crate::config::{active_config, VerificationConfig};
use crate::observability::{get_current_context, EngineActivity};
use colored::Colorize;
use std::fmt;
use std::panic::Location;

/// Who a stack frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOrigin {
    Engine,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub origin: FrameOrigin,
    /// What the engine was doing; engine frames only.
    pub activity: Option<EngineActivity>,
    pub function: Option<String>,
    pub location: Option<SourceLocation>,
}

impl Frame {
    pub fn engine(activity: EngineActivity, function: impl Into<String>) -> Self {
        Self {
            origin: FrameOrigin::Engine,
            activity: Some(activity),
            function: Some(function.into()),
            location: None,
        }
    }

    pub fn external(location: &Location<'_>) -> Self {
        Self {
            origin: FrameOrigin::External,
            activity: None,
            function: None,
            location: Some(location.into()),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.function, &self.location) {
            (Some(function), Some(location)) => write!(f, "    at {} ({})", function, location)?,
            (Some(function), None) => write!(f, "    at {}", function)?,
            (None, Some(location)) => write!(f, "    at {}", location)?,
            (None, None) => write!(f, "    at <unknown>")?,
        }
        match self.activity {
            Some(activity) => write!(f, " [{}]", activity),
            None => Ok(()),
        }
    }
}

/// A mismatch between tracked calls and what the test expected.
#[derive(Clone, thiserror::Error)]
#[error("{stack}")]
pub struct VerificationError {
    message: String,
    code_that_threw: String,
    actual_results: String,
    expected_results: String,
    frames: Vec<Frame>,
    stack: String,
}

/// Alias used where the failure concerns a method of a double.
pub type MethodVerificationError = VerificationError;

impl VerificationError {
    /// Build an error whose external frame is `caller`, rendered with the
    /// active configuration.
    pub fn new(
        message: impl Into<String>,
        code_that_threw: impl Into<String>,
        actual_results: impl Into<String>,
        expected_results: impl Into<String>,
        caller: &Location<'_>,
    ) -> Self {
        let context = get_current_context();
        let mut frames: Vec<Frame> = context
            .frames()
            .map(|frame| Frame::engine(frame.activity, frame.function.clone()))
            .collect();
        frames.push(Frame::external(caller));
        Self::with_frames(
            message,
            code_that_threw,
            actual_results,
            expected_results,
            frames,
            &active_config().verification,
        )
    }

    /// Build an error from an explicit frame list, innermost first.
    pub fn with_frames(
        message: impl Into<String>,
        code_that_threw: impl Into<String>,
        actual_results: impl Into<String>,
        expected_results: impl Into<String>,
        frames: Vec<Frame>,
        config: &VerificationConfig,
    ) -> Self {
        let mut error = Self {
            message: message.into(),
            code_that_threw: code_that_threw.into(),
            actual_results: actual_results.into(),
            expected_results: expected_results.into(),
            frames,
            stack: String::new(),
        };
        error.stack = error.render_concise_stack(config);
        error
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The verification call that would have passed.
    pub fn code_that_threw(&self) -> &str {
        &self.code_that_threw
    }

    pub fn actual_results(&self) -> &str {
        &self.actual_results
    }

    pub fn expected_results(&self) -> &str {
        &self.expected_results
    }

    /// Every recorded frame, engine frames included.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The first frame that belongs to test code.
    pub fn external_frame(&self) -> Option<&Frame> {
        self.frames
            .iter()
            .find(|frame| frame.origin == FrameOrigin::External)
    }

    /// The rendered diagnostic.
    pub fn stack(&self) -> &str {
        &self.stack
    }

    fn render_concise_stack(&self, config: &VerificationConfig) -> String {
        let external = self.external_frame();
        for frame in self.frames.iter().filter(|f| f.origin == FrameOrigin::Engine) {
            log::trace!("Omitting engine frame from verification stack:{}", frame);
        }

        let mut stack = format!("VerificationError: {}", self.message);
        if let Some(frame) = external {
            stack.push('\n');
            stack.push_str(&frame.to_string());
        }

        let header = if config.color {
            "Verification Results:".red().bold().to_string()
        } else {
            "Verification Results:".to_string()
        };
        stack.push_str(&format!(
            "\n\n{}\n    {}\n    {}",
            header, self.actual_results, self.expected_results
        ));

        let location = external.and_then(|frame| frame.location.as_ref());
        if let (true, Some(location)) = (config.fix_hint, location) {
            stack.push_str(&format!(
                "\n\nCheck the above '{}' file at/around line {} for code like the following to fix this error:\n    {}",
                location.file, location.line, self.code_that_threw
            ));
        }

        stack
    }
}

impl fmt::Debug for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\n{}\n\n", self.stack)
    }
}
