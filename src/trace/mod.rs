//! Debug call traces
//!
//! A [`Frame`] is an immutable snapshot of one call-stack entry. Traces are
//! ordered most-recent-call-first. [`FrameFilter`] trims a trace down to the
//! part that matters to the application developer, dropping the frames that
//! belong to the exception dispatch machinery.

use serde::Serialize;

mod capture;
mod filter;

pub use capture::capture;
pub use filter::FrameFilter;

/// Explicit boundary marker attached to a frame by the code that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameMarker {
    /// Frame belongs to the exception dispatch machinery
    Dispatch,
    /// The host pipeline's top-level request invocation
    PipelineEntry,
    /// The host pipeline's centralized exception handling entry
    PipelineExceptionEntry,
}

/// One entry of a captured call stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub function: Option<String>,
    pub class: Option<String>,
    pub args: Vec<String>,
    #[serde(skip)]
    pub marker: Option<FrameMarker>,
}

impl Frame {
    pub fn new(class: Option<&str>, function: &str) -> Self {
        Self {
            file: None,
            line: None,
            function: Some(function.to_string()),
            class: class.map(str::to_string),
            args: Vec::new(),
            marker: None,
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn marked(mut self, marker: FrameMarker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// `class::function`, or the bare function name for free functions
    pub fn callable(&self) -> String {
        match (&self.class, &self.function) {
            (Some(class), Some(function)) => format!("{}::{}", class, function),
            (None, Some(function)) => function.clone(),
            (Some(class), None) => class.clone(),
            (None, None) => String::new(),
        }
    }
}
