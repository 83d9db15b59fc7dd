//! Pure exception renderers
//!
//! Each renderer turns an [`HttpException`] into a response body. Rendering is
//! deterministic and side-effect free: the same exception rendered twice with
//! the same options yields identical bytes.
//!
//! Identifier and message are embedded verbatim unless
//! [`RenderOptions::escape`] is set. Debug traces and cause chains are always
//! escaped.

use crate::exception::HttpException;
use crate::negotiation::Representation;
use crate::trace::Frame;
use serde::Serialize;

pub mod html;
pub mod json;
pub mod text;
pub mod xml;

pub use html::HtmlPage;

/// Knobs shared by every renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    /// Escape identifier and message for the target format
    pub escape: bool,
    /// Filtered debug trace to append, if any
    pub trace: Option<&'a [Frame]>,
    /// Append the exception's cause chain
    pub causes: bool,
}

impl<'a> RenderOptions<'a> {
    pub fn with_trace(mut self, trace: &'a [Frame]) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn with_causes(mut self) -> Self {
        self.causes = true;
        self
    }
}

/// One link of an exception's cause chain, as shown in debug output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CauseEntry {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

/// Summarize the cause chain of `exception`, closest cause first.
///
/// Links that are themselves exceptions report their status and code.
pub fn cause_entries(exception: &HttpException) -> Vec<CauseEntry> {
    exception
        .causes()
        .map(|cause| match cause.downcast_ref::<HttpException>() {
            Some(http) => CauseEntry {
                message: http.message().to_string(),
                status: Some(http.status().as_u16()),
                code: http.code(),
            },
            None => CauseEntry {
                message: cause.to_string(),
                status: None,
                code: None,
            },
        })
        .collect()
}

/// Render `exception` in the given representation
pub fn render(
    representation: Representation,
    exception: &HttpException,
    page: &HtmlPage<'_>,
    options: &RenderOptions<'_>,
) -> String {
    match representation {
        Representation::Json => json::render(exception, options),
        Representation::Xml => xml::render(exception, options),
        Representation::Html => html::render(exception, page, options),
        Representation::Text => text::render(exception, options),
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for XML and HTML output
pub(crate) fn escape_markup(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub(crate) fn markup_field(value: &str, escape: bool) -> String {
    if escape {
        escape_markup(value)
    } else {
        value.to_string()
    }
}
