use super::ExceptionHandler;
use crate::renderer::HtmlPage;

/// Handler used for every status without a dedicated handler
#[derive(Debug, Clone, Default)]
pub struct DefaultHandler {
    title: Option<String>,
}

impl DefaultHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed HTML title instead of the exception message
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

impl ExceptionHandler for DefaultHandler {
    fn page(&self) -> HtmlPage<'_> {
        HtmlPage {
            title: self.title.as_deref(),
            detail: None,
        }
    }
}
