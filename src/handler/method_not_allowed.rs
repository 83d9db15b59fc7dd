use super::ExceptionHandler;
use crate::renderer::HtmlPage;

/// Method not allowed handler
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodNotAllowedHandler;

impl ExceptionHandler for MethodNotAllowedHandler {
    fn page(&self) -> HtmlPage<'_> {
        HtmlPage::titled("Method not allowed")
    }
}
