//! Exception handlers
//!
//! A handler turns a classified exception into a response for one request.
//! The manager picks the handler registered for the exception's status code,
//! or the default handler.

use crate::common::{ExceptionResponse, RequestContext};
use crate::exception::HttpException;
use crate::negotiation::{Representation, negotiate};
use crate::renderer::{self, HtmlPage, RenderOptions};

mod default;
mod method_not_allowed;
mod not_found;

pub use default::DefaultHandler;
pub use method_not_allowed::MethodNotAllowedHandler;
pub use not_found::NotFoundHandler;

/// The ExceptionHandler trait
///
/// Only [`page`](Self::page) usually needs overriding: rendering and response
/// building have defaults built on the stock renderers.
pub trait ExceptionHandler: Send + Sync + 'static {
    /// Fixed HTML content contributed by this handler
    fn page(&self) -> HtmlPage<'_> {
        HtmlPage::default()
    }

    /// Render the body for a negotiated representation. Must be pure.
    fn render(
        &self,
        representation: Representation,
        exception: &HttpException,
        options: &RenderOptions<'_>,
    ) -> String {
        renderer::render(representation, exception, &self.page(), options)
    }

    /// Negotiate a representation and build the response
    fn handle(
        &self,
        request: &RequestContext,
        exception: &HttpException,
        options: &RenderOptions<'_>,
    ) -> ExceptionResponse {
        let negotiated = negotiate(request.accept());
        let body = self.render(negotiated.representation, exception, options);
        ExceptionResponse::new(exception.status(), negotiated.content_type(), body)
    }
}
