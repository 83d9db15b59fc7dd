use super::ExceptionHandler;
use crate::common::{ExceptionResponse, RequestContext};
use crate::exception::HttpException;
use crate::negotiation::{Negotiated, negotiate};
use crate::renderer::{HtmlPage, RenderOptions};
use axum::http::StatusCode;

const DETAIL: &str = "The requested page could not be found. \
                      Check the address bar to ensure your URL is spelled correctly.";

/// Route not found handler
///
/// Answers `OPTIONS` requests with a bare `200` plain-text message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundHandler;

impl ExceptionHandler for NotFoundHandler {
    fn page(&self) -> HtmlPage<'_> {
        HtmlPage::titled("Not found").with_detail(DETAIL)
    }

    fn handle(
        &self,
        request: &RequestContext,
        exception: &HttpException,
        options: &RenderOptions<'_>,
    ) -> ExceptionResponse {
        if request.is_options() {
            return ExceptionResponse::new(
                StatusCode::OK,
                Negotiated::text().content_type(),
                exception.message(),
            );
        }

        let negotiated = negotiate(request.accept());
        let body = self.render(negotiated.representation, exception, options);
        ExceptionResponse::new(exception.status(), negotiated.content_type(), body)
    }
}
