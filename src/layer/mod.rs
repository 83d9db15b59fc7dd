use crate::common::RequestContext;
use crate::exception::BoxError;
use crate::manager::ExceptionManager;
use axum::{
    body::{Body, HttpBody},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service, ServiceExt};

/// Tower Layer that turns service errors into exception responses
///
/// Errors returned by the wrapped service are dispatched through the
/// [`ExceptionManager`]. With [`intercept_fallbacks`](Self::intercept_fallbacks)
/// enabled, bare (empty body) `404` and `405` responses are replaced by the
/// manager's not-found and not-allowed responses.
///
/// # Example
/// ```
/// use http_exception::prelude::*;
/// use axum::{Router, routing::get};
/// use std::sync::Arc;
///
/// let manager = Arc::new(ExceptionManager::with_stock_handlers());
/// let app: Router = Router::new()
///     .route("/users", get(|| async { "users" }))
///     .layer(ExceptionLayer::new(manager).intercept_fallbacks(true));
/// ```
#[derive(Clone)]
pub struct ExceptionLayer {
    manager: Arc<ExceptionManager>,
    intercept_fallbacks: bool,
}

impl ExceptionLayer {
    pub fn new(manager: Arc<ExceptionManager>) -> Self {
        Self {
            manager,
            intercept_fallbacks: false,
        }
    }

    pub fn intercept_fallbacks(mut self, enabled: bool) -> Self {
        self.intercept_fallbacks = enabled;
        self
    }
}

impl<S> Layer<S> for ExceptionLayer {
    type Service = ExceptionMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ExceptionMiddleware {
            inner,
            manager: Arc::clone(&self.manager),
            intercept_fallbacks: self.intercept_fallbacks,
        }
    }
}

#[derive(Clone)]
pub struct ExceptionMiddleware<S> {
    inner: S,
    manager: Arc<ExceptionManager>,
    intercept_fallbacks: bool,
}

impl<S> Service<Request<Body>> for ExceptionMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Into<BoxError> + Send,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Readiness is awaited on the clone in `call`, so a failing inner
        // service still produces an exception response.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let context = RequestContext::from_request(&request);
        let manager = Arc::clone(&self.manager);
        let intercept_fallbacks = self.intercept_fallbacks;
        let inner = self.inner.clone();

        Box::pin(async move {
            let response = match inner.oneshot(request).await {
                Ok(response) if intercept_fallbacks => {
                    replace_fallback(&manager, &context, response)
                }
                Ok(response) => response,
                Err(e) => manager.dispatch(&context, e).into_response(),
            };
            Ok(response)
        })
    }
}

fn replace_fallback(
    manager: &ExceptionManager,
    context: &RequestContext,
    response: Response,
) -> Response {
    if response.body().size_hint().exact() != Some(0) {
        return response;
    }

    match response.status() {
        StatusCode::NOT_FOUND => manager.not_found(context).into_response(),
        StatusCode::METHOD_NOT_ALLOWED => {
            let allowed: Vec<String> = response
                .headers()
                .get_all(header::ALLOW)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .flat_map(|value| value.split(','))
                .map(|method| method.trim().to_string())
                .filter(|method| !method.is_empty())
                .collect();
            manager.not_allowed(context, &allowed).into_response()
        }
        _ => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::HttpException;
    use crate::severity::RuntimeFault;
    use axum::{
        Router,
        body::to_bytes,
        routing::get,
    };
    use tower::service_fn;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn router(intercept: bool) -> Router {
        let manager = Arc::new(ExceptionManager::with_stock_handlers());
        Router::new()
            .route("/users", get(|| async { "users" }))
            .route(
                "/empty",
                get(|| async { StatusCode::NOT_FOUND.into_response() }),
            )
            .layer(ExceptionLayer::new(manager).intercept_fallbacks(intercept))
    }

    fn request(method: &str, uri: &str, accept: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ACCEPT, accept)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_service_error_is_dispatched() {
        let manager = Arc::new(ExceptionManager::with_stock_handlers());
        let service = ExceptionLayer::new(manager).layer(service_fn(|_: Request<Body>| async {
            Err::<Response, BoxError>(Box::new(RuntimeFault::fatal("pool exhausted")))
        }));

        let response = service
            .oneshot(request("GET", "/jobs", "application/json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        assert!(body_string(response)
            .await
            .contains(r#""message":"Application error""#));
    }

    #[tokio::test]
    async fn test_http_exception_error_keeps_status() {
        let manager = Arc::new(ExceptionManager::with_stock_handlers());
        let service = ExceptionLayer::new(manager).layer(service_fn(|_: Request<Body>| async {
            Err::<Response, HttpException>(HttpException::too_many_requests())
        }));

        let response = service
            .oneshot(request("GET", "/jobs", "text/plain"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(body_string(response).await.ends_with(") Too Many Requests"));
    }

    #[tokio::test]
    async fn test_unknown_route_uses_not_found() {
        let response = router(true)
            .oneshot(request("GET", "/missing", "application/xml"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/xml; charset=utf-8"
        );
        assert!(body_string(response)
            .await
            .contains("<message>Not found</message>"));
    }

    #[tokio::test]
    async fn test_bare_handler_404_is_replaced() {
        let response = router(true)
            .oneshot(request("GET", "/empty", "text/plain"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.ends_with(") Not found"));
    }

    #[tokio::test]
    async fn test_wrong_method_uses_not_allowed() {
        let response = router(true)
            .oneshot(request("DELETE", "/users", "text/plain"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_string(response).await;
        assert!(body.contains(") Method DELETE not allowed. Must be one of: GET"));
    }

    #[tokio::test]
    async fn test_options_preflight() {
        let response = router(true)
            .oneshot(request("OPTIONS", "/users", "application/json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert!(body_string(response).await.starts_with("Allowed methods: GET"));
    }

    #[tokio::test]
    async fn test_successful_and_uninterested_responses_pass_through() {
        let response = router(true)
            .oneshot(request("GET", "/users", "application/json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "users");

        let response = router(false)
            .oneshot(request("GET", "/missing", "application/json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.is_empty());
    }
}
