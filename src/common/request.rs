use crate::negotiation::parse_accept;
use axum::http::{HeaderMap, Method, Request, Uri, header, request::Parts};

/// The slice of an incoming request the exception subsystem needs
///
/// Captured before the request is handed to the inner service, so it can be
/// used after the request itself has been consumed.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    accept: Vec<String>,
}

impl RequestContext {
    /// Create a context with no media type preferences
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            accept: Vec::new(),
        }
    }

    /// Build from method, URI and the `Accept` header(s)
    pub fn from_headers(method: Method, uri: Uri, headers: &HeaderMap) -> Self {
        let accept = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(",");

        Self {
            method,
            uri,
            accept: parse_accept(&accept),
        }
    }

    pub fn from_parts(parts: &Parts) -> Self {
        Self::from_headers(parts.method.clone(), parts.uri.clone(), &parts.headers)
    }

    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::from_headers(
            request.method().clone(),
            request.uri().clone(),
            request.headers(),
        )
    }

    /// Override the preferences, most preferred first
    pub fn with_accept<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accept = preferences.into_iter().map(Into::into).collect();
        self
    }

    /// Force plain text negotiation
    pub fn accept_text(self) -> Self {
        self.with_accept(["text/plain"])
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn accept(&self) -> &[String] {
        &self.accept
    }

    pub fn is_options(&self) -> bool {
        self.method == Method::OPTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_from_request_reads_accept() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/users?page=2")
            .header(header::ACCEPT, "text/html;q=0.5")
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();

        let context = RequestContext::from_request(&request);
        assert_eq!(context.method(), Method::POST);
        assert_eq!(context.uri().to_string(), "/users?page=2");
        assert_eq!(context.accept(), ["application/json", "text/html"]);
        assert!(!context.is_options());
    }

    #[test]
    fn test_accept_override() {
        let context = RequestContext::new(Method::OPTIONS, Uri::from_static("/"))
            .with_accept(["application/xml"])
            .accept_text();

        assert_eq!(context.accept(), ["text/plain"]);
        assert!(context.is_options());
    }
}
