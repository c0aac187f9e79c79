//! Request logging middleware.

use axum::{
    extract::{MatchedPath, Request},
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

/// Name of the registration operation a matched route and method serve.
///
/// The `/api` mount is folded into the bare routes.
pub fn operation_name(method: &Method, route: Option<&str>) -> &'static str {
    let Some(route) = route else {
        return "unmatched";
    };
    let route = route.strip_prefix("/api").unwrap_or(route);

    match (method.as_str(), route) {
        ("POST", "/registrations") => "create_registration",
        ("GET", "/registrations") => "list_registrations",
        ("GET", "/registrations/phone/:phone") => "get_registration_by_phone",
        ("PUT", "/registrations/:id") => "update_registration",
        ("GET", "/health") => "health",
        _ => "method_not_allowed",
    }
}

/// Logs each request with the registration operation it maps to.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned());
    let operation = operation_name(&method, route.as_deref());
    let start = std::time::Instant::now();

    debug!(%method, %uri, operation, "Registration request started");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %uri, operation, %status, ?duration, "Registration request completed");
    } else {
        warn!(%method, %uri, operation, %status, ?duration, "Registration request failed");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_name() {
        assert_eq!(
            operation_name(&Method::POST, Some("/registrations")),
            "create_registration"
        );
        assert_eq!(
            operation_name(&Method::GET, Some("/api/registrations/phone/:phone")),
            "get_registration_by_phone"
        );
        assert_eq!(
            operation_name(&Method::PUT, Some("/registrations/:id")),
            "update_registration"
        );
        assert_eq!(operation_name(&Method::GET, Some("/api/health")), "health");
        assert_eq!(
            operation_name(&Method::DELETE, Some("/registrations/:id")),
            "method_not_allowed"
        );
        assert_eq!(operation_name(&Method::GET, None), "unmatched");
    }
}
