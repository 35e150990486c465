use axum::http::{header, HeaderName, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::stack::api::ROUTES;

/// Preflight handling for the front door. Origins are mirrored since credentials are allowed.
pub fn configure_cors() -> CorsLayer {
    let mut methods = vec![Method::OPTIONS];
    for method in ROUTES.iter().flat_map(|route| route.methods.iter()) {
        if !methods.contains(method) {
            methods.push(method.clone());
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(methods)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-amz-date"),
            HeaderName::from_static("x-api-key"),
            HeaderName::from_static("x-amz-security-token"),
        ])
        .allow_credentials(true)
}
