use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        HeaderValue, Method,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::ApiError;

/// Origin allowed to call the API, `None` when only same-origin calls are.
#[derive(Clone, Debug)]
pub(crate) struct AllowedOrigin(pub Option<HeaderValue>);

impl AllowedOrigin {
    fn permits(&self, origin: &HeaderValue) -> bool {
        self.0.as_ref() == Some(origin)
    }
}

pub(crate) fn cors_layer(allowed: &AllowedOrigin) -> CorsLayer {
    let origin = match &allowed.0 {
        Some(origin) => AllowOrigin::list([origin.clone()]),
        None => AllowOrigin::list(Vec::<HeaderValue>::new()),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// Stops cross-origin requests from other origins before any handler runs.
/// Requests without an `Origin` header go through.
pub(crate) async fn origin_guard(
    State(allowed): State<AllowedOrigin>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN) {
        if !allowed.permits(origin) {
            warn!("origin_guard rejected origin={:?}", origin);
            return ApiError::OriginNotAllowed.into_response();
        }
    }
    next.run(request).await
}
