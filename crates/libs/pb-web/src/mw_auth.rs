//! Authentication middleware for protecting routes.

use crate::prelude::*;
use axum::{extract::Request, middleware::Next, response::Response};

use super::ctx::Ctx;

/// Middleware that requires a resolved session for a route.
///
/// Must run inside [`mw_ctx_resolver`](crate::ctx::resolver::mw_ctx_resolver).
/// When no valid context exists the request is rejected and the wrapped
/// handler never runs.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use axum::{Router, routing::get, middleware::{from_fn, from_fn_with_state}};
/// use pb_auth::jwt::TokenCodec;
/// use pb_web::{ctx::resolver::mw_ctx_resolver, mw_auth::mw_require_auth};
///
/// let codec = Arc::new(TokenCodec::new(b"MySuperSecret").unwrap());
/// let app: Router<()> = Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(from_fn(mw_require_auth))
///     .route_layer(from_fn_with_state(codec, mw_ctx_resolver));
///
/// async fn protected_handler() -> &'static str {
///     "This requires authentication"
/// }
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}
