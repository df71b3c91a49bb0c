//! Context resolver for extracting the caller's identity from HTTP requests.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use pb_auth::{AUTH_HEADER, AUTH_HEADER_PREFIX, auth_body::AuthBody, jwt::TokenCodec};
use time::{Duration, OffsetDateTime};
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

use crate::auth_token::{authenticate, generate_token};
use crate::ctx::Ctx;
use crate::prelude::*;
use crate::traits::storage::Storage;
use crate::user::UserLoginRequest;

/// The name of the cookie used to store session tokens.
pub const AUTH_TOKEN_COOKIE: &str = "SESSTOKEN";

/// Lifetime of the session cookie. Outlives the token it carries; the token's
/// own `exp` is what the gate enforces.
pub const AUTH_TOKEN_COOKIE_LIFETIME: Duration = Duration::days(7);

/// Middleware for resolving the request context from the session token.
///
/// Reads the token from the session cookie, falling back to a bearer
/// `Authorization` header, validates it and stores the outcome in the
/// request extensions. It never touches storage nor the cookie jar.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use axum::Router;
/// use pb_auth::jwt::TokenCodec;
/// use pb_web::ctx::resolver::mw_ctx_resolver;
///
/// let codec = Arc::new(TokenCodec::new(b"MySuperSecret").unwrap());
/// let app: Router<()> = Router::new()
///     .layer(axum::middleware::from_fn_with_state(codec, mw_ctx_resolver));
/// ```
#[axum::debug_middleware]
pub async fn mw_ctx_resolver(
    State(codec): State<Arc<TokenCodec>>,
    cookies: Cookies,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = cookies
        .get(AUTH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| {
            headers
                .get(AUTH_HEADER)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
                .map(|s| s.to_string())
        })
        .ok_or(pb_auth::error::Error::TokenMissing)
        .and_then(|token| codec.validate(&token))
        .map(|claims| Ctx::new(claims.user_id));

    if let Err(err) = &ctx {
        debug!("Session not resolved: {err}");
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Logs in a user and sets the session cookie.
///
/// Checks the credentials, issues a session token and hands it back both in
/// the body and as an `HttpOnly` cookie.
///
/// # Examples
///
/// ```rust
/// use pb_auth::jwt::TokenCodec;
/// use pb_web::ctx::resolver::login_user;
/// use pb_web::user::UserLoginRequest;
/// use tower_cookies::Cookies;
/// # use pb_web::traits::storage::Storage;
///
/// # fn example(storage: &dyn Storage, codec: &TokenCodec, cookies: &Cookies) -> Result<(), Box<dyn std::error::Error>> {
/// let request = UserLoginRequest::new("alice", "p@ss1234");
/// let body = login_user(&request, storage, codec, cookies)?;
/// println!("Logged in with token: {}", body.access_token);
/// # Ok(())
/// # }
/// ```
pub fn login_user(
    credentials: &UserLoginRequest,
    storage: &dyn Storage,
    codec: &TokenCodec,
    cookies: &Cookies,
) -> Result<AuthBody> {
    let user = authenticate(credentials, storage)?;
    let body = generate_token(&user, codec)?;

    let cookie = Cookie::build((AUTH_TOKEN_COOKIE, body.access_token.clone()))
        .http_only(true)
        .path("/")
        .expires(OffsetDateTime::now_utc() + AUTH_TOKEN_COOKIE_LIFETIME);
    cookies.add(cookie.build());

    Ok(body)
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<std::result::Result<Ctx, pb_auth::error::Error>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{
        Json, Router,
        body::to_bytes,
        http::{StatusCode, header},
        middleware::{from_fn, from_fn_with_state},
        routing::{get, post},
    };
    use pb_auth::claims::SessionIdentity;
    use serde_json::json;
    use tower::ServiceExt;
    use tower_cookies::CookieManagerLayer;

    use super::*;
    use crate::mw_auth::mw_require_auth;
    use crate::traits::memory::MemoryStorage;
    use crate::user::{UserRegister, register_user};

    const SECRET: &[u8] = b"resolver-test-secret";

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(SECRET).unwrap())
    }

    /// Router with one protected route counting how often its handler runs.
    fn protected_app(codec: Arc<TokenCodec>) -> (Router, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new()
            .route(
                "/whoami",
                get(move |ctx: Ctx| async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    ctx.user.id.to_string()
                }),
            )
            .route_layer(from_fn(mw_require_auth))
            .route_layer(from_fn_with_state(codec, mw_ctx_resolver))
            .layer(CookieManagerLayer::new());
        (app, hits)
    }

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn with_cookie(token: &str) -> Request<Body> {
        Request::builder()
            .uri("/whoami")
            .header(header::COOKIE, format!("{AUTH_TOKEN_COOKIE}={token}"))
            .body(Body::empty())
            .unwrap()
    }

    fn signed_with_raw_user_id(user_id: serde_json::Value) -> String {
        let claims = json!({
            "sub": "alice",
            "login": "alice",
            "user_id": user_id,
            "exp": 4_000_000_000_i64,
        });
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    fn alice_token(codec: &TokenCodec) -> String {
        codec
            .issue(&SessionIdentity {
                user_id: 7,
                login: String::from("alice"),
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_never_reaches_handler() {
        let (app, hits) = protected_app(codec());
        let req = Request::builder().uri("/whoami").body(Body::empty()).unwrap();

        let (status, body) = call(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_cookie_attaches_identity() {
        let codec = codec();
        let token = alice_token(&codec);
        let (app, hits) = protected_app(codec);

        let (status, body) = call(app, with_cookie(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "7");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bearer_header_fallback() {
        let codec = codec();
        let token = alice_token(&codec);
        let (app, _) = protected_app(codec);
        let req = Request::builder()
            .uri("/whoami")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let (status, body) = call(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "7");
    }

    #[tokio::test]
    async fn test_invalid_tokens_are_empty_unauthorized() {
        let codec = codec();
        let token = alice_token(&codec);
        let foreign = alice_token(&TokenCodec::new(b"another-secret").unwrap());
        let candidates = [
            token[..token.len() - 4].to_string(),
            String::from("garbage"),
            foreign,
        ];

        for candidate in candidates {
            let (app, hits) = protected_app(codec.clone());
            let (status, body) = call(app, with_cookie(&candidate)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.is_empty());
            assert_eq!(hits.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_integral_float_user_id_is_accepted() {
        let (app, _) = protected_app(codec());
        let token = signed_with_raw_user_id(json!(7.0));

        let (status, body) = call(app, with_cookie(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "7");
    }

    #[tokio::test]
    async fn test_mistyped_user_id_is_internal_error() {
        for user_id in [json!(7.5), json!("7")] {
            let (app, hits) = protected_app(codec());
            let token = signed_with_raw_user_id(user_id);

            let (status, _) = call(app, with_cookie(&token)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(hits.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_ctx_without_resolver_is_unauthorized() {
        let app = Router::new().route("/whoami", get(|ctx: Ctx| async move { ctx.user.id.to_string() }));
        let req = Request::builder().uri("/whoami").body(Body::empty()).unwrap();

        let (status, _) = call(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_sets_http_only_session_cookie() {
        let storage = Arc::new(MemoryStorage::new());
        register_user(
            UserRegister {
                login: String::from("alice"),
                password: String::from("p@ss1234"),
                name: String::from("Alice"),
                age: 30,
            },
            storage.as_ref(),
        )
        .unwrap();
        let codec = codec();
        let app = {
            let codec = codec.clone();
            Router::new()
                .route(
                    "/login",
                    post(
                        move |cookies: Cookies, Json(req): Json<UserLoginRequest>| async move {
                            login_user(&req, storage.as_ref(), &codec, &cookies).map(Json)
                        },
                    ),
                )
                .layer(CookieManagerLayer::new())
        };
        let req = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"login": "alice", "password": "p@ss1234"}).to_string(),
            ))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let cookie = Cookie::parse(set_cookie.as_str()).unwrap();
        assert_eq!(cookie.name(), AUTH_TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: AuthBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(cookie.value(), body.access_token);
        let claims = codec.validate(&body.access_token).unwrap();
        assert_eq!(claims.user_id, 1);

        // The cookie is kept for a week, well past the token's own expiry.
        let expires = cookie.expires_datetime().unwrap();
        let drift = expires - (OffsetDateTime::now_utc() + Duration::days(7));
        assert!(drift.abs() <= Duration::seconds(5), "cookie expires at {expires}");
        assert!(expires.unix_timestamp() > claims.exp);
    }
}
