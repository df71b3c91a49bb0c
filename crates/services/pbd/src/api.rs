use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{
        Path, Query, State,
        rejection::{FormRejection, JsonRejection, QueryRejection},
    },
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use pb_auth::jwt::TokenCodec;
use pb_web::{
    ctx::{
        Ctx,
        resolver::{login_user, mw_ctx_resolver},
    },
    error::Error as WebError,
    mw_auth::mw_require_auth,
    phone::{self, PhonePost, PhonePut, PhoneSearch},
    prelude::Result as WebResult,
    traits::storage::Storage,
    user::{UserLoginRequest, UserRegister, fetch_user_by_name, register_user},
};
use serde_json::json;
use tokio::task::JoinHandle;
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::prelude::*;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub codec: Arc<TokenCodec>,
}

pub fn router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/user/{name}", get(get_user))
        .route(
            "/user/phone",
            post(create_phone).get(search_phones).put(update_phone),
        )
        .route("/user/phone/{id}", delete(delete_phone))
        .route_layer(middleware::from_fn(mw_require_auth))
        .route_layer(middleware::from_fn_with_state(
            state.codec.clone(),
            mw_ctx_resolver,
        ));

    let public_routes = Router::new()
        .route("/user/register", post(register))
        .route("/user/auth", post(login));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

pub async fn setup_api(state: AppState, port: u16) -> Result<JoinHandle<Result<()>>> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::debug!("listening on {}", listener.local_addr()?);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await?;
        Ok(())
    });

    Ok(handle)
}

fn bad_json<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> WebResult<T> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| WebError::BadRequest(rejection.body_text()))
}

async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Form<UserRegister>, FormRejection>,
) -> WebResult<impl IntoResponse> {
    let Form(payload) = payload.map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;
    let user = register_user(payload, state.storage.as_ref())?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    payload: std::result::Result<Json<UserLoginRequest>, JsonRejection>,
) -> WebResult<impl IntoResponse> {
    let payload = bad_json(payload)?;
    let body = login_user(&payload, state.storage.as_ref(), &state.codec, &cookies)?;
    Ok((StatusCode::CREATED, Json(body)))
}

async fn get_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> WebResult<impl IntoResponse> {
    let user = fetch_user_by_name(&name, state.storage.as_ref())?;
    Ok(Json(json!({ "user": user })))
}

#[axum::debug_handler]
async fn create_phone(
    State(state): State<AppState>,
    ctx: Ctx,
    payload: std::result::Result<Json<PhonePost>, JsonRejection>,
) -> WebResult<impl IntoResponse> {
    let payload = bad_json(payload)?;
    let phone = ctx.user.add_phone(payload, state.storage.as_ref())?;
    Ok((StatusCode::CREATED, Json(json!({ "phone": phone }))))
}

async fn search_phones(
    State(state): State<AppState>,
    query: std::result::Result<Query<PhoneSearch>, QueryRejection>,
) -> WebResult<impl IntoResponse> {
    let Query(query) = query.map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;
    let phones = phone::search_phones(&query.q, state.storage.as_ref())?;
    Ok(Json(json!({ "phones": phones })))
}

async fn update_phone(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PhonePut>, JsonRejection>,
) -> WebResult<impl IntoResponse> {
    let payload = bad_json(payload)?;
    let phone = phone::update_phone(payload, state.storage.as_ref())?;
    Ok(Json(json!({ "phone": phone })))
}

async fn delete_phone(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<impl IntoResponse> {
    let id = phone::parse_phone_id(&id)?;
    phone::delete_phone(id, state.storage.as_ref())?;
    Ok(Json(json!({ "message": "phone successfully deleted" })))
}
