use axum::{
    extract::{FromRef, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    cookie::{expired_cookie, session_cookie},
    dto::{CheckResponse, LoginRequest, PublicMember, RegisterRequest},
    extractors::LoginMember,
    jwt::JwtKeys,
    services::AuthService,
};
use crate::{
    error::{AppError, AppResult},
    extract::AppJson,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/members", post(register))
        .route("/login", post(login))
        .route("/login/check", get(check))
        .route("/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<PublicMember>)> {
    let member = AuthService::new(&state.db).register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(PublicMember {
            id: member.id,
            email: member.email,
            name: member.name,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<(HeaderMap, Json<CheckResponse>)> {
    let member = AuthService::new(&state.db).authenticate(payload).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&member)?;
    let cookie = HeaderValue::from_str(&session_cookie(&token, keys.ttl.as_secs()))
        .map_err(|e| AppError::Internal(e.into()))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, cookie);
    Ok((headers, Json(CheckResponse { name: member.name })))
}

#[instrument(skip(state))]
pub async fn check(
    State(state): State<AppState>,
    member: LoginMember,
) -> AppResult<Json<CheckResponse>> {
    let member = AuthService::new(&state.db).find_member(member.id).await?;
    Ok(Json(CheckResponse { name: member.name }))
}

#[instrument]
pub async fn logout() -> AppResult<(HeaderMap, StatusCode)> {
    let cookie =
        HeaderValue::from_str(&expired_cookie()).map_err(|e| AppError::Internal(e.into()))?;
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, cookie);
    Ok((headers, StatusCode::OK))
}
