use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateThemeRequest, PopularThemeQuery, ThemeResponse},
    services::ThemeService,
};
use crate::{
    auth::extractors::AdminMember,
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/themes", get(list_themes).post(create_theme))
        .route("/themes/popular", get(list_popular_themes))
        .route("/themes/:id", delete(delete_theme))
}

#[instrument(skip(state))]
pub async fn list_themes(State(state): State<AppState>) -> AppResult<Json<Vec<ThemeResponse>>> {
    let themes = ThemeService::new(&state.db).get_themes().await?;
    Ok(Json(themes.into_iter().map(ThemeResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn list_popular_themes(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PopularThemeQuery>,
) -> AppResult<Json<Vec<ThemeResponse>>> {
    let today = state.now().date();
    let themes = ThemeService::new(&state.db)
        .get_popular_themes(query, today)
        .await?;
    Ok(Json(themes.into_iter().map(ThemeResponse::from).collect()))
}

#[instrument(skip(state, admin, payload), fields(admin_id = admin.0.id))]
pub async fn create_theme(
    State(state): State<AppState>,
    admin: AdminMember,
    AppJson(payload): AppJson<CreateThemeRequest>,
) -> AppResult<(StatusCode, HeaderMap, Json<ThemeResponse>)> {
    let theme = ThemeService::new(&state.db).add_theme(payload).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/themes/{}", theme.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(theme.into())))
}

#[instrument(skip(state, admin), fields(admin_id = admin.0.id))]
pub async fn delete_theme(
    State(state): State<AppState>,
    admin: AdminMember,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    ThemeService::new(&state.db).delete_theme(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
