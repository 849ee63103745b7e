use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{AvailableTimesQuery, CreateTimeRequest, TimeResponse},
    services::TimeService,
};
use crate::{
    auth::extractors::AdminMember,
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/times", get(list_times).post(create_time))
        .route("/times/available", get(list_available_times))
        .route("/times/:id", delete(delete_time))
}

#[instrument(skip(state))]
pub async fn list_times(State(state): State<AppState>) -> AppResult<Json<Vec<TimeResponse>>> {
    let times = TimeService::new(&state.db).get_times().await?;
    Ok(Json(
        times
            .iter()
            .map(|t| TimeResponse::from_time(t, false))
            .collect(),
    ))
}

#[instrument(skip(state))]
pub async fn list_available_times(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AvailableTimesQuery>,
) -> AppResult<Json<Vec<TimeResponse>>> {
    let times = TimeService::new(&state.db)
        .get_available_times(&query.date, query.theme_id)
        .await?;
    Ok(Json(times.into_iter().map(TimeResponse::from).collect()))
}

#[instrument(skip(state, admin, payload), fields(admin_id = admin.0.id))]
pub async fn create_time(
    State(state): State<AppState>,
    admin: AdminMember,
    AppJson(payload): AppJson<CreateTimeRequest>,
) -> AppResult<(StatusCode, HeaderMap, Json<TimeResponse>)> {
    let time = TimeService::new(&state.db).add_time(payload).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/times/{}", time.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((
        StatusCode::CREATED,
        headers,
        Json(TimeResponse::from_time(&time, false)),
    ))
}

#[instrument(skip(state, admin), fields(admin_id = admin.0.id))]
pub async fn delete_time(
    State(state): State<AppState>,
    admin: AdminMember,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    TimeService::new(&state.db).delete_time(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
