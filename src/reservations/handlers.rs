use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateReservationRequest, ReservationResponse},
    services::ReservationService,
};
use crate::{
    error::AppResult,
    extract::{AppJson, AppPath},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list_reservations).post(create_reservation))
        .route("/reservations/:id", delete(delete_reservation))
}

#[instrument(skip(state))]
pub async fn list_reservations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    let reservations = ReservationService::new(&state.db).get_reservations().await?;
    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

#[instrument(skip(state))]
pub async fn create_reservation(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateReservationRequest>,
) -> AppResult<(StatusCode, HeaderMap, Json<ReservationResponse>)> {
    let now = state.now();
    let reservation = ReservationService::new(&state.db)
        .add_reservation(payload, now)
        .await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/reservations/{}", reservation.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(reservation.into())))
}

#[instrument(skip(state))]
pub async fn delete_reservation(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    ReservationService::new(&state.db).delete_reservation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
