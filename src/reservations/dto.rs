use serde::{Deserialize, Serialize};

use super::repo_types::Reservation;
use crate::{parse::format_date, themes::dto::ThemeResponse, times::dto::TimeResponse};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub name: String,
    pub date: String,
    pub time_id: i64,
    pub theme_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationResponse {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub time: TimeResponse,
    pub theme: ThemeResponse,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            name: r.name,
            date: format_date(r.date),
            time: TimeResponse::from_time(&r.time, false),
            theme: r.theme.into(),
        }
    }
}
