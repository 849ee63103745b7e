use serde::{Deserialize, Serialize};

use super::repo_types::{AvailableTime, ReservationTime};
use crate::parse::format_start_at;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeResponse {
    pub id: i64,
    pub start_at: String,
    pub already_booked: bool,
}

impl TimeResponse {
    pub fn from_time(time: &ReservationTime, already_booked: bool) -> Self {
        Self {
            id: time.id,
            start_at: format_start_at(time.start_at),
            already_booked,
        }
    }
}

impl From<AvailableTime> for TimeResponse {
    fn from(available: AvailableTime) -> Self {
        Self::from_time(&available.time, available.already_booked)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeRequest {
    pub start_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTimesQuery {
    pub date: String,
    pub theme_id: i64,
}
