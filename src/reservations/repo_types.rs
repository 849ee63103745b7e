use sqlx::FromRow;
use time::Date;

use crate::{
    themes::repo_types::Theme,
    times::repo_types::{decode_start_at, ReservationTime},
};

/// Reservation joined with its time slot and theme, one column per field.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    pub id: i64,
    pub name: String,
    pub date: Date,
    pub time_id: i64,
    pub time_start_at: String,
    pub theme_id: i64,
    pub theme_name: String,
    pub theme_description: String,
    pub theme_thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: i64,
    pub name: String,
    pub date: Date,
    pub time: ReservationTime,
    pub theme: Theme,
}

/// A reservation that passed validation and is ready to be stored.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub name: String,
    pub date: Date,
    pub time_id: i64,
    pub theme_id: i64,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = sqlx::Error;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            date: row.date,
            time: ReservationTime {
                id: row.time_id,
                start_at: decode_start_at(&row.time_start_at)?,
            },
            theme: Theme {
                id: row.theme_id,
                name: row.theme_name,
                description: row.theme_description,
                thumbnail: row.theme_thumbnail,
            },
        })
    }
}
