use sqlx::FromRow;
use time::{macros::format_description, Time};

/// `reservation_time` row as stored; `start_at` is kept as `HH:MM` text.
#[derive(Debug, Clone, FromRow)]
pub struct TimeRow {
    pub id: i64,
    pub start_at: String,
}

/// Time slot joined with whether it is taken for a given date and theme.
#[derive(Debug, Clone, FromRow)]
pub struct AvailableTimeRow {
    pub id: i64,
    pub start_at: String,
    pub already_booked: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationTime {
    pub id: i64,
    pub start_at: Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableTime {
    pub time: ReservationTime,
    pub already_booked: bool,
}

pub(crate) fn decode_start_at(raw: &str) -> Result<Time, sqlx::Error> {
    Time::parse(raw, format_description!("[hour]:[minute]"))
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

impl TryFrom<TimeRow> for ReservationTime {
    type Error = sqlx::Error;

    fn try_from(row: TimeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            start_at: decode_start_at(&row.start_at)?,
        })
    }
}

impl TryFrom<AvailableTimeRow> for AvailableTime {
    type Error = sqlx::Error;

    fn try_from(row: AvailableTimeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            time: ReservationTime {
                id: row.id,
                start_at: decode_start_at(&row.start_at)?,
            },
            already_booked: row.already_booked != 0,
        })
    }
}
