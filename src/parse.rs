use time::{macros::format_description, Date, Time};

use crate::error::AppError;

/// Parses an ISO calendar date such as `2024-05-01`.
pub fn parse_date(value: &str) -> Result<Date, AppError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::BadRequest(format!("invalid date '{}', expected YYYY-MM-DD", value)))
}

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Parses a time slot such as `10:00`.
pub fn parse_start_at(value: &str) -> Result<Time, AppError> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]"))
        .map_err(|_| AppError::BadRequest(format!("invalid time '{}', expected HH:MM", value)))
}

pub fn format_start_at(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
