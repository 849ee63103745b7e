use sqlx::SqlitePool;
use tracing::{info, warn};

use super::{
    dto::CreateTimeRequest,
    repo::TimeRepository,
    repo_types::{AvailableTime, ReservationTime},
};
use crate::{
    db::is_unique_violation,
    error::{AppError, AppResult},
    parse::{format_start_at, parse_date, parse_start_at},
    reservations::repo::ReservationRepository,
};

pub struct TimeService<'a> {
    db: &'a SqlitePool,
}

impl<'a> TimeService<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn get_times(&self) -> AppResult<Vec<ReservationTime>> {
        Ok(TimeRepository::new(self.db).find_all().await?)
    }

    pub async fn get_available_times(
        &self,
        date: &str,
        theme_id: i64,
    ) -> AppResult<Vec<AvailableTime>> {
        let date = parse_date(date)?;
        Ok(TimeRepository::new(self.db)
            .find_all_available(date, theme_id)
            .await?)
    }

    pub async fn add_time(&self, request: CreateTimeRequest) -> AppResult<ReservationTime> {
        let start_at = parse_start_at(&request.start_at)?;

        match TimeRepository::new(self.db).save(start_at).await {
            Ok(time) => {
                info!(time_id = time.id, start_at = %format_start_at(start_at), "time added");
                Ok(time)
            }
            Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(format!(
                "time {} already exists",
                format_start_at(start_at)
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a slot no reservation points at.
    pub async fn delete_time(&self, id: i64) -> AppResult<()> {
        if ReservationRepository::new(self.db).exists_by_time_id(id).await? {
            warn!(time_id = id, "refusing to delete referenced time");
            return Err(AppError::Conflict(format!(
                "time {} is referenced by reservations",
                id
            )));
        }

        match TimeRepository::new(self.db).delete(id).await? {
            0 => Err(AppError::TimeNotFound(id)),
            _ => {
                info!(time_id = id, "time deleted");
                Ok(())
            }
        }
    }
}
