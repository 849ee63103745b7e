use sqlx::SqlitePool;
use time::{Date, Time};

use super::repo_types::{AvailableTime, AvailableTimeRow, ReservationTime, TimeRow};
use crate::parse::format_start_at;

pub struct TimeRepository<'a> {
    db: &'a SqlitePool,
}

impl<'a> TimeRepository<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    /// All time slots ordered by start time.
    pub async fn find_all(&self) -> Result<Vec<ReservationTime>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TimeRow>(
            r#"
            SELECT id, start_at
              FROM reservation_time
             ORDER BY start_at ASC, id ASC
            "#,
        )
        .fetch_all(self.db)
        .await?;
        rows.into_iter().map(ReservationTime::try_from).collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ReservationTime>, sqlx::Error> {
        let row = sqlx::query_as::<_, TimeRow>(
            r#"
            SELECT id, start_at
              FROM reservation_time
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.db)
        .await?;
        row.map(ReservationTime::try_from).transpose()
    }

    /// Every slot, flagged when a reservation holds it for `date` and `theme_id`.
    pub async fn find_all_available(
        &self,
        date: Date,
        theme_id: i64,
    ) -> Result<Vec<AvailableTime>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AvailableTimeRow>(
            r#"
            SELECT t.id,
                   t.start_at,
                   EXISTS (
                       SELECT 1
                         FROM reservation r
                        WHERE r.time_id = t.id
                          AND r.date = $1
                          AND r.theme_id = $2
                   ) AS already_booked
              FROM reservation_time t
             ORDER BY t.start_at ASC, t.id ASC
            "#,
        )
        .bind(date)
        .bind(theme_id)
        .fetch_all(self.db)
        .await?;
        rows.into_iter().map(AvailableTime::try_from).collect()
    }

    pub async fn save(&self, start_at: Time) -> Result<ReservationTime, sqlx::Error> {
        let row = sqlx::query_as::<_, TimeRow>(
            r#"
            INSERT INTO reservation_time (start_at)
            VALUES ($1)
            RETURNING id, start_at
            "#,
        )
        .bind(format_start_at(start_at))
        .fetch_one(self.db)
        .await?;
        ReservationTime::try_from(row)
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservation_time WHERE id = $1")
            .bind(id)
            .execute(self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
