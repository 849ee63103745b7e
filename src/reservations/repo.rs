use sqlx::SqlitePool;
use time::Date;

use super::repo_types::{NewReservation, Reservation, ReservationRow};

const SELECT_RESERVATION: &str = r#"
    SELECT r.id,
           r.name,
           r.date,
           t.id           AS time_id,
           t.start_at     AS time_start_at,
           th.id          AS theme_id,
           th.name        AS theme_name,
           th.description AS theme_description,
           th.thumbnail   AS theme_thumbnail
      FROM reservation r
      JOIN reservation_time t ON t.id = r.time_id
      JOIN theme th ON th.id = r.theme_id
"#;

pub struct ReservationRepository<'a> {
    db: &'a SqlitePool,
}

impl<'a> ReservationRepository<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    /// All reservations in storage order.
    pub async fn find_all(&self) -> Result<Vec<Reservation>, sqlx::Error> {
        let sql = format!("{SELECT_RESERVATION} ORDER BY r.id ASC");
        let rows = sqlx::query_as::<_, ReservationRow>(&sql)
            .fetch_all(self.db)
            .await?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, sqlx::Error> {
        let sql = format!("{SELECT_RESERVATION} WHERE r.id = $1");
        let row = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(id)
            .fetch_optional(self.db)
            .await?;
        row.map(Reservation::try_from).transpose()
    }

    /// Reservations on `date` for `theme_id`, in storage order.
    pub async fn find_all_by_date_and_theme_id(
        &self,
        date: Date,
        theme_id: i64,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let sql = format!("{SELECT_RESERVATION} WHERE r.date = $1 AND r.theme_id = $2 ORDER BY r.id ASC");
        let rows = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(date)
            .bind(theme_id)
            .fetch_all(self.db)
            .await?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    pub async fn exists_by_time_id(&self, time_id: i64) -> Result<bool, sqlx::Error> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS (SELECT 1 FROM reservation WHERE time_id = $1)",
        )
        .bind(time_id)
        .fetch_one(self.db)
        .await?;
        Ok(found != 0)
    }

    pub async fn exists_by_theme_id(&self, theme_id: i64) -> Result<bool, sqlx::Error> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS (SELECT 1 FROM reservation WHERE theme_id = $1)",
        )
        .bind(theme_id)
        .fetch_one(self.db)
        .await?;
        Ok(found != 0)
    }

    /// Inserts the reservation and reads it back with its time and theme.
    ///
    /// Dangling time or theme ids fail with a foreign-key violation and an
    /// already booked `(date, time, theme)` with a unique violation.
    pub async fn save(&self, reservation: &NewReservation) -> Result<Reservation, sqlx::Error> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO reservation (name, date, time_id, theme_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&reservation.name)
        .bind(reservation.date)
        .bind(reservation.time_id)
        .bind(reservation.theme_id)
        .fetch_one(self.db)
        .await?;

        self.find_by_id(id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Returns the number of rows removed; unknown ids remove nothing.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservation WHERE id = $1")
            .bind(id)
            .execute(self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
