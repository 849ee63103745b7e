use sqlx::SqlitePool;
use time::PrimitiveDateTime;
use tracing::{info, warn};

use super::{
    dto::CreateReservationRequest,
    repo::ReservationRepository,
    repo_types::{NewReservation, Reservation},
};
use crate::{
    db::is_unique_violation,
    error::{AppError, AppResult},
    parse::parse_date,
    themes::repo::ThemeRepository,
    times::repo::TimeRepository,
};

pub struct ReservationService<'a> {
    db: &'a SqlitePool,
}

impl<'a> ReservationService<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn get_reservations(&self) -> AppResult<Vec<Reservation>> {
        Ok(ReservationRepository::new(self.db).find_all().await?)
    }

    /// Validates and stores a reservation.
    ///
    /// Checks run in order: request shape, time slot exists, theme exists, slot
    /// strictly after `now`, slot not already booked for the theme.
    pub async fn add_reservation(
        &self,
        request: CreateReservationRequest,
        now: PrimitiveDateTime,
    ) -> AppResult<Reservation> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("name must not be blank".into()));
        }
        let date = parse_date(&request.date)?;

        let time = TimeRepository::new(self.db)
            .find_by_id(request.time_id)
            .await?
            .ok_or(AppError::TimeNotFound(request.time_id))?;
        let theme = ThemeRepository::new(self.db)
            .find_by_id(request.theme_id)
            .await?
            .ok_or(AppError::ThemeNotFound(request.theme_id))?;

        if PrimitiveDateTime::new(date, time.start_at) <= now {
            return Err(AppError::PreviousTime {
                date,
                time: time.start_at,
            });
        }

        let repo = ReservationRepository::new(self.db);
        let duplicated = || AppError::Duplicated {
            date,
            time_id: time.id,
            theme_id: theme.id,
        };
        let booked = repo.find_all_by_date_and_theme_id(date, theme.id).await?;
        if booked.iter().any(|r| r.time.id == time.id) {
            return Err(duplicated());
        }

        let new = NewReservation {
            name: name.to_string(),
            date,
            time_id: time.id,
            theme_id: theme.id,
        };
        match repo.save(&new).await {
            Ok(reservation) => {
                info!(
                    reservation_id = reservation.id,
                    %date,
                    time_id = time.id,
                    theme_id = theme.id,
                    "reservation added"
                );
                Ok(reservation)
            }
            Err(e) if is_unique_violation(&e) => {
                warn!(%date, time_id = time.id, theme_id = theme.id, "lost race for slot");
                Err(duplicated())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes a reservation, returning the affected row count.
    pub async fn delete_reservation(&self, id: i64) -> AppResult<u64> {
        match ReservationRepository::new(self.db).delete(id).await? {
            0 => Err(AppError::ReservationNotFound(id)),
            count => {
                info!(reservation_id = id, "reservation deleted");
                Ok(count)
            }
        }
    }
}
