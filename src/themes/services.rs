use sqlx::SqlitePool;
use time::{Date, Duration};
use tracing::{debug, info, warn};

use super::{
    dto::{CreateThemeRequest, PopularThemeQuery},
    repo::ThemeRepository,
    repo_types::{NewTheme, Theme},
};
use crate::{
    error::{AppError, AppResult},
    reservations::repo::ReservationRepository,
};

const MAX_WINDOW_DAYS: i64 = 3650;

pub struct ThemeService<'a> {
    db: &'a SqlitePool,
}

impl<'a> ThemeService<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn get_themes(&self) -> AppResult<Vec<Theme>> {
        Ok(ThemeRepository::new(self.db).find_all().await?)
    }

    pub async fn add_theme(&self, request: CreateThemeRequest) -> AppResult<Theme> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("theme name must not be blank".into()));
        }

        let theme = ThemeRepository::new(self.db)
            .save(&NewTheme {
                name: name.to_string(),
                description: request.description.trim().to_string(),
                thumbnail: request.thumbnail.trim().to_string(),
            })
            .await?;
        info!(theme_id = theme.id, name = %theme.name, "theme added");
        Ok(theme)
    }

    pub async fn delete_theme(&self, id: i64) -> AppResult<()> {
        if ReservationRepository::new(self.db).exists_by_theme_id(id).await? {
            warn!(theme_id = id, "refusing to delete referenced theme");
            return Err(AppError::Conflict(format!(
                "theme {} is referenced by reservations",
                id
            )));
        }

        match ThemeRepository::new(self.db).delete(id).await? {
            0 => Err(AppError::ThemeNotFound(id)),
            _ => {
                info!(theme_id = id, "theme deleted");
                Ok(())
            }
        }
    }

    /// Most reserved themes over the `days` days before `today` (today excluded).
    pub async fn get_popular_themes(
        &self,
        query: PopularThemeQuery,
        today: Date,
    ) -> AppResult<Vec<Theme>> {
        if query.days <= 0 || query.limit <= 0 || query.days > MAX_WINDOW_DAYS {
            return Err(AppError::BadRequest(format!(
                "days must be within 1..={} and limit positive",
                MAX_WINDOW_DAYS
            )));
        }

        let out_of_range = || AppError::BadRequest(format!("days {} is out of range", query.days));
        let start = today
            .checked_sub(Duration::days(query.days))
            .ok_or_else(out_of_range)?;
        let end = today.previous_day().ok_or_else(out_of_range)?;

        debug!(%start, %end, limit = query.limit, "ranking popular themes");
        Ok(ThemeRepository::new(self.db)
            .find_popular(start, end, query.limit)
            .await?)
    }
}
