use sqlx::SqlitePool;
use time::Date;

use super::repo_types::{NewTheme, Theme};

pub struct ThemeRepository<'a> {
    db: &'a SqlitePool,
}

impl<'a> ThemeRepository<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<Theme>, sqlx::Error> {
        sqlx::query_as::<_, Theme>(
            r#"
            SELECT id, name, description, thumbnail
              FROM theme
             ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Theme>, sqlx::Error> {
        sqlx::query_as::<_, Theme>(
            r#"
            SELECT id, name, description, thumbnail
              FROM theme
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.db)
        .await
    }

    /// Themes ranked by reservations dated within `[start, end]`.
    ///
    /// Equal counts are ordered by ascending id; themes without reservations in
    /// the window are not returned.
    pub async fn find_popular(
        &self,
        start: Date,
        end: Date,
        limit: i64,
    ) -> Result<Vec<Theme>, sqlx::Error> {
        sqlx::query_as::<_, Theme>(
            r#"
            SELECT th.id, th.name, th.description, th.thumbnail
              FROM theme th
              JOIN reservation r ON r.theme_id = th.id
             WHERE r.date BETWEEN $1 AND $2
             GROUP BY th.id, th.name, th.description, th.thumbnail
             ORDER BY COUNT(r.id) DESC, th.id ASC
             LIMIT $3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(self.db)
        .await
    }

    pub async fn save(&self, theme: &NewTheme) -> Result<Theme, sqlx::Error> {
        sqlx::query_as::<_, Theme>(
            r#"
            INSERT INTO theme (name, description, thumbnail)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, thumbnail
            "#,
        )
        .bind(&theme.name)
        .bind(&theme.description)
        .bind(&theme.thumbnail)
        .fetch_one(self.db)
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM theme WHERE id = $1")
            .bind(id)
            .execute(self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
