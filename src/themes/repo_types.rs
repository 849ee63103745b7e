use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Theme record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Theme {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
}

/// Fields supplied when creating a theme; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTheme {
    pub name: String,
    pub description: String,
    pub thumbnail: String,
}
