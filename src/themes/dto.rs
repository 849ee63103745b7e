use serde::{Deserialize, Serialize};

use super::repo_types::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            id: theme.id,
            name: theme.name,
            description: theme.description,
            thumbnail: theme.thumbnail,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateThemeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
}

/// Both parameters are required; a missing one is a 400.
#[derive(Debug, Deserialize)]
pub struct PopularThemeQuery {
    pub days: i64,
    pub limit: i64,
}
