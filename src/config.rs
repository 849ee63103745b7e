use anyhow::Context;
use serde::Deserialize;
use time::UtcOffset;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Credentials for the administrator created on startup when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Offset applied to UTC when deciding whether a slot is already in the past.
    pub utc_offset_hours: i8,
    pub admin: Option<AdminSeed>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://roomescape.db?mode=rwc".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "roomescape".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "roomescape-members".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let utc_offset_hours = match std::env::var("APP_UTC_OFFSET_HOURS") {
            Ok(raw) => parse_utc_offset_hours(&raw)?,
            Err(_) => 0,
        };
        let admin = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminSeed {
                email,
                password,
                name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "admin".into()),
            }),
            _ => None,
        };
        Ok(Self {
            database_url,
            jwt,
            utc_offset_hours,
            admin,
        })
    }

    pub fn utc_offset(&self) -> UtcOffset {
        UtcOffset::from_hms(self.utc_offset_hours, 0, 0).unwrap_or(UtcOffset::UTC)
    }

    /// Configuration used by unit and integration tests.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
            utc_offset_hours: 0,
            admin: None,
        }
    }
}

/// Whole hours east of UTC that `time::UtcOffset` accepts.
fn parse_utc_offset_hours(raw: &str) -> anyhow::Result<i8> {
    let hours = raw
        .trim()
        .parse::<i8>()
        .with_context(|| format!("APP_UTC_OFFSET_HOURS '{}' is not a whole number", raw))?;
    UtcOffset::from_hms(hours, 0, 0)
        .with_context(|| format!("APP_UTC_OFFSET_HOURS {} is out of range", hours))?;
    Ok(hours)
}
