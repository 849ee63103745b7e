use sqlx::FromRow;

use super::claims::Role;

/// Member record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub id: i64,
    pub email: String,
    pub password_hash: String, // Argon2 hash, never serialized
    pub name: String,
    pub role: Role,
}

/// Fields needed to register a member; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
}

impl TryFrom<MemberRow> for Member {
    type Error = sqlx::Error;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| sqlx::Error::Decode(e.into()))?;
        Ok(Self {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            name: row.name,
            role,
        })
    }
}
