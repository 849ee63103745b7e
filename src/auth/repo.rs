use sqlx::SqlitePool;

use super::repo_types::{Member, MemberRow, NewMember};

pub struct MemberRepository<'a> {
    db: &'a SqlitePool,
}

impl<'a> MemberRepository<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    /// Find a member by (normalised) email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Member>, sqlx::Error> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, email, password_hash, name, role
              FROM member
             WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db)
        .await?;
        row.map(Member::try_from).transpose()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Member>, sqlx::Error> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, email, password_hash, name, role
              FROM member
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.db)
        .await?;
        row.map(Member::try_from).transpose()
    }

    pub async fn save(&self, member: &NewMember) -> Result<Member, sqlx::Error> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO member (email, password_hash, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, name, role
            "#,
        )
        .bind(&member.email)
        .bind(&member.password_hash)
        .bind(&member.name)
        .bind(member.role.as_str())
        .fetch_one(self.db)
        .await?;
        Member::try_from(row)
    }
}
