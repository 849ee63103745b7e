use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::{
    claims::Role,
    dto::{LoginRequest, RegisterRequest},
    password::{hash_password, verify_password},
    repo::MemberRepository,
    repo_types::{Member, NewMember},
};
use crate::{
    config::AdminSeed,
    db::is_unique_violation,
    error::{AppError, AppResult},
};

const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService<'a> {
    db: &'a SqlitePool,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<Member> {
        let email = normalize_email(&request.email);
        if !is_valid_email(&email) {
            warn!(email = %email, "invalid email");
            return Err(AppError::BadRequest("Invalid email".into()));
        }
        if request.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::BadRequest("Password too short".into()));
        }
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name must not be blank".into()));
        }

        let repo = MemberRepository::new(self.db);
        if repo.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(AppError::Conflict("Email already registered".into()));
        }

        let new = NewMember {
            email,
            password_hash: hash_password(&request.password)?,
            name: name.to_string(),
            role: Role::User,
        };
        match repo.save(&new).await {
            Ok(member) => {
                info!(member_id = member.id, email = %member.email, "member registered");
                Ok(member)
            }
            Err(e) if is_unique_violation(&e) => {
                Err(AppError::Conflict("Email already registered".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks the credentials; unknown email and wrong password look the same.
    pub async fn authenticate(&self, request: LoginRequest) -> AppResult<Member> {
        let email = normalize_email(&request.email);
        if !is_valid_email(&email) {
            return Err(AppError::BadRequest("Invalid email".into()));
        }

        let invalid = || AppError::Unauthorized("Invalid credentials".into());
        let Some(member) = MemberRepository::new(self.db).find_by_email(&email).await? else {
            warn!(email = %email, "login unknown email");
            return Err(invalid());
        };

        if !verify_password(&request.password, &member.password_hash)? {
            warn!(email = %email, member_id = member.id, "login invalid password");
            return Err(invalid());
        }

        info!(member_id = member.id, "member logged in");
        Ok(member)
    }

    pub async fn find_member(&self, id: i64) -> AppResult<Member> {
        MemberRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Member not found".into()))
    }

    /// Creates the configured administrator unless that email is taken.
    pub async fn ensure_admin(&self, seed: &AdminSeed) -> anyhow::Result<()> {
        let email = normalize_email(&seed.email);
        let repo = MemberRepository::new(self.db);
        if repo.find_by_email(&email).await?.is_some() {
            return Ok(());
        }

        let admin = repo
            .save(&NewMember {
                email,
                password_hash: hash_password(&seed.password)?,
                name: seed.name.clone(),
                role: Role::Admin,
            })
            .await?;
        info!(member_id = admin.id, email = %admin.email, "admin account created");
        Ok(())
    }
}
