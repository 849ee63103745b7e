use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::{
    claims::Role,
    cookie::{read_cookie, TOKEN_COOKIE},
    jwt::JwtKeys,
};
use crate::error::AppError;

/// Identity resolved from the `token` cookie for the current request.
#[derive(Debug, Clone)]
pub struct LoginMember {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for LoginMember
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = read_cookie(&parts.headers, TOKEN_COOKIE)
            .ok_or_else(|| AppError::Unauthorized("login required".into()))?;

        let claims = JwtKeys::from_ref(state).verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::Unauthorized("invalid or expired token".into())
        })?;

        Ok(LoginMember {
            id: claims.sub,
            name: claims.name,
            role: claims.role,
        })
    }
}

/// A logged-in member holding the `ADMIN` role.
#[derive(Debug, Clone)]
pub struct AdminMember(pub LoginMember);

#[async_trait]
impl<S> FromRequestParts<S> for AdminMember
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let member = LoginMember::from_request_parts(parts, state).await?;
        if member.role != Role::Admin {
            warn!(member_id = member.id, "admin route denied");
            return Err(AppError::Forbidden("admin role required".into()));
        }
        Ok(AdminMember(member))
    }
}
