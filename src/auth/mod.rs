use crate::state::AppState;
use axum::Router;

pub mod claims;
mod cookie;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
