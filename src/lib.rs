//! Escape-room reservation backend.
//!
//! Each feature (`reservations`, `times`, `themes`, `auth`) is laid out the same
//! way: `repo_types` for rows and records, `repo` for SQL, `services` for rules,
//! `dto` for wire shapes and `handlers` for the axum routes.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod parse;
pub mod reservations;
pub mod state;
pub mod themes;
pub mod times;
