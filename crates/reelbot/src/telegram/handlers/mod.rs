//! Telegram bot handler tree configuration
//!
//! The dispatcher schema is built from `HandlerDeps`, so tests can plug in
//! a fake profile client and drive the same tree as production.

mod callbacks;
mod commands;
mod profile;
mod schema;
mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
