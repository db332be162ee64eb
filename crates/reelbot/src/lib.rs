//! reelbot - Telegram front-end for the reelcore profile client
//!
//! Users send an Instagram username and get back the profile id with
//! buttons to pull the latest posts or the active stories into the chat.

pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod scheduler;
pub mod telegram;

pub use logging::{init_logger, setup_dirs};
pub use scheduler::Scheduler;
