use clap::{Parser, Subcommand};

use crate::config;

#[derive(Parser)]
#[command(name = "reelbot")]
#[command(author, version, about = "Telegram bot for Instagram profiles, posts and stories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot in long polling mode (default)
    Run,

    /// Resolve a profile and print its posts and stories (checks the session)
    Probe {
        /// Instagram username, with or without the leading @
        username: String,

        /// Number of recent posts to fetch
        #[arg(long, default_value_t = config::instagram::POSTS_PER_REQUEST)]
        posts: u32,

        /// Also fetch active stories
        #[arg(long)]
        stories: bool,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
