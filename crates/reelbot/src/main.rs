use anyhow::Result;
use dotenvy::dotenv;
use serde::Serialize;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use reelbot::cli::{Cli, Commands};
use reelbot::client::create_profile_client;
use reelbot::config;
use reelbot::logging::{init_logger, parse_level, setup_dirs};
use reelbot::scheduler::Scheduler;
use reelbot::telegram::replies::parse_username;
use reelbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use reelcore::{Post, ProfileClient, Story, UserId};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, credentials, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    let cli = Cli::parse_args();

    setup_dirs(&config::LOGS_DIR)?;
    init_logger(&config::LOGS_DIR, parse_level(&config::LOG_LEVEL))?;

    match cli.command {
        Some(Commands::Run) => run_bot().await,
        Some(Commands::Probe {
            username,
            posts,
            stories,
            json,
        }) => run_probe(&username, posts, stories, json).await,
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot().await
        }
    }
}

/// Start the bot in long polling mode until Ctrl+C.
async fn run_bot() -> Result<()> {
    log::info!("Starting reelbot v{}", env!("CARGO_PKG_VERSION"));

    let token = config::BOT_TOKEN.as_str();
    if token.is_empty() {
        return Err(anyhow::anyhow!("BOT_TOKEN environment variable not set"));
    }

    let profiles: Arc<dyn ProfileClient> = Arc::new(create_profile_client()?);
    let bot = create_bot(token)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let mut scheduler = Scheduler::new();
    scheduler.start();

    let handler = schema(HandlerDeps::new(profiles));
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    log::info!("Starting bot in long polling mode");
    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher stopped, shutting down scheduler");
    scheduler.shutdown().await;
    Ok(())
}

#[derive(Serialize)]
struct ProbeReport {
    username: String,
    user_id: UserId,
    posts: Vec<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stories: Option<Vec<Story>>,
}

/// Resolve one profile with the configured session and print what the bot would relay.
async fn run_probe(username: &str, posts: u32, stories: bool, json: bool) -> Result<()> {
    let username = parse_username(username).ok_or_else(|| anyhow::anyhow!("Invalid username: {:?}", username))?;
    let client = create_profile_client()?;

    let user_id = client.resolve_user_id(username).await?;
    let report = ProbeReport {
        username: username.to_string(),
        posts: client.list_posts(&user_id, posts).await?,
        stories: if stories {
            Some(client.list_stories(&user_id).await?)
        } else {
            None
        },
        user_id,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("@{} -> {}", report.username, report.user_id);
    println!("Posts: {}", report.posts.len());
    for (index, post) in report.posts.iter().enumerate() {
        let caption = post.caption.lines().next().unwrap_or_default();
        println!("  #{} [{} item(s)] {}", index + 1, post.media.len(), caption);
        for item in &post.media {
            println!("      {} {}", item.kind, item.url);
        }
    }
    if let Some(ref stories) = report.stories {
        println!("Stories: {}", stories.len());
        for story in stories {
            println!("  {} {}", story.media.kind, story.media.url);
        }
    }

    Ok(())
}
