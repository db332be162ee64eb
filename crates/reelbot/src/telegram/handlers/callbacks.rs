//! Profile card button handlers: notifier, posts, stories.

use reelcore::UserId;
use teloxide::prelude::*;

use super::types::{HandlerDeps, HandlerError};
use crate::config;
use crate::telegram::keyboards::ProfileAction;
use crate::telegram::relay::{media_groups, send_media_groups, CaptionPlacement};
use crate::telegram::replies::{self, error_reply, stories_caption, Stage};
use crate::telegram::Bot;

pub(super) async fn handle_callback(bot: &Bot, q: &CallbackQuery, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(action) = q.data.as_deref().and_then(ProfileAction::parse) else {
        log::warn!("Unknown callback data {:?} from user {}", q.data, q.from.id);
        bot.answer_callback_query(q.id.clone())
            .text(replies::UNKNOWN_ACTION)
            .await?;
        return Ok(());
    };

    if let ProfileAction::Notifier(user_id) = &action {
        log::info!("Notifier pressed for user_id={} by {}", user_id, q.from.id);
        bot.answer_callback_query(q.id.clone())
            .text(replies::NOTIFIER_IN_DEVELOPMENT)
            .show_alert(true)
            .await?;
        return Ok(());
    }

    bot.answer_callback_query(q.id.clone()).await?;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        log::warn!("Callback {:?} has no message to answer in", q.data);
        return Ok(());
    };

    match action {
        ProfileAction::Posts(user_id) => send_posts(bot, chat_id, &user_id, deps).await,
        ProfileAction::Stories(user_id) => send_stories(bot, chat_id, &user_id, deps).await,
        ProfileAction::Notifier(_) => Ok(()),
    }
}

/// Relay the latest posts, one album per post, then drop the status message.
async fn send_posts(bot: &Bot, chat_id: ChatId, user_id: &UserId, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let status = bot.send_message(chat_id, replies::LOADING_POSTS).await?;

    let posts = match deps
        .profiles
        .list_posts(user_id, config::instagram::POSTS_PER_REQUEST)
        .await
    {
        Ok(posts) => posts,
        Err(e) => {
            log::warn!("Fetching posts of user_id={} failed [{}]: {}", user_id, e.kind(), e);
            bot.edit_message_text(chat_id, status.id, error_reply(&e, Stage::Media))
                .await?;
            return Ok(());
        }
    };

    if posts.is_empty() {
        bot.edit_message_text(chat_id, status.id, replies::NO_POSTS).await?;
        return Ok(());
    }

    for post in &posts {
        let groups = media_groups(&post.media, &post.caption, CaptionPlacement::FirstGroup);
        if groups.is_empty() {
            log::warn!("No sendable media in a post of user_id={}, {} item(s) dropped", user_id, post.media.len());
            bot.send_message(chat_id, replies::SEND_FAILED).await?;
            continue;
        }
        if let Err(e) = send_media_groups(bot, chat_id, groups).await {
            log::warn!("Failed to relay a post of user_id={} to chat {}: {}", user_id, chat_id, e);
            bot.send_message(chat_id, replies::SEND_FAILED).await?;
        }
    }
    log::info!("Relayed {} posts of user_id={} to chat {}", posts.len(), user_id, chat_id);

    bot.delete_message(chat_id, status.id).await?;
    Ok(())
}

/// Relay active stories in albums of up to 10, each labelled with the user id.
async fn send_stories(bot: &Bot, chat_id: ChatId, user_id: &UserId, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let status = bot.send_message(chat_id, replies::LOADING_STORIES).await?;

    let stories = match deps.profiles.list_stories(user_id).await {
        Ok(stories) => stories,
        Err(e) => {
            log::warn!("Fetching stories of user_id={} failed [{}]: {}", user_id, e.kind(), e);
            bot.edit_message_text(chat_id, status.id, error_reply(&e, Stage::Media))
                .await?;
            return Ok(());
        }
    };

    if stories.is_empty() {
        bot.edit_message_text(chat_id, status.id, replies::NO_STORIES).await?;
        return Ok(());
    }

    let media: Vec<_> = stories.into_iter().map(|story| story.media).collect();
    let groups = media_groups(&media, &stories_caption(user_id), CaptionPlacement::EveryGroup);
    if groups.is_empty() {
        log::warn!("No sendable story media of user_id={}, {} item(s) dropped", user_id, media.len());
        bot.send_message(chat_id, replies::SEND_FAILED).await?;
    } else if let Err(e) = send_media_groups(bot, chat_id, groups).await {
        log::warn!("Failed to relay stories of user_id={} to chat {}: {}", user_id, chat_id, e);
        bot.send_message(chat_id, replies::SEND_FAILED).await?;
    }
    log::info!("Relayed {} stories of user_id={} to chat {}", media.len(), user_id, chat_id);

    bot.delete_message(chat_id, status.id).await?;
    Ok(())
}
