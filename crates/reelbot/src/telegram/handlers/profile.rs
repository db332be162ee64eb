//! Username lookup and the profile card.

use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode};

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::keyboards::profile_keyboard;
use crate::telegram::replies::{self, error_reply, parse_username, profile_card, Stage};
use crate::telegram::Bot;

/// Resolve the username in `msg` and answer with the profile card and its
/// keyboard, or with the reply matching the lookup error.
pub(super) async fn handle_profile_request(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let chat_id = msg.chat.id;
    let Some(username) = msg.text().and_then(parse_username) else {
        bot.send_message(chat_id, replies::NOT_FOUND).await?;
        return Ok(());
    };

    match deps.profiles.resolve_user_id(username).await {
        Ok(user_id) => {
            log::info!("Resolved @{} to user_id={} for chat {}", username, user_id, chat_id);
            bot.send_message(chat_id, profile_card(username, &user_id))
                .parse_mode(ParseMode::Html)
                .reply_markup(profile_keyboard(&user_id))
                .await?;
        }
        Err(e) => {
            log::warn!("Profile lookup for @{} failed [{}]: {}", username, e.kind(), e);
            bot.send_message(chat_id, error_reply(&e, Stage::Lookup)).await?;
        }
    }

    Ok(())
}
