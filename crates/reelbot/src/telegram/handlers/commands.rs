//! Command handler implementations (/start, /help)

use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::BotCommands;

use super::types::HandlerError;
use crate::telegram::bot::Command;
use crate::telegram::replies;
use crate::telegram::Bot;

pub(super) async fn handle_command(bot: &Bot, msg: &Message, cmd: Command) -> Result<(), HandlerError> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, replies::GREETING).await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
    }
    Ok(())
}
