//! User-facing texts and the mapping from client errors to replies.

use reelcore::{ProfileError, UserId};
use teloxide::utils::html;

use crate::config;

pub const GREETING: &str = "Это бот для получения информации о пользователе Instagram\n\
Пришли username пользователя, информацию о котором хотите получить";

pub const ASK_USERNAME: &str = "Пришли username пользователя текстом";
pub const NOT_FOUND: &str = "Пользователь не найден";
pub const NOTIFIER_IN_DEVELOPMENT: &str = "Эта функция в разработке";
pub const LOADING_POSTS: &str = "Идёт выгрузка постов...";
pub const LOADING_STORIES: &str = "Идёт выгрузка историй...";
pub const NO_POSTS: &str = "У пользователя нет постов";
pub const NO_STORIES: &str = "Пользователь не имеет историй";
pub const UNKNOWN_ACTION: &str = "Неизвестная команда";

pub const NOT_AUTHORIZED: &str = "Бот не авторизован в Instagram, сессия устарела. Сообщите администратору";
pub const RATE_LIMITED: &str = "Instagram ограничил число запросов, попробуйте позже";
pub const UPSTREAM_ERROR: &str = "Instagram вернул ошибку, попробуйте позже";
pub const NETWORK_ERROR: &str = "Не удалось связаться с Instagram, попробуйте позже";
pub const UNEXPECTED_RESPONSE: &str = "Instagram прислал неожиданный ответ, попробуйте позже";
pub const SEND_FAILED: &str = "Не удалось отправить медиа в чат";

/// What the user asked for when the error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Username lookup: a 404 or a body without an id means no such user.
    Lookup,
    /// Posts or stories of an already resolved id.
    Media,
}

/// Pick the reply for a failed client call.
pub fn error_reply(err: &ProfileError, stage: Stage) -> &'static str {
    match err {
        ProfileError::NotLoggedIn => NOT_AUTHORIZED,
        ProfileError::RequestFailed { status: 401 | 403, .. } => NOT_AUTHORIZED,
        ProfileError::RequestFailed { status: 404, .. } => match stage {
            Stage::Lookup => NOT_FOUND,
            Stage::Media => UPSTREAM_ERROR,
        },
        ProfileError::RequestFailed { status: 429, .. } => RATE_LIMITED,
        ProfileError::RequestFailed { .. } => UPSTREAM_ERROR,
        ProfileError::MalformedResponse(_) => match stage {
            Stage::Lookup => NOT_FOUND,
            Stage::Media => UNEXPECTED_RESPONSE,
        },
        ProfileError::Transport(_) => NETWORK_ERROR,
    }
}

/// HTML profile card sent after a successful lookup.
pub fn profile_card(username: &str, user_id: &UserId) -> String {
    let username = html::escape(username);
    format!(
        "<a href=\"https://www.instagram.com/{username}\">{username}</a>\n\
         ID пользователя: {user_id}\n\
         🟥 Вы не подписаны на уведомления",
        username = username,
        user_id = html::escape(user_id.as_str()),
    )
}

pub fn stories_caption(user_id: &UserId) -> String {
    format!("Истории пользователя {}", user_id)
}

/// Normalize what the user typed into a username: trim and drop a leading `@`.
pub fn parse_username(text: &str) -> Option<&str> {
    let username = text.trim();
    let username = username.strip_prefix('@').unwrap_or(username).trim();
    if username.is_empty() || username.contains(char::is_whitespace) {
        None
    } else {
        Some(username)
    }
}

/// Cut a caption to Telegram's media caption limit, on a char boundary.
pub fn truncate_caption(caption: &str) -> String {
    let limit = config::telegram::MEDIA_CAPTION_LIMIT;
    if caption.chars().count() <= limit {
        return caption.to_string();
    }
    let mut cut: String = caption.chars().take(limit - 1).collect();
    cut.push('…');
    cut
}
