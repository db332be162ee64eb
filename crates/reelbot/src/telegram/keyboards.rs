//! Inline keyboard attached to the profile card and its callback payloads.
//!
//! Callback data is `"<action> <user_id>"`, e.g. `"posts 123456"`.

use reelcore::UserId;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Button pressed under a profile card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    /// Subscribe to / unsubscribe from notifications (not implemented yet)
    Notifier(UserId),
    /// Relay the latest posts
    Posts(UserId),
    /// Relay the active stories
    Stories(UserId),
}

impl ProfileAction {
    pub fn user_id(&self) -> &UserId {
        match self {
            ProfileAction::Notifier(id) | ProfileAction::Posts(id) | ProfileAction::Stories(id) => id,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ProfileAction::Notifier(_) => "notifier",
            ProfileAction::Posts(_) => "posts",
            ProfileAction::Stories(_) => "stories",
        }
    }

    pub fn to_callback_data(&self) -> String {
        format!("{} {}", self.name(), self.user_id())
    }

    /// Parse callback data produced by [`to_callback_data`](Self::to_callback_data).
    pub fn parse(data: &str) -> Option<Self> {
        let (action, id) = data.trim().split_once(' ')?;
        let id = id.trim();
        if id.is_empty() || id.contains(char::is_whitespace) {
            return None;
        }
        let id = UserId::from(id);

        match action {
            "notifier" => Some(ProfileAction::Notifier(id)),
            "posts" => Some(ProfileAction::Posts(id)),
            "stories" => Some(ProfileAction::Stories(id)),
            _ => None,
        }
    }
}

/// Three single-button rows: notifier, posts, stories.
pub fn profile_keyboard(user_id: &UserId) -> InlineKeyboardMarkup {
    let row = |label: &str, action: ProfileAction| {
        vec![InlineKeyboardButton::callback(label, action.to_callback_data())]
    };

    InlineKeyboardMarkup::new(vec![
        row(
            "Подписаться/отписаться от уведомлений",
            ProfileAction::Notifier(user_id.clone()),
        ),
        row("Получить 3 последних поста", ProfileAction::Posts(user_id.clone())),
        row("Выгрузить истории пользователя", ProfileAction::Stories(user_id.clone())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_callback_data_format() {
        let id = UserId::from("123456");
        assert_eq!(ProfileAction::Notifier(id.clone()).to_callback_data(), "notifier 123456");
        assert_eq!(ProfileAction::Posts(id.clone()).to_callback_data(), "posts 123456");
        assert_eq!(ProfileAction::Stories(id).to_callback_data(), "stories 123456");
    }

    #[test]
    fn test_keyboard_callbacks_parse_back() {
        let id = UserId::from("987");
        let keyboard = profile_keyboard(&id);
        assert_eq!(keyboard.inline_keyboard.len(), 3);

        let parsed: Vec<ProfileAction> = keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => ProfileAction::parse(data).unwrap(),
                other => panic!("unexpected button kind: {:?}", other),
            })
            .collect();

        assert_eq!(
            parsed,
            vec![
                ProfileAction::Notifier(id.clone()),
                ProfileAction::Posts(id.clone()),
                ProfileAction::Stories(id),
            ]
        );
    }

    #[test]
    fn test_button_labels() {
        let keyboard = profile_keyboard(&UserId::from("1"));
        let labels: Vec<&str> = keyboard.inline_keyboard.iter().flatten().map(|b| b.text.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Подписаться/отписаться от уведомлений",
                "Получить 3 последних поста",
                "Выгрузить истории пользователя",
            ]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(ProfileAction::parse(""), None);
        assert_eq!(ProfileAction::parse("posts"), None);
        assert_eq!(ProfileAction::parse("posts "), None);
        assert_eq!(ProfileAction::parse("reels 1"), None);
        assert_eq!(ProfileAction::parse("posts 1 2"), None);
    }
}
