//! Relay media items into a chat as albums.
//!
//! Telegram accepts 2-10 items per `sendMediaGroup`; longer lists are split
//! into chunks of 10 and a lone item goes out as a plain photo or video.
//! Media is passed by URL, Telegram fetches it from the CDN itself.

use reelcore::{MediaItem, MediaKind};
use teloxide::prelude::*;
use teloxide::types::{InputFile, InputMedia, InputMediaPhoto, InputMediaVideo};
use url::Url;

use super::replies::truncate_caption;
use crate::config;
use crate::telegram::Bot;

/// Where the album caption goes when a list spans several albums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionPlacement {
    /// Only the first item of the first album (a post's own caption).
    FirstGroup,
    /// The first item of every album (a label such as "stories of ...").
    EveryGroup,
}

/// Convert one item; `None` when its URL is not a valid absolute URL.
pub fn input_media(item: &MediaItem) -> Option<InputMedia> {
    let url = match Url::parse(&item.url) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Skipping media with invalid URL {:?}: {}", item.url, e);
            return None;
        }
    };
    let file = InputFile::url(url);

    Some(match item.kind {
        MediaKind::Image => InputMedia::Photo(InputMediaPhoto::new(file)),
        MediaKind::Video => InputMedia::Video(InputMediaVideo::new(file)),
    })
}

fn with_caption(media: InputMedia, caption: &str) -> InputMedia {
    let caption = truncate_caption(caption);
    match media {
        InputMedia::Photo(photo) => InputMedia::Photo(photo.caption(caption)),
        InputMedia::Video(video) => InputMedia::Video(video.caption(caption)),
        other => other,
    }
}

/// Split items into albums of at most 10, captioning per `placement`.
/// An empty caption leaves every item uncaptioned.
pub fn media_groups(items: &[MediaItem], caption: &str, placement: CaptionPlacement) -> Vec<Vec<InputMedia>> {
    let media: Vec<InputMedia> = items.iter().filter_map(input_media).collect();

    media
        .chunks(config::telegram::MEDIA_GROUP_LIMIT)
        .enumerate()
        .map(|(index, chunk)| {
            let mut group = chunk.to_vec();
            let captioned = match placement {
                CaptionPlacement::FirstGroup => index == 0,
                CaptionPlacement::EveryGroup => true,
            };
            if captioned && !caption.is_empty() {
                if let Some(first) = group.first_mut() {
                    *first = with_caption(first.clone(), caption);
                }
            }
            group
        })
        .collect()
}

/// Send albums built by [`media_groups`] in order.
pub async fn send_media_groups(
    bot: &Bot,
    chat_id: ChatId,
    groups: Vec<Vec<InputMedia>>,
) -> Result<(), teloxide::RequestError> {
    for mut group in groups {
        match group.len() {
            0 => continue,
            1 => {
                if let Some(single) = group.pop() {
                    send_single(bot, chat_id, single).await?;
                }
            }
            n => {
                bot.send_media_group(chat_id, group).await?;
                log::debug!("Sent album of {} items to chat {}", n, chat_id);
            }
        }
    }
    Ok(())
}

async fn send_single(bot: &Bot, chat_id: ChatId, media: InputMedia) -> Result<(), teloxide::RequestError> {
    match media {
        InputMedia::Photo(photo) => {
            let mut request = bot.send_photo(chat_id, photo.media);
            if let Some(caption) = photo.caption {
                request = request.caption(caption);
            }
            request.await?;
        }
        InputMedia::Video(video) => {
            let mut request = bot.send_video(chat_id, video.media);
            if let Some(caption) = video.caption {
                request = request.caption(caption);
            }
            request.await?;
        }
        other => {
            bot.send_media_group(chat_id, vec![other]).await?;
        }
    }
    Ok(())
}
