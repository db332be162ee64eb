//! Media normalizer: turns a raw Instagram media node into a [`MediaItem`].
//!
//! Story items, single-media posts and carousel entries all share the same
//! node shape, so one function covers every case:
//!
//! - `video_versions[0].url` present → [`MediaKind::Video`]
//! - otherwise `image_versions2.candidates[0].url` → [`MediaKind::Image`]
//!
//! Video wins even when the node also carries image candidates (videos always
//! ship a cover image).

use serde_json::Value;

use crate::error::{ProfileError, ProfileResult};
use crate::types::{MediaItem, Post, Story};

const VIDEO_URL: &str = "/video_versions/0/url";
const IMAGE_URL: &str = "/image_versions2/candidates/0/url";

/// Classify a media node and pick its representative URL.
pub fn classify_and_extract(node: &Value) -> ProfileResult<MediaItem> {
    if let Some(url) = node.pointer(VIDEO_URL).and_then(|v| v.as_str()) {
        return Ok(MediaItem::video(url));
    }
    if let Some(url) = node.pointer(IMAGE_URL).and_then(|v| v.as_str()) {
        return Ok(MediaItem::image(url));
    }
    Err(ProfileError::malformed(format!(
        "media node {} has neither video_versions nor image_versions2",
        node_label(node)
    )))
}

/// Build a post from a feed item, expanding carousels in order.
pub fn post_from_item(item: &Value) -> ProfileResult<Post> {
    let media = match item.get("carousel_media") {
        None | Some(Value::Null) => vec![classify_and_extract(item)?],
        Some(carousel) => carousel
            .as_array()
            .ok_or_else(|| ProfileError::malformed("carousel_media is not an array"))?
            .iter()
            .map(classify_and_extract)
            .collect::<ProfileResult<Vec<_>>>()?,
    };

    let caption = item
        .pointer("/caption/text")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    Ok(Post { media, caption })
}

/// Build a story from a reel item.
pub fn story_from_item(item: &Value) -> ProfileResult<Story> {
    classify_and_extract(item).map(|media| Story { media })
}

/// Best-effort identifier for error messages (`id`, then `pk`).
fn node_label(node: &Value) -> String {
    match node.get("id").or_else(|| node.get("pk")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "<unknown>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn image_node(url: &str) -> Value {
        json!({"image_versions2": {"candidates": [{"url": url, "width": 1080}, {"url": "small"}]}})
    }

    #[test]
    fn test_video_takes_precedence_over_image() {
        let node = json!({
            "video_versions": [{"url": "https://cdn/v1.mp4"}, {"url": "https://cdn/v2.mp4"}],
            "image_versions2": {"candidates": [{"url": "https://cdn/cover.jpg"}]}
        });
        let item = classify_and_extract(&node).unwrap();
        assert_eq!(item, MediaItem::video("https://cdn/v1.mp4"));
    }

    #[test]
    fn test_image_only_node() {
        let item = classify_and_extract(&image_node("https://cdn/p.jpg")).unwrap();
        assert_eq!(item.kind, MediaKind::Image);
        assert_eq!(item.url, "https://cdn/p.jpg");
    }

    #[test]
    fn test_empty_video_versions_falls_back_to_image() {
        let node = json!({
            "video_versions": [],
            "image_versions2": {"candidates": [{"url": "https://cdn/p.jpg"}]}
        });
        assert_eq!(classify_and_extract(&node).unwrap(), MediaItem::image("https://cdn/p.jpg"));
    }

    #[test]
    fn test_null_video_versions_falls_back_to_image() {
        let node = json!({"video_versions": null, "image_versions2": {"candidates": [{"url": "u"}]}});
        assert_eq!(classify_and_extract(&node).unwrap().kind, MediaKind::Image);
    }

    #[test]
    fn test_node_without_media_is_malformed() {
        let err = classify_and_extract(&json!({"pk": 42})).unwrap_err();
        assert!(matches!(err, ProfileError::MalformedResponse(ref m) if m.contains("42")));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let node = image_node("https://cdn/p.jpg");
        assert_eq!(classify_and_extract(&node).unwrap(), classify_and_extract(&node).unwrap());
    }

    #[test]
    fn test_carousel_post_keeps_order() {
        let item = json!({
            "carousel_media": [
                image_node("a"),
                {"video_versions": [{"url": "b"}], "image_versions2": {"candidates": [{"url": "b-cover"}]}},
                image_node("c"),
            ],
            "image_versions2": {"candidates": [{"url": "ignored"}]},
            "caption": {"text": "three"}
        });
        let post = post_from_item(&item).unwrap();
        assert_eq!(
            post.media,
            vec![MediaItem::image("a"), MediaItem::video("b"), MediaItem::image("c")]
        );
        assert_eq!(post.caption, "three");
    }

    #[test]
    fn test_single_post_has_one_item() {
        let post = post_from_item(&image_node("only")).unwrap();
        assert_eq!(post.media.len(), 1);
    }

    #[test]
    fn test_null_caption_becomes_empty_string() {
        let mut item = image_node("x");
        item["caption"] = Value::Null;
        assert_eq!(post_from_item(&item).unwrap().caption, "");
    }

    #[test]
    fn test_null_carousel_is_single_media() {
        let mut item = image_node("https://cdn/single.jpg");
        item["carousel_media"] = Value::Null;
        let post = post_from_item(&item).unwrap();
        assert_eq!(post.media, vec![MediaItem::image("https://cdn/single.jpg")]);
    }

    #[test]
    fn test_carousel_must_be_array() {
        let item = json!({"carousel_media": {"0": {}}});
        assert!(matches!(post_from_item(&item), Err(ProfileError::MalformedResponse(_))));
    }

    #[test]
    fn test_story_from_video_item() {
        let story = story_from_item(&json!({"video_versions": [{"url": "s.mp4"}]})).unwrap();
        assert_eq!(story.media, MediaItem::video("s.mp4"));
    }
}
