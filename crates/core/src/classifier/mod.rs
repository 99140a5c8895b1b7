//! URL link classification for embed resolution.
//!
//! [`classify`] maps a URL string to an embed kind and an extracted
//! identifier. It is pure, total, and deterministic: malformed or
//! unrecognized input degrades to [`LinkKind::PlainLink`], never an error.

mod patterns;

pub use patterns::VIDEO_ID_LEN;

use serde::Serialize;
use url::Url;

/// Path segment index carrying the status id (`/{user}/status/{id}`).
const STATUS_ID_SEGMENT: usize = 2;

/// Embed kind of a classified link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// A video the presentation layer can embed as a player.
    VideoEmbed,
    /// An audio stream; the player needs the full resource URI.
    AudioEmbed,
    /// A micro-blog status embed.
    SocialEmbed,
    /// Anything else; rendered as an ordinary hyperlink.
    PlainLink,
}

/// Result of classifying a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Embed kind.
    pub kind: LinkKind,
    /// Extracted identifier, when the kind carries one.
    pub identifier: Option<String>,
}

impl Classification {
    /// Plain link, no identifier.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            kind: LinkKind::PlainLink,
            identifier: None,
        }
    }

    fn video(id: String) -> Self {
        Self {
            kind: LinkKind::VideoEmbed,
            identifier: Some(id),
        }
    }

    fn audio(uri: &str) -> Self {
        Self {
            kind: LinkKind::AudioEmbed,
            identifier: Some(uri.to_string()),
        }
    }

    fn social(id: Option<String>) -> Self {
        Self {
            kind: LinkKind::SocialEmbed,
            identifier: id,
        }
    }
}

/// Classify a URL string into an embed kind plus identifier.
///
/// Video hosts are matched against the ordered shape table in
/// [`patterns`]; a candidate identifier is accepted only at the exact
/// expected length, otherwise the link degrades to a plain link.
#[must_use]
pub fn classify(link: &str) -> Classification {
    let Ok(url) = Url::parse(link.trim()) else {
        return Classification::plain();
    };
    let Some(host) = url.host_str() else {
        return Classification::plain();
    };
    let host = host.to_ascii_lowercase();

    if is_video_host(&host) {
        return match patterns::video_candidate(&url) {
            Some(id) => Classification::video(id),
            None => Classification::plain(),
        };
    }

    if host == "open.spotify.com" {
        return Classification::audio(link.trim());
    }

    if is_social_host(&host) {
        return Classification::social(status_id(&url));
    }

    Classification::plain()
}

fn is_video_host(host: &str) -> bool {
    host == "youtu.be" || host == "youtube.com" || host.ends_with(".youtube.com")
}

fn is_social_host(host: &str) -> bool {
    host == "twitter.com"
        || host.ends_with(".twitter.com")
        || host == "x.com"
        || host.ends_with(".x.com")
}

/// The status id path segment, when the URL is deep enough to carry one.
fn status_id(url: &Url) -> Option<String> {
    url.path_segments()?
        .nth(STATUS_ID_SEGMENT)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::short_link("https://youtu.be/dQw4w9WgXcQ")]
    #[case::watch_query("https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    #[case::watch_query_extra_params("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s")]
    #[case::embed_path("https://www.youtube.com/embed/dQw4w9WgXcQ")]
    #[case::path_segment("https://youtube.com/v/dQw4w9WgXcQ")]
    #[case::user_path("https://www.youtube.com/u/w/dQw4w9WgXcQ")]
    #[case::mobile_host("https://m.youtube.com/watch?v=dQw4w9WgXcQ")]
    fn video_shapes_extract_the_id(#[case] link: &str) {
        let result = classify(link);
        assert_eq!(result.kind, LinkKind::VideoEmbed);
        assert_eq!(result.identifier.as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[rstest]
    #[case::ten_chars("https://youtu.be/dQw4w9WgXc")]
    #[case::twelve_chars("https://www.youtube.com/watch?v=dQw4w9WgXcQQ")]
    #[case::empty_id("https://www.youtube.com/watch?v=")]
    #[case::no_query("https://www.youtube.com/watch")]
    #[case::bare_host("https://www.youtube.com/")]
    fn malformed_video_urls_degrade_to_plain(#[case] link: &str) {
        assert_eq!(classify(link), Classification::plain());
    }

    #[test]
    fn test_audio_uses_full_uri() {
        let link = "https://open.spotify.com/episode/4rOoJ6Egrf8K2IrywzwOMk";
        let result = classify(link);
        assert_eq!(result.kind, LinkKind::AudioEmbed);
        assert_eq!(result.identifier.as_deref(), Some(link));
    }

    #[test]
    fn test_social_extracts_status_id() {
        let result = classify("https://twitter.com/rustlang/status/1234567890123456789");
        assert_eq!(result.kind, LinkKind::SocialEmbed);
        assert_eq!(
            result.identifier.as_deref(),
            Some("1234567890123456789")
        );
    }

    #[test]
    fn test_social_shallow_path_has_no_identifier() {
        let result = classify("https://twitter.com/rustlang");
        assert_eq!(result.kind, LinkKind::SocialEmbed);
        assert_eq!(result.identifier, None);
    }

    #[rstest]
    #[case("https://example.com/article")]
    #[case("not a url at all")]
    #[case("")]
    #[case("ftp://youtube.fake/dQw4w9WgXcQ")]
    #[case("https://notyoutube.com/watch?v=dQw4w9WgXcQ")]
    fn unrecognized_input_is_plain(#[case] link: &str) {
        let result = classify(link);
        assert_eq!(result.kind, LinkKind::PlainLink);
        assert_eq!(result.identifier, None);
    }

    #[test]
    fn test_host_match_is_case_insensitive() {
        let result = classify("https://WWW.YOUTUBE.COM/watch?v=dQw4w9WgXcQ");
        assert_eq!(result.kind, LinkKind::VideoEmbed);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // classify is total: arbitrary input never panics.
    proptest! {
        #[test]
        fn prop_classify_never_panics(input in ".*") {
            let _ = classify(&input);
        }
    }

    // classify is deterministic: identical input, identical output.
    proptest! {
        #[test]
        fn prop_classify_deterministic(input in ".*") {
            prop_assert_eq!(classify(&input), classify(&input));
        }
    }

    // Every accepted video identifier has the exact expected length.
    proptest! {
        #[test]
        fn prop_video_identifiers_have_exact_length(id in "[A-Za-z0-9_-]{1,20}") {
            let result = classify(&format!("https://youtu.be/{id}"));
            if id.len() == VIDEO_ID_LEN {
                prop_assert_eq!(result.kind, LinkKind::VideoEmbed);
                prop_assert_eq!(result.identifier, Some(id));
            } else {
                prop_assert_eq!(result.kind, LinkKind::PlainLink);
            }
        }
    }
}
