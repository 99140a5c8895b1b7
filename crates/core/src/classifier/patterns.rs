//! Accepted video-URL shapes.
//!
//! An ordered table of (shape, extractor) entries evaluated in priority
//! order. Each extractor yields a candidate identifier; a candidate is
//! accepted only when it is exactly [`VIDEO_ID_LEN`] characters, so
//! truncated or padded matches never reach the caller.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Exact length of a valid video identifier.
pub const VIDEO_ID_LEN: usize = 11;

type Extractor = fn(&Url) -> Option<String>;

/// Shape table, highest priority first.
pub(crate) const VIDEO_SHAPES: &[(&str, Extractor)] = &[
    ("short-link", short_link),
    ("path-segment", path_segment),
    ("user-path", user_path),
    ("embed-path", embed_path),
    ("query-parameter", watch_query),
];

static PATH_SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/v/([^/?#]+)").expect("valid pattern"));
static USER_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/u/\w/([^/?#]+)").expect("valid pattern"));
static EMBED_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/embed/([^/?#]+)").expect("valid pattern"));

/// Extract the accepted video identifier from a video-host URL, if any
/// shape matches with a candidate of the exact expected length.
pub(crate) fn video_candidate(url: &Url) -> Option<String> {
    for (_, extract) in VIDEO_SHAPES {
        if let Some(candidate) = extract(url) {
            if candidate.len() == VIDEO_ID_LEN {
                return Some(candidate);
            }
        }
    }
    None
}

/// `https://youtu.be/{id}`
fn short_link(url: &Url) -> Option<String> {
    if url.host_str()? != "youtu.be" {
        return None;
    }
    url.path_segments()?
        .next()
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// `/v/{id}`
fn path_segment(url: &Url) -> Option<String> {
    PATH_SEGMENT_RE
        .captures(url.path())
        .map(|c| c[1].to_string())
}

/// `/u/{char}/{id}`
fn user_path(url: &Url) -> Option<String> {
    USER_PATH_RE.captures(url.path()).map(|c| c[1].to_string())
}

/// `/embed/{id}`
fn embed_path(url: &Url) -> Option<String> {
    EMBED_PATH_RE.captures(url.path()).map(|c| c[1].to_string())
}

/// `/watch?v={id}`
fn watch_query(url: &Url) -> Option<String> {
    if !url.path().ends_with("watch") {
        return None;
    }
    url.query_pairs()
        .find(|(k, _)| k == "v")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("valid test url")
    }

    #[test]
    fn test_shape_table_order() {
        let names: Vec<&str> = VIDEO_SHAPES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "short-link",
                "path-segment",
                "user-path",
                "embed-path",
                "query-parameter"
            ]
        );
    }

    #[test]
    fn test_short_link_extractor() {
        assert_eq!(
            short_link(&url("https://youtu.be/dQw4w9WgXcQ")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(short_link(&url("https://youtu.be/")), None);
        assert_eq!(
            short_link(&url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")),
            None
        );
    }

    #[test]
    fn test_path_extractors() {
        assert_eq!(
            path_segment(&url("https://youtube.com/v/dQw4w9WgXcQ")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            user_path(&url("https://youtube.com/u/w/dQw4w9WgXcQ")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            embed_path(&url("https://youtube.com/embed/dQw4w9WgXcQ")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(embed_path(&url("https://youtube.com/watch?v=x")), None);
    }

    #[test]
    fn test_watch_query_extractor() {
        assert_eq!(
            watch_query(&url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            watch_query(&url("https://www.youtube.com/watch?t=42&v=dQw4w9WgXcQ")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(watch_query(&url("https://www.youtube.com/watch")), None);
        assert_eq!(
            watch_query(&url("https://www.youtube.com/playlist?v=dQw4w9WgXcQ")),
            None
        );
    }

    #[test]
    fn test_candidate_length_gate() {
        assert_eq!(
            video_candidate(&url("https://youtu.be/dQw4w9WgXcQ")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
        // Ten characters: shape matches, candidate rejected.
        assert_eq!(video_candidate(&url("https://youtu.be/dQw4w9WgXc")), None);
        // Twelve characters: same.
        assert_eq!(
            video_candidate(&url("https://youtube.com/embed/dQw4w9WgXcQQ")),
            None
        );
    }

    #[test]
    fn test_candidate_falls_through_shapes() {
        // Short-link shape does not apply; the query shape still matches.
        assert_eq!(
            video_candidate(&url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }
}
