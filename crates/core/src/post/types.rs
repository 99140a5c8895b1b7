//! Post types and data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Keyword tag drawn from the closed enumeration.
///
/// Wire strings match the values the feed has always carried
/// ("Blog Post", "Youtube Video", ...), so existing records deserialize as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Step-by-step learning material.
    Tutorial,
    /// Long-form written article.
    #[serde(rename = "Blog Post")]
    BlogPost,
    /// Video hosted on YouTube.
    #[serde(rename = "Youtube Video")]
    YoutubeVideo,
    /// Audio episode.
    Podcast,
    /// Reference documentation.
    Documentation,
}

impl Keyword {
    /// Convert to the wire string value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tutorial => "Tutorial",
            Self::BlogPost => "Blog Post",
            Self::YoutubeVideo => "Youtube Video",
            Self::Podcast => "Podcast",
            Self::Documentation => "Documentation",
        }
    }

    /// Parse from the wire string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Tutorial" => Some(Self::Tutorial),
            "Blog Post" => Some(Self::BlogPost),
            "Youtube Video" => Some(Self::YoutubeVideo),
            "Podcast" => Some(Self::Podcast),
            "Documentation" => Some(Self::Documentation),
            _ => None,
        }
    }
}

/// The mutable fields of a post.
///
/// Update semantics are a full replace of this set; immutable fields
/// (`id`, `owner`, `created_at`) live only on [`Post`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFields {
    /// Free-text description; the first line is the display title.
    pub blurb: String,
    /// The shared URL, primary classified resource.
    pub link: String,
    /// Free-text language tag (e.g. a programming language name).
    pub language: String,
    /// Keyword tags, set semantics.
    pub keywords: Vec<Keyword>,
    /// Star rating, 1 to 5 inclusive.
    pub rating: i16,
    /// Vault key of the optional attachment.
    pub attachment: Option<String>,
}

/// Input for creating a post record.
#[derive(Debug, Clone)]
pub struct CreatePostRecord {
    /// Pre-assigned post ID.
    pub id: Uuid,
    /// Owning principal.
    pub owner: Uuid,
    /// Initial field values (already validated).
    pub fields: PostFields,
}

/// Post domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier, immutable.
    pub id: Uuid,
    /// Owning principal, immutable after creation.
    pub owner: Uuid,
    /// Free-text description.
    pub blurb: String,
    /// The shared URL.
    pub link: String,
    /// Language tag.
    pub language: String,
    /// Keyword tags.
    pub keywords: Vec<Keyword>,
    /// Star rating, 1 to 5 inclusive.
    pub rating: i16,
    /// Vault key of the optional attachment.
    pub attachment: Option<String>,
    /// Creation timestamp, default ordering key.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Display title: the first non-empty line of the blurb.
    #[must_use]
    pub fn title(&self) -> &str {
        self.blurb.trim().lines().next().unwrap_or("")
    }

    /// The mutable fields of this post.
    #[must_use]
    pub fn fields(&self) -> PostFields {
        PostFields {
            blurb: self.blurb.clone(),
            link: self.link.clone(),
            language: self.language.clone(),
            keywords: self.keywords.clone(),
            rating: self.rating,
            attachment: self.attachment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_roundtrip() {
        let keywords = [
            Keyword::Tutorial,
            Keyword::BlogPost,
            Keyword::YoutubeVideo,
            Keyword::Podcast,
            Keyword::Documentation,
        ];

        for k in keywords {
            let s = k.as_str();
            let parsed = Keyword::parse(s);
            assert_eq!(parsed, Some(k));
        }
    }

    #[test]
    fn test_keyword_unknown() {
        assert_eq!(Keyword::parse("Screencast"), None);
    }

    #[test]
    fn test_keyword_wire_format() {
        let json = serde_json::to_string(&Keyword::YoutubeVideo).unwrap();
        assert_eq!(json, "\"Youtube Video\"");

        let parsed: Keyword = serde_json::from_str("\"Blog Post\"").unwrap();
        assert_eq!(parsed, Keyword::BlogPost);
    }

    #[test]
    fn test_post_title_is_first_line() {
        let post = Post {
            id: Uuid::new_v4(),
            owner: Uuid::new_v4(),
            blurb: "  Great talk\nGoes deep on borrow checking.".to_string(),
            link: "https://example.com".to_string(),
            language: "Rust".to_string(),
            keywords: vec![Keyword::Tutorial],
            rating: 5,
            attachment: None,
            created_at: Utc::now(),
        };

        assert_eq!(post.title(), "Great talk");
    }
}
