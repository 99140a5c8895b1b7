//! Feed view types.

use serde::Serialize;

use crate::classifier::Classification;
use crate::post::Post;

/// A post enriched for presentation: the record itself, a resolved signed
/// attachment URL when the viewer may see one, and the link classification.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    /// The underlying post record.
    #[serde(flatten)]
    pub post: Post,
    /// Signed attachment URL, present only for the attachment's owner.
    pub attachment_url: Option<String>,
    /// Link classification for embed rendering.
    pub link_embed: Classification,
}
