//! Feed service implementation.

use std::sync::Arc;

use futures::StreamExt;
use tracing::debug;
use uuid::Uuid;

use super::error::FeedError;
use super::types::PostView;
use crate::classifier;
use crate::post::{Post, PostRepository};
use crate::vault::Vault;

/// Cap on concurrent signed-URL resolutions per feed, protecting the vault
/// backend from unbounded parallel requests on large feeds.
pub const MAX_CONCURRENT_RESOLUTIONS: usize = 8;

/// Feed service composing posts, vault, and classifier into views.
pub struct FeedService<R: PostRepository> {
    repo: Arc<R>,
    vault: Arc<Vault>,
}

impl<R: PostRepository> FeedService<R> {
    /// Create a new feed service.
    #[must_use]
    pub fn new(repo: Arc<R>, vault: Arc<Vault>) -> Self {
        Self { repo, vault }
    }

    /// Assemble the principal's own feed.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Unauthenticated` when no principal is attached,
    /// or the underlying listing error.
    pub async fn assemble_personal(
        &self,
        principal: Option<Uuid>,
    ) -> Result<Vec<PostView>, FeedError> {
        let principal = principal.ok_or(FeedError::Unauthenticated)?;
        let posts = self.repo.list_by_owner(principal).await?;
        Ok(self.resolve_all(posts, Some(principal)).await)
    }

    /// Assemble the global feed of every post.
    ///
    /// Attachment URLs are resolved only for posts the viewer owns; other
    /// owners' attachments stay unresolved rather than leaking signed URLs.
    ///
    /// # Errors
    ///
    /// Returns the underlying listing error. An empty store yields an empty
    /// feed, not an error.
    pub async fn assemble_global(&self, viewer: Option<Uuid>) -> Result<Vec<PostView>, FeedError> {
        let posts = self.repo.list_all().await?;
        Ok(self.resolve_all(posts, viewer).await)
    }

    /// Resolve a batch of posts with bounded concurrency, preserving order.
    async fn resolve_all(&self, posts: Vec<Post>, viewer: Option<Uuid>) -> Vec<PostView> {
        futures::stream::iter(posts.into_iter().map(|post| self.resolve(post, viewer)))
            .buffered(MAX_CONCURRENT_RESOLUTIONS)
            .collect()
            .await
    }

    /// Resolve a single post into a view.
    ///
    /// A failed signed-URL resolution degrades this one view's
    /// `attachment_url` to `None`; it never fails the caller.
    pub async fn resolve(&self, post: Post, viewer: Option<Uuid>) -> PostView {
        let link_embed = classifier::classify(&post.link);

        let attachment_url = match (&post.attachment, viewer) {
            (Some(key), Some(viewer)) if viewer == post.owner => {
                match self.vault.signed_url(post.owner, key).await {
                    Ok(signed) => Some(signed.url),
                    Err(e) => {
                        debug!(post_id = %post.id, error = %e, "attachment resolution failed, omitting URL");
                        None
                    }
                }
            }
            _ => None,
        };

        PostView {
            post,
            attachment_url,
            link_embed,
        }
    }
}
