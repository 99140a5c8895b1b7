//! Post service implementation.

use std::sync::Arc;

use uuid::Uuid;

use super::error::PostError;
use super::types::{CreatePostRecord, Post, PostFields};

/// Lowest accepted rating.
const MIN_RATING: i16 = 1;
/// Highest accepted rating.
const MAX_RATING: i16 = 5;

/// Repository trait for post persistence.
///
/// This trait is implemented by the db crate to provide actual database
/// operations. `update_owned` and `delete_owned` must perform the ownership
/// check and the mutation as a single conditional statement - there is no
/// observable window between check and act.
pub trait PostRepository: Send + Sync {
    /// Create a new post record; `created_at` is stamped at insert.
    fn create(
        &self,
        input: CreatePostRecord,
    ) -> impl std::future::Future<Output = Result<Post, PostError>> + Send;

    /// Find a post by ID.
    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Post>, PostError>> + Send;

    /// Replace the mutable fields of a post the principal owns.
    ///
    /// Fails with `PostError::Forbidden` when the record exists under a
    /// different owner and `PostError::NotFound` when it is absent; on
    /// failure no write occurs.
    fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        fields: PostFields,
    ) -> impl std::future::Future<Output = Result<Post, PostError>> + Send;

    /// Delete a post the principal owns, returning the removed record.
    ///
    /// Same ownership semantics as `update_owned`; deleting an already
    /// deleted post yields `PostError::NotFound`.
    fn delete_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> impl std::future::Future<Output = Result<Post, PostError>> + Send;

    /// List all posts owned by a principal, newest first.
    fn list_by_owner(
        &self,
        owner: Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Post>, PostError>> + Send;

    /// List every post regardless of owner, newest first.
    ///
    /// Unpaginated by contract; acceptable for small corpora only.
    fn list_all(&self) -> impl std::future::Future<Output = Result<Vec<Post>, PostError>> + Send;
}

/// Post service owning validation on top of a repository.
pub struct PostService<R: PostRepository> {
    repo: Arc<R>,
}

impl<R: PostRepository> PostService<R> {
    /// Create a new post service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a post for the given owner.
    ///
    /// # Errors
    ///
    /// Returns `PostError::Validation` on missing/invalid fields and
    /// `PostError::Repository` when persistence fails.
    pub async fn create(&self, owner: Uuid, mut fields: PostFields) -> Result<Post, PostError> {
        validate_fields(owner, &fields)?;
        dedupe_keywords(&mut fields.keywords);

        let id = Uuid::new_v4();
        self.repo.create(CreatePostRecord { id, owner, fields }).await
    }

    /// Get a post by ID.
    ///
    /// # Errors
    ///
    /// Returns `PostError::NotFound` if the post does not exist.
    pub async fn get(&self, id: Uuid) -> Result<Post, PostError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| PostError::not_found(id))
    }

    /// Replace the mutable fields of a post owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `PostError::Validation` before any write on invalid fields,
    /// `PostError::Forbidden` on owner mismatch, `PostError::NotFound` when
    /// the post is absent.
    pub async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        mut fields: PostFields,
    ) -> Result<Post, PostError> {
        validate_fields(owner, &fields)?;
        dedupe_keywords(&mut fields.keywords);

        self.repo.update_owned(id, owner, fields).await
    }

    /// Delete a post owned by `owner`, returning the removed record so the
    /// caller can release its attachment blob.
    ///
    /// # Errors
    ///
    /// Returns `PostError::Forbidden` on owner mismatch and
    /// `PostError::NotFound` when the post is absent (including repeats).
    pub async fn delete(&self, id: Uuid, owner: Uuid) -> Result<Post, PostError> {
        self.repo.delete_owned(id, owner).await
    }

    /// List the principal's posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PostError::Repository` when the listing fails.
    pub async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Post>, PostError> {
        self.repo.list_by_owner(owner).await
    }

    /// List every post, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PostError::Repository` when the listing fails.
    pub async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        self.repo.list_all().await
    }
}

/// Validate the mutable fields of a post.
fn validate_fields(owner: Uuid, fields: &PostFields) -> Result<(), PostError> {
    if fields.blurb.trim().is_empty() {
        return Err(PostError::validation("blurb must not be empty"));
    }

    if fields.link.trim().is_empty() {
        return Err(PostError::validation("link must not be empty"));
    }

    if !(MIN_RATING..=MAX_RATING).contains(&fields.rating) {
        return Err(PostError::validation(format!(
            "rating {} is outside {MIN_RATING}..={MAX_RATING}",
            fields.rating
        )));
    }

    // An attachment reference may only point into the owner's own vault
    // partition (keys are `{owner}/...`).
    if let Some(key) = &fields.attachment {
        if !key.starts_with(&format!("{owner}/")) {
            return Err(PostError::validation(
                "attachment key is outside the owner's vault partition",
            ));
        }
    }

    Ok(())
}

/// Collapse duplicate keywords, preserving first-seen order.
fn dedupe_keywords(keywords: &mut Vec<super::types::Keyword>) {
    let mut seen = std::collections::HashSet::new();
    keywords.retain(|k| seen.insert(*k));
}
