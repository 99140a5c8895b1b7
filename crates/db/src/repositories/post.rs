//! Post repository for database operations.
//!
//! Implements post CRUD operations using SeaORM. Ownership-gated mutation
//! runs as a single conditional statement - the WHERE clause on
//! `(id, owner_id)` is the check-and-act, so there is no window between
//! check and mutation.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::posts;
use resourcehub_core::post::{
    CreatePostRecord, Keyword, Post, PostError, PostFields, PostRepository as PostRepoTrait,
};

/// Post repository implementation.
#[derive(Debug, Clone)]
pub struct PostRepository {
    db: DatabaseConnection,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Decide which error a zero-row conditional mutation means.
    async fn missing_or_foreign(&self, id: Uuid) -> PostError {
        match posts::Entity::find_by_id(id).one(&self.db).await {
            Ok(Some(_)) => PostError::forbidden(id),
            Ok(None) => PostError::not_found(id),
            Err(e) => PostError::repository(e.to_string()),
        }
    }
}

impl PostRepoTrait for PostRepository {
    async fn create(&self, input: CreatePostRecord) -> Result<Post, PostError> {
        let active_model = posts::ActiveModel {
            id: Set(input.id),
            owner_id: Set(input.owner),
            blurb: Set(input.fields.blurb),
            link: Set(input.fields.link),
            language: Set(input.fields.language),
            keywords: Set(keywords_to_json(&input.fields.keywords)),
            rating: Set(input.fields.rating),
            attachment: Set(input.fields.attachment),
            created_at: Set(Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| PostError::repository(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, PostError> {
        let model = posts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PostError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        fields: PostFields,
    ) -> Result<Post, PostError> {
        let result = posts::Entity::update_many()
            .col_expr(posts::Column::Blurb, Expr::value(fields.blurb))
            .col_expr(posts::Column::Link, Expr::value(fields.link))
            .col_expr(posts::Column::Language, Expr::value(fields.language))
            .col_expr(
                posts::Column::Keywords,
                Expr::value(keywords_to_json(&fields.keywords)),
            )
            .col_expr(posts::Column::Rating, Expr::value(fields.rating))
            .col_expr(posts::Column::Attachment, Expr::value(fields.attachment))
            .filter(posts::Column::Id.eq(id))
            .filter(posts::Column::OwnerId.eq(owner))
            .exec(&self.db)
            .await
            .map_err(|e| PostError::repository(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(self.missing_or_foreign(id).await);
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| PostError::not_found(id))
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<Post, PostError> {
        // Read first so the caller gets the removed record back (attachment
        // cleanup); the conditional DELETE stays the authoritative check.
        let model = posts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PostError::repository(e.to_string()))?
            .ok_or_else(|| PostError::not_found(id))?;

        if model.owner_id != owner {
            return Err(PostError::forbidden(id));
        }

        let result = posts::Entity::delete_many()
            .filter(posts::Column::Id.eq(id))
            .filter(posts::Column::OwnerId.eq(owner))
            .exec(&self.db)
            .await
            .map_err(|e| PostError::repository(e.to_string()))?;

        if result.rows_affected == 0 {
            // Lost a race with a concurrent delete.
            return Err(PostError::not_found(id));
        }

        Ok(to_domain(model))
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Post>, PostError> {
        let models = posts::Entity::find()
            .filter(posts::Column::OwnerId.eq(owner))
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| PostError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let models = posts::Entity::find()
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| PostError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }
}

/// Convert domain keywords to the JSONB column value.
fn keywords_to_json(keywords: &[Keyword]) -> serde_json::Value {
    serde_json::to_value(keywords).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
}

/// Convert the JSONB column value back to domain keywords.
///
/// Unknown entries are dropped rather than failing the whole record.
fn keywords_from_json(value: &serde_json::Value) -> Vec<Keyword> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.as_str().and_then(Keyword::parse))
                .collect()
        })
        .unwrap_or_default()
}

/// Convert database model to domain model.
fn to_domain(model: posts::Model) -> Post {
    Post {
        id: model.id,
        owner: model.owner_id,
        blurb: model.blurb,
        link: model.link,
        language: model.language,
        keywords: keywords_from_json(&model.keywords),
        rating: model.rating,
        attachment: model.attachment,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keywords_json_roundtrip() {
        let keywords = vec![Keyword::Tutorial, Keyword::YoutubeVideo];
        let value = keywords_to_json(&keywords);
        assert_eq!(value, json!(["Tutorial", "Youtube Video"]));
        assert_eq!(keywords_from_json(&value), keywords);
    }

    #[test]
    fn test_keywords_from_json_drops_unknown_entries() {
        let value = json!(["Tutorial", "Screencast", 42]);
        assert_eq!(keywords_from_json(&value), vec![Keyword::Tutorial]);
    }

    #[test]
    fn test_keywords_from_json_tolerates_non_array() {
        assert_eq!(keywords_from_json(&json!(null)), Vec::<Keyword>::new());
        assert_eq!(keywords_from_json(&json!("Tutorial")), Vec::<Keyword>::new());
    }
}
