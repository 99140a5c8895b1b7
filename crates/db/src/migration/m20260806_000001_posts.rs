//! Posts table migration.
//!
//! Creates the posts table holding resource post metadata.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(POSTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS posts CASCADE;")
            .await?;
        Ok(())
    }
}

const POSTS_SQL: &str = r"
-- Posts table for resource post metadata
CREATE TABLE posts (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL,
    blurb TEXT NOT NULL,
    link TEXT NOT NULL,
    language TEXT NOT NULL,
    keywords JSONB NOT NULL DEFAULT '[]'::jsonb,
    rating SMALLINT NOT NULL,
    attachment TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_rating_range CHECK (rating BETWEEN 1 AND 5),
    CONSTRAINT chk_blurb_nonempty CHECK (length(trim(blurb)) > 0),
    CONSTRAINT chk_link_nonempty CHECK (length(trim(link)) > 0)
);

-- Index for an owner's feed (most common read)
CREATE INDEX idx_posts_owner ON posts(owner_id, created_at DESC);

-- Index for the global feed ordering
CREATE INDEX idx_posts_created ON posts(created_at DESC);
";
