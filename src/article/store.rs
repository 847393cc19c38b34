use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection};
use thiserror::Error;

use crate::article::model::{Article, ArticleFields, ArticleId, NewArticle, timestamp};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unavailable(String),

    #[error("store operation failed: {0}")]
    Operation(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(..)
            | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Operation(err.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of a field replacement, mirroring the store's matched/modified counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: bool,
    pub modified: bool,
}

/// Persistence contract for articles.
///
/// Implementations own `_id` assignment and per-document atomicity; callers
/// never lock around these calls.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All articles, newest `created_at` first.
    async fn list_newest_first(&self) -> StoreResult<Vec<Article>>;

    async fn find(&self, id: ArticleId) -> StoreResult<Option<Article>>;

    /// Appends a new document and returns the identifier the store assigned.
    async fn insert(&self, article: NewArticle) -> StoreResult<ArticleId>;

    /// Overwrites title, author and content and stamps `updated_at`.
    async fn replace_fields(
        &self,
        id: ArticleId,
        fields: &ArticleFields,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<UpdateOutcome>;

    /// Returns `true` when a document was removed.
    async fn delete(&self, id: ArticleId) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;
}

/// Newest `created_at` first, newer `_id` first among equal timestamps.
fn newest_first() -> Document {
    doc! { "created_at": -1, "_id": -1 }
}

/// Full replacement of the editable fields; `_id` and `created_at` are never touched.
fn set_fields(fields: &ArticleFields, updated_at: DateTime<Utc>) -> Document {
    doc! {
        "$set": {
            "title": fields.title.clone(),
            "author": fields.author.clone(),
            "content": fields.content.clone(),
            "updated_at": timestamp::to_text(&updated_at),
        }
    }
}

pub struct MongoArticleStore {
    client: Client,
    database: String,
    collection: Collection<Article>,
}

impl MongoArticleStore {
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Article>(collection);
        MongoArticleStore {
            client: client.clone(),
            database: database.to_string(),
            collection,
        }
    }
}

#[async_trait]
impl ArticleStore for MongoArticleStore {
    async fn list_newest_first(&self) -> StoreResult<Vec<Article>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(newest_first())
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find(&self, id: ArticleId) -> StoreResult<Option<Article>> {
        Ok(self
            .collection
            .find_one(doc! { "_id": id.object_id() })
            .await?)
    }

    async fn insert(&self, article: NewArticle) -> StoreResult<ArticleId> {
        let result = self
            .collection
            .clone_with_type::<NewArticle>()
            .insert_one(article)
            .await?;

        result
            .inserted_id
            .as_object_id()
            .map(ArticleId::from)
            .ok_or_else(|| StoreError::Operation("inserted id is not an ObjectId".into()))
    }

    async fn replace_fields(
        &self,
        id: ArticleId,
        fields: &ArticleFields,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.object_id() },
                set_fields(fields, updated_at),
            )
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count > 0,
            modified: result.modified_count > 0,
        })
    }

    async fn delete(&self, id: ArticleId) -> StoreResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.object_id() })
            .await?;

        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
