use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::article::model::{Article, ArticleFields, ArticleId, NewArticle};
use crate::article::store::{ArticleStore, StoreResult, UpdateOutcome};

/// Process-local article store, selected with `ARTICLE_STORE=memory`.
#[derive(Default)]
pub struct InMemoryArticleStore {
    articles: RwLock<HashMap<ArticleId, Article>>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn list_newest_first(&self) -> StoreResult<Vec<Article>> {
        let mut articles: Vec<Article> = self.articles.read().await.values().cloned().collect();
        // same key as the Mongo sort: newer id first on equal timestamps
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(articles)
    }

    async fn find(&self, id: ArticleId) -> StoreResult<Option<Article>> {
        Ok(self.articles.read().await.get(&id).cloned())
    }

    async fn insert(&self, article: NewArticle) -> StoreResult<ArticleId> {
        let id = ArticleId::new();
        self.articles.write().await.insert(id, article.with_id(id));
        Ok(id)
    }

    async fn replace_fields(
        &self,
        id: ArticleId,
        fields: &ArticleFields,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<UpdateOutcome> {
        let mut articles = self.articles.write().await;
        let Some(article) = articles.get_mut(&id) else {
            return Ok(UpdateOutcome {
                matched: false,
                modified: false,
            });
        };

        article.title = fields.title.clone();
        article.author = fields.author.clone();
        article.content = fields.content.clone();
        article.updated_at = Some(updated_at);

        Ok(UpdateOutcome {
            matched: true,
            modified: true,
        })
    }

    async fn delete(&self, id: ArticleId) -> StoreResult<bool> {
        Ok(self.articles.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
