use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::article::model::{ArticleId, ArticleRequest, ArticleResponse, NewArticle};
use crate::article::store::ArticleStore;
use crate::utils::error::CustomError;

/// Maps the five article operations onto an [`ArticleStore`].
///
/// Holds no per-request state; identifiers and bodies are validated here so
/// the store only ever sees well-formed input.
#[derive(Clone)]
pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        ArticleService { store }
    }

    #[cfg(test)]
    fn store(&self) -> &Arc<dyn ArticleStore> {
        &self.store
    }

    pub async fn list_articles(&self) -> Result<Vec<ArticleResponse>, CustomError> {
        let articles = self.store.list_newest_first().await?;
        Ok(articles.into_iter().map(ArticleResponse::from).collect())
    }

    pub async fn get_article(&self, id: &str) -> Result<ArticleResponse, CustomError> {
        let article_id: ArticleId = id.parse()?;

        self.store
            .find(article_id)
            .await?
            .map(ArticleResponse::from)
            .ok_or_else(|| CustomError::NotFoundError("Article not found".into()))
    }

    pub async fn create_article(&self, request: ArticleRequest) -> Result<ArticleId, CustomError> {
        let fields = request.into_fields()?;
        let id = self
            .store
            .insert(NewArticle::stamped(fields, Utc::now()))
            .await?;

        info!("created article {}", id);
        Ok(id)
    }

    pub async fn update_article(
        &self,
        id: &str,
        request: ArticleRequest,
    ) -> Result<(), CustomError> {
        debug!("update requested for article id {:?}", id);
        let article_id: ArticleId = id.parse()?;

        debug!(
            "update body for {}: title={:?} author={:?} content_len={:?}",
            article_id,
            request.title,
            request.author,
            request.content.as_ref().map(String::len)
        );
        let fields = request.into_fields()?;

        let outcome = self
            .store
            .replace_fields(article_id, &fields, Utc::now())
            .await?;
        debug!(
            "update result for {}: matched={} modified={}",
            article_id, outcome.matched, outcome.modified
        );

        if !outcome.matched {
            return Err(CustomError::NotFoundError("Article not found".into()));
        }
        Ok(())
    }

    pub async fn delete_article(&self, id: &str) -> Result<(), CustomError> {
        let article_id: ArticleId = id.parse()?;

        if self.store.delete(article_id).await? {
            info!("deleted article {}", article_id);
            Ok(())
        } else {
            Err(CustomError::NotFoundError("Article not found".into()))
        }
    }
}
