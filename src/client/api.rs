use std::env;

use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::article::model::{ArticleRequest, ArticleResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Cannot connect to backend service: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The service answered with a non-success status; `message` is the raw body.
    #[error("request failed with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response from backend service: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// True when the failure means the service (or its store) cannot be reached.
    pub fn is_unreachable(&self) -> bool {
        match self {
            ClientError::Unreachable(_) => true,
            ClientError::Rejected { status, .. } => {
                *status == StatusCode::SERVICE_UNAVAILABLE.as_u16()
            }
            ClientError::Decode(_) => false,
        }
    }
}

#[derive(Deserialize)]
struct CreatedResponse {
    id: String,
}

/// Thin HTTP client for the article service.
#[derive(Clone, Debug)]
pub struct ArticleClient {
    base: String,
    inner: Client,
}

impl ArticleClient {
    pub fn new(base: impl Into<String>) -> Self {
        ArticleClient {
            base: base.into().trim_end_matches('/').to_string(),
            inner: Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(base_url_from(|name| env::var(name).ok()))
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn request(&self, method: Method, route: impl AsRef<str>) -> RequestBuilder {
        self.inner
            .request(method, format!("{}{}", self.base, route.as_ref()))
            .header("Accept", "application/json")
    }

    pub async fn list_articles(&self) -> Result<Vec<ArticleResponse>, ClientError> {
        let response = send(self.request(Method::GET, "/articles")).await?;
        response.json().await.map_err(ClientError::Decode)
    }

    pub async fn get_article(&self, id: &str) -> Result<ArticleResponse, ClientError> {
        let response = send(self.request(Method::GET, format!("/articles/{}", id))).await?;
        response.json().await.map_err(ClientError::Decode)
    }

    /// Publishes a new article and returns its id.
    pub async fn create_article(&self, draft: &ArticleRequest) -> Result<String, ClientError> {
        let response = send(self.request(Method::POST, "/articles").json(draft)).await?;
        let created: CreatedResponse = response.json().await.map_err(ClientError::Decode)?;
        Ok(created.id)
    }

    pub async fn update_article(&self, id: &str, draft: &ArticleRequest) -> Result<(), ClientError> {
        debug!("PUT {}/articles/{}", self.base, id);
        send(self.request(Method::PUT, format!("/articles/{}", id)).json(draft)).await?;
        Ok(())
    }

    pub async fn delete_article(&self, id: &str) -> Result<(), ClientError> {
        send(self.request(Method::DELETE, format!("/articles/{}", id))).await?;
        Ok(())
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, ClientError> {
    let response = builder.send().await.map_err(ClientError::Unreachable)?;
    let status = response.status();
    debug!("{} -> {}", response.url(), status);

    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// `API_URL` when set, otherwise `http://{API_HOST}:{API_PORT}`.
pub fn base_url_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("API_URL") {
        return url.trim_end_matches('/').to_string();
    }
    let host = lookup("API_HOST").unwrap_or_else(|| "backend".to_string());
    let port = lookup("API_PORT").unwrap_or_else(|| "5000".to_string());
    format!("http://{}:{}", host, port)
}
