use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::error::CustomError;

/// Identifier of a stored article, validated before any store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(ObjectId);

#[derive(Debug, Error)]
#[error("invalid article id `{0}`")]
pub struct InvalidArticleId(pub String);

impl ArticleId {
    pub fn new() -> Self {
        ArticleId(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for ArticleId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ArticleId {
    type Err = InvalidArticleId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(raw)
            .map(ArticleId)
            .map_err(|_| InvalidArticleId(raw.to_string()))
    }
}

impl From<ObjectId> for ArticleId {
    fn from(id: ObjectId) -> Self {
        ArticleId(id)
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<InvalidArticleId> for CustomError {
    fn from(err: InvalidArticleId) -> Self {
        log::debug!("rejecting request: {}", err);
        CustomError::BadRequestError("Invalid article ID format".into())
    }
}

/// Article document as it lives in the collection.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Article document before the store has assigned it an `_id`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewArticle {
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl NewArticle {
    pub fn stamped(fields: ArticleFields, created_at: DateTime<Utc>) -> Self {
        NewArticle {
            title: fields.title,
            author: fields.author,
            content: fields.content,
            created_at,
        }
    }

    pub fn with_id(self, id: ArticleId) -> Article {
        Article {
            id: id.object_id(),
            title: self.title,
            author: self.author,
            content: self.content,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}

/// The editable part of an article, already checked for presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields {
    pub title: String,
    pub author: String,
    pub content: String,
}

/// Body of `POST /articles` and `PUT /articles/{id}`.
///
/// Every field is optional at the wire level so a missing key becomes a
/// 400 with a field name instead of an opaque deserialization failure.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ArticleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ArticleRequest {
    pub fn into_fields(self) -> Result<ArticleFields, CustomError> {
        let title = required_text("title", self.title)?;
        let author = required_text("author", self.author)?;
        let content = self
            .content
            .ok_or_else(|| missing_field("content"))?;

        Ok(ArticleFields {
            title,
            author,
            content,
        })
    }
}

fn required_text(name: &str, value: Option<String>) -> Result<String, CustomError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing_field(name)),
    }
}

fn missing_field(name: &str) -> CustomError {
    CustomError::BadRequestError(format!("Missing required field: {}", name))
}

/// Article as exposed over HTTP: string `id`, no `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        ArticleResponse {
            id: article.id.to_hex(),
            title: article.title,
            author: article.author,
            content: article.content,
            created_at: timestamp::to_text(&article.created_at),
            updated_at: article.updated_at.as_ref().map(timestamp::to_text),
        }
    }
}

/// ISO-8601 text timestamps with a fixed microsecond width, so the stored
/// text orders the same way the instants do.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn to_text(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Accepts RFC 3339 text and, for documents written without an offset,
    /// naive ISO-8601 text read as UTC.
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|at| at.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_text(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{}`", raw)))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            at: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match at {
                Some(at) => super::serialize(at, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{}`", raw))),
                None => Ok(None),
            }
        }
    }
}
