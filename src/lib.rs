pub mod article;
pub mod client;
pub mod config;
pub mod database;
pub mod middleware;
pub mod router;
pub mod utils;

pub use article::model::{ArticleId, ArticleRequest, ArticleResponse};
pub use article::service::ArticleService;
pub use config::Config;
