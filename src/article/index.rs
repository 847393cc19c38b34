use super::controller::{create_article, delete_article, get_article, list_articles, update_article};
use crate::utils::error::CustomError;
use actix_web::{error::JsonPayloadError, web};

/// MongoDB's per-document cap; article content has no smaller limit.
pub const ARTICLE_BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn article_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/articles")
            .app_data(
                web::JsonConfig::default()
                    .limit(ARTICLE_BODY_LIMIT)
                    .error_handler(json_error),
            )
            .route("", web::get().to(list_articles))
            .route("", web::post().to(create_article))
            .route("/{id}", web::get().to(get_article))
            .route("/{id}", web::put().to(update_article))
            .route("/{id}", web::delete().to(delete_article)),
    );
}

fn json_error(err: JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    log::warn!("rejecting article body: {}", err);
    CustomError::BadRequestError(format!("Invalid request body: {}", err)).into()
}
