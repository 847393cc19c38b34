use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::article::model::ArticleRequest;
use crate::article::service::ArticleService;
use crate::utils::error::CustomError;

/// GET /articles
pub async fn list_articles(
    article_service: web::Data<ArticleService>,
) -> Result<HttpResponse, CustomError> {
    let articles = article_service.list_articles().await?;
    Ok(HttpResponse::Ok().json(articles))
}

/// GET /articles/{id}
pub async fn get_article(
    article_service: web::Data<ArticleService>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    let article = article_service.get_article(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(article))
}

/// POST /articles
pub async fn create_article(
    article_service: web::Data<ArticleService>,
    body: web::Json<ArticleRequest>,
) -> Result<HttpResponse, CustomError> {
    let id = article_service.create_article(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Article created successfully",
        "id": id.to_string()
    })))
}

/// PUT /articles/{id}
pub async fn update_article(
    article_service: web::Data<ArticleService>,
    path: web::Path<String>,
    body: web::Json<ArticleRequest>,
) -> Result<HttpResponse, CustomError> {
    article_service
        .update_article(&path.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Article updated successfully"
    })))
}

/// DELETE /articles/{id}
pub async fn delete_article(
    article_service: web::Data<ArticleService>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    article_service.delete_article(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Article deleted successfully"
    })))
}
