use crate::article::index::article_routes;
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
    cfg.configure(article_routes);
}

#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}
