use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::utils::error::error_body;

/// Fallback for requests that match no route.
pub async fn not_found() -> HttpResponse {
    HttpResponse::build(StatusCode::NOT_FOUND).json(error_body(
        StatusCode::NOT_FOUND,
        "Route does not exist",
        "NOT_FOUND_ERROR",
    ))
}
