use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use article_service::ArticleService;
use article_service::article::index::ARTICLE_BODY_LIMIT;
use article_service::article::memory::InMemoryArticleStore;
use article_service::middleware::{cors::cors, not_found::not_found};
use article_service::router::index::routes;
use serde_json::{Value, json};

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .wrap(cors())
                .app_data(web::Data::new(ArticleService::new(Arc::new(
                    InMemoryArticleStore::new(),
                ))))
                .configure(routes)
                .default_service(web::route().to(not_found)),
        )
        .await
    };
}

macro_rules! create {
    ($app:expr, $title:expr) => {{
        let req = test::TestRequest::post()
            .uri("/articles")
            .set_json(json!({ "title": $title, "author": "A", "content": "C" }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["id"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn health_reports_healthy() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[actix_web::test]
async fn empty_store_lists_empty_array() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/articles").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn create_then_get_round_trips_fields() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/articles")
        .set_json(json!({ "title": "T", "author": "A", "content": "C" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["message"], "Article created successfully");
    let id = created["id"].as_str().unwrap();
    assert!(!id.is_empty());

    let req = test::TestRequest::get().uri(&format!("/articles/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let article: Value = test::read_body_json(resp).await;
    assert_eq!(article["id"], id);
    assert_eq!(article["title"], "T");
    assert_eq!(article["author"], "A");
    assert_eq!(article["content"], "C");
    assert!(article["created_at"].as_str().is_some_and(|s| s.ends_with('Z')));
    assert!(article.get("updated_at").is_none());
    assert!(article.get("_id").is_none());
}

#[actix_web::test]
async fn create_with_missing_field_is_rejected_and_not_stored() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/articles")
        .set_json(json!({ "title": "T", "content": "C" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "BAD_REQUEST_ERROR");
    assert_eq!(body["message"], "Bad Request: Missing required field: author");

    let req = test::TestRequest::get().uri("/articles").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn malformed_body_is_a_bad_request() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/articles")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("title=T")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn long_article_content_is_accepted() {
    let app = test_app!();
    let content = "x".repeat(3 * 1024 * 1024);

    let req = test::TestRequest::post()
        .uri("/articles")
        .set_json(json!({ "title": "T", "author": "A", "content": content }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let uri = format!("/articles/{}", created["id"].as_str().unwrap());

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "title": "T", "author": "A", "content": format!("{}y", content) }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let article: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(article["content"].as_str().unwrap().len(), content.len() + 1);
}

#[actix_web::test]
async fn body_over_document_limit_is_a_bad_request() {
    let app = test_app!();
    let content = "x".repeat(ARTICLE_BODY_LIMIT);
    let req = test::TestRequest::post()
        .uri("/articles")
        .set_json(json!({ "title": "T", "author": "A", "content": content }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn list_is_newest_first() {
    let app = test_app!();
    create!(app, "first");
    create!(app, "second");
    create!(app, "third");

    let req = test::TestRequest::get().uri("/articles").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[actix_web::test]
async fn update_replaces_fields_and_stamps_updated_at() {
    let app = test_app!();
    let id = create!(app, "draft");

    let req = test::TestRequest::get().uri(&format!("/articles/{}", id)).to_request();
    let before: Value = test::call_and_read_body_json(&app, req).await;

    for _ in 0..2 {
        let req = test::TestRequest::put()
            .uri(&format!("/articles/{}", id))
            .set_json(json!({ "title": "final", "author": "B", "content": "D" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Article updated successfully" }));
    }

    let req = test::TestRequest::get().uri(&format!("/articles/{}", id)).to_request();
    let after: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(after["title"], "final");
    assert_eq!(after["author"], "B");
    assert_eq!(after["content"], "D");
    assert_eq!(after["created_at"], before["created_at"]);
    assert!(after["updated_at"].is_string());
}

#[actix_web::test]
async fn update_with_bad_id_is_bad_request() {
    let app = test_app!();
    let req = test::TestRequest::put()
        .uri("/articles/badid")
        .set_json(json!({ "title": "T", "author": "A", "content": "C" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Bad Request: Invalid article ID format");
}

#[actix_web::test]
async fn update_with_missing_field_is_bad_request() {
    let app = test_app!();
    let id = create!(app, "draft");
    let req = test::TestRequest::put()
        .uri(&format!("/articles/{}", id))
        .set_json(json!({ "title": "T", "author": "A" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn update_of_unknown_article_is_not_found() {
    let app = test_app!();
    let req = test::TestRequest::put()
        .uri("/articles/65a1f0c2e4b0a1b2c3d4e5f6")
        .set_json(json!({ "title": "T", "author": "A", "content": "C" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND_ERROR");
    assert_eq!(body["message"], "Not Found: Article not found");
}

#[actix_web::test]
async fn get_with_bad_id_is_bad_request() {
    let app = test_app!();
    for uri in ["/articles/badid", "/articles/65a1f0c2e4b0a1b2c3d4e5f"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[actix_web::test]
async fn delete_is_final_and_second_delete_is_not_found() {
    let app = test_app!();
    let id = create!(app, "short-lived");
    let uri = format!("/articles/{}", id);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Article deleted successfully" }));

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri("/articles/badid").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_route_uses_error_envelope() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Route does not exist");
    assert_eq!(body["httpStatusCode"], 404);
}

#[actix_web::test]
async fn cross_origin_requests_are_allowed() {
    let app = test_app!();

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/articles")
        .insert_header((header::ORIGIN, "http://ui.example"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );

    let req = test::TestRequest::get()
        .uri("/articles")
        .insert_header((header::ORIGIN, "http://elsewhere.example"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
