#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use outflo_server::message::PartialProfile;
use outflo_server::Error;
use serde_json::{json, Value};

fn jane() -> PartialProfile {
    PartialProfile {
        name: Some("Jane Doe".into()),
        job_title: Some("Head of Growth".into()),
        company: Some("Acme".into()),
        location: Some("Lisbon".into()),
        summary: Some("Scaled two startups".into()),
    }
}

#[actix_web::test]
async fn personalized_message() {
    let app = init_app!(
        common::memory_db(),
        common::generator(|| Ok("Hi Jane, let's connect!".to_string())),
        common::unused_scraper()
    );

    let request = TestRequest::post()
        .uri("/messages/personalized-message")
        .set_json(json!({
            "name": "Jane Doe",
            "job_title": "Head of Growth",
            "company": "Acme",
            "location": "Lisbon",
            "summary": "Scaled two startups"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "message": "Hi Jane, let's connect!" }));
}

#[actix_web::test]
async fn personalized_message_falls_back_on_generator_failure() {
    let app = init_app!(
        common::memory_db(),
        common::generator(|| {
            Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "timed out",
            )))
        }),
        common::unused_scraper()
    );

    let request = TestRequest::post()
        .uri("/messages/personalized-message")
        .set_json(json!({
            "name": "Jane Doe",
            "job_title": "Head of Growth",
            "company": "Acme",
            "location": "Lisbon",
            "summary": "Scaled two startups"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!({ "message": "Failed to generate content." }));
}

#[actix_web::test]
async fn personalized_message_without_generator_key() {
    let app = init_app!(
        common::memory_db(),
        common::generator(|| {
            Err(Error::MissingConfiguration {
                name: "GEMINI_API_KEY",
            })
        }),
        common::unused_scraper()
    );

    let request = TestRequest::post()
        .uri("/messages/personalized-message")
        .set_json(json!({
            "name": "Jane Doe",
            "job_title": "Head of Growth",
            "company": "Acme",
            "location": "Lisbon",
            "summary": "Scaled two startups"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error_code"], "E5001000");
}

#[actix_web::test]
async fn personalized_message_from_url() {
    let app = init_app!(
        common::memory_db(),
        common::generator(|| Ok("Hi Jane!".to_string())),
        common::scraper(jane())
    );

    let request = TestRequest::post()
        .uri("/messages/personalized-message-url")
        .set_json(json!({ "linkedinUrl": "https://www.linkedin.com/in/jane-doe/" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "name": "Jane Doe",
            "job_title": "Head of Growth",
            "company": "Acme",
            "location": "Lisbon",
            "summary": "Scaled two startups",
            "message": "Hi Jane!"
        })
    );
}

#[actix_web::test]
async fn incomplete_profile_returns_recovered_fields() {
    let mut partial = jane();
    partial.company = None;
    let app = init_app!(
        common::memory_db(),
        common::unused_generator(),
        common::scraper(partial)
    );

    let request = TestRequest::post()
        .uri("/messages/personalized-message-url")
        .set_json(json!({ "linkedinUrl": "linkedin.com/in/jane-doe" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error_code"], "E4001006");
    assert_eq!(body["error_meta"]["name"], "Jane Doe");
    assert_eq!(body["error_meta"]["company"], Value::Null);
    assert_eq!(body["error_meta"]["summary"], "Scaled two startups");
    assert!(body.get("message").is_none());
}

#[actix_web::test]
async fn rejects_missing_and_malformed_urls() {
    let app = init_app!(
        common::memory_db(),
        common::unused_generator(),
        common::scraper(jane())
    );

    let missing = TestRequest::post()
        .uri("/messages/personalized-message-url")
        .set_json(json!({}))
        .to_request();
    let response = test::call_service(&app, missing).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error_code"], "E4001004");

    let malformed = TestRequest::post()
        .uri("/messages/personalized-message-url")
        .set_json(json!({ "linkedinUrl": "https://example.com/in/jane-doe" }))
        .to_request();
    let response = test::call_service(&app, malformed).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error_code"], "E4001005");
}
