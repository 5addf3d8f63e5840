#[macro_use]
mod common;

use actix_web::http::header;
use actix_web::http::{Method, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::web::Bytes;

#[actix_web::test]
async fn root_answers_liveness_check() {
    let app = init_app!(
        common::memory_db(),
        common::unused_generator(),
        common::unused_scraper()
    );

    let request = TestRequest::get().uri("/").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = test::read_body(response).await;
    assert_eq!(body, Bytes::from_static(b"Hello, Outflo!"));
}

#[actix_web::test]
async fn preflight_from_frontend_is_allowed() {
    let app = init_app!(
        common::memory_db(),
        common::unused_generator(),
        common::unused_scraper()
    );

    let request = TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/campaigns")
        .insert_header((header::ORIGIN, common::FRONTEND_ORIGIN))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        common::FRONTEND_ORIGIN
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[actix_web::test]
async fn cross_origin_request_carries_allow_origin() {
    let app = init_app!(
        common::memory_db(),
        common::unused_generator(),
        common::unused_scraper()
    );

    let request = TestRequest::get()
        .uri("/campaigns")
        .insert_header((header::ORIGIN, common::FRONTEND_ORIGIN))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        common::FRONTEND_ORIGIN
    );
}
