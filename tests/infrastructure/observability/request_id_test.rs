use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router, middleware};
use lexcase::infrastructure::observability::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
use tower::ServiceExt;

fn router() -> Router {
    Router::new()
        .route(
            "/",
            get(|Extension(RequestId(id)): Extension<RequestId>| async move { id }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

#[tokio::test]
async fn given_request_id_header_when_handling_then_echoed_and_visible_to_handler() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"req-42");
}

#[tokio::test]
async fn given_no_request_id_when_handling_then_generates_uuid() {
    let response = router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn given_empty_request_id_when_handling_then_generates_uuid() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

fn headers_with(id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(id).unwrap());
    headers
}

#[test]
fn given_padded_request_id_when_resolving_then_trimmed() {
    assert_eq!(
        RequestId::from_headers(&headers_with("  trace-9 ")).as_str(),
        "trace-9"
    );
}

#[test]
fn given_oversized_or_spaced_request_id_when_resolving_then_replaced_with_uuid() {
    for supplied in ["x".repeat(129), "two words".to_string()] {
        let id = RequestId::from_headers(&headers_with(&supplied));

        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok(), "{supplied}");
    }
}
