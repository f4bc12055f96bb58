//! Upload endpoint integration tests
//!
//! Tests for POST /api/dify/upload:
//! - Token gate (soft failure, no outbound traffic)
//! - Missing file validation
//! - Field defaulting and outbound multipart content
//! - Verbatim relaying of downstream responses

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::ResponseTemplate;

use crate::common::{self, constants::TEST_TOKEN};
use crate::mocks::MockDify;

#[tokio::test]
async fn test_unconfigured_token_soft_fails_without_outbound_call() {
    let dify = MockDify::start().await;
    let server = common::test_server(common::test_config(&dify.uri(), None));

    let body = common::multipart_body(Some(("a.txt", b"hello")), &[]);
    let response = server
        .post("/api/dify/upload")
        .content_type(&common::multipart_content_type())
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let payload: Value = response.json();
    assert_eq!(
        payload,
        json!({"success": false, "message": "Dify 未配置 API Token"})
    );

    assert!(dify.received().await.is_empty());
}

#[tokio::test]
async fn test_missing_file_part_is_rejected() {
    let dify = MockDify::start().await;
    let server = common::test_server(common::test_config(&dify.uri(), Some(TEST_TOKEN)));

    let body = common::multipart_body(None, &[("user", "alice")]);
    let response = server
        .post("/api/dify/upload")
        .content_type(&common::multipart_content_type())
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let payload: Value = response.json();
    assert_eq!(payload, json!({"success": false, "message": "缺少文件"}));

    assert!(dify.received().await.is_empty());
}

#[tokio::test]
async fn test_non_multipart_body_is_rejected_as_missing_file() {
    let dify = MockDify::start().await;
    let server = common::test_server(common::test_config(&dify.uri(), Some(TEST_TOKEN)));

    let response = server.post("/api/dify/upload").text("not a form").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let payload: Value = response.json();
    assert_eq!(payload, json!({"success": false, "message": "缺少文件"}));
}

#[tokio::test]
async fn test_omitted_user_and_type_are_defaulted() {
    let dify = MockDify::start().await;
    dify.mock_upload_success(json!({"id": "file-1"})).await;
    let server = common::test_server(common::test_config(&dify.uri(), Some(TEST_TOKEN)));

    let body = common::multipart_body(Some(("notes.txt", b"hello")), &[]);
    let response = server
        .post("/api/dify/upload")
        .content_type(&common::multipart_content_type())
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let received = dify.received().await;
    assert_eq!(received.len(), 1);
    let outbound = String::from_utf8_lossy(&received[0].body);
    assert!(outbound.contains("name=\"user\""));
    assert!(outbound.contains("chat-user"));
    assert!(outbound.contains("name=\"type\""));
    assert!(outbound.contains("TXT"));
}

#[tokio::test]
async fn test_file_fields_and_credential_are_forwarded() {
    let dify = MockDify::start().await;
    dify.mock_upload_success(json!({"id": "file-2"})).await;
    let server = common::test_server(common::test_config(&dify.uri(), Some(TEST_TOKEN)));

    let body = common::multipart_body(
        Some(("a.pdf", b"XYZ")),
        &[("user", "alice"), ("type", "PDF")],
    );
    let response = server
        .post("/api/dify/upload")
        .content_type(&common::multipart_content_type())
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let relayed: Value = response.json();
    assert_eq!(relayed, json!({"id": "file-2"}));

    let received = dify.received().await;
    assert_eq!(received.len(), 1);

    let request = &received[0];
    assert_eq!(request.url.path(), "/files/upload");
    let auth = request.headers.get("authorization").unwrap();
    assert_eq!(auth.to_str().unwrap(), format!("Bearer {TEST_TOKEN}"));

    let outbound = String::from_utf8_lossy(&request.body);
    assert!(outbound.contains("filename=\"a.pdf\""));
    assert!(outbound.contains("XYZ"));
    assert!(outbound.contains("alice"));
    assert!(outbound.contains("PDF"));
}

#[tokio::test]
async fn test_downstream_error_is_relayed_verbatim() {
    let dify = MockDify::start().await;
    dify.mock_upload_response(ResponseTemplate::new(503).set_body_raw("busy", "text/plain"))
        .await;
    let server = common::test_server(common::test_config(&dify.uri(), Some(TEST_TOKEN)));

    let body = common::multipart_body(Some(("a.txt", b"hello")), &[]);
    let response = server
        .post("/api/dify/upload")
        .content_type(&common::multipart_content_type())
        .bytes(body.into())
        .await;

    // No wrapping, no flag field: status, content type, and body come back as-is
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.header("content-type"), "text/plain");
    assert_eq!(response.text(), "busy");
}

#[tokio::test]
async fn test_unreachable_dify_soft_fails_with_error_text() {
    // Nothing listens on this address; the send itself fails
    let server = common::test_server(common::test_config(
        "http://127.0.0.1:9",
        Some(TEST_TOKEN),
    ));

    let body = common::multipart_body(Some(("a.txt", b"hello")), &[]);
    let response = server
        .post("/api/dify/upload")
        .content_type(&common::multipart_content_type())
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let payload: Value = response.json();
    assert_eq!(payload["success"], json!(false));
    assert!(!payload["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_repeated_uploads_produce_independent_outbound_calls() {
    let dify = MockDify::start().await;
    dify.mock_upload_success(json!({"id": "file-3"})).await;
    let server = common::test_server(common::test_config(&dify.uri(), Some(TEST_TOKEN)));

    for _ in 0..2 {
        let body = common::multipart_body(Some(("a.txt", b"same bytes")), &[]);
        let response = server
            .post("/api/dify/upload")
            .content_type(&common::multipart_content_type())
            .bytes(body.into())
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    assert_eq!(dify.received().await.len(), 2);
}
