//! QR generation endpoint integration tests.
//!
//! Drives the full router over HTTP and checks the contract for both
//! payload channels (GET query and POST body), size validation, and the
//! PNG response itself.

mod common;

use qrpress_api::Config;

#[tokio::test]
async fn get_generate_returns_png_of_requested_size() {
    // Arrange
    let addr = common::spawn_default_app().await;

    // Act
    let response = reqwest::get(format!("http://{addr}/generate?content=hello&size=128"))
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"],
        "image/png",
        "Content type should be image/png"
    );
    let body = response.bytes().await.expect("Should read body");
    assert!(!body.is_empty(), "PNG body should be non-empty");
    assert_eq!(&body[..8], &common::PNG_SIGNATURE);

    let image = image::load_from_memory(&body).expect("Body should decode as PNG");
    assert_eq!(image.width(), 128);
    assert_eq!(image.height(), 128);
}

#[tokio::test]
async fn identical_requests_return_identical_bytes() {
    // Arrange
    let addr = common::spawn_default_app().await;
    let url = format!("http://{addr}/generate?content=determinism&size=256");

    // Act
    let first = reqwest::get(&url)
        .await
        .expect("Request should complete")
        .bytes()
        .await
        .expect("Should read body");
    let second = reqwest::get(&url)
        .await
        .expect("Request should complete")
        .bytes()
        .await
        .expect("Should read body");

    // Assert
    assert_eq!(first, second, "Identical (payload, size) must yield identical output");
}

#[tokio::test]
async fn url_encoded_content_is_decoded() {
    // Arrange
    let addr = common::spawn_default_app().await;

    // Act
    let response = reqwest::get(format!("http://{addr}/generate?content=hello%20world"))
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 200);
    let body = response.bytes().await.expect("Should read body");
    assert_eq!(&body[..8], &common::PNG_SIGNATURE);
}

#[tokio::test]
async fn missing_content_is_rejected() {
    // Arrange
    let addr = common::spawn_default_app().await;

    // Act
    let response = reqwest::get(format!("http://{addr}/generate"))
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["error"], "Missing query parameter: content");
}

#[tokio::test]
async fn empty_content_is_rejected() {
    // Arrange
    let addr = common::spawn_default_app().await;

    // Act
    let response = reqwest::get(format!("http://{addr}/generate?content="))
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn post_generate_uses_default_size() {
    // Arrange
    let addr = common::spawn_default_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("http://{addr}/generate"))
        .body("hello")
        .send()
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 200);
    let body = response.bytes().await.expect("Should read body");
    let image = image::load_from_memory(&body).expect("Body should decode as PNG");
    assert_eq!(image.width(), 256, "Default size should apply when size is absent");
    assert_eq!(image.height(), 256);
}

#[tokio::test]
async fn post_generate_honors_explicit_size() {
    // Arrange
    let addr = common::spawn_default_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("http://{addr}/generate?size=100"))
        .body("hello")
        .send()
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 200);
    let body = response.bytes().await.expect("Should read body");
    let image = image::load_from_memory(&body).expect("Body should decode as PNG");
    assert_eq!(image.width(), 100);
    assert_eq!(image.height(), 100);
}

#[tokio::test]
async fn empty_post_body_is_rejected() {
    // Arrange
    let addr = common::spawn_default_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("http://{addr}/generate"))
        .send()
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["error"], "Request body is empty");
}

#[tokio::test]
async fn oversized_post_body_is_rejected() {
    // Arrange
    let mut config = Config::default();
    config.max_body_size = 1024;
    let addr = common::spawn_app(config).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("http://{addr}/generate"))
        .body(vec![b'a'; 4096])
        .send()
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 413);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["error"], "Request body too large");
}

#[tokio::test]
async fn size_above_maximum_is_rejected_with_bounds() {
    // Arrange
    let addr = common::spawn_default_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("http://{addr}/generate?size=9999"))
        .body("hello")
        .send()
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    let message = body["error"].as_str().expect("Error message should be a string");
    assert!(
        message.contains("between 64 and 512"),
        "Message should name the valid range, got: {message}"
    );
}

#[tokio::test]
async fn size_below_minimum_is_rejected() {
    // Arrange
    let addr = common::spawn_default_app().await;

    // Act
    let response = reqwest::get(format!("http://{addr}/generate?content=hello&size=10"))
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn non_numeric_size_is_rejected_with_bounds() {
    // Arrange
    let addr = common::spawn_default_app().await;

    // Act
    let response = reqwest::get(format!("http://{addr}/generate?content=hello&size=abc"))
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    let message = body["error"].as_str().expect("Error message should be a string");
    assert!(message.contains("between 64 and 512"));
}

#[tokio::test]
async fn custom_bounds_appear_in_the_error_message() {
    // Arrange
    let mut config = Config::default();
    config.min_qr_size = 100;
    config.max_qr_size = 200;
    let addr = common::spawn_app(config).await;

    // Act
    let response = reqwest::get(format!("http://{addr}/generate?content=hello&size=50"))
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    let message = body["error"].as_str().expect("Error message should be a string");
    assert!(message.contains("between 100 and 200"));
}

#[tokio::test]
async fn unsupported_methods_are_rejected() {
    // Arrange
    let addr = common::spawn_default_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .delete(format!("http://{addr}/generate"))
        .send()
        .await
        .expect("Request should complete");

    // Assert
    assert_eq!(response.status(), 405);
    let body: serde_json::Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["error"], "Method not allowed. Use GET or POST.");
}
