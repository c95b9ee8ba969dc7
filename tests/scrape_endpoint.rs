//! HTTP contract tests for the scrape API.
//!
//! Requests go through the real router (CORS layer included) with
//! `tower::ServiceExt::oneshot`; upstream pages are served by `wiremock`.
//! The default relay is disabled so no test leaves the machine.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use page_scrape::server::{
    MSG_BLOCKED, MSG_INVALID_URL, MSG_METHOD_NOT_ALLOWED, MSG_NOT_FOUND, MSG_TIMEOUT,
    MSG_URL_REQUIRED,
};
use page_scrape::{build_router, AppState, Config, Scraper};

const FIXTURE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Fixture Page</title>
    <meta name="description" content="A page used by the endpoint tests">
    <meta property="og:title" content="Fixture OG">
</head>
<body>
    <nav><a href="/menu">Menu</a></nav>
    <h1 id="intro">Welcome to the fixture</h1>
    <p>This paragraph has enough text to be kept by the extractor.</p>
    <a href="https://example.com/one">First</a>
    <a href="https://other.org/two">Second</a>
    <a href="/three">Third</a>
    <img src="https://example.com/a.png" alt="Picture A" width="100" height="50">
    <img src="/b.png">
    <script>document.write("tracking");</script>
</body>
</html>"#;

fn test_config() -> Config {
    Config {
        relays: Vec::new(),
        attempt_delay_ms: 0,
        direct_timeout_secs: 5,
        simple_timeout_secs: 5,
        ..Default::default()
    }
}

fn router_with(config: &Config) -> Router {
    let scraper = Scraper::from_config(config).unwrap();
    build_router(AppState::new(scraper, config.expose_technical_errors))
}

fn router() -> Router {
    router_with(&test_config())
}

fn scrape_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/scrape")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://frontend.test")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn serve_page(server: &MockServer, page_path: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scrape_fixture_page() {
    let server = MockServer::start().await;
    serve_page(
        &server,
        "/page",
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html; charset=utf-8")
            .set_body_string(FIXTURE),
    )
    .await;

    let url = format!("{}/page", server.uri());
    let (status, headers, body) = send(router(), scrape_request(json!({ "url": url }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert_eq!(data["url"], url);
    assert_eq!(data["title"], "Fixture Page");
    assert_eq!(data["description"], "A page used by the endpoint tests");
    assert_eq!(data["method"], "direct");
    assert_eq!(data["language"], "en");
    assert_eq!(data["metadata"]["og:title"], "Fixture OG");

    let links = data["links"].as_array().unwrap();
    assert_eq!(links.len(), 3);
    assert_eq!(links[0]["href"], "https://example.com/one");
    assert_eq!(links[1]["href"], "https://other.org/two");
    assert_eq!(links[1]["isExternal"], true);
    assert_eq!(links[2]["href"], format!("{}/three", server.uri()));
    assert_eq!(links[2]["isExternal"], false);

    let images = data["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["dimensions"], json!({ "width": "100", "height": "50" }));
    assert_eq!(images[1]["src"], format!("{}/b.png", server.uri()));
    assert_eq!(images[1]["alt"], "No alt text");
    assert!(images[1].get("dimensions").is_none());

    assert_eq!(data["headings"][0], json!({ "level": 1, "text": "Welcome to the fixture", "id": "intro" }));

    let text = data["text"].as_str().unwrap();
    assert_eq!(data["contentLength"], text.chars().count());
    assert!(!text.contains("tracking"));
    assert!(!text.contains("Menu"));
    assert!(data["wordCount"].as_u64().unwrap() > 10);
    assert!(data["scrapedAt"].is_string());
}

#[tokio::test]
async fn test_options_returns_empty_ok() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/scrape")
        .header(header::ORIGIN, "https://frontend.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let (status, headers, body) = send(router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    for expected in ["GET", "OPTIONS", "PATCH", "DELETE", "POST", "PUT"] {
        assert!(methods.contains(expected), "missing {expected} in {methods}");
    }
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
}

#[tokio::test]
async fn test_other_methods_are_rejected() {
    for verb in [Method::GET, Method::PUT, Method::DELETE] {
        let request = Request::builder()
            .method(verb.clone())
            .uri("/api/scrape")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send_json(router(), request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{verb}");
        assert_eq!(json, json!({ "success": false, "error": MSG_METHOD_NOT_ALLOWED }));
    }
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    for body in [json!({}), json!({ "url": "" }), json!({ "url": "   " })] {
        let (status, json) = send_json(router(), scrape_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], MSG_URL_REQUIRED);
    }
}

#[tokio::test]
async fn test_non_http_scheme_is_bad_request() {
    let (status, json) =
        send_json(router(), scrape_request(json!({ "url": "ftp://example.com/file" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], MSG_INVALID_URL);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/scrape")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"url\": "))
        .unwrap();
    let (status, json) = send_json(router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json.get("technicalError").is_none());
}

#[tokio::test]
async fn test_blocked_upstream_maps_to_service_unavailable() {
    let server = MockServer::start().await;
    serve_page(&server, "/blocked", ResponseTemplate::new(403)).await;

    let url = format!("{}/blocked", server.uri());
    let (status, json) = send_json(router(), scrape_request(json!({ "url": url }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json, json!({ "success": false, "error": MSG_BLOCKED }));
}

#[tokio::test]
async fn test_technical_error_is_exposed_when_enabled() {
    let server = MockServer::start().await;
    serve_page(&server, "/blocked", ResponseTemplate::new(429)).await;

    let config = Config {
        expose_technical_errors: true,
        ..test_config()
    };
    let url = format!("{}/blocked", server.uri());
    let (status, json) = send_json(router_with(&config), scrape_request(json!({ "url": url }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], MSG_BLOCKED);
    assert!(json["technicalError"].as_str().unwrap().contains("429"));
}

#[tokio::test]
async fn test_missing_page_maps_to_not_found_message() {
    let server = MockServer::start().await;
    serve_page(&server, "/gone", ResponseTemplate::new(404)).await;

    let url = format!("{}/gone", server.uri());
    let (status, json) = send_json(router(), scrape_request(json!({ "url": url }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], MSG_NOT_FOUND);
}

#[tokio::test]
async fn test_slow_upstream_maps_to_request_timeout() {
    let server = MockServer::start().await;
    serve_page(
        &server,
        "/slow",
        ResponseTemplate::new(200)
            .set_body_string("<p>late</p>")
            .set_delay(std::time::Duration::from_secs(5)),
    )
    .await;

    let config = Config {
        direct_timeout_secs: 1,
        simple_timeout_secs: 1,
        ..test_config()
    };
    let url = format!("{}/slow", server.uri());
    let (status, json) = send_json(router_with(&config), scrape_request(json!({ "url": url }))).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(json["error"], MSG_TIMEOUT);
}

#[tokio::test]
async fn test_status_counts_requests() {
    let server = MockServer::start().await;
    serve_page(&server, "/page", ResponseTemplate::new(200).set_body_string(FIXTURE)).await;
    serve_page(&server, "/blocked", ResponseTemplate::new(403)).await;

    let app = router();
    let ok_url = format!("{}/page", server.uri());
    let blocked_url = format!("{}/blocked", server.uri());
    send(app.clone(), scrape_request(json!({ "url": ok_url }))).await;
    send(app.clone(), scrape_request(json!({ "url": blocked_url }))).await;

    let request = Request::builder()
        .uri("/api/status")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send_json(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["requests"], 2);
    assert_eq!(json["succeeded"], 1);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["wins"]["direct"], 1);
    assert_eq!(json["wins"]["simple"], 0);
    // direct and simple both refused the blocked page
    assert_eq!(json["attempt_failures"]["blocked"], 2);
    assert_eq!(json["request_failures"]["blocked"], 1);
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, _, body) = send(router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}
