//! Integration tests for the proxy surface.
//!
//! A wiremock server stands in for the backend service; requests are
//! driven straight through the router with tower's `oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string, header as upstream_header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scope_gateway::{build_state, create_router, Config};

const TEST_TOKEN: &str = "test-token";

fn test_router(backend_url: &str) -> Router {
    let config = Config {
        backend_api_url: backend_url.to_string(),
        ..Config::default()
    };
    let state = build_state(config).expect("state should build");
    create_router(state)
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, format!("token={}", TEST_TOKEN))
        .body(Body::empty())
        .unwrap()
}

fn authed_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, format!("token={}", TEST_TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_cookie_is_rejected_before_upstream() {
    let server = MockServer::start().await;
    // No upstream call may happen for an unauthenticated request.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/complaints/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "detail": "Unauthorized" }));
}

#[tokio::test]
async fn complaints_query_and_token_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/complaints/"))
        .and(query_param("skip", "20"))
        .and(query_param("limit", "10"))
        .and(query_param("status", "open"))
        .and(upstream_header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    let response = app
        .oneshot(authed_get(
            "/api/v1/complaints/?skip=20&limit=10&status=open",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([{ "id": 1 }]));
}

#[tokio::test]
async fn cached_read_hits_upstream_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 5 }])))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    for _ in 0..3 {
        let response = app.clone().oneshot(authed_get("/api/v1/users/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([{ "id": 5 }]));
    }
}

#[tokio::test]
async fn reads_with_different_queries_cache_separately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/eda/cluster"))
        .and(query_param("n_clusters", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "clusters": 3 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/eda/cluster"))
        .and(query_param("n_clusters", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "clusters": 5 })))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    let three = app
        .clone()
        .oneshot(authed_get("/api/v1/eda/cluster?n_clusters=3"))
        .await
        .unwrap();
    let five = app
        .clone()
        .oneshot(authed_get("/api/v1/eda/cluster?n_clusters=5"))
        .await
        .unwrap();
    assert_eq!(body_json(three).await, json!({ "clusters": 3 }));
    assert_eq!(body_json(five).await, json!({ "clusters": 5 }));

    // Both variants now come from cache.
    let again = app
        .oneshot(authed_get("/api/v1/eda/cluster?n_clusters=3"))
        .await
        .unwrap();
    assert_eq!(body_json(again).await, json!({ "clusters": 3 }));
}

#[tokio::test]
async fn backend_error_is_relayed_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/7"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "User not found" })),
        )
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    let response = app.oneshot(authed_get("/api/v1/users/7")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "detail": "User not found" }));
}

#[tokio::test]
async fn backend_errors_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/eda/basic-stats"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "detail": "Stats unavailable" })),
        )
        .expect(2)
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(authed_get("/api/v1/eda/basic-stats"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

#[tokio::test]
async fn login_sets_httponly_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc123",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=admin%40example.edu&password=secret"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("token=abc123"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let body = body_json(response).await;
    assert_eq!(body["access_token"], "abc123");
}

#[tokio::test]
async fn failed_login_relays_backend_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Incorrect username or password" })),
        )
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=nope&password=wrong"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(
        body_json(response).await,
        json!({ "detail": "Incorrect username or password" })
    );
}

#[tokio::test]
async fn delete_complaint_replies_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/complaints/12"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/complaints/12")
                .header(header::COOKIE, format!("token={}", TEST_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn chat_is_forwarded_and_never_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chatbot/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "hello" })))
        .expect(2)
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(authed_json(
                "POST",
                "/api/v1/chatbot/chat",
                json!({ "message": "hi" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "reply": "hello" }));
    }
}

#[tokio::test]
async fn multipart_classification_passes_bytes_and_content_type_through() {
    let multipart_body = "--XBOUNDARY\r\n\
        Content-Disposition: form-data; name=\"text\"\r\n\r\n\
        Broken AC in dorm B\r\n\
        --XBOUNDARY--\r\n";

    let server = MockServer::start().await;
    // The body and its Content-Type must arrive upstream unchanged, and
    // classification is never served from cache.
    Mock::given(method("POST"))
        .and(path("/api/v1/complaints/classify-with-files"))
        .and(upstream_header(
            "Content-Type",
            "multipart/form-data; boundary=XBOUNDARY",
        ))
        .and(upstream_header("Authorization", "Bearer test-token"))
        .and(body_string(multipart_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "category": "Facilities" })))
        .expect(2)
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/complaints/classify-with-files")
                    .header(header::COOKIE, format!("token={}", TEST_TOKEN))
                    .header(
                        header::CONTENT_TYPE,
                        "multipart/form-data; boundary=XBOUNDARY",
                    )
                    .body(Body::from(multipart_body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "category": "Facilities" }));
    }
}

#[tokio::test]
async fn classify_and_predict_are_never_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/complaints/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "category": "IT" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/complaints/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "urgency": "high" })))
        .expect(2)
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    for _ in 0..2 {
        let classify = app
            .clone()
            .oneshot(authed_json(
                "POST",
                "/api/v1/complaints/classify",
                json!({ "text": "wifi is down" }),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(classify).await, json!({ "category": "IT" }));

        let predict = app
            .clone()
            .oneshot(authed_json(
                "POST",
                "/api/v1/complaints/predict",
                json!({ "text": "wifi is down" }),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(predict).await, json!({ "urgency": "high" }));
    }
}

#[tokio::test]
async fn login_forwards_form_body_verbatim() {
    // Extra OAuth2 fields must survive the hop untouched.
    let form_body = "username=admin%40example.edu&password=secret&scope=admin&grant_type=password";

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(upstream_header(
            "Content-Type",
            "application/x-www-form-urlencoded",
        ))
        .and(body_string(form_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "xyz789",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_router(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form_body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("token=xyz789"));
}

#[tokio::test]
async fn health_needs_no_session() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}
