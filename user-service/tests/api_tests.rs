mod common;

use auth::Claims;
use auth::Identity;
use auth::JwtHandler;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/auth/register",
            json!({
                "email": "nicola@example.com",
                "password": "pass_word!",
                "name": "Nicola"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["status_code"], 201);
    assert_eq!(response.body["data"]["user"]["email"], "nicola@example.com");
    assert_eq!(response.body["data"]["user"]["name"], "Nicola");
    assert!(response.body["data"]["user"]["id"].is_string());
    assert!(response.body["data"]["user"]["created_at"].is_string());
    assert!(response.body["data"]["user"].get("password_hash").is_none());

    let token = response.body["data"]["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_register_stores_encoded_credential() {
    let app = TestApp::new();
    app.register("nicola@example.com", "pass_word!", "Nicola")
        .await;

    use user_service::domain::user::ports::UserRepository;
    let user = app
        .repository
        .find_by_email("nicola@example.com")
        .await
        .unwrap()
        .expect("User was not stored");

    assert!(user.password_hash.starts_with("$argon2id$v=19,m=64,t=1,p=1$"));
    assert!(!user.password_hash.contains("pass_word!"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.register("nicola@example.com", "pass_word!", "Nicola")
        .await;

    let response = app
        .post(
            "/api/auth/register",
            json!({
                "email": "nicola@example.com",
                "password": "another",
                "name": "Someone Else"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.message().contains("already exists"));
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new();

    let cases = [
        json!({ "email": "not-an-email", "password": "pass_word!", "name": "Nicola" }),
        json!({ "email": "nicola@example.com", "password": "abc", "name": "Nicola" }),
        json!({ "email": "nicola@example.com", "password": "pass_word!", "name": "N" }),
    ];

    for body in cases {
        let response = app.post("/api/auth/register", body.clone()).await;
        assert_eq!(
            response.status,
            StatusCode::UNPROCESSABLE_ENTITY,
            "body: {}",
            body
        );
        assert_eq!(response.body["status_code"], 422);
        assert!(!response.message().is_empty());
    }
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.register("nicola@example.com", "correct horse", "Nicola")
        .await;

    let response = app
        .post(
            "/api/auth/login",
            json!({ "email": "nicola@example.com", "password": "correct horse" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user"]["email"], "nicola@example.com");
    assert!(response.body["data"]["token"].is_string());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("nicola@example.com", "correct horse", "Nicola")
        .await;

    let wrong_password = app
        .post(
            "/api/auth/login",
            json!({ "email": "nicola@example.com", "password": "wrong horse" }),
        )
        .await;
    let unknown_email = app
        .post(
            "/api/auth/login",
            json!({ "email": "nobody@example.com", "password": "correct horse" }),
        )
        .await;
    let invalid_email = app
        .post(
            "/api/auth/login",
            json!({ "email": "nobody", "password": "correct horse" }),
        )
        .await;

    for response in [&wrong_password, &unknown_email, &invalid_email] {
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message(), "wrong email or password");
    }
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_login_password_outside_policy_is_generic() {
    let app = TestApp::new();
    app.register("nicola@example.com", "correct horse", "Nicola")
        .await;

    let wrong_password = app
        .post(
            "/api/auth/login",
            json!({ "email": "nicola@example.com", "password": "wrong horse" }),
        )
        .await;

    for password in ["abc".to_string(), "p".repeat(256)] {
        let response = app
            .post(
                "/api/auth/login",
                json!({ "email": "nicola@example.com", "password": password }),
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, wrong_password.body);
    }
}

#[tokio::test]
async fn test_current_user_with_registration_token() {
    let app = TestApp::new();
    let token = app
        .register("nicola@example.com", "pass_word!", "Nicola")
        .await;

    let response = app
        .get("/api/users/me", Some(&format!("Bearer {}", token)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "nicola@example.com");
    assert_eq!(response.body["data"]["name"], "Nicola");
}

#[tokio::test]
async fn test_current_user_with_login_token() {
    let app = TestApp::new();
    app.register("nicola@example.com", "pass_word!", "Nicola")
        .await;

    let login = app
        .post(
            "/api/auth/login",
            json!({ "email": "nicola@example.com", "password": "pass_word!" }),
        )
        .await;
    let token = login.body["data"]["token"].as_str().unwrap();

    let response = app
        .get("/api/users/me", Some(&format!("bearer {}", token)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], login.body["data"]["user"]["id"]);
}

#[tokio::test]
async fn test_current_user_missing_header() {
    let app = TestApp::new();

    let response = app.get("/api/users/me", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "missing or malformed JWT");
}

#[tokio::test]
async fn test_current_user_malformed_header() {
    let app = TestApp::new();

    for header in ["Bearer", "Basic abc", "Bearer a.b", "Bearer a.b.c.d", "token"] {
        let response = app.get("/api/users/me", Some(header)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "header: {}", header);
        assert_eq!(response.message(), "missing or malformed JWT");
    }
}

#[tokio::test]
async fn test_current_user_non_utf8_header() {
    let app = TestApp::new();
    let header = HeaderValue::from_bytes(b"Bearer \xff").unwrap();

    let response = app.get_with_header("/api/users/me", header).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "missing or malformed JWT");
}

#[tokio::test]
async fn test_current_user_wrong_key() {
    let app = TestApp::new();
    let other = JwtHandler::new(b"different-key").unwrap();
    let identity = Identity::new(uuid::Uuid::new_v4(), "a@b.com", "A");
    let token = other.encode(&Claims::new(&identity)).unwrap();

    let response = app
        .get("/api/users/me", Some(&format!("Bearer {}", token)))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid or expired auth token");
}

#[tokio::test]
async fn test_current_user_tampered_token() {
    let app = TestApp::new();
    let token = app
        .register("nicola@example.com", "pass_word!", "Nicola")
        .await;

    let mut segments: Vec<String> = token.split('.').map(str::to_string).collect();
    let last = segments[2].pop().unwrap();
    segments[2].push(if last == 'A' { 'B' } else { 'A' });
    let tampered = segments.join(".");

    let response = app
        .get("/api/users/me", Some(&format!("Bearer {}", tampered)))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_expired_token() {
    let app = TestApp::new();
    let identity = Identity::new(uuid::Uuid::new_v4(), "a@b.com", "A");
    let claims = Claims::new(&identity)
        .with_issued_at(946_684_000)
        .with_expiration(946_684_800);
    let token = app.jwt_handler.encode(&claims).unwrap();

    let response = app
        .get("/api/users/me", Some(&format!("Bearer {}", token)))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid or expired auth token");
}

#[tokio::test]
async fn test_current_user_unknown_subject() {
    let app = TestApp::new();
    let identity = Identity::new(uuid::Uuid::new_v4(), "ghost@example.com", "Ghost");
    let token = app.jwt_handler.encode(&Claims::new(&identity)).unwrap();

    let response = app
        .get("/api/users/me", Some(&format!("Bearer {}", token)))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();

    let response = app.get("/api/nothing-here", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["status_code"], 404);
    assert_eq!(response.message(), "404 Not Found");
}
