use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeDelta, Utc};
use tower::ServiceExt;

use tollgate_core::Identity;

use crate::integration::common::{
    json_body, login_request, login_token, profile_request, setup_test_app,
};

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_succeeds_for_every_roster_user() {
    let app = setup_test_app();

    for (id, username, password) in [(1, "admin", "1234"), (2, "superadmin", "12345678")] {
        let response = app
            .router
            .clone()
            .oneshot(login_request(&serde_json::json!({
                "username": username,
                "password": password,
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let token = json["token"].as_str().unwrap();
        let claims = app.tokens.verify(token).unwrap();
        assert_eq!(claims.id, id);
        assert_eq!(claims.username, username);
        assert_eq!(claims.exp - claims.iat, 3600);
    }
}

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(login_request(&serde_json::json!({
            "username": "admin",
            "password": "wrong",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Invalid credentials");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = setup_test_app();

    let cases = [
        serde_json::json!({"username": "nobody", "password": "1234"}),
        serde_json::json!({"username": "admin", "password": "12345678"}),
        serde_json::json!({"username": "", "password": ""}),
        serde_json::json!({"username": "admin", "password": ""}),
        serde_json::json!({"username": "admin"}),
        serde_json::json!({}),
        serde_json::json!({"username": null, "password": null}),
        serde_json::json!({"username": "admin", "password": 1234}),
        serde_json::json!({"username": ["admin"], "password": {"value": "1234"}}),
    ];

    for body in cases {
        let response = app.router.clone().oneshot(login_request(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "body: {body}");
        let json = json_body(response).await;
        assert_eq!(json["error"], "invalid_credentials");
        assert_eq!(json["message"], "Invalid credentials");
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_then_profile_round_trip() {
    let app = setup_test_app();
    let token = login_token(&app.router, "admin", "1234").await;

    let response = app
        .router
        .oneshot(profile_request(Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["message"], "Welcome!");
    assert_eq!(json["user"]["id"], 1);
    assert_eq!(json["user"]["username"], "admin");
    assert!(json["user"]["iat"].is_i64());
    assert!(json["user"]["exp"].is_i64());
}

#[tokio::test]
async fn profile_without_header_returns_401() {
    let app = setup_test_app();

    let response = app.router.oneshot(profile_request(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_with_malformed_header_returns_401() {
    let app = setup_test_app();
    let token = login_token(&app.router, "admin", "1234").await;

    for header in ["Bearer", "Bearer ", "Basic YWRtaW46MTIzNA==", token.as_str()] {
        let response = app
            .router
            .clone()
            .oneshot(profile_request(Some(header)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "header: {header}");
    }
}

#[tokio::test]
async fn tampered_token_returns_403() {
    let app = setup_test_app();
    let token = login_token(&app.router, "admin", "1234").await;

    let sig_start = token.rfind('.').unwrap() + 1;
    let mut bytes = token.into_bytes();
    bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    let response = app
        .router
        .oneshot(profile_request(Some(&format!("Bearer {tampered}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = json_body(response).await;
    assert_eq!(json["error"], "forbidden");
}

#[tokio::test]
async fn expired_token_returns_403() {
    let app = setup_test_app();
    let identity = Identity {
        id: 1,
        username: "admin".into(),
    };
    let token = app
        .tokens
        .issue_at(&identity, Utc::now() - TimeDelta::hours(2))
        .unwrap();

    let response = app
        .router
        .oneshot(profile_request(Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn garbage_token_returns_403() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(profile_request(Some("Bearer not-a-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Docs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn openapi_document_lists_routes_and_bearer_scheme() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(Request::get("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert!(json["paths"]["/api/login"]["post"].is_object());
    assert!(json["paths"]["/api/profile"]["get"].is_object());
    assert_eq!(
        json["components"]["securitySchemes"]["bearerAuth"]["scheme"],
        "bearer"
    );
}
