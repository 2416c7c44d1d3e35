//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

/// Register a fresh owner and return (server-issued token, owner id)
async fn register_owner(server: &TestServer) -> (String, String) {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (auth.access_token, auth.owner.id)
}

/// Create an event under the given token
async fn create_event(server: &TestServer, token: &str) -> EventResponse {
    let request = CreateEventRequest::unique();
    let response = server
        .post_auth("/api/v1/events", token, &request)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Upload one small JPEG into an event, returning the created media id
async fn upload_photo(server: &TestServer, event_id: &str) -> String {
    let part = reqwest::multipart::Part::bytes(vec![0xFFu8; 64])
        .file_name("photo.jpg")
        .mime_str("image/jpeg")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = server
        .post_multipart(&format!("/api/v1/events/{event_id}/media"), form)
        .await
        .unwrap();
    let summary: UploadSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.uploaded.len(), 1);
    summary.uploaded[0].id.clone()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_owner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.owner.email, request.email.to_lowercase());
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.access_token.is_empty());
    assert!(auth.expires_in > 0);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/api/v1/auth/register", &request).await.unwrap();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest {
        email: register_req.email.clone(),
        password: "WrongPass123".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Event Tests
// ============================================================================

#[tokio::test]
async fn test_create_event_issues_six_char_code() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, owner_id) = register_owner(&server).await;

    let event = create_event(&server, &token).await;

    assert_eq!(event.code.len(), 6);
    assert!(event
        .code
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    assert_eq!(event.owner_id, owner_id);
    assert!(event.allow_downloads);
}

#[tokio::test]
async fn test_create_event_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateEventRequest::unique();

    let response = server.post("/api/v1/events", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_get_event_by_code_is_case_insensitive() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _) = register_owner(&server).await;
    let event = create_event(&server, &token).await;

    let lowercase = event.code.to_lowercase();
    let response = server
        .get(&format!("/api/v1/events/code/{lowercase}"))
        .await
        .unwrap();
    let found: EventResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.id, event.id);
}

#[tokio::test]
async fn test_get_event_by_unknown_code() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/events/code/ZZZZZ9").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_update_event_rejected_for_non_owner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner_token, _) = register_owner(&server).await;
    let (other_token, _) = register_owner(&server).await;
    let event = create_event(&server, &owner_token).await;

    let response = server
        .patch_auth(
            &format!("/api/v1/events/{}", event.id),
            &other_token,
            &serde_json::json!({ "title": "Hijacked" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Media Tests
// ============================================================================

#[tokio::test]
async fn test_guest_upload_and_listing_newest_first() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _) = register_owner(&server).await;
    let event = create_event(&server, &token).await;

    let first = upload_photo(&server, &event.id).await;
    let second = upload_photo(&server, &event.id).await;

    let response = server
        .get(&format!("/api/v1/events/{}/media", event.id))
        .await
        .unwrap();
    let listed: Vec<MediaResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(listed.len(), 2);
    // Newest first
    assert_eq!(listed[0].id, second);
    assert_eq!(listed[1].id, first);
    assert!(!listed[0].is_video);
    assert_eq!(listed[0].file_size, 64);
    assert_eq!(listed[0].file_extension, "jpg");
}

#[tokio::test]
async fn test_upload_with_attribution() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _) = register_owner(&server).await;
    let event = create_event(&server, &token).await;

    let part = reqwest::multipart::Part::bytes(vec![1u8; 32])
        .file_name("cake.jpg")
        .mime_str("image/jpeg")
        .unwrap();
    let form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("uploader_name", "Alice")
        .text("caption", "cake time");

    let response = server
        .post_multipart(&format!("/api/v1/events/{}/media", event.id), form)
        .await
        .unwrap();
    let summary: UploadSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.uploaded.len(), 1);
    assert!(summary.failed.is_empty());
}

#[tokio::test]
async fn test_delete_media_owner_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner_token, _) = register_owner(&server).await;
    let (other_token, _) = register_owner(&server).await;
    let event = create_event(&server, &owner_token).await;
    let media_id = upload_photo(&server, &event.id).await;

    let response = server
        .delete_auth(&format!("/api/v1/media/{media_id}"), &other_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/media/{media_id}"), &owner_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/api/v1/events/{}/media", event.id))
        .await
        .unwrap();
    let listed: Vec<MediaResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed.is_empty());
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_roundtrip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _) = register_owner(&server).await;
    let event = create_event(&server, &token).await;
    let media_id = upload_photo(&server, &event.id).await;

    let path = format!("/api/v1/media/{media_id}/reactions/heart/toggle");

    // On
    let response = server.post_participant(&path, "g1-session").await.unwrap();
    let toggled: ToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.state, "added");
    assert_eq!(toggled.badges.len(), 1);
    assert_eq!(toggled.badges[0].count, 1);
    assert!(toggled.badges[0].me);

    // Off again: back to the original state
    let response = server.post_participant(&path, "g1-session").await.unwrap();
    let toggled: ToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.state, "removed");
    assert!(toggled.badges.is_empty());
}

#[tokio::test]
async fn test_reaction_badges_scope_me_per_guest() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _) = register_owner(&server).await;
    let event = create_event(&server, &token).await;
    let media_id = upload_photo(&server, &event.id).await;

    let path = format!("/api/v1/media/{media_id}/reactions/heart/toggle");
    server.post_participant(&path, "guest-one").await.unwrap();
    server.post_participant(&path, "guest-two").await.unwrap();

    let badges_path = format!("/api/v1/media/{media_id}/reactions");

    let response = server.get_participant(&badges_path, "guest-one").await.unwrap();
    let badges: BadgeListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(badges.badges[0].count, 2);
    assert!(badges.badges[0].me);

    let response = server.get_participant(&badges_path, "guest-three").await.unwrap();
    let badges: BadgeListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(badges.badges[0].count, 2);
    assert!(!badges.badges[0].me);
}

#[tokio::test]
async fn test_reaction_unknown_emoji_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _) = register_owner(&server).await;
    let event = create_event(&server, &token).await;
    let media_id = upload_photo(&server, &event.id).await;

    let response = server
        .post_participant(
            &format!("/api/v1/media/{media_id}/reactions/fire/toggle"),
            "g1",
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_reaction_requires_participant_header() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _) = register_owner(&server).await;
    let event = create_event(&server, &token).await;
    let media_id = upload_photo(&server, &event.id).await;

    let url = format!(
        "{}/api/v1/media/{media_id}/reactions/heart/toggle",
        server.base_url()
    );
    let response = server.client.post(&url).send().await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Export Tests
// ============================================================================

#[tokio::test]
async fn test_export_returns_zip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _) = register_owner(&server).await;
    let event = create_event(&server, &token).await;
    upload_photo(&server, &event.id).await;
    upload_photo(&server, &event.id).await;

    let response = server
        .get(&format!("/api/v1/events/{}/export", event.id))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/zip"
    );
    let bytes = response.bytes().await.unwrap();
    // Zip local file header magic
    assert_eq!(&bytes[..4], &b"PK\x03\x04"[..]);
}

#[tokio::test]
async fn test_export_respects_allow_downloads() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _) = register_owner(&server).await;
    let event = create_event(&server, &token).await;
    upload_photo(&server, &event.id).await;

    // Turn downloads off
    let response = server
        .patch_auth(
            &format!("/api/v1/events/{}", event.id),
            &token,
            &serde_json::json!({ "allow_downloads": false }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Guests are blocked
    let response = server
        .get(&format!("/api/v1/events/{}/export", event.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The owner is not
    let response = server
        .get_auth(&format!("/api/v1/events/{}/export", event.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
