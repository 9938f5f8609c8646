//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with the migrations applied
//! - Environment variables: DATABASE_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

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
async fn test_signup() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    let response = server.post("/api/v1/auth/signup", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.name, request.name);
    assert_eq!(auth.user.email, request.email);
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    // First signup
    server.post("/api/v1/auth/signup", &request).await.unwrap();

    // Second signup with same email
    let response = server.post("/api/v1/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_signup_weak_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = SignupRequest::unique();
    request.password = "alllowercase1".to_string();

    let response = server.post("/api/v1/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Signup first
    let signup_req = SignupRequest::unique();
    server.post("/api/v1/auth/signup", &signup_req).await.unwrap();

    // Login
    let login_req = LoginRequest::from_signup(&signup_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.email, signup_req.email);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup_req = SignupRequest::unique();
    server.post("/api/v1/auth/signup", &signup_req).await.unwrap();

    let login_req = LoginRequest {
        email: signup_req.email.clone(),
        password: "WrongPass123!".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_unknown_email_same_as_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "WrongPass123!".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "INVALID_CREDENTIALS");
}

// ============================================================================
// User Profile Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup_req = SignupRequest::unique();
    let response = server.post("/api/v1/auth/signup", &signup_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_auth("/api/v1/user", &auth.access_token).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.id, auth.user.id);
    assert_eq!(user.email, signup_req.email);
}

#[tokio::test]
async fn test_get_current_user_without_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/user").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_update_settings_requires_current_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup_req = SignupRequest::unique();
    let response = server.post("/api/v1/auth/signup", &signup_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Wrong current password is rejected
    let body = serde_json::json!({
        "current_password": "WrongPass123!",
        "phone": "555-0100",
    });
    let response = server
        .put_auth("/api/v1/user/settings", &auth.access_token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Correct current password applies the change
    let body = serde_json::json!({
        "current_password": signup_req.password,
        "phone": "555-0100",
    });
    let response = server
        .put_auth("/api/v1/user/settings", &auth.access_token, &body)
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.phone.as_deref(), Some("555-0100"));
}

// ============================================================================
// Listing Tests
// ============================================================================

async fn signup(server: &TestServer, request: &SignupRequest) -> AuthResponse {
    let response = server.post("/api/v1/auth/signup", request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_create_and_search_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server, &SignupRequest::unique()).await;

    let form = ListingForm::unique().with_food_type("Fresh apples");
    let food_type = form.food_type.clone();

    let response = server
        .post_multipart_auth("/api/v1/listings", &auth.access_token, form.into_form(0))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(listing.food_type, food_type);
    assert_eq!(listing.poster_name, auth.user.name);

    // Text search is a public endpoint
    let response = server
        .get("/api/v1/listings?search=Fresh%20apples")
        .await
        .unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(results.iter().any(|l| l.id == listing.id));
}

#[tokio::test]
async fn test_search_quantity_converts_units() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server, &SignupRequest::unique()).await;

    // A 2 kg listing
    let form = ListingForm::unique().with_quantity(2.0, "kg");
    let response = server
        .post_multipart_auth("/api/v1/listings", &auth.access_token, form.into_form(0))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Asking for at least 1500 g matches it across the unit family
    let query = "/api/v1/listings?quantity=%7B%22value%22%3A1500%2C%22unit%22%3A%22g%22%7D";
    let response = server.get(query).await.unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(results.iter().any(|l| l.id == listing.id));

    // Asking for at least 3 kg does not
    let query = "/api/v1/listings?quantity=%7B%22value%22%3A3%2C%22unit%22%3A%22kg%22%7D";
    let response = server.get(query).await.unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!results.iter().any(|l| l.id == listing.id));
}

#[tokio::test]
async fn test_search_location_matches_all_tokens_in_any_order() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server, &SignupRequest::unique()).await;

    let suffix = unique_suffix();
    let form = ListingForm::unique().with_location(&format!("Quayside{suffix} Arches{suffix}"));
    let response = server
        .post_multipart_auth("/api/v1/listings", &auth.access_token, form.into_form(0))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // A single token matches
    let response = server
        .get(&format!("/api/v1/listings?location=Quayside{suffix}"))
        .await
        .unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(results.iter().any(|l| l.id == listing.id));

    // Both tokens match regardless of order and case
    let response = server
        .get(&format!(
            "/api/v1/listings?location=arches{suffix}%20quayside{suffix}"
        ))
        .await
        .unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(results.iter().any(|l| l.id == listing.id));

    // Every token must match, not just one
    let response = server
        .get(&format!(
            "/api/v1/listings?location=Quayside{suffix}%20Pavilion{suffix}"
        ))
        .await
        .unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!results.iter().any(|l| l.id == listing.id));
}

#[tokio::test]
async fn test_search_excludes_expired_listings() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server, &SignupRequest::unique()).await;

    let suffix = unique_suffix();
    let food_type = format!("Day-old rolls {suffix}");
    let form = ListingForm::unique()
        .with_food_type(&food_type)
        .with_expiration(chrono::Utc::now() - chrono::Duration::days(1));
    let response = server
        .post_multipart_auth("/api/v1/listings", &auth.access_token, form.into_form(0))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Already-expired listings are hidden from search by default
    let response = server
        .get(&format!(
            "/api/v1/listings?search=Day-old%20rolls%20{suffix}"
        ))
        .await
        .unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!results.iter().any(|l| l.id == listing.id));
}

#[tokio::test]
async fn test_search_date_posted_day_boundary() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server, &SignupRequest::unique()).await;

    let suffix = unique_suffix();
    let food_type = format!("Crate of pears {suffix}");
    let form = ListingForm::unique().with_food_type(&food_type);
    let response = server
        .post_multipart_auth("/api/v1/listings", &auth.access_token, form.into_form(0))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let today = chrono::Utc::now().date_naive();

    // Posted today, so today's calendar day matches
    let response = server
        .get(&format!(
            "/api/v1/listings?search=Crate%20of%20pears%20{suffix}&date_posted={today}"
        ))
        .await
        .unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(results.iter().any(|l| l.id == listing.id));

    // Yesterday's day does not
    let yesterday = today - chrono::Duration::days(1);
    let response = server
        .get(&format!(
            "/api/v1/listings?search=Crate%20of%20pears%20{suffix}&date_posted={yesterday}"
        ))
        .await
        .unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!results.iter().any(|l| l.id == listing.id));
}

#[tokio::test]
async fn test_search_poster_wildcards_are_literal() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server, &SignupRequest::unique()).await;

    let form = ListingForm::unique();
    let response = server
        .post_multipart_auth("/api/v1/listings", &auth.access_token, form.into_form(0))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // "%" is a literal character in a poster name, not a match-anything
    let response = server.get("/api/v1/listings?posted_by=%25").await.unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_malformed_quantity_is_dropped() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Malformed quantity filter must not error; it is simply ignored
    let response = server
        .get("/api/v1/listings?quantity=not-json")
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_search_unknown_poster_returns_empty() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/v1/listings?posted_by=nobody-has-this-name-xyzzy")
        .await
        .unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_create_listing_image_cap() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server, &SignupRequest::unique()).await;

    // Six images is over the cap and rejected up front
    let form = ListingForm::unique();
    let response = server
        .post_multipart_auth("/api/v1/listings", &auth.access_token, form.into_form(6))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "TOO_MANY_IMAGES");

    // Five is fine
    let form = ListingForm::unique();
    let response = server
        .post_multipart_auth("/api/v1/listings", &auth.access_token, form.into_form(5))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(listing.images.len(), 5);
}

#[tokio::test]
async fn test_update_listing_image_cap_counts_kept_images() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server, &SignupRequest::unique()).await;

    // Start with two images
    let form = ListingForm::unique();
    let response = server
        .post_multipart_auth(
            "/api/v1/listings",
            &auth.access_token,
            form.clone().into_form(2),
        )
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(listing.images.len(), 2);

    // Keeping both and adding two more stays under the cap
    let mut update = form.clone().into_form(2);
    for url in &listing.images {
        update = update.text("keep_images", url.clone());
    }
    let response = server
        .put_multipart_auth(
            &format!("/api/v1/listings/{}", listing.id),
            &auth.access_token,
            update,
        )
        .await
        .unwrap();
    let updated: ListingResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.images.len(), 4);

    // Keeping all four and adding two more overflows and is rejected
    let mut update = form.into_form(2);
    for url in &updated.images {
        update = update.text("keep_images", url.clone());
    }
    let response = server
        .put_multipart_auth(
            &format!("/api/v1/listings/{}", listing.id),
            &auth.access_token,
            update,
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "TOO_MANY_IMAGES");
}

#[tokio::test]
async fn test_update_listing_by_non_owner_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = signup(&server, &SignupRequest::unique()).await;
    let intruder = signup(&server, &SignupRequest::unique()).await;

    let form = ListingForm::unique();
    let response = server
        .post_multipart_auth(
            "/api/v1/listings",
            &owner.access_token,
            form.clone().into_form(0),
        )
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Another user gets the same outcome as a missing listing
    let response = server
        .put_multipart_auth(
            &format!("/api/v1/listings/{}", listing.id),
            &intruder.access_token,
            form.into_form(0),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server, &SignupRequest::unique()).await;

    let form = ListingForm::unique().with_food_type("Leftover lasagna");
    let response = server
        .post_multipart_auth("/api/v1/listings", &auth.access_token, form.into_form(0))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(
            &format!("/api/v1/listings/{}", listing.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Gone from search results
    let response = server
        .get("/api/v1/listings?search=Leftover%20lasagna")
        .await
        .unwrap();
    let results: Vec<ListingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!results.iter().any(|l| l.id == listing.id));
}

// ============================================================================
// Messaging Tests
// ============================================================================

#[tokio::test]
async fn test_chat_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let poster = signup(&server, &SignupRequest::unique()).await;
    let seeker = signup(&server, &SignupRequest::unique()).await;

    // Poster offers food
    let form = ListingForm::unique();
    let response = server
        .post_multipart_auth("/api/v1/listings", &poster.access_token, form.into_form(0))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Seeker opens a conversation about it
    let response = server
        .get_auth(
            &format!(
                "/api/v1/chat?recipient_id={}&listing_id={}",
                poster.user.id, listing.id
            ),
            &seeker.access_token,
        )
        .await
        .unwrap();
    let thread: ChatThreadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(thread.messages.is_empty());

    // Seeker posts a message
    let request =
        SendMessageRequest::to_conversation(&thread.conversation_id, "Is this still available?");
    let response = server
        .post_auth("/api/v1/chat", &seeker.access_token, &request)
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.recipient_id, poster.user.id);
    assert!(!message.read);

    // Poster sees it in the inbox
    let response = server
        .get_auth("/api/v1/messages?type=inbox", &poster.access_token)
        .await
        .unwrap();
    let inbox: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(inbox.iter().any(|m| m.id == message.id));

    // Seeker sees it in the outbox
    let response = server
        .get_auth("/api/v1/messages?type=outbox", &seeker.access_token)
        .await
        .unwrap();
    let outbox: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(outbox.iter().any(|m| m.id == message.id));

    // Re-opening with the same pair lands on the same conversation
    let response = server
        .get_auth(
            &format!("/api/v1/chat?recipient_id={}", poster.user.id),
            &seeker.access_token,
        )
        .await
        .unwrap();
    let reopened: ChatThreadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reopened.conversation_id, thread.conversation_id);
    assert_eq!(reopened.messages.len(), 1);

    // Poster reading the thread marks the message read
    let response = server
        .get_auth(
            &format!("/api/v1/chat?conversation_id={}", thread.conversation_id),
            &poster.access_token,
        )
        .await
        .unwrap();
    let _thread: ChatThreadResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/api/v1/messages?type=inbox", &poster.access_token)
        .await
        .unwrap();
    let inbox: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let received = inbox.iter().find(|m| m.id == message.id).unwrap();
    assert!(received.read);

    // Conversation overview shows the thread for both parties
    let response = server
        .get_auth("/api/v1/conversations", &poster.access_token)
        .await
        .unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let entry = conversations
        .iter()
        .find(|c| c.id == thread.conversation_id)
        .unwrap();
    assert_eq!(entry.counterpart_id, seeker.user.id);
    assert_eq!(
        entry.last_message.as_deref(),
        Some("Is this still available?")
    );
}

#[tokio::test]
async fn test_post_chat_creates_conversation_on_first_contact() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let poster = signup(&server, &SignupRequest::unique()).await;
    let seeker = signup(&server, &SignupRequest::unique()).await;

    let form = ListingForm::unique();
    let response = server
        .post_multipart_auth("/api/v1/listings", &poster.access_token, form.into_form(0))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // First message addressed by recipient creates the conversation
    let request = SendMessageRequest::to_recipient(
        &poster.user.id,
        Some(&listing.id),
        "Saw your listing, still available?",
    );
    let response = server
        .post_auth("/api/v1/chat", &seeker.access_token, &request)
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.recipient_id, poster.user.id);

    // Opening the thread by recipient lands on that same conversation
    let response = server
        .get_auth(
            &format!("/api/v1/chat?recipient_id={}", poster.user.id),
            &seeker.access_token,
        )
        .await
        .unwrap();
    let thread: ChatThreadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(thread.conversation_id, message.conversation_id);
    assert_eq!(thread.messages.len(), 1);

    // A message addressed to nobody is rejected
    let request = SendMessageRequest {
        conversation_id: None,
        recipient_id: None,
        listing_id: None,
        content: "hello?".to_string(),
    };
    let response = server
        .post_auth("/api/v1/chat", &seeker.access_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_chat_with_self_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server, &SignupRequest::unique()).await;

    let response = server
        .get_auth(
            &format!("/api/v1/chat?recipient_id={}", auth.user.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "SELF_CONVERSATION");
}

#[tokio::test]
async fn test_chat_about_own_listing_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let poster = signup(&server, &SignupRequest::unique()).await;
    let other = signup(&server, &SignupRequest::unique()).await;

    let form = ListingForm::unique();
    let response = server
        .post_multipart_auth("/api/v1/listings", &poster.access_token, form.into_form(0))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // The listing owner cannot open a thread about their own listing
    let response = server
        .get_auth(
            &format!(
                "/api/v1/chat?recipient_id={}&listing_id={}",
                other.user.id, listing.id
            ),
            &poster.access_token,
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "OWN_LISTING_CONVERSATION");
}

#[tokio::test]
async fn test_chat_thread_hidden_from_non_participants() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = signup(&server, &SignupRequest::unique()).await;
    let bob = signup(&server, &SignupRequest::unique()).await;
    let eve = signup(&server, &SignupRequest::unique()).await;

    let response = server
        .get_auth(
            &format!("/api/v1/chat?recipient_id={}", bob.user.id),
            &alice.access_token,
        )
        .await
        .unwrap();
    let thread: ChatThreadResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // An outsider gets the same outcome as a missing conversation
    let response = server
        .get_auth(
            &format!("/api/v1/chat?conversation_id={}", thread.conversation_id),
            &eve.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // And posting into it is forbidden
    let request = SendMessageRequest::to_conversation(&thread.conversation_id, "let me in");
    let response = server
        .post_auth("/api/v1/chat", &eve.access_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_messages_for_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let poster = signup(&server, &SignupRequest::unique()).await;
    let seeker = signup(&server, &SignupRequest::unique()).await;

    let form = ListingForm::unique();
    let response = server
        .post_multipart_auth("/api/v1/listings", &poster.access_token, form.into_form(0))
        .await
        .unwrap();
    let listing: ListingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(
            &format!(
                "/api/v1/chat?recipient_id={}&listing_id={}",
                poster.user.id, listing.id
            ),
            &seeker.access_token,
        )
        .await
        .unwrap();
    let thread: ChatThreadResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let request =
        SendMessageRequest::to_conversation(&thread.conversation_id, "I can pick it up tonight");
    server
        .post_auth("/api/v1/chat", &seeker.access_token, &request)
        .await
        .unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/messages?listing_id={}", listing.id),
            &poster.access_token,
        )
        .await
        .unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "I can pick it up tonight");
}
