//! API-facing behavior tests.
//!
//! These tests use mock services to check response shapes and error
//! mapping without requiring a database connection.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;

use account_service::domain::{CreateUser, UpdateUser, User, UserResponse};
use account_service::errors::{AppError, AppResult};
use account_service::services::{AuthService, Claims, TokenResponse, UserService};
use account_service::types::MessageResponse;

// =============================================================================
// Mock Services for Testing
// =============================================================================

fn test_user(id: i64) -> User {
    User {
        id,
        email: "test@example.com".to_string(),
        password_hash: "hashed".to_string(),
        first_name: "Test".to_string(),
        last_name: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Mock auth service that returns predefined responses
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<Option<User>> {
        if email == "test@example.com" && password == "password" {
            Ok(Some(test_user(1)))
        } else {
            Ok(None)
        }
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        self.validate_credentials(&email, &password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        Ok(TokenResponse {
            access_token: "mock-token".to_string(),
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: 1,
                email: "test@example.com".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

/// Mock user service for testing
struct MockUserService;

#[async_trait]
impl UserService for MockUserService {
    async fn create_user(&self, draft: CreateUser) -> AppResult<User> {
        let mut user = test_user(1);
        user.email = draft.email;
        user.first_name = draft.first_name;
        user.last_name = draft.last_name;
        Ok(user)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(vec![test_user(1), test_user(2)])
    }

    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        if id == 1 {
            Ok(Some(test_user(1)))
        } else {
            Ok(None)
        }
    }

    async fn update_user(&self, id: i64, _patch: UpdateUser) -> AppResult<User> {
        if id == 1 {
            Ok(test_user(1))
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn delete_user(&self, id: i64) -> AppResult<u64> {
        Ok(if id == 1 { 1 } else { 0 })
    }
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_status_codes() {
    let response = AppError::NotFound.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = AppError::Unauthorized.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = AppError::InvalidCredentials.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = AppError::validation("bad input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = AppError::conflict("User").into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = AppError::internal("boom").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_invalid_credentials_body_does_not_name_the_failing_field() {
    let response = AppError::InvalidCredentials.into_response();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["message"], "Invalid credentials");
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_internal_error_body_hides_detail() {
    let response = AppError::internal("connection pool exhausted").into_response();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let message = json["error"]["message"].as_str().unwrap();
    assert!(!message.contains("connection pool"));
}

// =============================================================================
// Response Shape Tests
// =============================================================================

#[tokio::test]
async fn test_user_response_excludes_password_and_optional_last_name() {
    let response = UserResponse::from(test_user(1));
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["id"], 1);
    assert_eq!(json["email"], "test@example.com");
    assert_eq!(json["first_name"], "Test");
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
    // Absent last name is omitted rather than serialized as null
    assert!(json.get("last_name").is_none());
}

#[tokio::test]
async fn test_user_response_includes_last_name_when_present() {
    let mut user = test_user(1);
    user.last_name = Some("Doe".to_string());

    let json = serde_json::to_value(UserResponse::from(user)).unwrap();
    assert_eq!(json["last_name"], "Doe");
}

#[tokio::test]
async fn test_token_response_serializes_to_access_token_only() {
    let token = TokenResponse {
        access_token: "abc123".to_string(),
    };

    let json = serde_json::to_value(&token).unwrap();
    assert_eq!(json, serde_json::json!({ "access_token": "abc123" }));
}

#[tokio::test]
async fn test_message_response_shape() {
    let message = MessageResponse::new("Successfully deleted user by ID: 1");
    let json = serde_json::to_value(&message).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "message": "Successfully deleted user by ID: 1" })
    );
}

// =============================================================================
// JWT Claims Tests
// =============================================================================

#[tokio::test]
async fn test_claims_structure() {
    let claims = Claims {
        sub: 1,
        email: "test@example.com".to_string(),
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    };

    assert!(!claims.email.is_empty());
    assert!(claims.exp > claims.iat);
}

// =============================================================================
// Mock Service Tests
// =============================================================================

#[tokio::test]
async fn test_mock_auth_service_login() {
    let service = MockAuthService;
    let token = service
        .login("test@example.com".to_string(), "password".to_string())
        .await
        .unwrap();

    assert!(!token.access_token.is_empty());
}

#[tokio::test]
async fn test_mock_auth_service_login_rejects_bad_credentials() {
    let service = MockAuthService;

    let unknown_email = service
        .login("nobody@example.com".to_string(), "password".to_string())
        .await
        .unwrap_err();
    let wrong_password = service
        .login("test@example.com".to_string(), "wrong".to_string())
        .await
        .unwrap_err();

    // Both failures look identical to the caller
    assert_eq!(unknown_email.to_string(), wrong_password.to_string());
}

#[tokio::test]
async fn test_mock_auth_service_verify_invalid_token() {
    let service = MockAuthService;
    let result = service.verify_token("invalid-token");

    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), AppError::Unauthorized));
}

#[tokio::test]
async fn test_mock_user_service_get_user() {
    let service = MockUserService;

    assert!(service.get_user(1).await.unwrap().is_some());
    assert!(service.get_user(99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_mock_user_service_delete_counts() {
    let service = MockUserService;

    assert_eq!(service.delete_user(1).await.unwrap(), 1);
    assert_eq!(service.delete_user(99).await.unwrap(), 0);
}

// =============================================================================
// Integration Tests (Require Infrastructure)
// =============================================================================
//
// Router-level tests require a PostgreSQL connection for AppState.
// To run them:
// 1. Start PostgreSQL (use docker-compose up -d)
// 2. Set DATABASE_URL and JWT_SECRET environment variables
// 3. Run: cargo test -- --ignored
