//! User service tests against in-memory repositories.
//!
//! These tests exercise the service layer end to end without a database:
//! the repositories are replaced with in-memory implementations of the
//! same traits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use account_service::domain::{CreateUser, UpdateUser, User};
use account_service::errors::{AppError, AppResult};
use account_service::infra::{SequenceRepository, UserRepository};
use account_service::services::{UserManager, UserService};

// =============================================================================
// In-memory repositories
// =============================================================================

/// In-memory user repository backed by a Vec
#[derive(Default)]
struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(
        &self,
        id: i64,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: Option<String>,
    ) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id,
            email,
            password_hash,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        };

        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, patch: UpdateUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = Some(last_name);
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<u64> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok((before - users.len()) as u64)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }
}

/// In-memory sequence repository with per-name counters
#[derive(Default)]
struct InMemorySequenceRepository {
    counters: Mutex<HashMap<String, i64>>,
}

#[async_trait]
impl SequenceRepository for InMemorySequenceRepository {
    async fn next_value(&self, name: &str) -> AppResult<i64> {
        let mut counters = self.counters.lock().unwrap();
        let value = counters.entry(name.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}

// =============================================================================
// Test helpers
// =============================================================================

fn make_service() -> UserManager {
    UserManager::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemorySequenceRepository::default()),
    )
}

fn draft(email: &str, first_name: &str, last_name: Option<&str>) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password: "pw".to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.map(String::from),
    }
}

// =============================================================================
// Sequence tests
// =============================================================================

#[tokio::test]
async fn concurrent_sequence_values_are_distinct_and_contiguous() {
    let sequences = Arc::new(InMemorySequenceRepository::default());

    let mut handles = Vec::new();
    for _ in 0..20 {
        let sequences = sequences.clone();
        handles.push(tokio::spawn(async move {
            sequences.next_value("userId").await.unwrap()
        }));
    }

    let mut values = Vec::new();
    for handle in handles {
        values.push(handle.await.unwrap());
    }

    values.sort_unstable();
    assert_eq!(values, (1..=20).collect::<Vec<i64>>());
}

#[tokio::test]
async fn counters_with_different_names_are_independent() {
    let sequences = InMemorySequenceRepository::default();

    assert_eq!(sequences.next_value("userId").await.unwrap(), 1);
    assert_eq!(sequences.next_value("userId").await.unwrap(), 2);
    assert_eq!(sequences.next_value("orderId").await.unwrap(), 1);
}

// =============================================================================
// User service tests
// =============================================================================

#[tokio::test]
async fn create_assigns_sequential_ids_starting_at_one() {
    let service = make_service();

    let first = service
        .create_user(draft("a@b.com", "Ann", None))
        .await
        .unwrap();
    let second = service
        .create_user(draft("b@b.com", "Bob", None))
        .await
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn created_user_never_serializes_password() {
    let service = make_service();

    let user = service
        .create_user(draft("a@b.com", "Ann", None))
        .await
        .unwrap();

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["email"], "a@b.com");
    assert_eq!(json["first_name"], "Ann");
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let service = make_service();

    let created = service
        .create_user(draft("a@b.com", "Ann", Some("Lee")))
        .await
        .unwrap();

    let fetched = service
        .get_user(created.id)
        .await
        .unwrap()
        .expect("user should exist");

    assert_eq!(fetched, created);
}

#[tokio::test]
async fn delete_reports_one_then_zero() {
    let service = make_service();

    let user = service
        .create_user(draft("a@b.com", "Ann", None))
        .await
        .unwrap();

    assert_eq!(service.delete_user(user.id).await.unwrap(), 1);
    assert_eq!(service.delete_user(user.id).await.unwrap(), 0);
    assert!(service.get_user(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_changes_only_the_patched_field() {
    let service = make_service();

    let created = service
        .create_user(draft("a@b.com", "Ann", Some("Lee")))
        .await
        .unwrap();

    service
        .update_user(
            created.id,
            UpdateUser {
                first_name: Some("X".to_string()),
                ..UpdateUser::default()
            },
        )
        .await
        .unwrap();

    let updated = service
        .get_user(created.id)
        .await
        .unwrap()
        .expect("user should exist");

    assert_eq!(updated.first_name, "X");
    assert_eq!(updated.email, "a@b.com");
    assert_eq!(updated.last_name, Some("Lee".to_string()));
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let service = make_service();

    let result = service.update_user(42, UpdateUser::default()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let service = make_service();

    service
        .create_user(draft("a@b.com", "Ann", None))
        .await
        .unwrap();

    let result = service.create_user(draft("a@b.com", "Bob", None)).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn list_returns_all_users_in_storage_order() {
    let service = make_service();

    service
        .create_user(draft("a@b.com", "Ann", None))
        .await
        .unwrap();
    service
        .create_user(draft("b@b.com", "Bob", None))
        .await
        .unwrap();

    let users = service.list_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "a@b.com");
    assert_eq!(users[1].email, "b@b.com");
}
