//! Cache consistency tests for the user service.
//!
//! These run the real service logic against an in-memory store fake that
//! counts calls and an in-memory cache fake, so the read-through and
//! invalidate-on-write rules can be observed end to end without
//! infrastructure.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use users_api::domain::User;
use users_api::errors::{AppError, AppResult};
use users_api::infra::{CacheStore, UserRepository};
use users_api::services::{UserManager, UserService};

// =============================================================================
// Test Doubles
// =============================================================================

/// In-memory record store that counts read calls.
struct InMemoryStore {
    rows: Mutex<Vec<User>>,
    next_id: AtomicI32,
    find_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl InMemoryStore {
    fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
            find_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    fn seeded(users: Vec<User>) -> Self {
        let max_id = users.iter().map(|u| u.id).max().unwrap_or(0);
        let store = Self::new();
        *store.rows.lock().unwrap() = users;
        store.next_id.store(max_id + 1, Ordering::SeqCst);
        store
    }

    fn row(&self, id: i32) -> Option<User> {
        self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by_key(|u| u.id);
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.row(id))
    }

    async fn create(&self, name: String, email: String) -> AppResult<User> {
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name,
            email,
        };
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, name: String, email: String) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        row.name = name;
        row.email = email;
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// In-memory cache fake implementing the same contract as Redis.
#[derive(Default)]
struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCache {
    fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entry(key))
    }

    async fn set(&self, key: &str, value: &str, _ttl_seconds: u64) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

fn user(id: i32, name: &str, email: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn service_with(
    store: Arc<InMemoryStore>,
    cache: Arc<InMemoryCache>,
) -> UserManager {
    UserManager::new(store, cache, 300)
}

// =============================================================================
// Consistency Properties
// =============================================================================

#[tokio::test]
async fn test_cold_cache_get_populates_entry_equal_to_row() {
    let store = Arc::new(InMemoryStore::seeded(vec![user(1, "Ada", "ada@x.com")]));
    let cache = Arc::new(InMemoryCache::default());
    let service = service_with(store.clone(), cache.clone());

    let fetched = service.get_user(1).await.unwrap();

    assert_eq!(Some(fetched.clone()), store.row(1));
    let cached: User = serde_json::from_str(&cache.entry("users:1").unwrap()).unwrap();
    assert_eq!(cached, fetched);
}

#[tokio::test]
async fn test_get_after_update_never_returns_pre_update_value() {
    let store = Arc::new(InMemoryStore::seeded(vec![user(1, "Ada", "ada@x.com")]));
    let cache = Arc::new(InMemoryCache::default());
    let service = service_with(store.clone(), cache.clone());

    // Prime the cache with the old value.
    let old = service.get_user(1).await.unwrap();
    assert_eq!(old.name, "Ada");

    service
        .update_user(1, "Beth".into(), "ada@x.com".into())
        .await
        .unwrap();

    let fresh = service.get_user(1).await.unwrap();
    assert_eq!(fresh.name, "Beth");
}

#[tokio::test]
async fn test_list_reflects_every_write() {
    let store = Arc::new(InMemoryStore::new());
    let cache = Arc::new(InMemoryCache::default());
    let service = service_with(store.clone(), cache.clone());

    assert!(service.list_users().await.unwrap().is_empty());

    let created = service
        .create_user("Ada".into(), "ada@x.com".into())
        .await
        .unwrap();
    let listed = service.list_users().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);

    service
        .update_user(created.id, "Beth".into(), "ada@x.com".into())
        .await
        .unwrap();
    let listed = service.list_users().await.unwrap();
    assert_eq!(listed[0].name, "Beth");

    service.delete_user(created.id).await.unwrap();
    assert!(service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_then_get_is_not_found_despite_prior_cache() {
    let store = Arc::new(InMemoryStore::seeded(vec![user(1, "Ada", "ada@x.com")]));
    let cache = Arc::new(InMemoryCache::default());
    let service = service_with(store.clone(), cache.clone());

    // Cache the record first.
    service.get_user(1).await.unwrap();
    assert!(cache.contains("users:1"));

    let deleted = service.delete_user(1).await.unwrap();
    assert_eq!(deleted, 1);

    let result = service.get_user(1).await;
    assert!(matches!(result, Err(AppError::NotFound)));
    assert!(!cache.contains("users:1"));
}

#[tokio::test]
async fn test_invalidation_is_idempotent() {
    let cache = InMemoryCache::default();
    cache.set("users:1", "{}", 300).await.unwrap();

    cache.delete("users:1").await.unwrap();
    let after_first: bool = cache.contains("users:1");

    // Deleting an absent key is not an error and changes nothing.
    cache.delete("users:1").await.unwrap();
    let after_second: bool = cache.contains("users:1");

    assert!(!after_first);
    assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn test_collection_cache_served_without_store_on_repeat_list() {
    let store = Arc::new(InMemoryStore::seeded(vec![user(1, "Ada", "ada@x.com")]));
    let cache = Arc::new(InMemoryCache::default());
    let service = service_with(store.clone(), cache.clone());

    service.list_users().await.unwrap();
    service.list_users().await.unwrap();

    assert_eq!(store.list_calls(), 1);
}

// =============================================================================
// End-to-end Scenario
// =============================================================================

#[tokio::test]
async fn test_full_lifecycle_scenario() {
    let store = Arc::new(InMemoryStore::new());
    let cache = Arc::new(InMemoryCache::default());
    let service = service_with(store.clone(), cache.clone());

    // create -> id 1
    let created = service
        .create_user("A".into(), "a@x.com".into())
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    // first read populates, second read is served from cache
    let first = service.get_user(1).await.unwrap();
    assert_eq!(first, created);
    assert_eq!(store.find_calls(), 1);

    let second = service.get_user(1).await.unwrap();
    assert_eq!(second, created);
    assert_eq!(store.find_calls(), 1, "cache hit must not touch the store");

    // update invalidates; the next read sees the new name
    service
        .update_user(1, "B".into(), "a@x.com".into())
        .await
        .unwrap();
    let updated = service.get_user(1).await.unwrap();
    assert_eq!(updated.name, "B");

    // delete invalidates; the record is gone
    service.delete_user(1).await.unwrap();
    assert!(matches!(service.get_user(1).await, Err(AppError::NotFound)));

    // an id that never existed is never cached
    assert!(matches!(service.get_user(999).await, Err(AppError::NotFound)));
    assert!(!cache.contains("users:999"));
}
