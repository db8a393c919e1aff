#![allow(dead_code)]

use async_trait::async_trait;
use shorturl::application::services::ShortenerService;
use shorturl::domain::resolver::{HostResolver, ResolveError};
use shorturl::infrastructure::cache::{CacheError, CacheResult, CacheService, NullCache};
use shorturl::infrastructure::persistence::PgUrlRepository;
use shorturl::state::AppState;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Resolver that accepts every host except names under the reserved `.invalid` TLD.
pub struct StubResolver;

#[async_trait]
impl HostResolver for StubResolver {
    async fn resolve(&self, host: &str) -> Result<(), ResolveError> {
        if host.ends_with(".invalid") {
            Err(ResolveError::NoAddresses(host.to_string()))
        } else {
            Ok(())
        }
    }
}

/// In-process cache used to observe cache hits in handler tests.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<i64, String>>,
}

impl MemoryCache {
    pub fn with_entry(short_id: i64, url: &str) -> Self {
        let cache = Self::default();
        cache
            .entries
            .lock()
            .unwrap()
            .insert(short_id, url.to_string());
        cache
    }

    pub fn get(&self, short_id: i64) -> Option<String> {
        self.entries.lock().unwrap().get(&short_id).cloned()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_id: i64) -> CacheResult<Option<String>> {
        Ok(self.get(short_id))
    }

    async fn set_url(&self, short_id: i64, url: &str, _ttl: Option<u64>) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(short_id, url.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Cache whose every operation fails; redirects must fall back to the database.
pub struct BrokenCache;

#[async_trait]
impl CacheService for BrokenCache {
    async fn get_url(&self, _short_id: i64) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn set_url(&self, _short_id: i64, _url: &str, _ttl: Option<u64>) -> CacheResult<()> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend(&self) -> &'static str {
        "broken"
    }
}

pub async fn insert_mapping(pool: &PgPool, short_id: i64, url: &str) {
    sqlx::query("INSERT INTO url_mappings (short_id, original_url) VALUES ($1, $2)")
        .bind(short_id)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_mappings(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state_with_cache(pool: PgPool, cache: Arc<dyn CacheService>) -> AppState {
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let shortener = ShortenerService::new(repository, Arc::new(StubResolver));

    AppState::new(Arc::new(shortener), cache)
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_cache(pool, Arc::new(NullCache))
}
