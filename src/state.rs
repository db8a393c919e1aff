//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::PgUrlRepository;

/// Shortener wired to PostgreSQL.
pub type Shortener = ShortenerService<PgUrlRepository>;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<Shortener>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(shortener: Arc<Shortener>, cache: Arc<dyn CacheService>) -> Self {
        Self { shortener, cache }
    }
}
