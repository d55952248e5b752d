//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! All fields are cheap to clone: the pool and HTTP client are
//! internally reference-counted, the config is wrapped in an Arc.

use crate::config::AppConfig;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Shared HTTP client for the text-generation service
    pub http: reqwest::Client,
}

impl AppState {
    /// Create a new application state
    ///
    /// The reqwest client is built once here; per-request timeouts are
    /// applied by the LLM client from `config.llm.timeout_secs`.
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the shared HTTP client
    #[inline]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
