//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Loaded configuration
//! - Object storage client for uploads
//! - Email service for notifications

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    service::{email::EmailService, storage::StorageClient},
};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `Arc<Config>` is a reference-counted pointer
/// - `StorageClient` wraps a `reqwest::Client`, which uses an `Arc` internally
/// - `EmailService` holds its SMTP transport behind an `Arc`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Configuration loaded at startup.
    ///
    /// Token lifetimes, pagination limits and the slow request threshold are read from
    /// here on every request.
    pub config: Arc<Config>,

    /// Client for the object storage HTTP API.
    ///
    /// Disabled when storage credentials are absent; uploads then fail with a server error.
    pub storage: StorageClient,

    /// Outgoing email service.
    ///
    /// Disabled when SMTP credentials are absent; sends are skipped with an info log.
    pub email: EmailService,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Loaded application configuration
    /// - `storage` - Object storage client
    /// - `email` - Email service
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        config: Config,
        storage: StorageClient,
        email: EmailService,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            storage,
            email,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over `db` with development defaults and storage and email disabled.
    pub fn for_test(db: DatabaseConnection) -> Self {
        use crate::server::config::Environment;

        let config = Config::for_environment(
            Environment::Development,
            "sqlite::memory:",
            "test-secret-key",
        );
        let email = EmailService::disabled(config.frontend_url.clone());

        Self::new(db, config, StorageClient::new(reqwest::Client::new(), None), email)
    }
}
