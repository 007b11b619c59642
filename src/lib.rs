//! Lectern Library Catalog
//!
//! An in-memory library catalog server: books, registered readers and loan
//! records, exposed through a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state with an empty repository, seeded if configured
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let services = services::Services::new(repository::Repository::new(), &config.catalog)?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
