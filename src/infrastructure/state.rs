//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::ContactRepository;
use crate::infrastructure::SeaOrmContactRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Contact repository
    pub contact_repo: Arc<dyn ContactRepository>,
}

impl AppState {
    /// Create a new AppState backed by the database
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_repository(Arc::new(SeaOrmContactRepository::new(db)))
    }

    /// Create a new AppState around any repository implementation
    pub fn with_repository(contact_repo: Arc<dyn ContactRepository>) -> Self {
        Self { contact_repo }
    }
}
