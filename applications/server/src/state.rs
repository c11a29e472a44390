/// Shared application state
use crate::config::PaginationSettings;
use crate::services::AuthService;
use lyrics_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    pub pagination: PaginationSettings,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        auth_service: Arc<AuthService>,
        pagination: PaginationSettings,
    ) -> Self {
        Self {
            db,
            auth_service,
            pagination,
        }
    }
}
