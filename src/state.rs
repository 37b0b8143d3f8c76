//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, UrlService};
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub auth_service: Arc<AuthService>,
    pub cache: Arc<dyn CacheService>,
    pub app_name: String,
}

impl AppState {
    pub fn new(
        url_service: Arc<UrlService>,
        auth_service: Arc<AuthService>,
        cache: Arc<dyn CacheService>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            url_service,
            auth_service,
            cache,
            app_name: app_name.into(),
        }
    }
}
