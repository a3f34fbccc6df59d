use std::sync::Arc;

use crate::builder::SiteStore;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Only immutable data lives here; every render builds its own group and link collections.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub site: Arc<SiteStore>,
}
