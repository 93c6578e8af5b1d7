use std::sync::Arc;

use crate::config::ServerConfig;
use crate::directory::DirectoryClient;

/// Shared application state passed to all handlers via Axum's State extractor.
///
/// Both fields are `Arc`-wrapped so cloning `AppState` is cheap. The
/// directory client is a trait object so tests can swap in a fake.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub directory: Arc<dyn DirectoryClient>,
}
