//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::processor::DocumentProcessor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    processor: DocumentProcessor,
}

impl AppState {
    pub fn new(config: Config, processor: DocumentProcessor) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, processor }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the document processor
    pub fn processor(&self) -> &DocumentProcessor {
        &self.inner.processor
    }
}
