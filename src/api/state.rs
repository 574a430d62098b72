//! API server state

use std::sync::Arc;

use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::store::CabStore;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway
    pub store: Arc<dyn CabStore>,

    /// Where create requests are reported
    pub diagnostics: Arc<dyn Diagnostics>,
}

impl AppState {
    /// Create state that reports diagnostics through `tracing`
    pub fn new(store: Arc<dyn CabStore>) -> Self {
        Self {
            store,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}
