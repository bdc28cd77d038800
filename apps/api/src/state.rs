use std::sync::Arc;

use crate::config::Config;
use crate::export::ExportSink;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Default: PgResumeStore.
    pub store: Arc<dyn ResumeStore>,
    /// Where rendered exports are written. Default: S3ExportSink.
    pub exports: Arc<dyn ExportSink>,
    pub config: Config,
}
