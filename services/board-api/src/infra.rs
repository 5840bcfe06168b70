use job_board::board::{FileStore, JobBoard, JobCatalog, LogSink};
use job_board::config::{AppConfig, StorageConfig};
use job_board::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type ServiceBoard = JobBoard<FileStore, LogSink>;

pub(crate) fn load_catalog(storage: &StorageConfig) -> Result<JobCatalog, AppError> {
    match &storage.catalog_csv {
        Some(path) => {
            let catalog = JobCatalog::from_path(path)?;
            info!(path = %path.display(), jobs = catalog.len(), "catalog loaded from csv");
            Ok(catalog)
        }
        None => Ok(JobCatalog::seed()),
    }
}

/// Board backed by the configured store file; applications are logged.
pub(crate) fn build_board(config: &AppConfig) -> Result<ServiceBoard, AppError> {
    let catalog = load_catalog(&config.storage)?;
    let store = FileStore::new(config.storage.store_path.clone());
    Ok(JobBoard::new(catalog, store, LogSink))
}
