// Report service and app wiring for tests

use actix_web::web;
use merchant_report::config::ReportConfig;
use merchant_report::reports::models::TransactionRecord;
use merchant_report::reports::{RecordRepository, ReportService};
use merchant_report::{health, reports};
use std::path::Path;
use std::sync::Arc;

use super::{InMemoryRecordRepository, SolidColorRenderer};

/// Report settings writing artifacts below `artifacts_dir`
pub fn test_settings(artifacts_dir: &Path) -> ReportConfig {
    ReportConfig {
        artifacts_dir: artifacts_dir.to_path_buf(),
        timeout_secs: 30,
        ..ReportConfig::default()
    }
}

/// Service over `records` using the solid-colour renderer
pub fn report_service(records: Vec<TransactionRecord>, artifacts_dir: &Path) -> ReportService {
    service_with(
        Arc::new(InMemoryRecordRepository::new(records)),
        Arc::new(SolidColorRenderer::new()),
        test_settings(artifacts_dir),
    )
}

pub fn service_with(
    repository: Arc<dyn RecordRepository>,
    renderer: Arc<SolidColorRenderer>,
    settings: ReportConfig,
) -> ReportService {
    ReportService::new(repository, renderer, settings)
}

/// All application routes, as registered by the server
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    reports::configure(cfg);
}
