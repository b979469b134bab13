use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::chart_renderer::{render_report, ChartRenderer};
use super::metrics_calculator::MetricsCalculator;
use super::pdf_assembler::PdfAssembler;
use crate::config::ReportConfig;
use crate::core::{AppError, Result};
use crate::modules::reports::models::ReportWindow;
use crate::modules::reports::repositories::RecordRepository;

/// File name of the assembled document inside a run directory
pub const REPORT_FILE_NAME: &str = "merchant_report.pdf";

/// Runs the report pipeline: fetch rows, compute metrics, draw charts, assemble the PDF
pub struct ReportService {
    repository: Arc<dyn RecordRepository>,
    renderer: Arc<dyn ChartRenderer>,
    settings: ReportConfig,
}

impl ReportService {
    pub fn new(
        repository: Arc<dyn RecordRepository>,
        renderer: Arc<dyn ChartRenderer>,
        settings: ReportConfig,
    ) -> Self {
        Self {
            repository,
            renderer,
            settings,
        }
    }

    pub fn settings(&self) -> &ReportConfig {
        &self.settings
    }

    /// Check that the record source is reachable
    pub async fn check_source(&self) -> Result<()> {
        self.repository.ping().await
    }

    /// Generate the PDF report for `merchant_id` and return its bytes.
    ///
    /// Every call works in its own directory under the artifacts root, so
    /// concurrent requests never share files. The directory is removed
    /// afterwards unless `keep_artifacts` is set.
    ///
    /// # Errors
    /// - `Validation` when the merchant id is blank
    /// - `NotFound` when the merchant has no rows at all
    /// - `Timeout` when generation exceeds `timeout_secs`
    /// - `MissingOutput` when the pipeline finished without producing the PDF
    pub async fn generate(&self, merchant_id: &str, request_id: &str) -> Result<Vec<u8>> {
        let merchant_id = merchant_id.trim();
        if merchant_id.is_empty() {
            return Err(AppError::validation("merchant_id is required"));
        }

        let run_dir = self.run_dir(merchant_id, request_id);
        let limit = Duration::from_secs(self.settings.timeout_secs);

        info!(merchant_id, request_id, "Generating merchant report");

        let cancel = Arc::new(AtomicBool::new(false));
        let mut render_task = None;
        let timed = tokio::time::timeout(
            limit,
            self.run(merchant_id, &run_dir, &cancel, &mut render_task),
        )
        .await;

        let outcome = match timed {
            Ok(result) => result,
            Err(_) => {
                warn!(merchant_id, timeout_secs = self.settings.timeout_secs, "Report generation timed out");
                cancel.store(true, Ordering::Release);
                // The blocking render cannot be aborted; wait for it so nothing
                // writes into the run directory while it is being removed
                if let Some(task) = render_task.take() {
                    match task.await {
                        Ok(Ok(())) => debug!(merchant_id, "Render task finished after timeout"),
                        Ok(Err(e)) => debug!(merchant_id, "Render task stopped after timeout: {}", e),
                        Err(e) => warn!(merchant_id, "Render task failed after timeout: {}", e),
                    }
                }
                Err(AppError::Timeout(format!(
                    "report for merchant {} exceeded {}s",
                    merchant_id, self.settings.timeout_secs
                )))
            }
        };

        if !self.settings.keep_artifacts {
            remove_run_dir(&run_dir).await;
        }

        match &outcome {
            Ok(bytes) => info!(merchant_id, size = bytes.len(), "Merchant report generated"),
            Err(e) => warn!(merchant_id, "Merchant report failed: {}", e),
        }

        outcome
    }

    async fn run(
        &self,
        merchant_id: &str,
        run_dir: &Path,
        cancel: &Arc<AtomicBool>,
        render_task: &mut Option<JoinHandle<Result<()>>>,
    ) -> Result<Vec<u8>> {
        let records = self.repository.fetch_all().await?;

        if !records.contains_merchant(merchant_id) {
            return Err(AppError::not_found(format!(
                "no transactions for merchant {}",
                merchant_id
            )));
        }

        let calculator = MetricsCalculator::new(ReportWindow::ending_now(self.settings.window_days));
        let report = calculator.merchant_report(&records, merchant_id);

        for kind in report.insufficient_metrics() {
            info!(merchant_id, metric = %kind, "Insufficient data for metric");
        }

        tokio::fs::create_dir_all(run_dir).await?;

        let pdf_path = run_dir.join(REPORT_FILE_NAME);
        let renderer = Arc::clone(&self.renderer);
        let assembler = PdfAssembler::new(self.settings.image_dpi);
        let title = format!("Merchant Report {}", merchant_id);
        let image_dir = run_dir.to_path_buf();
        let output = pdf_path.clone();

        let cancel = Arc::clone(cancel);

        let handle = tokio::task::spawn_blocking(move || -> Result<()> {
            let images = render_report(renderer.as_ref(), &report, &image_dir, &cancel)?;
            if cancel.load(Ordering::Acquire) {
                return Err(AppError::Timeout("assembly cancelled".to_string()));
            }
            assembler.assemble(&title, &images, &output)
        });

        let joined = render_task.insert(handle).await;
        *render_task = None;
        joined.map_err(|e| AppError::internal(format!("report task failed: {}", e)))??;

        if tokio::fs::metadata(&pdf_path).await.is_err() {
            return Err(AppError::MissingOutput(pdf_path.display().to_string()));
        }

        let bytes = tokio::fs::read(&pdf_path).await?;
        debug!(path = %pdf_path.display(), size = bytes.len(), "Read assembled report");

        Ok(bytes)
    }

    fn run_dir(&self, merchant_id: &str, request_id: &str) -> PathBuf {
        self.settings
            .artifacts_dir
            .join(format!("{}-{}", sanitize(merchant_id), sanitize(request_id)))
    }
}

async fn remove_run_dir(run_dir: &Path) {
    match tokio::fs::remove_dir_all(run_dir).await {
        Ok(()) => debug!(path = %run_dir.display(), "Removed report artifacts"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %run_dir.display(), "Failed to remove report artifacts: {}", e),
    }
}

/// Make an identifier safe to use as a path component
fn sanitize(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}
