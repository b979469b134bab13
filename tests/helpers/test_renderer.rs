// Chart renderer that writes solid-colour PNGs

use image::{Rgb, RgbImage};
use merchant_report::reports::models::{
    CountMetrics, GeographicDistribution, MetricKind, MetricOutcome, RevenueMetrics,
    StatusMetrics, UserMetrics,
};
use merchant_report::reports::services::PageHeader;
use merchant_report::reports::ChartRenderer;
use merchant_report::{AppError, Result};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Records every page it draws as (metric, computed?)
#[derive(Default)]
pub struct SolidColorRenderer {
    pub pages: Mutex<Vec<(MetricKind, bool)>>,
    /// Time spent on each page before it is written
    pub page_delay: Duration,
}

impl SolidColorRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that blocks for `page_delay` on every page
    pub fn slow(page_delay: Duration) -> Self {
        Self {
            page_delay,
            ..Self::default()
        }
    }

    pub fn drawn(&self) -> Vec<(MetricKind, bool)> {
        self.pages.lock().unwrap().clone()
    }

    fn draw(&self, kind: MetricKind, computed: bool, output: &Path) -> Result<()> {
        if !self.page_delay.is_zero() {
            std::thread::sleep(self.page_delay);
        }
        self.pages.lock().unwrap().push((kind, computed));

        let shade = if computed { 200 } else { 90 };
        RgbImage::from_pixel(124, 175, Rgb([shade, shade, 255]))
            .save(output)
            .map_err(|e| AppError::render(e.to_string()))
    }
}

impl ChartRenderer for SolidColorRenderer {
    fn render_revenue(
        &self,
        _header: &PageHeader,
        metrics: &MetricOutcome<RevenueMetrics>,
        output: &Path,
    ) -> Result<()> {
        self.draw(MetricKind::Revenue, metrics.is_computed(), output)
    }

    fn render_counts(
        &self,
        _header: &PageHeader,
        metrics: &MetricOutcome<CountMetrics>,
        output: &Path,
    ) -> Result<()> {
        self.draw(MetricKind::Count, metrics.is_computed(), output)
    }

    fn render_status(
        &self,
        _header: &PageHeader,
        metrics: &MetricOutcome<StatusMetrics>,
        output: &Path,
    ) -> Result<()> {
        self.draw(MetricKind::Status, metrics.is_computed(), output)
    }

    fn render_users(
        &self,
        _header: &PageHeader,
        metrics: &MetricOutcome<UserMetrics>,
        output: &Path,
    ) -> Result<()> {
        self.draw(MetricKind::Users, metrics.is_computed(), output)
    }

    fn render_geography(
        &self,
        _header: &PageHeader,
        metrics: &MetricOutcome<GeographicDistribution>,
        output: &Path,
    ) -> Result<()> {
        self.draw(MetricKind::Geography, metrics.is_computed(), output)
    }
}
