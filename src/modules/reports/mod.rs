pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::MerchantReport;
pub use repositories::{MySqlRecordRepository, RecordRepository};
pub use services::{ChartRenderer, MetricsCalculator, PlottersChartRenderer, ReportService};
