mod chart_renderer;
mod metrics_calculator;
mod pdf_assembler;
mod report_service;

pub use chart_renderer::{render_report, ChartRenderer, PageHeader, PlottersChartRenderer};
pub use metrics_calculator::{trailing_mean, MetricsCalculator, MOVING_AVERAGE_SPAN, TOP_STATES_LIMIT};
pub use pdf_assembler::PdfAssembler;
pub use report_service::{ReportService, REPORT_FILE_NAME};
