use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use merchant_report::config::{Config, LogFormat};
use merchant_report::middleware::{not_found_handler, RequestId};
use merchant_report::modules::{health, reports};
use merchant_report::reports::{MySqlRecordRepository, PlottersChartRenderer, ReportService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(to_io_error)?;

    init_tracing(&config);

    config.validate().map_err(to_io_error)?;

    tracing::info!("Starting Merchant Report Service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Connections open lazily on first report
    let db_pool = config.database.create_pool().map_err(to_io_error)?;

    tracing::info!(
        "Database pool configured ({}..{} connections, source {})",
        config.database.pool_size,
        config.database.max_connections,
        config.report.source_table
    );

    std::fs::create_dir_all(&config.report.artifacts_dir)?;

    let repository = Arc::new(MySqlRecordRepository::new(
        db_pool,
        config.report.source_table.clone(),
    ));
    let renderer = Arc::new(PlottersChartRenderer::a4(config.report.image_dpi));
    let report_service = web::Data::new(ReportService::new(
        repository,
        renderer,
        config.report.clone(),
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(report_service.clone())
            .configure(health::configure)
            .configure(reports::configure)
            .default_service(web::to(not_found_handler))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("merchant_report={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn to_io_error(e: merchant_report::AppError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}
