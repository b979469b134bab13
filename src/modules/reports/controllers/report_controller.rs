use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse,
};
use serde::Deserialize;

use crate::core::{AppError, Result};
use crate::middleware::{query_error_handler, CurrentRequestId};
use crate::modules::reports::services::{ReportService, REPORT_FILE_NAME};

/// Query parameters for the report endpoint
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub merchant_id: Option<String>,
}

impl ReportQuery {
    /// The trimmed merchant id, rejecting absent or blank values
    pub fn merchant_id(&self) -> Result<&str> {
        self.merchant_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::validation("merchant_id query parameter is required"))
    }
}

/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "Merchant Report Creator": "Welcome to the Merchant Report Creator API"
    }))
}

/// GET /report/?merchant_id=<id>
///
/// Generates the merchant's PDF report and returns it as an attachment.
#[tracing::instrument(skip_all, fields(merchant_id = ?query.merchant_id, request_id = %request_id))]
pub async fn get_report(
    service: web::Data<ReportService>,
    query: web::Query<ReportQuery>,
    request_id: CurrentRequestId,
) -> Result<HttpResponse> {
    let merchant_id = query.merchant_id()?;

    let pdf = service.generate(merchant_id, request_id.as_str()).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(REPORT_FILE_NAME.to_string())],
        })
        .body(pdf))
}

/// Configure routes for reports module
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .route("/", web::get().to(index))
        .route("/report/", web::get().to(get_report))
        .route("/report", web::get().to(get_report));
}
