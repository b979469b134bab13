use actix_web::{error::QueryPayloadError, HttpRequest, HttpResponse, ResponseError};

use crate::core::AppError;

/// Turn query string extraction failures into the JSON validation error
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), "Rejected query string: {}", err);

    let message = match &err {
        QueryPayloadError::Deserialize(inner) => inner.to_string(),
        other => other.to_string(),
    };

    AppError::validation(message).into()
}

/// JSON 404 for routes that do not exist
pub async fn not_found_handler(req: HttpRequest) -> HttpResponse {
    AppError::not_found(format!("no route for {} {}", req.method(), req.path())).error_response()
}
