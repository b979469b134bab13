pub mod error_handler;
pub mod request_id;

pub use error_handler::{not_found_handler, query_error_handler};
pub use request_id::{CurrentRequestId, RequestId, REQUEST_ID_HEADER};
