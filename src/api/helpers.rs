//! Response builders shared by the API handlers

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use super::types::ErrorResponse;
use crate::errors::TextCopyError;

/// Build a JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// `{"error": message}` with the given status
pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response(
        status,
        &ErrorResponse {
            error: message.to_string(),
        },
    )
}

/// Map a crate error onto its status code and message
pub fn error_from_textcopy(err: &TextCopyError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}

/// `Ok` becomes `status` + JSON body, `Err` the uniform error shape
pub fn api_result<T: Serialize>(status: StatusCode, result: Result<T, TextCopyError>) -> HttpResponse {
    match result {
        Ok(body) => json_response(status, &body),
        Err(e) => error_from_textcopy(&e),
    }
}
