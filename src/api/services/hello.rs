use actix_web::Responder;
use actix_web::http::StatusCode;

use crate::api::constants::HELLO_MESSAGE;
use crate::api::helpers::json_response;
use crate::api::types::HelloResponse;

/// `GET /hello`, a cheap liveness probe for the frontend
pub async fn hello() -> impl Responder {
    json_response(
        StatusCode::OK,
        &HelloResponse {
            message: HELLO_MESSAGE.to_string(),
        },
    )
}
