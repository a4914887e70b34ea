//! Text slot endpoints

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

use crate::api::constants::{MAX_BODY_BYTES, MSG_INVALID_JSON};
use crate::api::helpers::{api_result, error_from_textcopy, error_response, json_response};
use crate::api::types::{CodeResponse, TextResponse, UpdateTextRequest};
use crate::storage::TextStore;

pub struct TextService;

impl TextService {
    /// `POST /texts`
    pub async fn create_text(store: web::Data<Arc<TextStore>>) -> impl Responder {
        let code = store.create();
        json_response(StatusCode::CREATED, &CodeResponse { code })
    }

    /// `GET /texts/{code}`
    pub async fn get_text(
        path: web::Path<String>,
        store: web::Data<Arc<TextStore>>,
    ) -> impl Responder {
        let code = path.into_inner();
        let result = store.get(&code).map(|text| TextResponse {
            code: code.clone(),
            text: text.to_string(),
        });
        api_result(StatusCode::OK, result)
    }

    /// `PUT /texts/{code}`
    ///
    /// The body is only parsed once the code is known to name a live slot,
    /// so an unknown code answers 404 whatever the body looks like.
    pub async fn update_text(
        path: web::Path<String>,
        body: web::Bytes,
        store: web::Data<Arc<TextStore>>,
    ) -> HttpResponse {
        let code = path.into_inner();

        if let Err(e) = store.get(&code) {
            return error_from_textcopy(&e);
        }

        let request = match UpdateTextRequest::from_body(&body) {
            Ok(request) => request,
            Err(e) => {
                trace!("Malformed update body for {}: {}", code, e);
                return error_response(StatusCode::BAD_REQUEST, MSG_INVALID_JSON);
            }
        };

        let result = store
            .update(&code, &request.text)
            .map(|code| CodeResponse { code });
        api_result(StatusCode::OK, result)
    }
}

/// Text routes, mounted under the API prefix
pub fn text_routes() -> actix_web::Scope {
    web::scope("/texts")
        .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route("", web::post().to(TextService::create_text))
        .route("/{code}", web::get().to(TextService::get_text))
        .route("/{code}", web::put().to(TextService::update_text))
}
