//! Request ID and access logging middleware
//!
//! Every request gets a UUID that is stored in the request extensions, put on
//! the tracing span the handler runs in, and echoed back as `X-Request-ID`.

use std::time::Instant;

use actix_web::{
    Error, HttpMessage,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
};
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

/// Request ID, readable by handlers through `req.extensions()`
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Use with `actix_web::middleware::from_fn(trace_request)`
pub async fn trace_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let request_id = Uuid::new_v4().to_string();
    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.path(),
    );

    let start = Instant::now();
    let mut response = next.call(req).instrument(span.clone()).await?;

    span.in_scope(|| {
        debug!(
            "{} in {:.2}ms",
            response.status().as_u16(),
            start.elapsed().as_secs_f64() * 1000.0
        );
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use actix_web::middleware::from_fn;
    use actix_web::test::{self, TestRequest};
    use actix_web::{App, HttpRequest, HttpResponse, web};

    use super::*;

    async fn echo_request_id(req: HttpRequest) -> HttpResponse {
        match req.extensions().get::<RequestId>() {
            Some(RequestId(id)) => HttpResponse::Ok().body(id.clone()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_rt::test]
    async fn test_handler_sees_the_echoed_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(trace_request))
                .route("/", web::get().to(echo_request_id)),
        )
        .await;

        let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
        let header = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = test::read_body(resp).await;

        assert_eq!(body, header.as_bytes());
        assert!(Uuid::parse_str(&header).is_ok());
    }

    #[actix_rt::test]
    async fn test_each_request_gets_a_new_id() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(trace_request))
                .route("/", web::get().to(echo_request_id)),
        )
        .await;

        let first = test::call_and_read_body(&app, TestRequest::get().uri("/").to_request()).await;
        let second = test::call_and_read_body(&app, TestRequest::get().uri("/").to_request()).await;
        assert_ne!(first, second);
    }
}
