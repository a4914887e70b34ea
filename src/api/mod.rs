//! HTTP layer: JSON API, static frontend and request middleware

pub mod constants;
pub mod helpers;
pub mod middleware;
pub mod services;
pub mod types;

use std::sync::Arc;

use actix_web::web;

use crate::storage::TextStore;
use services::{FrontendRoot, FrontendService, api_routes};

/// Register the API and the frontend fallback on an app.
///
/// Used by the server and by tests through `App::new().configure(...)`.
pub fn configure(
    store: Arc<TextStore>,
    frontend: FrontendRoot,
    api_prefix: &str,
) -> impl FnOnce(&mut web::ServiceConfig) + use<> {
    let api_prefix = api_prefix.to_string();
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(store))
            .app_data(web::Data::new(frontend))
            .service(api_routes(&api_prefix))
            .default_service(web::to(FrontendService::serve));
    }
}
