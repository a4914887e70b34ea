pub mod frontend;
pub mod hello;
pub mod texts;

use actix_web::web;

pub use frontend::{FrontendRoot, FrontendService};
pub use hello::hello;
pub use texts::{TextService, text_routes};

/// Every JSON route, mounted under `prefix`.
///
/// A prefix of `/` mounts the routes at the root.
pub fn api_routes(prefix: &str) -> actix_web::Scope {
    let prefix = if prefix == "/" { "" } else { prefix };
    web::scope(prefix)
        .service(text_routes())
        .route("/hello", web::get().to(hello))
}
