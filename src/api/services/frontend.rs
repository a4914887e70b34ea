//! Static frontend served from a directory on disk
//!
//! Lookup order for a request path `p`:
//! 1. `/` is treated as `/index.html`
//! 2. `<dir>/<p>.html`
//! 3. `<dir>/<p>`
//! 4. `<dir>/index.html` (client-side routing fallback)

use std::path::{Component, Path, PathBuf};

use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, trace, warn};

/// Directory holding the exported frontend build
#[derive(Debug, Clone)]
pub struct FrontendRoot(PathBuf);

impl FrontendRoot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self(dir.into())
    }

    pub fn dir(&self) -> &Path {
        &self.0
    }

    /// Resolve a request path to a file inside the root, if any
    pub async fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let request_path = if request_path == "/" {
            "/index.html"
        } else {
            request_path
        };
        let relative = request_path.trim_start_matches('/');

        if is_contained(relative) {
            let html = self.0.join(format!("{}.html", relative));
            if is_file(&html).await {
                return Some(html);
            }

            let exact = self.0.join(relative);
            if is_file(&exact).await {
                return Some(exact);
            }
        } else {
            debug!("Refusing path outside frontend root: {}", request_path);
        }

        let index = self.0.join("index.html");
        is_file(&index).await.then_some(index)
    }
}

pub struct FrontendService;

impl FrontendService {
    /// Catch-all handler for everything the API does not claim
    pub async fn serve(req: HttpRequest, root: web::Data<FrontendRoot>) -> HttpResponse {
        if req.method() != Method::GET && req.method() != Method::HEAD {
            return HttpResponse::MethodNotAllowed()
                .content_type("text/plain; charset=utf-8")
                .body("Method Not Allowed");
        }

        let Some(file) = root.resolve(req.path()).await else {
            debug!("No frontend file for {}", req.path());
            return Self::not_found();
        };

        match tokio::fs::read(&file).await {
            Ok(bytes) => {
                trace!("Serving {} for {}", file.display(), req.path());
                HttpResponse::Ok()
                    .content_type(Self::get_content_type(&file))
                    .body(bytes)
            }
            Err(e) => {
                warn!("Failed to read frontend file {}: {}", file.display(), e);
                Self::not_found()
            }
        }
    }

    fn not_found() -> HttpResponse {
        HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Not Found")
    }

    fn get_content_type(path: &Path) -> &'static str {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("html") | Some("htm") => "text/html; charset=utf-8",
            Some("css") => "text/css",
            Some("js") | Some("mjs") => "application/javascript",
            Some("json") | Some("map") => "application/json",
            Some("webmanifest") => "application/manifest+json",
            Some("txt") => "text/plain; charset=utf-8",
            Some("xml") => "application/xml",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("svg") => "image/svg+xml",
            Some("ico") => "image/x-icon",
            Some("woff") => "font/woff",
            Some("woff2") => "font/woff2",
            Some("ttf") => "font/ttf",
            Some("eot") => "application/vnd.ms-fontobject",
            _ => "application/octet-stream",
        }
    }
}

/// Only plain names; no `..`, no roots, no prefixes
fn is_contained(relative: &str) -> bool {
    !relative.is_empty()
        && Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
