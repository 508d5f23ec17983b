//! Serves the compiled front-end bundle embedded at build time.
//!
//! Any path that is not a file in the bundle gets `index.html`, so client-side
//! routes survive a reload.

use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use log::debug;
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const INDEX: &str = "index.html";

/// Bundle-relative path for a request path. The root maps to `index.html`.
pub fn asset_path(request_path: &str) -> &str {
    let path = request_path.trim_start_matches('/');
    if path.is_empty() {
        INDEX
    } else {
        path
    }
}

pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let file_path = asset_path(req.path());

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file(INDEX) {
            Some(index) => {
                debug!("{} not in bundle, serving {}", file_path, INDEX);
                HttpResponse::Ok()
                    .content_type("text/html; charset=utf-8")
                    .body(index.contents().to_vec())
            }
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_to_index() {
        assert_eq!(asset_path("/"), "index.html");
        assert_eq!(asset_path(""), "index.html");
    }

    #[test]
    fn leading_slashes_are_stripped() {
        assert_eq!(asset_path("/inkpost-frontend_bg.wasm"), "inkpost-frontend_bg.wasm");
        assert_eq!(asset_path("//assets/app.css"), "assets/app.css");
    }
}
