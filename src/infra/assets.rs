//! Embedded browser client.

use axum::{
    body::Body,
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use include_dir::{Dir, include_dir};
use mime_guess::{Mime, MimeGuess};

use super::http::ApiError;

static STATIC_PUBLIC_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static/public");

const INDEX_FILE: &str = "index.html";

/// Serve the client entry page.
pub async fn serve_index() -> Response {
    match resolve_asset(&STATIC_PUBLIC_ASSETS, Some(INDEX_FILE.to_string())) {
        Some(asset) => asset.into_response(),
        None => ApiError::not_found("infra::assets::serve_index").into_response(),
    }
}

/// Serve embedded client assets.
pub async fn serve_public(path: Option<Path<String>>) -> Response {
    let captured = path.map(|Path(value)| value);
    match resolve_asset(&STATIC_PUBLIC_ASSETS, captured) {
        Some(asset) => asset.into_response(),
        None => ApiError::not_found("infra::assets::serve_public").into_response(),
    }
}

struct Asset {
    contents: &'static [u8],
    mime: MimeGuess,
}

fn resolve_asset(bundle: &'static Dir<'static>, path: Option<String>) -> Option<Asset> {
    let candidate = path.unwrap_or_default();
    let candidate = candidate.trim_start_matches('/');

    if candidate.is_empty() || candidate.ends_with('/') || candidate.contains("..") {
        return None;
    }

    let file = bundle.get_file(candidate)?;
    Some(Asset {
        contents: file.contents(),
        mime: mime_guess::from_path(candidate),
    })
}

impl IntoResponse for Asset {
    fn into_response(self) -> Response {
        let mime = self.mime.first_or_octet_stream();
        build_response(Bytes::from_static(self.contents), mime)
    }
}

fn build_response(bytes: Bytes, mime: Mime) -> Response {
    let len = bytes.len();
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&len.to_string()) {
        headers.insert(header::CONTENT_LENGTH, value);
    }
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bundled_files_with_mime() {
        let asset = resolve_asset(&STATIC_PUBLIC_ASSETS, Some("/styles.css".to_string()))
            .expect("styles.css bundled");
        assert_eq!(asset.mime.first_or_octet_stream().essence_str(), "text/css");
        assert!(!asset.contents.is_empty());
    }

    #[test]
    fn rejects_traversal_and_directories() {
        for path in ["", "/", "../Cargo.toml", "nested/", "missing.css"] {
            assert!(
                resolve_asset(&STATIC_PUBLIC_ASSETS, Some(path.to_string())).is_none(),
                "{path}"
            );
        }
        assert!(resolve_asset(&STATIC_PUBLIC_ASSETS, None).is_none());
    }
}
