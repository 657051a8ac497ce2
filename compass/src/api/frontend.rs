use axum::body::Body;
use axum::extract::OriginalUri;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "frontend"]
struct DashboardAssets;

pub async fn serve_root() -> Response {
    serve_asset_path("")
}

pub async fn serve_fallback(OriginalUri(uri): OriginalUri) -> Response {
    serve_asset_path(uri.path())
}

fn serve_asset_path(path: &str) -> Response {
    let requested = path.trim_start_matches('/');
    let target = if requested.is_empty() {
        "index.html"
    } else {
        requested
    };

    if target.contains("..") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    // Unknown API paths must not fall through to the page.
    if target.starts_with("api/") {
        return StatusCode::NOT_FOUND.into_response();
    }

    if let Some(response) = response_for_file(target) {
        return response;
    }

    if !target.contains('.') {
        if let Some(response) = response_for_file("index.html") {
            return response;
        }
    }

    StatusCode::NOT_FOUND.into_response()
}

fn response_for_file(path: &str) -> Option<Response> {
    let file = DashboardAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    let mut response = Response::new(Body::from(file.data.into_owned()));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime.as_ref()).ok()?,
    );
    Some(response)
}
