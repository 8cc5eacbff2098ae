//! Maps a request target to a status and page body.

use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::pages::PageStore;

pub const PAGE_INDEX: &str = "index.html";
pub const PAGE_SECOND: &str = "page2.html";
pub const PAGE_NOT_FOUND: &str = "404.html";

/// Every logical page the router can ask the store for.
pub const ROUTED_PAGES: &[&str] = &[PAGE_INDEX, PAGE_SECOND, PAGE_NOT_FOUND];

/// Routes one raw request to a response.
///
/// An empty or unparseable request becomes a 400 with a JSON error body;
/// anything else is looked up in the fixed page table, falling through to
/// the 404 page. Only the first line of the request is consulted.
pub async fn route(raw: &str, pages: &PageStore) -> anyhow::Result<Response> {
    let Some(request) = Request::parse(raw) else {
        tracing::warn!("Failed to read request from a client");
        return Ok(Response::bad_request());
    };

    let (status, page) = match request.target.as_str() {
        "/" | "/index.html" => (StatusCode::Ok, PAGE_INDEX),
        "/page2" | "/page2.html" => (StatusCode::Ok, PAGE_SECOND),
        _ => (StatusCode::NotFound, PAGE_NOT_FOUND),
    };

    let body = pages.get(page).await?;
    Ok(Response::html(status, body))
}
