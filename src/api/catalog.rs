//! Catalog Lookups
//!
//! Lookup by scanned code, free-text search and the full item list.

use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use super::{endpoint, ensure_ok};
use crate::config;
use crate::error::ApiError;
use crate::models::CatalogItem;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct QrArgs<'a> {
    qr_code: &'a str,
}

// ========================
// Catalog Calls
// ========================

/// Find the item matching a decoded QR payload.
///
/// `Ok(None)` means not found (404, or a body without a product name).
pub async fn lookup_by_code(code: &str) -> Result<Option<CatalogItem>, ApiError> {
    let resp = Request::post(&endpoint(config::GET_ITEM_BY_QR))
        .json(&QrArgs { qr_code: code })?
        .send()
        .await?;
    if resp.status() == 404 {
        return Ok(None);
    }
    let resp = ensure_ok(resp).await?;
    let body = resp.text().await?;
    Ok(parse_lookup(&body))
}

fn parse_lookup(body: &str) -> Option<CatalogItem> {
    serde_json::from_str::<CatalogItem>(body)
        .ok()
        .filter(|item| !item.product_name.trim().is_empty())
}

/// Server-side search; callers skip the call for blank input
pub async fn search(text: &str) -> Result<Vec<CatalogItem>, ApiError> {
    let resp = Request::get(&search_url(text)).send().await?;
    let resp = ensure_ok(resp).await?;
    Ok(resp.json::<Vec<CatalogItem>>().await?)
}

fn search_url(text: &str) -> String {
    format!(
        "{}?q={}",
        endpoint(config::SEARCH_ITEM),
        utf8_percent_encode(text, NON_ALPHANUMERIC)
    )
}

/// Whole catalog, for client-side filtering
pub async fn list_all() -> Result<Vec<CatalogItem>, ApiError> {
    let resp = Request::get(&endpoint(config::SEARCH_ITEMS)).send().await?;
    let resp = ensure_ok(resp).await?;
    Ok(resp.json::<Vec<CatalogItem>>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup_not_found_shapes() {
        assert_eq!(parse_lookup(""), None);
        assert_eq!(parse_lookup("null"), None);
        assert_eq!(parse_lookup(r#"{"error": "Not found"}"#), None);
        assert_eq!(parse_lookup(r#"{"article_number": "A1", "product_name": ""}"#), None);
    }

    #[test]
    fn test_parse_lookup_hit() {
        let item = parse_lookup(r#"{"id": 3, "article_number": "A1", "product_name": "Drill"}"#).unwrap();
        assert_eq!(item.article_number, "A1");
    }

    #[test]
    fn test_search_url_encodes_query() {
        assert_eq!(search_url("drill bit&8"), "/api/search_item?q=drill%20bit%268");
    }
}
