//! Frontend Configuration
//!
//! Endpoint paths, timings and UI limits shared by every page.

// ========================
// Endpoints
// ========================

pub const GET_ITEM_BY_QR: &str = "/api/get_item_by_qr";
pub const SEARCH_ITEM: &str = "/api/search_item";
pub const SEARCH_ITEMS: &str = "/api/search_items";
pub const GET_WORKERS: &str = "/api/get_workers";
pub const CONFIRM: &str = "/api/confirm";
pub const CREATE_PROJECT: &str = "/api/create_project";
pub const PROJECT_ITEMS: &str = "/api/project_items";
pub const PROJECT_RETURNS: &str = "/api/project_returns";
pub const INSERT_PROJECT_ITEMS: &str = "/api/insert_project_items";
pub const INSERT_PROJECT_RETURNS: &str = "/api/insert_project_returns";
pub const REPORT: &str = "/report";

// ========================
// Routes
// ========================

pub const HOME_ROUTE: &str = "/home";
pub const CATALOG_ROUTE: &str = "/catalog";

// ========================
// Timings (milliseconds)
// ========================

/// Decodes before this much time after camera start are ignored
pub const SCAN_WARMUP_MS: f64 = 3000.0;
/// Confirm button stays disabled this long after a click
pub const SUBMIT_COOLDOWN_MS: u32 = 5000;
pub const ITEM_SEARCH_DEBOUNCE_MS: u32 = 300;

// ========================
// UI
// ========================

/// Suggestions shown before "Show more"
pub const SUGGESTION_WINDOW: usize = 3;
pub const SCANNER_FPS: u32 = 10;
pub const SCANNER_QRBOX: u32 = 250;
/// DOM id of the element the decoder renders into
pub const READER_ELEMENT_ID: &str = "reader";
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.png";

/// Where API requests are sent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiConfig {
    /// Prefix for every endpoint; empty means same origin
    pub base_url: String,
}

impl ApiConfig {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
