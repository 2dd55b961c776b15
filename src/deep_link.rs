//! Deep-Link Entry
//!
//! Item detail pages add an article to a workflow without opening it. The
//! working set lives in sessionStorage, so the entry point only has to
//! update the right snapshot and move on to the catalog.

use leptos::logging::{error, log};
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use crate::collection::ItemCollection;
use crate::config::CATALOG_ROUTE;
use crate::models::{clamp_quantity, CatalogItem};
use crate::notify::{navigate, Notification};
use crate::session::BrowserSession;
use crate::workflow::WorkflowKind;

/// `add_to_workflow("take" | "return" | "add", item, qty)` from page scripts
#[wasm_bindgen]
pub fn add_to_workflow(kind: &str, item: JsValue, qty: JsValue) {
    let Some(kind) = WorkflowKind::parse(kind) else {
        error!("[DEEP_LINK] Unknown workflow '{}'", kind);
        return;
    };
    let item: CatalogItem = match serde_wasm_bindgen::from_value(item) {
        Ok(item) => item,
        Err(e) => {
            error!("[DEEP_LINK] Invalid item: {}", e);
            return;
        }
    };
    let qty = requested_quantity(qty.as_f64(), qty.as_string());

    let name = item.product_name.clone();
    let mut collection = ItemCollection::restore(kind, BrowserSession);
    let outcome = collection.add_or_merge_external(item, qty);
    log!("[DEEP_LINK] {} x{} -> {:?} ({:?})", name, qty, kind, outcome);

    spawn_local(async move {
        added_notice(&name, qty).show().await;
        navigate(CATALOG_ROUTE);
    });
}

fn added_notice(name: &str, qty: i64) -> Notification {
    Notification::success("Item Added", format!("{} added ({})", name, qty))
}

/// Quantity from a JS number or numeric string; anything else counts as 1
fn requested_quantity(number: Option<f64>, text: Option<String>) -> i64 {
    match (number, text) {
        (Some(n), _) => clamp_quantity(&n.to_string()) as i64,
        (None, Some(s)) => clamp_quantity(&s) as i64,
        (None, None) => 1,
    }
}
