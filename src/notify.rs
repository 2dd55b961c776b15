//! Notifications
//!
//! Blocking modal messages shown through the page's SweetAlert2 instance,
//! falling back to `window.alert` when it is not loaded.

use leptos::logging::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Swal, js_name = fire, catch)]
    fn swal_fire(options: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub text: String,
}

impl Notification {
    pub fn new(level: Level, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Level::Success, title, text)
    }

    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Level::Info, title, text)
    }

    pub fn warning(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Level::Warning, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Level::Error, title, text)
    }

    /// Show the modal and wait until it is dismissed
    pub async fn show(&self) {
        let options = SwalOptions {
            icon: self.level,
            title: &self.title,
            text: &self.text,
            background: "#000",
            color: "#fff",
            icon_color: "#4CAF50",
            confirm_button_color: "#4CAF50",
        };
        let fired = serde_wasm_bindgen::to_value(&options)
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|opts| swal_fire(&opts));
        match fired {
            Ok(promise) => {
                let _ = JsFuture::from(promise).await;
            }
            Err(e) => {
                warn!("[NOTIFY] Swal unavailable ({:?}), using alert", e);
                if let Some(win) = web_sys::window() {
                    let _ = win.alert_with_message(&format!("{}\n\n{}", self.title, self.text));
                }
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwalOptions<'a> {
    icon: Level,
    title: &'a str,
    text: &'a str,
    background: &'static str,
    color: &'static str,
    icon_color: &'static str,
    confirm_button_color: &'static str,
}

/// Leave the page once a workflow is done
pub fn navigate(route: &str) {
    if let Some(win) = web_sys::window() {
        if let Err(e) = win.location().set_href(route) {
            warn!("[NOTIFY] Navigation to {} failed: {:?}", route, e);
        }
    }
}
