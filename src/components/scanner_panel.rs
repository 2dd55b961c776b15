//! Scanner Panel Component
//!
//! Start/stop buttons around the camera view. Decoded payloads pass through
//! the `ScanController` so only one per session reaches `on_payload`.

use gloo_timers::future::TimeoutFuture;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use qr_scanner::{QrReader, ScanConfig};
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::config::{READER_ELEMENT_ID, SCANNER_FPS, SCANNER_QRBOX};
use crate::notify::Notification;
use crate::scanner::{ScanController, ScanDecision};

/// Camera scanner with start/stop controls
///
/// # Arguments
/// * `on_payload` - Receives the trimmed payload of the accepted frame
#[component]
pub fn ScannerPanel(#[prop(into)] on_payload: Callback<String>) -> impl IntoView {
    let controller = RwSignal::new(ScanController::default());
    // Created on first start; the reader element must be in the DOM by then
    let reader = StoredValue::new_local(None::<QrReader>);

    let release_camera = move || {
        let Some(qr) = reader.get_value() else { return };
        spawn_local(async move {
            if let Err(e) = qr.stop().await {
                warn!("[SCAN] Failed to stop camera: {}", e);
            }
        });
    };

    let on_start = move |_| {
        let mut allowed = false;
        controller.update(|c| allowed = c.begin_start());
        if !allowed {
            return;
        }

        let qr = match reader.get_value() {
            Some(qr) => qr,
            None => {
                let qr = QrReader::new(READER_ELEMENT_ID);
                reader.set_value(Some(qr.clone()));
                qr
            }
        };

        spawn_local(async move {
            let config = ScanConfig { fps: SCANNER_FPS, qrbox: SCANNER_QRBOX };
            let on_decode = move |text: String| {
                let mut decision = ScanDecision::Ignore;
                controller.update(|c| decision = c.on_decoded(js_sys::Date::now(), &text));
                if let ScanDecision::Accept(code) = decision {
                    log!("[SCAN] Accepted payload {}", code);
                    release_camera();
                    on_payload.run(code);
                }
            };

            match qr.start(config, on_decode).await {
                Ok(()) => {
                    let mut cancelled = false;
                    controller.update(|c| cancelled = c.on_started(js_sys::Date::now()));
                    if cancelled {
                        log!("[SCAN] Stopped before the camera came up");
                        release_camera();
                        return;
                    }
                    TimeoutFuture::new(50).await;
                    scroll_to_reader();
                }
                Err(e) => {
                    error!("[SCAN] Camera failed to start: {}", e);
                    controller.update(|c| c.on_start_failed());
                    Notification::error("Camera Error", format!("Could not start the camera: {}", e))
                        .show()
                        .await;
                }
            }
        });
    };

    let on_stop = move |_| {
        let mut release = false;
        controller.update(|c| release = c.stop());
        if release {
            release_camera();
        }
    };

    let running = move || controller.with(|c| c.is_running());

    view! {
        <div class="scanner-panel">
            <button
                id="startScanBtn"
                class="btn btn-primary"
                disabled=running
                on:click=on_start
            >
                "Start scanning"
            </button>
            <div
                id=READER_ELEMENT_ID
                class="reader"
                style:display=move || if running() { "block" } else { "none" }
            ></div>
            <Show when=running>
                <button id="stopScanBtn" class="btn btn-secondary" on:click=on_stop>
                    "Stop scanning"
                </button>
            </Show>
        </div>
    }
}

fn scroll_to_reader() {
    let Some(window) = web_sys::window() else { return };
    let Some(element) = window
        .document()
        .and_then(|doc| doc.get_element_by_id(READER_ELEMENT_ID))
    else {
        return;
    };
    let top = element.get_bounding_client_rect().top() + window.scroll_y().unwrap_or(0.0);
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}
