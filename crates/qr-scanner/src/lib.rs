//! QR Scanner Bindings
//!
//! Thin wrapper around the `Html5Qrcode` browser library.
//! Owns the camera lifecycle only; callers decide what a decoded payload means.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    type Html5Qrcode;

    #[wasm_bindgen(constructor)]
    fn new(element_id: &str) -> Html5Qrcode;

    #[wasm_bindgen(method, catch)]
    fn start(
        this: &Html5Qrcode,
        camera: &JsValue,
        config: &JsValue,
        on_success: &Function,
        on_error: &Function,
    ) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn stop(this: &Html5Qrcode) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method)]
    fn clear(this: &Html5Qrcode);
}

/// Camera selection passed as the first `start` argument
#[derive(Serialize)]
struct CameraConstraint {
    #[serde(rename = "facingMode")]
    facing_mode: &'static str,
}

/// Decoder settings (frame rate and detection box edge in pixels)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScanConfig {
    pub fps: u32,
    pub qrbox: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { fps: 10, qrbox: 250 }
    }
}

/// Callbacks handed to the JS decoder; must outlive the decode loop.
struct Callbacks {
    _on_success: Closure<dyn FnMut(String)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

/// Handle to one `Html5Qrcode` instance bound to a DOM element.
///
/// Cheap to clone; clones share the same camera and callbacks.
#[derive(Clone)]
pub struct QrReader {
    inner: Html5Qrcode,
    callbacks: Rc<RefCell<Option<Callbacks>>>,
}

impl QrReader {
    /// Bind a reader to the element with the given id
    pub fn new(element_id: &str) -> Self {
        Self {
            inner: Html5Qrcode::new(element_id),
            callbacks: Rc::new(RefCell::new(None)),
        }
    }

    /// Open the rear camera and start decoding.
    ///
    /// `on_decode` fires for every decoded frame until `stop` is called.
    /// Per-frame decode failures are dropped.
    pub async fn start(
        &self,
        config: ScanConfig,
        on_decode: impl FnMut(String) + 'static,
    ) -> Result<(), String> {
        let camera = serde_wasm_bindgen::to_value(&CameraConstraint { facing_mode: "environment" })
            .map_err(|e| format!("Failed to serialize camera: {}", e))?;
        let config = serde_wasm_bindgen::to_value(&config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        let on_success = Closure::<dyn FnMut(String)>::new(on_decode);
        let on_error = Closure::<dyn FnMut(JsValue)>::new(|_: JsValue| {});

        let promise = self
            .inner
            .start(
                &camera,
                &config,
                on_success.as_ref().unchecked_ref(),
                on_error.as_ref().unchecked_ref(),
            )
            .map_err(js_error)?;

        // Replacing drops the previous session's closures; the camera is off by now.
        *self.callbacks.borrow_mut() = Some(Callbacks {
            _on_success: on_success,
            _on_error: on_error,
        });

        JsFuture::from(promise).await.map_err(js_error)?;
        Ok(())
    }

    /// Stop the camera and clear the rendered video element
    pub async fn stop(&self) -> Result<(), String> {
        let promise = self.inner.stop().map_err(js_error)?;
        JsFuture::from(promise).await.map_err(js_error)?;
        self.inner.clear();
        Ok(())
    }
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
