//! Issue Report Upload

use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use super::{endpoint, ensure_ok};
use crate::config;
use crate::error::ApiError;
use crate::report::IssueReport;

fn js_err(e: JsValue) -> ApiError {
    ApiError::Encode(format!("{:?}", e))
}

/// Multipart POST to `/report`, with the photo when one was picked
pub async fn submit_report(report: &IssueReport, photo: Option<File>) -> Result<(), ApiError> {
    let issues = report
        .issues_json()
        .map_err(|e| ApiError::Encode(e.to_string()))?;

    let form = FormData::new().map_err(js_err)?;
    form.append_with_str("article_number", &report.article_number).map_err(js_err)?;
    form.append_with_str("issues", &issues).map_err(js_err)?;
    form.append_with_str("comment", &report.comment).map_err(js_err)?;
    form.append_with_str("count", &report.count).map_err(js_err)?;
    if let Some(photo) = photo {
        form.append_with_blob_and_filename("photo", &photo, &photo.name())
            .map_err(js_err)?;
    }

    let resp = Request::post(&endpoint(config::REPORT))
        .body(form)?
        .send()
        .await?;
    ensure_ok(resp).await?;
    Ok(())
}
