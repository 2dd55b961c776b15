//! Project Creation Calls

use gloo_net::http::Request;

use super::{endpoint, ensure_ok};
use crate::config;
use crate::error::ApiError;
use crate::models::Worker;
use crate::project_form::{CreateProjectResponse, ProjectDraft};

pub async fn get_workers() -> Result<Vec<Worker>, ApiError> {
    let resp = Request::get(&endpoint(config::GET_WORKERS)).send().await?;
    let resp = ensure_ok(resp).await?;
    Ok(resp.json::<Vec<Worker>>().await?)
}

/// Create the project; returns the backend's success message
pub async fn create_project(draft: &ProjectDraft) -> Result<String, ApiError> {
    let resp = Request::post(&endpoint(config::CREATE_PROJECT))
        .header("Accept", "application/json")
        .json(draft)?
        .send()
        .await?;

    let status = resp.status();
    let ok = resp.ok();
    let result = resp.json::<CreateProjectResponse>().await.unwrap_or_default();
    let message = result.message.unwrap_or_default();
    if !ok || !result.success {
        let message = if message.is_empty() {
            "Failed to create project".to_string()
        } else {
            message
        };
        return Err(ApiError::status(status, message));
    }
    Ok(message)
}
