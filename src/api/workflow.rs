//! Workflow Calls
//!
//! Confirm a batch, link it to a project, load a project's items.

use gloo_net::http::Request;
use leptos::logging::{error, log};
use serde::Serialize;

use super::{endpoint, ensure_ok, error_message};
use crate::config;
use crate::error::ApiError;
use crate::models::{ProjectItemRow, ProjectItemsResponse};
use crate::submission::{after_link, NextStep, ProjectLinkRequest, SubmissionOutcome, SubmissionPlan};
use crate::workflow::WorkflowKind;

#[derive(Serialize)]
struct ProjectNumberArgs<'a> {
    project_number: &'a str,
}

/// POST the summary batch to `/api/confirm` (form-encoded)
pub async fn confirm(plan: &SubmissionPlan) -> Result<(), ApiError> {
    let body = plan
        .confirm_form_body()
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let resp = Request::post(&endpoint(config::CONFIRM))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)?
        .send()
        .await?;
    ensure_ok(resp).await?;
    Ok(())
}

/// Attach a confirmed batch to its project
pub async fn link_project(link: &ProjectLinkRequest) -> Result<(), ApiError> {
    let resp = Request::post(&endpoint(link.endpoint))
        .json(&link.body)?
        .send()
        .await?;
    ensure_ok(resp).await?;
    Ok(())
}

/// Run both phases of a submission; stops at the first failure
pub async fn submit(plan: &SubmissionPlan) -> SubmissionOutcome {
    log!("[SUBMIT] Confirming {} line(s) for {:?}", plan.summary.len(), plan.kind);
    let outcome = match plan.after_confirm(confirm(plan).await) {
        NextStep::Finished(outcome) => outcome,
        NextStep::Link(link) => {
            log!("[SUBMIT] Linking batch to project {}", link.body.project_number);
            after_link(link_project(&link).await)
        }
    };
    if !outcome.is_completed() {
        error!("[SUBMIT] {:?}", outcome);
    }
    outcome
}

/// Items booked on a project, via the workflow's load endpoint
pub async fn load_project_items(
    kind: WorkflowKind,
    project_number: &str,
) -> Result<Vec<ProjectItemRow>, ApiError> {
    let Some(endpoints) = kind.project_endpoints() else {
        return Ok(Vec::new());
    };
    let resp = Request::post(&endpoint(endpoints.load))
        .json(&ProjectNumberArgs { project_number })?
        .send()
        .await?;

    let status = resp.status();
    let ok = resp.ok();
    let text = resp.text().await?;
    if !ok {
        return Err(ApiError::status(status, error_message(&text)));
    }
    parse_project_items(status, &text)
}

/// A 2xx body can still carry `{error}` instead of `{items}`
fn parse_project_items(status: u16, body: &str) -> Result<Vec<ProjectItemRow>, ApiError> {
    let data: ProjectItemsResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    match (data.items, data.error) {
        (Some(items), _) => Ok(items),
        (None, Some(error)) if !error.trim().is_empty() => Err(ApiError::status(status, error)),
        (None, _) => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_items_rows() {
        let rows = parse_project_items(
            200,
            r#"{"items": [{"item_id": "A1", "item_name": "Drill", "quantity": 2}]}"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_id, "A1");
        assert_eq!(rows[0].quantity.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_project_items_error_body() {
        let err = parse_project_items(200, r#"{"error": "Project not found"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status { status: 200, message: "Project not found".to_string() }
        );
    }

    #[test]
    fn test_parse_project_items_empty() {
        assert!(parse_project_items(200, r#"{"items": []}"#).unwrap().is_empty());
        assert!(parse_project_items(200, "{}").unwrap().is_empty());
        assert!(matches!(parse_project_items(200, "oops"), Err(ApiError::Decode(_))));
    }
}
