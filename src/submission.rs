//! Submission Controller
//!
//! Confirming a workflow is two dependent requests: the stock confirmation,
//! then (take/return with a project number) linking the batch to a project.
//! The second can fail after the first succeeded; that partial outcome is
//! reported as its own variant and is not compensated.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use thiserror::Error;

use crate::collection::ItemCollection;
use crate::error::ApiError;
use crate::models::ReturnType;
use crate::notify::Notification;
use crate::session::SessionStore;
use crate::workflow::WorkflowKind;

/// application/x-www-form-urlencoded unreserved set
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{0}")]
    EmptyCollection(&'static str),
}

/// One line of the `summary` batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub article_number: String,
    pub product_name: String,
    pub quantity: u32,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ReturnType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_to_stock: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectLinkBody {
    pub project_number: String,
    pub items: Vec<SummaryEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectLinkRequest {
    pub endpoint: &'static str,
    pub body: ProjectLinkBody,
}

/// Snapshot of a collection ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPlan {
    pub kind: WorkflowKind,
    pub project_number: Option<String>,
    pub summary: Vec<SummaryEntry>,
}

/// Validate and build the batch; an empty collection never produces a plan
pub fn plan_submission<S: SessionStore>(
    collection: &ItemCollection<S>,
    project_input: Option<&str>,
) -> Result<SubmissionPlan, SubmitError> {
    let kind = collection.kind();
    if collection.is_empty() {
        return Err(SubmitError::EmptyCollection(kind.empty_warning()));
    }

    let project_number = match kind.project_endpoints() {
        Some(_) => project_input
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string),
        None => None,
    };

    let summary = collection
        .lines()
        .iter()
        .map(|line| {
            let (return_type, apply_to_stock) = match kind {
                WorkflowKind::Take => (None, None),
                WorkflowKind::Return => {
                    let rt = line.return_type.unwrap_or_default();
                    (Some(rt), Some(rt.applies_to_stock()))
                }
                WorkflowKind::Add => (Some(ReturnType::Returned), Some(true)),
            };
            SummaryEntry {
                article_number: line.item.article_number.clone(),
                product_name: line.item.product_name.clone(),
                quantity: line.quantity,
                action: kind.action(),
                return_type,
                apply_to_stock,
            }
        })
        .collect();

    Ok(SubmissionPlan {
        kind,
        project_number,
        summary,
    })
}

/// Step after the confirm call resolved
#[derive(Debug, Clone, PartialEq)]
pub enum NextStep {
    Link(ProjectLinkRequest),
    Finished(SubmissionOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Completed,
    ConfirmFailed(ApiError),
    /// Stock was confirmed but the project link failed
    LinkFailed(ApiError),
}

impl SubmissionPlan {
    /// Form body for `/api/confirm`
    pub fn confirm_form_body(&self) -> Result<String, serde_json::Error> {
        let summary = serde_json::to_string(&self.summary)?;
        let mut body = format!("summary={}", utf8_percent_encode(&summary, FORM));
        if self.kind.sends_project_number() {
            let project = self.project_number.as_deref().unwrap_or("");
            body.push_str("&project_number=");
            body.push_str(&utf8_percent_encode(project, FORM).to_string());
        }
        Ok(body)
    }

    pub fn project_link(&self) -> Option<ProjectLinkRequest> {
        let endpoints = self.kind.project_endpoints()?;
        let project_number = self.project_number.clone()?;
        Some(ProjectLinkRequest {
            endpoint: endpoints.insert,
            body: ProjectLinkBody {
                project_number,
                items: self.summary.clone(),
            },
        })
    }

    pub fn after_confirm(&self, result: Result<(), ApiError>) -> NextStep {
        match result {
            Err(e) => NextStep::Finished(SubmissionOutcome::ConfirmFailed(e)),
            Ok(()) => match self.project_link() {
                Some(link) => NextStep::Link(link),
                None => NextStep::Finished(SubmissionOutcome::Completed),
            },
        }
    }
}

pub fn after_link(result: Result<(), ApiError>) -> SubmissionOutcome {
    match result {
        Ok(()) => SubmissionOutcome::Completed,
        Err(e) => SubmissionOutcome::LinkFailed(e),
    }
}

impl SubmissionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmissionOutcome::Completed)
    }

    pub fn notification(&self, kind: WorkflowKind) -> Notification {
        match self {
            SubmissionOutcome::Completed => {
                let (title, text) = kind.success_message();
                Notification::success(title, text)
            }
            SubmissionOutcome::ConfirmFailed(ApiError::Network(_)) => {
                Notification::error("Network Error", "Check your connection.")
            }
            SubmissionOutcome::ConfirmFailed(e) => {
                Notification::error("Error", format!("Confirm failed: {}", e))
            }
            SubmissionOutcome::LinkFailed(e) => Notification::error(
                "Project insert failed",
                format!("Items were confirmed but could not be added to the project: {}", e),
            ),
        }
    }
}

/// Reconcile local state; only a full success clears the working set
pub fn settle<S: SessionStore>(collection: &mut ItemCollection<S>, outcome: &SubmissionOutcome) {
    if outcome.is_completed() {
        collection.clear();
    }
}

/// Keeps the confirm button disabled for a fixed window after each click.
/// Does not wait for the request itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    duration_ms: f64,
    until: Option<f64>,
}

impl Cooldown {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            until: None,
        }
    }

    pub fn is_active(&self, now: f64) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Returns false while cooling down
    pub fn try_trigger(&mut self, now: f64) -> bool {
        if self.is_active(now) {
            return false;
        }
        self.until = Some(now + self.duration_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogItem;
    use crate::session::MemorySession;

    fn item(article: &str) -> CatalogItem {
        CatalogItem {
            article_number: article.to_string(),
            product_name: format!("Product {}", article),
            ..Default::default()
        }
    }

    fn collection(kind: WorkflowKind, articles: &[&str]) -> (ItemCollection<MemorySession>, MemorySession) {
        let store = MemorySession::default();
        let mut c = ItemCollection::restore(kind, store.clone());
        for a in articles {
            c.add_from_lookup(item(a));
        }
        (c, store)
    }

    #[test]
    fn test_empty_collection_has_no_plan() {
        let (c, _) = collection(WorkflowKind::Take, &[]);
        assert_eq!(
            plan_submission(&c, Some("P-1")),
            Err(SubmitError::EmptyCollection("Please add at least one item."))
        );
    }

    #[test]
    fn test_return_apply_to_stock_follows_subtype() {
        let (mut c, _) = collection(WorkflowKind::Return, &["A1", "B2"]);
        c.set_return_type(0, "broken");
        let plan = plan_submission(&c, None).unwrap();

        assert_eq!(plan.summary[0].action, "return");
        assert_eq!(plan.summary[0].return_type, Some(ReturnType::Broken));
        assert_eq!(plan.summary[0].apply_to_stock, Some(false));
        assert_eq!(plan.summary[1].return_type, Some(ReturnType::Returned));
        assert_eq!(plan.summary[1].apply_to_stock, Some(true));
    }

    #[test]
    fn test_take_summary_shape() {
        let (mut c, _) = collection(WorkflowKind::Take, &["A1"]);
        c.set_quantity(0, "3");
        let plan = plan_submission(&c, Some("  ")).unwrap();
        let json = serde_json::to_value(&plan.summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "article_number": "A1",
                "product_name": "Product A1",
                "quantity": 3,
                "action": "take"
            }])
        );
        assert_eq!(plan.project_number, None);
    }

    #[test]
    fn test_add_workflow_ignores_project_and_restocks() {
        let (c, _) = collection(WorkflowKind::Add, &["A1"]);
        let plan = plan_submission(&c, Some("P-9")).unwrap();
        assert_eq!(plan.project_number, None);
        assert_eq!(plan.summary[0].apply_to_stock, Some(true));
        assert!(plan.project_link().is_none());
    }

    #[test]
    fn test_confirm_body_encoding() {
        let (c, _) = collection(WorkflowKind::Take, &["A 1"]);
        let plan = plan_submission(&c, Some("P&1")).unwrap();
        let body = plan.confirm_form_body().unwrap();
        assert!(body.starts_with("summary=%5B%7B%22article_number%22%3A%22A%201%22"));
        assert!(body.ends_with("&project_number=P%261"));

        let (c, _) = collection(WorkflowKind::Return, &["A1"]);
        let body = plan_submission(&c, Some("P1")).unwrap().confirm_form_body().unwrap();
        assert!(!body.contains("project_number"));
    }

    #[test]
    fn test_confirm_failure_stops_chain() {
        let (c, _) = collection(WorkflowKind::Take, &["A1"]);
        let plan = plan_submission(&c, Some("P1")).unwrap();
        let step = plan.after_confirm(Err(ApiError::status(500, "Server error")));
        assert!(matches!(step, NextStep::Finished(SubmissionOutcome::ConfirmFailed(_))));
    }

    #[test]
    fn test_confirm_then_link() {
        let (c, _) = collection(WorkflowKind::Return, &["A1"]);
        let plan = plan_submission(&c, Some("P1")).unwrap();
        match plan.after_confirm(Ok(())) {
            NextStep::Link(link) => {
                assert_eq!(link.endpoint, "/api/insert_project_returns");
                assert_eq!(link.body.project_number, "P1");
                assert_eq!(link.body.items.len(), 1);
            }
            other => panic!("expected link step, got {:?}", other),
        }
    }

    #[test]
    fn test_no_project_completes_after_confirm() {
        let (c, _) = collection(WorkflowKind::Take, &["A1"]);
        let plan = plan_submission(&c, None).unwrap();
        assert_eq!(plan.after_confirm(Ok(())), NextStep::Finished(SubmissionOutcome::Completed));
    }

    #[test]
    fn test_failed_confirm_leaves_state_untouched() {
        let (mut c, store) = collection(WorkflowKind::Take, &["A1", "B2"]);
        let before = store.get("scannedItems_take");
        let outcome = SubmissionOutcome::ConfirmFailed(ApiError::status(502, ""));
        settle(&mut c, &outcome);
        assert_eq!(c.len(), 2);
        assert_eq!(store.get("scannedItems_take"), before);
    }

    #[test]
    fn test_partial_failure_keeps_state_and_reports() {
        let (mut c, _) = collection(WorkflowKind::Take, &["A1"]);
        let outcome = after_link(Err(ApiError::status(500, "boom")));
        settle(&mut c, &outcome);
        assert_eq!(c.len(), 1);
        assert_eq!(outcome.notification(WorkflowKind::Take).title, "Project insert failed");
    }

    #[test]
    fn test_completed_clears_snapshot() {
        let (mut c, store) = collection(WorkflowKind::Add, &["A1"]);
        settle(&mut c, &SubmissionOutcome::Completed);
        assert!(c.is_empty());
        assert_eq!(store.get("scannedItems_add"), None);
    }

    #[test]
    fn test_cooldown_window() {
        let mut cd = Cooldown::new(5000.0);
        assert!(cd.try_trigger(0.0));
        assert!(!cd.try_trigger(100.0));
        assert!(cd.is_active(4999.0));
        assert!(cd.try_trigger(5000.0));
    }
}
