//! Workflow Context
//!
//! Per-page state for the take/return/add pages, provided via the Leptos
//! Context API and created once when the page mounts.

use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::collection::{AddOutcome, ItemCollection};
use crate::models::CatalogItem;
use crate::session::BrowserSession;
use crate::suggestions::SuggestionPanel;
use crate::workflow::WorkflowKind;

#[derive(Clone, Copy)]
pub struct WorkflowContext {
    pub kind: WorkflowKind,
    /// Working set, mirrored to sessionStorage on every mutation
    pub collection: RwSignal<ItemCollection<BrowserSession>>,
    pub panel: RwSignal<SuggestionPanel>,
    /// Optional project number input (take/return)
    pub project_input: RwSignal<String>,
}

impl WorkflowContext {
    pub fn new(kind: WorkflowKind) -> Self {
        let collection = ItemCollection::restore(kind, BrowserSession);
        if !collection.is_empty() {
            log!("[SESSION] Restored {} line(s) from {}", collection.len(), kind.storage_key());
        }
        Self {
            kind,
            collection: RwSignal::new(collection),
            panel: RwSignal::new(SuggestionPanel::default()),
            project_input: RwSignal::new(String::new()),
        }
    }

    /// Add a decoded item; duplicates are rejected with a notice
    pub fn add_scanned(&self, item: CatalogItem) {
        let mut outcome = AddOutcome::Duplicate;
        self.collection.update(|c| outcome = c.add_from_lookup(item));
        Self::report(outcome);
    }

    /// Add a suggestion card, same duplicate rule as a scan
    pub fn add_suggestion(&self, item: CatalogItem) {
        let mut outcome = AddOutcome::Duplicate;
        self.collection.update(|c| outcome = c.add_from_suggestion(item));
        Self::report(outcome);
    }

    fn report(outcome: AddOutcome) {
        if let Some(notice) = outcome.notice() {
            spawn_local(async move { notice.show().await });
        }
    }
}

pub fn use_workflow() -> WorkflowContext {
    expect_context::<WorkflowContext>()
}
