//! Project Form State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity on the
//! create-project page.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{CatalogItem, Worker};
use crate::project_form::{self, ProjectDraft, ProjectFormError, ProjectLine};

/// Create-project page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct ProjectFormState {
    pub project_number: String,
    pub customer_name: String,
    pub start_date: String,
    pub end_date: String,
    /// Every worker from the backend
    pub workers: Vec<Worker>,
    pub selected_workers: Vec<Worker>,
    pub worker_search: String,
    /// Whole catalog, loaded once for client-side search
    pub catalog: Vec<CatalogItem>,
    pub item_search: String,
    pub items: Vec<ProjectLine>,
}

impl ProjectFormState {
    pub fn new(start_date: String, end_date: String) -> Self {
        Self {
            start_date,
            end_date,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type ProjectStore = Store<ProjectFormState>;

/// Get the project store from context
pub fn use_project_store() -> ProjectStore {
    expect_context::<ProjectStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_toggle_worker(store: &ProjectStore, worker: &Worker) {
    project_form::toggle_worker(&mut store.selected_workers().write(), worker);
}

pub fn store_remove_worker(store: &ProjectStore, username: &str) {
    project_form::remove_worker(&mut store.selected_workers().write(), username);
}

/// Add the item named in the search box and clear the box
pub fn store_add_item(store: &ProjectStore) -> Result<(), ProjectFormError> {
    let name = store.item_search().get_untracked();
    let catalog = store.catalog().get_untracked();
    project_form::add_project_item(&mut store.items().write(), &catalog, &name)?;
    store.item_search().set(String::new());
    Ok(())
}

pub fn store_set_item_quantity(store: &ProjectStore, index: usize, raw: &str) {
    project_form::set_project_quantity(&mut store.items().write(), index, raw);
}

pub fn store_remove_item(store: &ProjectStore, index: usize) {
    project_form::remove_project_item(&mut store.items().write(), index);
}

/// Snapshot of the form as the request body
pub fn store_draft(store: &ProjectStore) -> ProjectDraft {
    ProjectDraft {
        project_number: store.project_number().get_untracked().trim().to_string(),
        customer_name: store.customer_name().get_untracked().trim().to_string(),
        workers: store.selected_workers().get_untracked(),
        start_date: store.start_date().get_untracked(),
        end_date: store.end_date().get_untracked(),
        items: store.items().get_untracked(),
    }
}
