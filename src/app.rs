//! Warehouse Frontend App
//!
//! Picks the page from the URL path; the backend serves this bundle on
//! every workflow route.

use leptos::logging::warn;
use leptos::prelude::*;

use crate::pages::{CreateProjectPage, ReportPage, WorkflowPage};
use crate::workflow::WorkflowKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Workflow(WorkflowKind),
    Report,
    CreateProject,
}

impl Page {
    pub fn from_path(path: &str) -> Option<Self> {
        if let Some(kind) = WorkflowKind::from_path(path) {
            return Some(Page::Workflow(kind));
        }
        match path.trim_end_matches('/') {
            "/report" => Some(Page::Report),
            "/create_project" => Some(Page::CreateProject),
            _ => None,
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();

    match Page::from_path(&path) {
        Some(Page::Workflow(kind)) => view! { <WorkflowPage kind=kind /> }.into_any(),
        Some(Page::Report) => view! { <ReportPage /> }.into_any(),
        Some(Page::CreateProject) => view! { <CreateProjectPage /> }.into_any(),
        None => {
            warn!("[APP] No page for path {}", path);
            ().into_any()
        }
    }
}
