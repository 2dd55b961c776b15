//! Workflow Page
//!
//! Shared layout for take, return and add-stock: scan or search articles
//! into a working set, adjust quantities, confirm.

use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ConfirmButton, LineItemTable, ProjectLoader, ScannerPanel, SuggestionCards};
use crate::config::HOME_ROUTE;
use crate::context::WorkflowContext;
use crate::notify::{navigate, Notification};
use crate::submission::{plan_submission, settle};
use crate::workflow::WorkflowKind;

#[component]
pub fn WorkflowPage(kind: WorkflowKind) -> impl IntoView {
    let ctx = WorkflowContext::new(kind);
    provide_context(ctx);

    let on_payload = move |code: String| {
        spawn_local(async move {
            match api::lookup_by_code(&code).await {
                Ok(Some(item)) => ctx.add_scanned(item),
                Ok(None) => {
                    Notification::error("Not found", "Item not found in catalog, please try again.")
                        .show()
                        .await;
                }
                Err(e) => {
                    error!("[SCAN] Lookup of {} failed: {}", code, e);
                    Notification::error("Lookup Error", e.to_string()).show().await;
                }
            }
        });
    };

    let on_confirm = move |_: ()| {
        let project = ctx.project_input.get_untracked();
        let plan = ctx
            .collection
            .with_untracked(|c| plan_submission(c, Some(project.as_str())));
        let plan = match plan {
            Ok(plan) => plan,
            Err(e) => {
                spawn_local(async move {
                    Notification::warning("No Items Selected", e.to_string()).show().await;
                });
                return;
            }
        };

        spawn_local(async move {
            let outcome = api::submit(&plan).await;
            ctx.collection.update(|c| settle(c, &outcome));
            outcome.notification(kind).show().await;
            if outcome.is_completed() {
                log!("[SUBMIT] {:?} batch completed", kind);
                navigate(HOME_ROUTE);
            }
        });
    };

    let has_lines = Signal::derive(move || ctx.collection.with(|c| !c.is_empty()));

    view! {
        <div class="container workflow-page">
            <h1 class="page-title">{kind.title()}</h1>

            <ScannerPanel on_payload=on_payload />

            <SuggestionCards
                panel=ctx.panel
                on_select=move |item| ctx.add_suggestion(item)
            />

            {kind.project_endpoints().is_some().then(|| view! { <ProjectLoader /> })}

            <LineItemTable />

            <ConfirmButton visible=has_lines on_confirm=on_confirm />
        </div>
    }
}
