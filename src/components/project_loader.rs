//! Project Loader Component
//!
//! Project number input for take/return. "Load" replaces the working set
//! with the project's booked items; the same number is sent on confirm.

use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_workflow;
use crate::notify::Notification;
use crate::project_loader::{apply_project_items, validate_project_number};

#[component]
pub fn ProjectLoader() -> impl IntoView {
    let ctx = use_workflow();
    let (loading, set_loading) = signal(false);

    let load = move |_| {
        let project = match validate_project_number(&ctx.project_input.get_untracked()) {
            Ok(project) => project,
            Err(notice) => {
                spawn_local(async move { notice.show().await });
                return;
            }
        };

        set_loading.set(true);
        spawn_local(async move {
            match api::load_project_items(ctx.kind, &project).await {
                Ok(rows) => {
                    log!("[PROJECT] Loaded {} row(s) for {}", rows.len(), project);
                    let mut notice = None;
                    ctx.collection.update(|c| notice = apply_project_items(c, rows));
                    if let Some(notice) = notice {
                        notice.show().await;
                    }
                }
                Err(e) => {
                    error!("[PROJECT] Loading {} failed: {}", project, e);
                    let text = if e.is_network() {
                        "Failed to load items.".to_string()
                    } else {
                        e.to_string()
                    };
                    Notification::error("Error", text).show().await;
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    view! {
        <div class="project-loader input-group mb-3">
            <input
                id="projectSearch"
                type="text"
                class="form-control"
                placeholder="Project number"
                prop:value=move || ctx.project_input.get()
                on:input=move |ev| ctx.project_input.set(event_target_value(&ev))
            />
            <button
                id="loadProjectBtn"
                class="btn btn-outline-light"
                disabled=move || loading.get()
                on:click=load
            >
                "Load project"
            </button>
        </div>
    }
}
