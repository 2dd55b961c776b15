//! Create Project Page
//!
//! Form for opening a project: number, customer, workers, dates and the
//! items it needs. Workers and the catalog are fetched once on mount.

use chrono::Utc;
use gloo_timers::future::TimeoutFuture;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::config::{HOME_ROUTE, ITEM_SEARCH_DEBOUNCE_MS};
use crate::models::CatalogItem;
use crate::notify::{navigate, Notification};
use crate::project_form::{default_dates, filter_workers, is_selected, search_catalog};
use crate::store::{
    store_add_item, store_draft, store_remove_item, store_remove_worker, store_set_item_quantity,
    store_toggle_worker, use_project_store, ProjectFormState, ProjectFormStateStoreFields,
};

#[component]
pub fn CreateProjectPage() -> impl IntoView {
    let (start, end) = default_dates(Utc::now().date_naive());
    let store = Store::new(ProjectFormState::new(start, end));
    provide_context(store);

    let (submitting, set_submitting) = signal(false);

    // Load workers and catalog on mount
    spawn_local(async move {
        match api::get_workers().await {
            Ok(workers) => {
                log!("[PROJECT] Loaded {} workers", workers.len());
                store.workers().set(workers);
            }
            Err(e) => {
                error!("[PROJECT] Failed to load workers: {}", e);
                Notification::error("Error", "Failed to load workers list.").show().await;
            }
        }
    });
    spawn_local(async move {
        match api::list_all().await {
            Ok(items) => {
                log!("[PROJECT] Loaded {} catalog items", items.len());
                store.catalog().set(items);
            }
            Err(e) => error!("[PROJECT] Failed to load catalog: {}", e),
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = store_draft(&store);
        if let Err(e) = draft.validate() {
            spawn_local(async move {
                Notification::error("Error", e.to_string()).show().await;
            });
            return;
        }

        set_submitting.set(true);
        spawn_local(async move {
            match api::create_project(&draft).await {
                Ok(message) => {
                    log!("[PROJECT] Created {}", draft.project_number);
                    let text = if message.is_empty() {
                        "Project created.".to_string()
                    } else {
                        message
                    };
                    Notification::success("Success!", text).show().await;
                    navigate(HOME_ROUTE);
                }
                Err(e) => {
                    error!("[PROJECT] Create failed: {}", e);
                    Notification::error("Error", e.to_string()).show().await;
                }
            }
            let _ = set_submitting.try_set(false);
        });
    };

    view! {
        <div class="container create-project-page">
            <h1 class="page-title">"Create Project"</h1>
            <form id="createProjectForm" on:submit=on_submit>
                <input
                    id="projectNumber"
                    class="form-control mb-2"
                    placeholder="Project number"
                    prop:value=move || store.project_number().get()
                    on:input=move |ev| store.project_number().set(event_target_value(&ev))
                />
                <input
                    id="customerName"
                    class="form-control mb-2"
                    placeholder="Customer name"
                    prop:value=move || store.customer_name().get()
                    on:input=move |ev| store.customer_name().set(event_target_value(&ev))
                />
                <div class="d-flex gap-2 mb-3">
                    <input
                        id="startDate"
                        type="date"
                        class="form-control"
                        prop:value=move || store.start_date().get()
                        on:input=move |ev| store.start_date().set(event_target_value(&ev))
                    />
                    <input
                        id="endDate"
                        type="date"
                        class="form-control"
                        prop:value=move || store.end_date().get()
                        on:input=move |ev| store.end_date().set(event_target_value(&ev))
                    />
                </div>

                <WorkerPicker />
                <ItemPicker />

                <button type="submit" class="btn btn-success" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Creating..." } else { "Create project" }}
                </button>
            </form>
        </div>
    }
}

/// Filterable worker list plus badges for the current selection
#[component]
fn WorkerPicker() -> impl IntoView {
    let store = use_project_store();

    let visible = move || {
        let term = store.worker_search().get();
        store.workers().with(|all| filter_workers(all, &term))
    };

    view! {
        <div class="worker-picker mb-3">
            <input
                id="workerSearch"
                class="form-control mb-2"
                placeholder="Search workers"
                prop:value=move || store.worker_search().get()
                on:input=move |ev| store.worker_search().set(event_target_value(&ev))
            />
            <ul class="list-group worker-list">
                <For
                    each=visible
                    key=|w| w.username.clone()
                    children=move |worker| {
                        let username = worker.username.clone();
                        let label = worker.display_name().to_string();
                        let selected = move || store.selected_workers().with(|s| is_selected(s, &username));
                        view! {
                            <li
                                class=move || if selected() { "list-group-item active" } else { "list-group-item" }
                                on:click=move |_| store_toggle_worker(&store, &worker)
                            >
                                {label}
                            </li>
                        }
                    }
                />
            </ul>
            <div id="selectedWorkers" class="mt-2">
                <For
                    each=move || store.selected_workers().get()
                    key=|w| w.username.clone()
                    children=move |worker| {
                        let username = worker.username.clone();
                        view! {
                            <span class="badge bg-success me-1">
                                {worker.display_name().to_string()}
                                <button
                                    type="button"
                                    class="btn-close btn-close-white ms-1"
                                    on:click=move |_| store_remove_worker(&store, &username)
                                ></button>
                            </span>
                        }
                    }
                />
            </div>
        </div>
    }
}

/// Debounced catalog search, add button and the quantity table
#[component]
fn ItemPicker() -> impl IntoView {
    let store = use_project_store();
    let results = RwSignal::new(None::<Vec<CatalogItem>>);
    let generation = StoredValue::new(0u32);

    let on_search_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        store.item_search().set(text.clone());
        generation.update_value(|g| *g = g.wrapping_add(1));
        let current = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(ITEM_SEARCH_DEBOUNCE_MS).await;
            if generation.try_get_value() != Some(current) {
                return;
            }
            let found = store.catalog().with_untracked(|all| search_catalog(all, &text));
            results.set(found);
        });
    };

    let pick = move |name: String| {
        store.item_search().set(name);
        results.set(None);
    };

    let on_add = move |_| {
        if let Err(e) = store_add_item(&store) {
            spawn_local(async move {
                Notification::error("Error", e.to_string()).show().await;
            });
            return;
        }
        results.set(None);
    };

    view! {
        <div class="item-picker mb-3">
            <div class="input-group">
                <input
                    id="itemSearch"
                    class="form-control"
                    placeholder="Search items"
                    autocomplete="off"
                    prop:value=move || store.item_search().get()
                    on:input=on_search_input
                />
                <button type="button" id="addItemBtn" class="btn btn-primary" on:click=on_add>
                    "Add"
                </button>
            </div>
            {move || results.get().map(|found| {
                if found.is_empty() {
                    return view! {
                        <div class="list-group-item text-muted">"No items found"</div>
                    }.into_any();
                }
                view! {
                    <div class="list-group item-results">
                        {found
                            .into_iter()
                            .map(|item| {
                                let name = item.product_name.clone();
                                view! {
                                    <button
                                        type="button"
                                        class="list-group-item list-group-item-action"
                                        on:click=move |_| pick(name.clone())
                                    >
                                        {item.product_name}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                }.into_any()
            })}

            <table class="table table-dark table-sm mt-2">
                <thead>
                    <tr>
                        <th>"Item"</th>
                        <th>"Quantity"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody id="itemsBody">
                    {move || {
                        store
                            .items()
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, line)| {
                                view! {
                                    <tr>
                                        <td>{line.item_name}</td>
                                        <td>
                                            <input
                                                type="number"
                                                min="1"
                                                class="form-control form-control-sm"
                                                prop:value=line.quantity.to_string()
                                                on:change=move |ev| {
                                                    store_set_item_quantity(&store, index, &event_target_value(&ev))
                                                }
                                            />
                                        </td>
                                        <td>
                                            <button
                                                type="button"
                                                class="btn btn-sm btn-danger"
                                                on:click=move |_| store_remove_item(&store, index)
                                            >
                                                "Remove"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
