//! Suggestion Cards Component
//!
//! Manual text search against the catalog, rendered as a small card grid
//! with a show more/less toggle.

use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::CatalogItem;
use crate::notify::Notification;
use crate::suggestions::{PanelState, SuggestionPanel};

#[component]
pub fn SuggestionCards(
    panel: RwSignal<SuggestionPanel>,
    #[prop(into)] on_select: Callback<CatalogItem>,
) -> impl IntoView {
    let (query, set_query) = signal(String::new());

    let run_search = move |text: String| {
        let mut request = None;
        panel.update(|p| request = p.begin_search(&text));
        let Some(request) = request else { return };

        spawn_local(async move {
            match api::search(&request.query).await {
                Ok(items) => {
                    panel.update(|p| {
                        p.apply_results(&request, items);
                    });
                }
                Err(e) => {
                    error!("[SEARCH] '{}' failed: {}", request.query, e);
                    Notification::error("Search Error", e.to_string()).show().await;
                }
            }
        });
    };

    view! {
        <form
            class="manual-search d-flex mb-3"
            on:submit=move |ev| {
                ev.prevent_default();
                run_search(query.get_untracked());
            }
        >
            <input
                id="manualSearch"
                type="search"
                class="form-control"
                placeholder="Search by article number or name"
                prop:value=move || query.get()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    if value.trim().is_empty() {
                        panel.update(|p| p.clear());
                    }
                    set_query.set(value);
                }
            />
            <button type="submit" class="btn btn-primary ms-2">"Search"</button>
        </form>

        <div id="suggestionCards" class="row">
            {move || panel.with(|p| match p.state() {
                PanelState::Empty => view! { <span></span> }.into_any(),
                PanelState::NoMatches => view! {
                    <div class="col-12 text-muted">"No matches found"</div>
                }.into_any(),
                PanelState::Results => p
                    .visible()
                    .iter()
                    .cloned()
                    .map(|item| view! { <SuggestionCard item=item on_select=on_select /> })
                    .collect_view()
                    .into_any(),
            })}
        </div>

        <Show when=move || panel.with(|p| p.show_toggle())>
            <button
                id="loadMoreBtn"
                class="btn btn-outline-light btn-sm"
                on:click=move |_| panel.update(|p| p.toggle_expansion())
            >
                {move || panel.with(|p| p.toggle_label())}
            </button>
        </Show>
    }
}

#[component]
fn SuggestionCard(item: CatalogItem, on_select: Callback<CatalogItem>) -> impl IntoView {
    let detail_href = item
        .id
        .as_ref()
        .map(|id| format!("/item/{}", id))
        .unwrap_or_else(|| "#".to_string());
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let location = field(&item.location);
    let stock = field(&item.stock);
    let name = item.product_name.clone();
    let article = item.article_number.clone();

    view! {
        <div class="col-md-4 d-flex justify-content-center mb-3">
            <div class="card shadow-sm suggestion-card">
                <div class="card-body d-flex flex-column justify-content-between p-2">
                    <div>
                        <h6 class="card-title mb-1">
                            <a href=detail_href>{name}</a>
                        </h6>
                        <p class="card-text text-muted small mb-2">
                            <strong>"Article: "</strong>{article}<br/>
                            <strong>"Location: "</strong>{location}<br/>
                            <strong>"Stock: "</strong>{stock}
                        </p>
                    </div>
                    <button
                        class="btn btn-sm btn-success mt-auto"
                        on:click=move |_| on_select.run(item.clone())
                    >
                        "Add"
                    </button>
                </div>
            </div>
        </div>
    }
}
