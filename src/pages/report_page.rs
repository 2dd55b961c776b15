//! Report Issue Page
//!
//! Pick one article (scan or search), tick what is wrong with it, optionally
//! attach a photo and send it as a multipart form.

use leptos::html::Input;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ScannerPanel, SuggestionCards};
use crate::config::HOME_ROUTE;
use crate::models::CatalogItem;
use crate::notify::{navigate, Notification};
use crate::report::{build_report, toggle_issue, ISSUE_TYPES};
use crate::suggestions::SuggestionPanel;

#[component]
pub fn ReportPage() -> impl IntoView {
    let selected = RwSignal::new(None::<CatalogItem>);
    let panel = RwSignal::new(SuggestionPanel::default());
    let checked = RwSignal::new(Vec::<String>::new());
    let comment = RwSignal::new(String::new());
    let count = RwSignal::new("1".to_string());
    let (sending, set_sending) = signal(false);
    let photo_input = NodeRef::<Input>::new();

    let on_payload = move |code: String| {
        spawn_local(async move {
            match api::lookup_by_code(&code).await {
                Ok(Some(item)) => selected.set(Some(item)),
                Ok(None) => {
                    Notification::error("Item Error", "Item not found in catalog, please try again.")
                        .show()
                        .await;
                }
                Err(e) => {
                    error!("[REPORT] Lookup of {} failed: {}", code, e);
                    Notification::error("Item Error", e.to_string()).show().await;
                }
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let report = selected.with_untracked(|item| {
            checked.with_untracked(|issues| {
                build_report(
                    item.as_ref(),
                    issues,
                    &comment.get_untracked(),
                    &count.get_untracked(),
                )
            })
        });
        let report = match report {
            Ok(report) => report,
            Err(e) => {
                spawn_local(async move { e.notification().show().await });
                return;
            }
        };
        let photo = photo_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        set_sending.set(true);
        spawn_local(async move {
            match api::submit_report(&report, photo).await {
                Ok(()) => {
                    log!("[REPORT] Sent report for {}", report.article_number);
                    Notification::success("Report Sent", "Thank you, the issue has been reported.")
                        .show()
                        .await;
                    navigate(HOME_ROUTE);
                }
                Err(e) if e.is_network() => {
                    error!("[REPORT] {}", e);
                    Notification::error("Network Error", "Please check your network connection.")
                        .show()
                        .await;
                }
                Err(e) => {
                    error!("[REPORT] {}", e);
                    Notification::error("Error", "Something went wrong when sending the issue report.")
                        .show()
                        .await;
                }
            }
            let _ = set_sending.try_set(false);
        });
    };

    view! {
        <div class="container report-page">
            <h1 class="page-title">"Report Issue"</h1>

            <ScannerPanel on_payload=on_payload />

            <SuggestionCards
                panel=panel
                on_select=move |item| selected.set(Some(item))
            />

            {move || selected.get().map(|item| view! {
                <table class="table table-dark table-sm selected-item">
                    <tbody>
                        <tr>
                            <td>
                                <img class="item-thumb" src=item.image_or_placeholder().to_string() alt="" />
                            </td>
                            <td>{item.article_number.clone()}</td>
                            <td>{item.product_name.clone()}</td>
                            <td>{item.location.clone().unwrap_or_default()}</td>
                            <td>{item.stock.clone().unwrap_or_default()}</td>
                            <td>
                                <button
                                    type="button"
                                    class="btn btn-sm btn-danger"
                                    on:click=move |_| selected.set(None)
                                >
                                    "Remove"
                                </button>
                            </td>
                        </tr>
                    </tbody>
                </table>
            })}

            <form id="reportForm" on:submit=on_submit>
                <fieldset class="mb-3">
                    <legend>"Issue"</legend>
                    {ISSUE_TYPES
                        .iter()
                        .map(|(value, label)| {
                            let value = *value;
                            view! {
                                <label class="form-check">
                                    <input
                                        type="checkbox"
                                        class="form-check-input"
                                        name="issue"
                                        value=value
                                        prop:checked=move || checked.with(|c| c.iter().any(|v| v == value))
                                        on:change=move |_| checked.update(|c| toggle_issue(c, value))
                                    />
                                    <span class="form-check-label">{*label}</span>
                                </label>
                            }
                        })
                        .collect_view()}
                </fieldset>

                <textarea
                    id="comment"
                    class="form-control mb-3"
                    placeholder="Comment"
                    prop:value=move || comment.get()
                    on:input=move |ev| comment.set(event_target_value(&ev))
                ></textarea>

                <input
                    id="count"
                    type="number"
                    min="1"
                    class="form-control mb-3"
                    prop:value=move || count.get()
                    on:input=move |ev| count.set(event_target_value(&ev))
                />

                <input
                    id="photo"
                    type="file"
                    accept="image/*"
                    class="form-control mb-3"
                    node_ref=photo_input
                />

                <button type="submit" class="btn btn-danger" disabled=move || sending.get()>
                    "Send report"
                </button>
            </form>
        </div>
    }
}
