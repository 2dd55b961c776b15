//! Line Item Table Component
//!
//! Renders the working set of the current workflow. Rows are rebuilt from
//! `ItemCollection::view` on every change, so positions never go stale.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::collection::RowView;
use crate::config::PLACEHOLDER_IMAGE;
use crate::context::{use_workflow, WorkflowContext};
use crate::models::ReturnType;

#[component]
pub fn LineItemTable() -> impl IntoView {
    let ctx = use_workflow();
    let table = Memo::new(move |_| ctx.collection.with(|c| c.view()));
    let with_return_type = ctx.kind.default_return_type().is_some();

    view! {
        <div class="table-responsive">
            <table class="table table-dark table-sm scanned-table">
                <thead>
                    <tr>
                        <th>"Image"</th>
                        <th>"Article"</th>
                        <th>"Name"</th>
                        <th>"Location"</th>
                        <th>"Unit"</th>
                        <th>"Category"</th>
                        <th>"Stock"</th>
                        {with_return_type.then(|| view! { <th>"Return Type"</th> })}
                        <th>"Quantity"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody id="scannedItemsBody">
                    {move || {
                        table
                            .get()
                            .rows
                            .into_iter()
                            .map(|row| line_row(ctx, row, with_return_type))
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
        <p class="total-line">
            "Total: "
            <span id="totalItems">{move || table.get().total}</span>
        </p>
    }
}

fn line_row(ctx: WorkflowContext, row: RowView, with_return_type: bool) -> impl IntoView {
    let position = row.position;
    let current = row.return_type.unwrap_or_default();

    let return_cell = with_return_type.then(|| {
        view! {
            <td>
                <select
                    class="form-select form-select-sm"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.collection.update(|c| c.set_return_type(position, &value));
                    }
                >
                    {ReturnType::ALL
                        .iter()
                        .map(|rt| {
                            view! {
                                <option value=rt.as_str() selected=*rt == current>
                                    {rt.as_str()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </td>
        }
    });

    view! {
        <tr>
            <td>
                <img
                    class="item-thumb"
                    src=row.image
                    alt=row.product_name.clone()
                    on:error=|ev| {
                        // Broken image URL: fall back once to the placeholder
                        if let Some(img) = ev
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::HtmlImageElement>().ok())
                        {
                            if !img.src().ends_with(PLACEHOLDER_IMAGE) {
                                img.set_src(PLACEHOLDER_IMAGE);
                            }
                        }
                    }
                />
            </td>
            <td>{row.article_number}</td>
            <td>{row.product_name}</td>
            <td>{row.location}</td>
            <td>{row.unit}</td>
            <td>{row.category}</td>
            <td>{row.stock}</td>
            {return_cell}
            <td>
                <input
                    type="number"
                    min="1"
                    class="form-control form-control-sm qty-input"
                    prop:value=row.quantity.to_string()
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.collection.update(|c| c.set_quantity(position, &value));
                    }
                />
            </td>
            <td>
                <button
                    class="btn btn-sm btn-danger"
                    on:click=move |_| ctx.collection.update(|c| c.remove_at(position))
                >
                    "Remove"
                </button>
            </td>
        </tr>
    }
}
