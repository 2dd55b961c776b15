//! Confirm Button Component
//!
//! Submit button with a fixed cooldown: after a click it stays disabled for
//! `SUBMIT_COOLDOWN_MS` whether or not the request has finished.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::SUBMIT_COOLDOWN_MS;
use crate::submission::Cooldown;

/// # Arguments
/// * `visible` - Hidden entirely while false (empty working set)
/// * `on_confirm` - Runs at most once per cooldown window
#[component]
pub fn ConfirmButton(
    visible: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let cooldown = StoredValue::new(Cooldown::new(SUBMIT_COOLDOWN_MS as f64));
    let (disabled, set_disabled) = signal(false);

    let on_click = move |_| {
        let mut fire = false;
        cooldown.update_value(|c| fire = c.try_trigger(js_sys::Date::now()));
        if !fire {
            return;
        }
        set_disabled.set(true);
        on_confirm.run(());
        spawn_local(async move {
            TimeoutFuture::new(SUBMIT_COOLDOWN_MS).await;
            // Page may have navigated away meanwhile
            let _ = set_disabled.try_set(false);
        });
    };

    view! {
        <Show when=move || visible.get()>
            <button
                id="confirmBtn"
                class="btn btn-success btn-lg mt-3"
                disabled=move || disabled.get()
                on:click=on_click
            >
                "Confirm"
            </button>
        </Show>
    }
}
