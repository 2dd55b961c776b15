#![allow(warnings)]
//! Warehouse Frontend Entry Point

mod config;
mod error;
mod models;
mod workflow;
mod session;
mod collection;
mod scanner;
mod suggestions;
mod notify;
mod submission;
mod project_loader;
mod project_form;
mod report;
mod api;
mod context;
mod store;
mod components;
mod pages;
mod deep_link;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
