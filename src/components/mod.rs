//! UI Components
//!
//! Reusable Leptos components shared by the workflow and report pages.

mod scanner_panel;
mod suggestion_cards;
mod line_item_table;
mod confirm_button;
mod project_loader;

pub use scanner_panel::ScannerPanel;
pub use suggestion_cards::SuggestionCards;
pub use line_item_table::LineItemTable;
pub use confirm_button::ConfirmButton;
pub use project_loader::ProjectLoader;
