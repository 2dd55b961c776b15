//! Suggestion Panel
//!
//! Manual-search results with a first-N / all display window.
//! Holds no collection state; picking a card is the collection's business.

use crate::config;
use crate::models::CatalogItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Empty,
    NoMatches,
    Results,
}

/// Search ticket; responses for an older ticket are dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u32,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionPanel {
    items: Vec<CatalogItem>,
    state: PanelState,
    expanded: bool,
    window: usize,
    generation: u32,
}

impl Default for SuggestionPanel {
    fn default() -> Self {
        Self::new(config::SUGGESTION_WINDOW)
    }
}

impl SuggestionPanel {
    pub fn new(window: usize) -> Self {
        Self {
            items: Vec::new(),
            state: PanelState::Empty,
            expanded: false,
            window,
            generation: 0,
        }
    }

    /// Clear the panel and decide whether a request is needed.
    /// Blank input clears without a request.
    pub fn begin_search(&mut self, text: &str) -> Option<SearchRequest> {
        self.items.clear();
        self.state = PanelState::Empty;
        self.expanded = false;
        self.generation = self.generation.wrapping_add(1);

        let query = text.trim();
        if query.is_empty() {
            return None;
        }
        Some(SearchRequest {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Install results for `request`; returns false if a newer search superseded it
    pub fn apply_results(&mut self, request: &SearchRequest, items: Vec<CatalogItem>) -> bool {
        if request.generation != self.generation {
            return false;
        }
        self.state = if items.is_empty() {
            PanelState::NoMatches
        } else {
            PanelState::Results
        };
        self.items = items;
        self.expanded = false;
        true
    }

    pub fn clear(&mut self) {
        self.begin_search("");
    }

    pub fn toggle_expansion(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn visible(&self) -> &[CatalogItem] {
        if self.expanded {
            &self.items
        } else {
            &self.items[..self.items.len().min(self.window)]
        }
    }

    /// "Show more/less" is hidden when everything fits in the window
    pub fn show_toggle(&self) -> bool {
        self.items.len() > self.window
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.expanded {
            "Show less"
        } else {
            "Show more"
        }
    }
}
