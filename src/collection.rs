//! Line-Item Collection
//!
//! Ordered working set of a workflow page. Every mutation is mirrored to the
//! session snapshot before it returns, so the table and storage never drift.

use leptos::logging::warn;

use crate::models::{clamp_quantity, CatalogItem, LineItem, ReturnType};
use crate::notify::Notification;
use crate::session::{self, SessionStore};
use crate::workflow::{TotalMode, WorkflowKind};

/// Result of an add attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Merged { quantity: u32 },
    Duplicate,
}

impl AddOutcome {
    /// Warning shown when an add was rejected
    pub fn notice(&self) -> Option<Notification> {
        match self {
            AddOutcome::Duplicate => Some(Notification::warning(
                "Already added",
                "This article is already in the list.",
            )),
            AddOutcome::Added | AddOutcome::Merged { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItemCollection<S: SessionStore> {
    kind: WorkflowKind,
    lines: Vec<LineItem>,
    store: S,
}

impl<S: SessionStore> ItemCollection<S> {
    /// Start from whatever the tab's snapshot holds for `kind`
    pub fn restore(kind: WorkflowKind, store: S) -> Self {
        let lines = session::load_snapshot(&store, kind);
        Self { kind, lines, store }
    }

    pub fn kind(&self) -> WorkflowKind {
        self.kind
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position_of(&self, item: &CatalogItem) -> Option<usize> {
        self.lines.iter().position(|l| l.item.same_product(item))
    }

    /// Append a decoded item with quantity 1; rejects a key already present
    pub fn add_from_lookup(&mut self, item: CatalogItem) -> AddOutcome {
        if self.position_of(&item).is_some() {
            return AddOutcome::Duplicate;
        }
        self.lines
            .push(LineItem::new(item, 1, self.kind.default_return_type()));
        self.persist();
        AddOutcome::Added
    }

    /// Same rule as a scan hit
    pub fn add_from_suggestion(&mut self, item: CatalogItem) -> AddOutcome {
        self.add_from_lookup(item)
    }

    /// Entry from another page: merges into an existing line instead of rejecting
    pub fn add_or_merge_external(&mut self, item: CatalogItem, qty: i64) -> AddOutcome {
        let qty = qty.clamp(1, u32::MAX as i64) as u32;
        let outcome = match self.position_of(&item) {
            Some(pos) => {
                let line = &mut self.lines[pos];
                line.quantity = line.quantity.saturating_add(qty);
                AddOutcome::Merged { quantity: line.quantity }
            }
            None => {
                self.lines
                    .push(LineItem::new(item, qty, self.kind.default_return_type()));
                AddOutcome::Added
            }
        };
        self.persist();
        outcome
    }

    /// Set a quantity from raw input; anything below 1 or non-numeric becomes 1
    pub fn set_quantity(&mut self, position: usize, raw: &str) {
        let Some(line) = self.lines.get_mut(position) else {
            warn!("[COLLECTION] set_quantity: no line at {}", position);
            return;
        };
        line.quantity = clamp_quantity(raw);
        self.persist();
    }

    /// Return workflow only; unknown values fall back to `returned`
    pub fn set_return_type(&mut self, position: usize, raw: &str) {
        if self.kind.default_return_type().is_none() {
            return;
        }
        let Some(line) = self.lines.get_mut(position) else {
            warn!("[COLLECTION] set_return_type: no line at {}", position);
            return;
        };
        line.return_type = Some(ReturnType::parse(raw));
        self.persist();
    }

    pub fn remove_at(&mut self, position: usize) {
        if position >= self.lines.len() {
            warn!("[COLLECTION] remove_at: no line at {}", position);
            return;
        }
        self.lines.remove(position);
        self.persist();
    }

    /// Overwrite the whole set (project loader)
    pub fn replace_all(&mut self, lines: Vec<LineItem>) {
        self.lines = lines;
        self.persist();
    }

    /// Drop everything including the snapshot; only after a confirmed submission
    pub fn clear(&mut self) {
        self.lines.clear();
        session::clear_snapshot(&self.store, self.kind);
    }

    fn persist(&self) {
        session::save_snapshot(&self.store, self.kind, &self.lines);
    }

    pub fn total(&self) -> u64 {
        match self.kind.total_mode() {
            TotalMode::LineCount => self.lines.len() as u64,
            TotalMode::QuantitySum => self.lines.iter().map(|l| l.quantity as u64).sum(),
        }
    }

    /// Table projection of the current state
    pub fn view(&self) -> TableView {
        TableView {
            rows: self
                .lines
                .iter()
                .enumerate()
                .map(|(position, line)| RowView::from_line(position, line))
                .collect(),
            total: self.total(),
            show_confirm: !self.lines.is_empty(),
        }
    }
}

/// View-model for the scanned-items table
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<RowView>,
    pub total: u64,
    pub show_confirm: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub position: usize,
    pub image: String,
    pub article_number: String,
    pub product_name: String,
    pub location: String,
    pub unit: String,
    pub category: String,
    pub stock: String,
    pub quantity: u32,
    pub return_type: Option<ReturnType>,
}

impl RowView {
    fn from_line(position: usize, line: &LineItem) -> Self {
        let item = &line.item;
        Self {
            position,
            image: item.image_or_placeholder().to_string(),
            article_number: item.article_number.clone(),
            product_name: item.product_name.clone(),
            location: item.location.clone().unwrap_or_default(),
            unit: item.unit.clone().unwrap_or_default(),
            category: item
                .category
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "Uncategorized".to_string()),
            stock: item.stock.clone().unwrap_or_default(),
            quantity: line.quantity,
            return_type: line.return_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;

    fn item(article: &str) -> CatalogItem {
        CatalogItem {
            article_number: article.to_string(),
            product_name: format!("Product {}", article),
            ..Default::default()
        }
    }

    fn collection(kind: WorkflowKind) -> (ItemCollection<MemorySession>, MemorySession) {
        let store = MemorySession::default();
        (ItemCollection::restore(kind, store.clone()), store)
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let (mut c, _) = collection(WorkflowKind::Take);
        assert_eq!(c.add_from_lookup(item("A1")), AddOutcome::Added);
        assert_eq!(c.add_from_suggestion(item("B2")), AddOutcome::Added);
        assert_eq!(c.add_from_lookup(item("A1")), AddOutcome::Duplicate);
        assert_eq!(c.add_from_suggestion(item("B2")), AddOutcome::Duplicate);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_duplicate_pick_leaves_collection_untouched() {
        let (mut c, store) = collection(WorkflowKind::Return);
        c.add_from_lookup(item("A1"));
        c.set_quantity(0, "4");
        let before = c.lines().to_vec();
        let snapshot = store.get(WorkflowKind::Return.storage_key());

        let outcome = c.add_from_suggestion(item("A1"));
        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(c.lines(), before.as_slice());
        assert_eq!(store.get(WorkflowKind::Return.storage_key()), snapshot);

        let notice = outcome.notice().unwrap();
        assert_eq!(notice.level, crate::notify::Level::Warning);
        assert_eq!(notice.title, "Already added");
        assert!(AddOutcome::Added.notice().is_none());
        assert!(AddOutcome::Merged { quantity: 2 }.notice().is_none());
    }

    #[test]
    fn test_no_duplicate_keys_after_mixed_adds() {
        let (mut c, _) = collection(WorkflowKind::Add);
        for article in ["A1", "B2", "A1", "C3", "B2", "A1", "C3"] {
            c.add_from_lookup(item(article));
            c.add_from_suggestion(item(article));
        }
        let mut keys: Vec<_> = c.lines().iter().map(|l| l.item.article_number.clone()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), c.len());
    }

    #[test]
    fn test_id_is_key_when_article_missing() {
        let (mut c, _) = collection(WorkflowKind::Add);
        let by_id = CatalogItem { id: Some("42".to_string()), ..Default::default() };
        assert_eq!(c.add_from_lookup(by_id.clone()), AddOutcome::Added);
        assert_eq!(c.add_from_lookup(by_id), AddOutcome::Duplicate);
    }

    #[test]
    fn test_external_merge_sums_quantity() {
        let (mut c, _) = collection(WorkflowKind::Take);
        c.add_or_merge_external(item("A1"), 2);
        assert_eq!(c.add_or_merge_external(item("A1"), 3), AddOutcome::Merged { quantity: 5 });
        assert_eq!(c.len(), 1);
        assert_eq!(c.lines()[0].quantity, 5);
    }

    #[test]
    fn test_external_merge_clamps_qty() {
        let (mut c, _) = collection(WorkflowKind::Return);
        c.add_or_merge_external(item("A1"), -4);
        assert_eq!(c.lines()[0].quantity, 1);
        assert_eq!(c.lines()[0].return_type, Some(ReturnType::Returned));
    }

    #[test]
    fn test_set_quantity_never_below_one() {
        let (mut c, _) = collection(WorkflowKind::Take);
        c.add_from_lookup(item("A1"));
        for raw in ["-5", "0", "abc", "", "NaN"] {
            c.set_quantity(0, raw);
            assert_eq!(c.lines()[0].quantity, 1, "input {:?}", raw);
        }
        c.set_quantity(0, "7");
        assert_eq!(c.lines()[0].quantity, 7);
    }

    #[test]
    fn test_set_return_type() {
        let (mut c, _) = collection(WorkflowKind::Return);
        c.add_from_lookup(item("A1"));
        c.set_return_type(0, "broken");
        assert_eq!(c.lines()[0].return_type, Some(ReturnType::Broken));
        c.set_return_type(0, "bogus");
        assert_eq!(c.lines()[0].return_type, Some(ReturnType::Returned));
    }

    #[test]
    fn test_return_type_ignored_outside_return_workflow() {
        let (mut c, _) = collection(WorkflowKind::Take);
        c.add_from_lookup(item("A1"));
        c.set_return_type(0, "broken");
        assert_eq!(c.lines()[0].return_type, None);
    }

    #[test]
    fn test_remove_shifts_positions() {
        let (mut c, _) = collection(WorkflowKind::Take);
        c.add_from_lookup(item("A1"));
        c.add_from_lookup(item("B2"));
        c.add_from_lookup(item("C3"));
        c.remove_at(0);
        assert_eq!(c.lines()[0].item.article_number, "B2");
        assert_eq!(c.view().rows[1].position, 1);
        c.remove_at(9);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let (mut c, store) = collection(WorkflowKind::Return);
        c.add_from_lookup(item("A1"));
        c.set_quantity(0, "4");
        c.set_return_type(0, "used");

        let reloaded = ItemCollection::restore(WorkflowKind::Return, store.clone());
        assert_eq!(reloaded.lines(), c.lines());

        c.remove_at(0);
        assert!(ItemCollection::restore(WorkflowKind::Return, store).is_empty());
    }

    #[test]
    fn test_clear_deletes_snapshot() {
        let (mut c, store) = collection(WorkflowKind::Add);
        c.add_from_lookup(item("A1"));
        c.clear();
        assert!(c.is_empty());
        assert_eq!(store.get("scannedItems_add"), None);
    }

    #[test]
    fn test_totals_per_workflow() {
        let (mut take, _) = collection(WorkflowKind::Take);
        take.add_or_merge_external(item("A1"), 3);
        take.add_or_merge_external(item("B2"), 2);
        assert_eq!(take.total(), 2);

        let (mut ret, _) = collection(WorkflowKind::Return);
        ret.add_or_merge_external(item("A1"), 3);
        ret.add_or_merge_external(item("B2"), 2);
        assert_eq!(ret.total(), 5);
    }

    #[test]
    fn test_view_hides_confirm_when_empty() {
        let (mut c, _) = collection(WorkflowKind::Add);
        assert!(!c.view().show_confirm);
        c.add_from_lookup(item("A1"));
        let view = c.view();
        assert!(view.show_confirm);
        assert_eq!(view.rows[0].image, crate::config::PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_view_labels_missing_category() {
        let (mut c, _) = collection(WorkflowKind::Take);
        c.add_from_lookup(item("A1"));
        c.add_from_lookup(CatalogItem {
            category: Some("Tools".to_string()),
            ..item("B2")
        });
        let view = c.view();
        assert_eq!(view.rows[0].category, "Uncategorized");
        assert_eq!(view.rows[1].category, "Tools");
    }
}
