//! Project Loader
//!
//! Replaces a take/return working set with the items booked on a project.

use crate::collection::ItemCollection;
use crate::models::{clamp_quantity, CatalogItem, LineItem, ProjectItemRow, ReturnType};
use crate::notify::Notification;
use crate::session::SessionStore;

/// Trimmed project number, or a warning when blank
pub fn validate_project_number(input: &str) -> Result<String, Notification> {
    let project = input.trim();
    if project.is_empty() {
        return Err(Notification::warning("Missing Input", "Please enter a project number."));
    }
    Ok(project.to_string())
}

fn to_line(row: ProjectItemRow, return_type: Option<ReturnType>) -> LineItem {
    let quantity = row.quantity.as_deref().map(clamp_quantity).unwrap_or(1);
    LineItem::new(
        CatalogItem {
            id: None,
            article_number: row.item_id,
            product_name: row.item_name,
            location: row.location,
            unit: row.unit,
            category: row.kind,
            stock: row.available,
            product_image_url: row.image_url,
        },
        quantity,
        return_type,
    )
}

/// Overwrite the collection with the project's rows (no merge).
/// Returns an informational notice when the project has no items.
pub fn apply_project_items<S: SessionStore>(
    collection: &mut ItemCollection<S>,
    rows: Vec<ProjectItemRow>,
) -> Option<Notification> {
    let default = collection.kind().default_return_type();
    let lines: Vec<LineItem> = rows.into_iter().map(|row| to_line(row, default)).collect();
    let empty = lines.is_empty();
    collection.replace_all(lines);
    empty.then(|| Notification::info("No Items", "This project has no items."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Level;
    use crate::session::MemorySession;
    use crate::workflow::WorkflowKind;

    fn row(id: &str, qty: Option<&str>) -> ProjectItemRow {
        ProjectItemRow {
            item_id: id.to_string(),
            item_name: format!("Item {}", id),
            quantity: qty.map(str::to_string),
            location: Some("Shelf 2".to_string()),
            unit: None,
            kind: Some("Tools".to_string()),
            available: Some("8".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn test_blank_project_number_warns() {
        let err = validate_project_number("   ").unwrap_err();
        assert_eq!(err.level, Level::Warning);
        assert_eq!(validate_project_number(" P-7 ").unwrap(), "P-7");
    }

    #[test]
    fn test_load_overwrites_existing_lines() {
        let mut c = ItemCollection::restore(WorkflowKind::Return, MemorySession::default());
        c.add_or_merge_external(
            CatalogItem { article_number: "OLD".to_string(), ..Default::default() },
            4,
        );

        let notice = apply_project_items(&mut c, vec![row("A1", Some("3")), row("B2", None)]);
        assert!(notice.is_none());
        assert_eq!(c.len(), 2);
        assert_eq!(c.lines()[0].item.article_number, "A1");
        assert_eq!(c.lines()[0].quantity, 3);
        assert_eq!(c.lines()[0].item.category.as_deref(), Some("Tools"));
        assert_eq!(c.lines()[1].quantity, 1);
        assert_eq!(c.lines()[1].return_type, Some(ReturnType::Returned));
    }

    #[test]
    fn test_empty_project_empties_collection_with_info() {
        let store = MemorySession::default();
        let mut c = ItemCollection::restore(WorkflowKind::Take, store.clone());
        c.add_or_merge_external(
            CatalogItem { article_number: "OLD".to_string(), ..Default::default() },
            1,
        );

        let notice = apply_project_items(&mut c, Vec::new()).unwrap();
        assert_eq!(notice.level, Level::Info);
        assert!(c.is_empty());
        assert_eq!(store.get("scannedItems_take").as_deref(), Some("[]"));
    }
}
