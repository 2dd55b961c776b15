//! Workflow Kinds
//!
//! The take, return and add-stock pages share one item-collection workflow.
//! `WorkflowKind` carries every per-page difference.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::ReturnType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowKind {
    Take,
    Return,
    Add,
}

/// How the running total under the table is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalMode {
    LineCount,
    QuantitySum,
}

/// Project endpoints used by take/return pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectEndpoints {
    pub load: &'static str,
    pub insert: &'static str,
}

impl WorkflowKind {
    pub const ALL: [WorkflowKind; 3] = [WorkflowKind::Take, WorkflowKind::Return, WorkflowKind::Add];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "take" => Some(WorkflowKind::Take),
            "return" => Some(WorkflowKind::Return),
            "add" => Some(WorkflowKind::Add),
            _ => None,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "/take_item" => Some(WorkflowKind::Take),
            "/return_item" => Some(WorkflowKind::Return),
            "/add_stock" => Some(WorkflowKind::Add),
            _ => None,
        }
    }

    /// Session storage key for this page's working set
    pub fn storage_key(&self) -> &'static str {
        match self {
            WorkflowKind::Take => "scannedItems_take",
            WorkflowKind::Return => "scannedItems_return",
            WorkflowKind::Add => "scannedItems_add",
        }
    }

    pub fn default_return_type(&self) -> Option<ReturnType> {
        match self {
            WorkflowKind::Return => Some(ReturnType::Returned),
            _ => None,
        }
    }

    /// `action` tag the confirm endpoint expects
    pub fn action(&self) -> &'static str {
        match self {
            WorkflowKind::Take => "take",
            WorkflowKind::Return | WorkflowKind::Add => "return",
        }
    }

    pub fn total_mode(&self) -> TotalMode {
        match self {
            WorkflowKind::Take => TotalMode::LineCount,
            WorkflowKind::Return | WorkflowKind::Add => TotalMode::QuantitySum,
        }
    }

    pub fn project_endpoints(&self) -> Option<ProjectEndpoints> {
        match self {
            WorkflowKind::Take => Some(ProjectEndpoints {
                load: config::PROJECT_ITEMS,
                insert: config::INSERT_PROJECT_ITEMS,
            }),
            WorkflowKind::Return => Some(ProjectEndpoints {
                load: config::PROJECT_RETURNS,
                insert: config::INSERT_PROJECT_RETURNS,
            }),
            WorkflowKind::Add => None,
        }
    }

    /// Whether the confirm form also carries `project_number`
    pub fn sends_project_number(&self) -> bool {
        matches!(self, WorkflowKind::Take)
    }

    pub fn title(&self) -> &'static str {
        match self {
            WorkflowKind::Take => "Take Items",
            WorkflowKind::Return => "Return Items",
            WorkflowKind::Add => "Add Stock",
        }
    }

    pub fn empty_warning(&self) -> &'static str {
        match self {
            WorkflowKind::Take => "Please add at least one item.",
            WorkflowKind::Return => "Please add at least one item before submitting a return.",
            WorkflowKind::Add => "Please add at least one item before submitting an add.",
        }
    }

    /// Success notification (title, text)
    pub fn success_message(&self) -> (&'static str, &'static str) {
        match self {
            WorkflowKind::Take => ("Items Taken", "The article(s) have been taken successfully."),
            WorkflowKind::Return => ("Return Confirmed", "The article(s) have been submitted."),
            WorkflowKind::Add => ("Add Confirmed", "The article has been added successfully."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_distinct() {
        let keys: Vec<_> = WorkflowKind::ALL.iter().map(|k| k.storage_key()).collect();
        assert_eq!(keys, vec!["scannedItems_take", "scannedItems_return", "scannedItems_add"]);
    }

    #[test]
    fn test_only_return_has_default_subtype() {
        assert_eq!(WorkflowKind::Return.default_return_type(), Some(ReturnType::Returned));
        assert_eq!(WorkflowKind::Take.default_return_type(), None);
        assert_eq!(WorkflowKind::Add.default_return_type(), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(WorkflowKind::from_path("/take_item"), Some(WorkflowKind::Take));
        assert_eq!(WorkflowKind::from_path("/return_item/"), Some(WorkflowKind::Return));
        assert_eq!(WorkflowKind::from_path("/add_stock"), Some(WorkflowKind::Add));
        assert_eq!(WorkflowKind::from_path("/report"), None);
    }

    #[test]
    fn test_add_has_no_project_linkage() {
        assert!(WorkflowKind::Add.project_endpoints().is_none());
        assert_eq!(
            WorkflowKind::Return.project_endpoints().map(|e| e.insert),
            Some("/api/insert_project_returns")
        );
    }
}
