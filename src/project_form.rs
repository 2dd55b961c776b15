//! Project Form
//!
//! Worker selection, catalog item picking and validation for the
//! create-project page.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{clamp_quantity, CatalogItem, Worker};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormError {
    #[error("Project number is required")]
    MissingProjectNumber,
    #[error("Please select at least one worker")]
    NoWorkers,
    #[error("Please select both start and end dates")]
    MissingDates,
    #[error("Please add at least one item to the project")]
    NoItems,
    #[error("Please select an item first")]
    NoItemSelected,
    #[error("Item not found in catalog")]
    UnknownItem,
}

/// Item booked on a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLine {
    pub item_id: String,
    pub item_name: String,
    pub quantity: u32,
}

/// Body of `/api/create_project`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectDraft {
    pub project_number: String,
    pub customer_name: String,
    pub workers: Vec<Worker>,
    pub start_date: String,
    pub end_date: String,
    pub items: Vec<ProjectLine>,
}

impl ProjectDraft {
    /// Checks run in this order; the first failure wins
    pub fn validate(&self) -> Result<(), ProjectFormError> {
        if self.project_number.trim().is_empty() {
            return Err(ProjectFormError::MissingProjectNumber);
        }
        if self.workers.is_empty() {
            return Err(ProjectFormError::NoWorkers);
        }
        if self.start_date.trim().is_empty() || self.end_date.trim().is_empty() {
            return Err(ProjectFormError::MissingDates);
        }
        if self.items.is_empty() {
            return Err(ProjectFormError::NoItems);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProjectResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Start today, end a week later, as `YYYY-MM-DD`
pub fn default_dates(today: NaiveDate) -> (String, String) {
    let end = today.checked_add_days(Days::new(7)).unwrap_or(today);
    (
        today.format("%Y-%m-%d").to_string(),
        end.format("%Y-%m-%d").to_string(),
    )
}

/// Case-insensitive substring match on name or username
pub fn filter_workers(all: &[Worker], term: &str) -> Vec<Worker> {
    let term = term.trim().to_lowercase();
    all.iter()
        .filter(|w| {
            w.username.to_lowercase().contains(&term)
                || w.name.as_deref().is_some_and(|n| n.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}

pub fn is_selected(selected: &[Worker], username: &str) -> bool {
    selected.iter().any(|w| w.username == username)
}

pub fn toggle_worker(selected: &mut Vec<Worker>, worker: &Worker) {
    match selected.iter().position(|w| w.username == worker.username) {
        Some(pos) => {
            selected.remove(pos);
        }
        None => selected.push(worker.clone()),
    }
}

pub fn remove_worker(selected: &mut Vec<Worker>, username: &str) {
    selected.retain(|w| w.username != username);
}

/// Catalog matches for the item box; `None` hides the results list
pub fn search_catalog(all: &[CatalogItem], query: &str) -> Option<Vec<CatalogItem>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    Some(
        all.iter()
            .filter(|i| !i.product_name.is_empty() && i.product_name.to_lowercase().contains(&query))
            .cloned()
            .collect(),
    )
}

/// Resolve `name` exactly (ignoring case) and add it, bumping an existing line
pub fn add_project_item(
    lines: &mut Vec<ProjectLine>,
    catalog: &[CatalogItem],
    name: &str,
) -> Result<(), ProjectFormError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProjectFormError::NoItemSelected);
    }
    let wanted = name.to_lowercase();
    let matched = catalog
        .iter()
        .find(|i| !i.product_name.is_empty() && i.product_name.to_lowercase() == wanted)
        .ok_or(ProjectFormError::UnknownItem)?;

    match lines.iter_mut().find(|l| l.item_id == matched.article_number) {
        Some(line) => line.quantity = line.quantity.saturating_add(1),
        None => lines.push(ProjectLine {
            item_id: matched.article_number.clone(),
            item_name: matched.product_name.clone(),
            quantity: 1,
        }),
    }
    Ok(())
}

pub fn set_project_quantity(lines: &mut [ProjectLine], index: usize, raw: &str) {
    if let Some(line) = lines.get_mut(index) {
        line.quantity = clamp_quantity(raw);
    }
}

pub fn remove_project_item(lines: &mut Vec<ProjectLine>, index: usize) {
    if index < lines.len() {
        lines.remove(index);
    }
}
