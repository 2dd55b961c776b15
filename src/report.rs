//! Issue Report
//!
//! Builds the multipart fields for reporting a problem with one article.

use thiserror::Error;

use crate::models::CatalogItem;
use crate::notify::Notification;

/// Checkbox values and labels
pub const ISSUE_TYPES: &[(&str, &str)] = &[
    ("damaged", "Damaged"),
    ("missing", "Missing"),
    ("wrong_label", "Wrong label"),
    ("other", "Other"),
];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    #[error("Please choose an article in order to proceed.")]
    NoItem,
    #[error("Issue type not selected, please select issue type.")]
    NoIssueType,
}

impl ReportError {
    pub fn notification(&self) -> Notification {
        let title = match self {
            ReportError::NoItem => "Choose Article",
            ReportError::NoIssueType => "Issue Type",
        };
        Notification::warning(title, self.to_string())
    }
}

/// Text fields of the `/report` form; the photo is attached separately
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReport {
    pub article_number: String,
    pub issues: Vec<String>,
    pub comment: String,
    pub count: String,
}

impl IssueReport {
    pub fn issues_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.issues)
    }
}

pub fn build_report(
    selected: Option<&CatalogItem>,
    checked: &[String],
    comment: &str,
    count: &str,
) -> Result<IssueReport, ReportError> {
    let item = selected.ok_or(ReportError::NoItem)?;
    if checked.is_empty() {
        return Err(ReportError::NoIssueType);
    }

    let comment = comment.trim();
    let issues = checked
        .iter()
        .map(|issue| {
            if issue == "other" && !comment.is_empty() {
                format!("other: {}", comment)
            } else {
                issue.clone()
            }
        })
        .collect();

    let count = count.trim();
    Ok(IssueReport {
        article_number: item.article_number.clone(),
        issues,
        comment: comment.to_string(),
        count: if count.is_empty() { "1".to_string() } else { count.to_string() },
    })
}

/// Toggle a checkbox value, keeping declaration order
pub fn toggle_issue(checked: &mut Vec<String>, value: &str) {
    if let Some(pos) = checked.iter().position(|c| c == value) {
        checked.remove(pos);
        return;
    }
    checked.push(value.to_string());
    checked.sort_by_key(|c| ISSUE_TYPES.iter().position(|(v, _)| v == c));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> CatalogItem {
        CatalogItem {
            article_number: "A1".to_string(),
            product_name: "Drill".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_requires_item_then_issue() {
        assert_eq!(build_report(None, &[], "", ""), Err(ReportError::NoItem));
        assert_eq!(build_report(Some(&item()), &[], "", ""), Err(ReportError::NoIssueType));
    }

    #[test]
    fn test_other_takes_comment() {
        let checked = vec!["damaged".to_string(), "other".to_string()];
        let report = build_report(Some(&item()), &checked, " cracked lid ", "").unwrap();
        assert_eq!(report.issues, vec!["damaged", "other: cracked lid"]);
        assert_eq!(report.count, "1");
        assert_eq!(report.issues_json().unwrap(), r#"["damaged","other: cracked lid"]"#);
    }

    #[test]
    fn test_other_without_comment_stays_plain() {
        let report = build_report(Some(&item()), &["other".to_string()], "", "3").unwrap();
        assert_eq!(report.issues, vec!["other"]);
        assert_eq!(report.count, "3");
    }

    #[test]
    fn test_toggle_issue_keeps_order() {
        let mut checked = Vec::new();
        toggle_issue(&mut checked, "other");
        toggle_issue(&mut checked, "damaged");
        assert_eq!(checked, vec!["damaged", "other"]);
        toggle_issue(&mut checked, "damaged");
        assert_eq!(checked, vec!["other"]);
    }

    #[test]
    fn test_error_notification_titles() {
        assert_eq!(ReportError::NoItem.notification().title, "Choose Article");
        assert_eq!(ReportError::NoIssueType.notification().title, "Issue Type");
    }
}
