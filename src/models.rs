//! Frontend Models
//!
//! Data structures matching backend payloads, plus the workflow-local line item.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Catalog item (matches backend row; read-only on the client)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_required_string")]
    pub article_number: String,
    #[serde(default, deserialize_with = "lenient_required_string")]
    pub product_name: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub product_image_url: Option<String>,
}

impl CatalogItem {
    /// Key deciding whether two entries are the same product.
    /// Article number when present, otherwise the row id.
    pub fn dedup_key(&self) -> Option<&str> {
        let article = self.article_number.trim();
        if !article.is_empty() {
            return Some(article);
        }
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    pub fn same_product(&self, other: &CatalogItem) -> bool {
        match (self.dedup_key(), other.dedup_key()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn image_or_placeholder(&self) -> &str {
        self.product_image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(crate::config::PLACEHOLDER_IMAGE)
    }
}

/// Return sub-type; only `Returned` puts stock back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    #[default]
    Returned,
    Broken,
    Used,
}

impl ReturnType {
    pub const ALL: [ReturnType; 3] = [ReturnType::Returned, ReturnType::Broken, ReturnType::Used];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnType::Returned => "returned",
            ReturnType::Broken => "broken",
            ReturnType::Used => "used",
        }
    }

    /// Parse a select value; anything unknown falls back to `Returned`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "broken" => ReturnType::Broken,
            "used" => ReturnType::Used,
            _ => ReturnType::Returned,
        }
    }

    pub fn applies_to_stock(&self) -> bool {
        matches!(self, ReturnType::Returned)
    }
}

/// One pending entry in a workflow's working set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    #[serde(default = "one", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient_return_type", skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ReturnType>,
}

impl LineItem {
    pub fn new(item: CatalogItem, quantity: u32, return_type: Option<ReturnType>) -> Self {
        Self {
            item,
            quantity: quantity.max(1),
            return_type,
        }
    }
}

/// Worker as listed by `/api/get_workers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Worker {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Row of `/api/project_items` and `/api/project_returns`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectItemRow {
    #[serde(default, deserialize_with = "lenient_required_string")]
    pub item_id: String,
    #[serde(default, deserialize_with = "lenient_required_string")]
    pub item_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub available: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
}

/// Body of the project-items endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectItemsResponse {
    #[serde(default)]
    pub items: Option<Vec<ProjectItemRow>>,
    #[serde(default)]
    pub error: Option<String>,
}

fn one() -> u32 {
    1
}

/// Parse user or backend input as a quantity, clamped to at least 1
pub fn clamp_quantity(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let parsed = trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64));
    match parsed {
        Some(n) if n >= 1 => n.min(u32::MAX as i64) as u32,
        _ => 1,
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Sheet-backed rows mix numbers and strings; accept both
fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(value_to_string(Value::deserialize(de)?))
}

fn lenient_required_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(value_to_string(Value::deserialize(de)?).unwrap_or_default())
}

fn lenient_quantity<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    Ok(value_to_string(Value::deserialize(de)?)
        .map(|s| clamp_quantity(&s))
        .unwrap_or(1))
}

fn lenient_return_type<'de, D: Deserializer<'de>>(de: D) -> Result<Option<ReturnType>, D::Error> {
    Ok(value_to_string(Value::deserialize(de)?).map(|s| ReturnType::parse(&s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_item_accepts_numeric_fields() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"id": 7, "article_number": 1002, "product_name": "Drill", "stock": 4, "location": null}"#,
        )
        .unwrap();
        assert_eq!(item.id.as_deref(), Some("7"));
        assert_eq!(item.article_number, "1002");
        assert_eq!(item.stock.as_deref(), Some("4"));
        assert_eq!(item.location, None);
    }

    #[test]
    fn test_dedup_key_prefers_article() {
        let item = CatalogItem {
            id: Some("9".to_string()),
            article_number: "A1".to_string(),
            ..Default::default()
        };
        assert_eq!(item.dedup_key(), Some("A1"));

        let no_article = CatalogItem { id: Some("9".to_string()), ..Default::default() };
        assert_eq!(no_article.dedup_key(), Some("9"));
        assert_eq!(CatalogItem::default().dedup_key(), None);
    }

    #[test]
    fn test_items_without_key_are_never_the_same() {
        assert!(!CatalogItem::default().same_product(&CatalogItem::default()));
    }

    #[test]
    fn test_return_type_parse_falls_back() {
        assert_eq!(ReturnType::parse("broken"), ReturnType::Broken);
        assert_eq!(ReturnType::parse(" USED "), ReturnType::Used);
        assert_eq!(ReturnType::parse("lost"), ReturnType::Returned);
        assert_eq!(ReturnType::parse(""), ReturnType::Returned);
        assert!(ReturnType::Returned.applies_to_stock());
        assert!(!ReturnType::Broken.applies_to_stock());
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity("5"), 5);
        assert_eq!(clamp_quantity("0"), 1);
        assert_eq!(clamp_quantity("-3"), 1);
        assert_eq!(clamp_quantity("abc"), 1);
        assert_eq!(clamp_quantity(""), 1);
        assert_eq!(clamp_quantity("2.7"), 2);
    }

    #[test]
    fn test_line_item_restores_string_quantity() {
        let line: LineItem = serde_json::from_str(
            r#"{"article_number": "A1", "product_name": "Tape", "quantity": "3", "return_type": "used"}"#,
        )
        .unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.return_type, Some(ReturnType::Used));
        assert_eq!(line.item.article_number, "A1");
    }

    #[test]
    fn test_worker_display_name() {
        let w = Worker { username: "jdoe".to_string(), name: None };
        assert_eq!(w.display_name(), "jdoe");
        let w = Worker { username: "jdoe".to_string(), name: Some("Jo Doe".to_string()) };
        assert_eq!(w.display_name(), "Jo Doe");
    }
}
