//! Catalog record ingestion.
//!
//! The catalog collaborator serializes decimals inconsistently (`"12.50"`
//! from the ordering backend, `12.5` from hand-written fixtures), so price
//! is coerced here. Records that cannot become a valid [`MenuItem`] are
//! skipped and logged rather than failing the whole menu.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use forkful_core::{Category, MenuItem, MenuItemId, Price};

use super::CatalogError;

/// One record as the collaborator sends it.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: i64,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price: Value,
    #[serde(default)]
    image: Option<String>,
    category: Category,
    #[serde(default = "default_available")]
    available: bool,
    #[serde(default)]
    rating: Option<f32>,
}

const fn default_available() -> bool {
    true
}

/// Reasons a single record is skipped.
#[derive(Debug, thiserror::Error)]
enum RecordError {
    #[error("missing price")]
    MissingPrice,
    #[error("unusable price {0}")]
    BadPrice(String),
}

fn coerce_price(value: &Value) -> Result<Price, RecordError> {
    let text = match value {
        Value::Null => return Err(RecordError::MissingPrice),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        other => return Err(RecordError::BadPrice(other.to_string())),
    };
    Price::parse(&text).map_err(|_| RecordError::BadPrice(text))
}

impl CatalogRecord {
    fn into_item(self) -> Result<MenuItem, RecordError> {
        let price = coerce_price(&self.price)?;
        Ok(MenuItem {
            id: MenuItemId::new(self.id),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            image: self
                .image
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            category: self.category,
            available: self.available,
            // Unrated items come through as 0
            rating: self.rating.filter(|r| r.is_finite() && *r > 0.0),
        })
    }
}

/// Parse a catalog payload: a JSON array of menu records.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the payload is not a JSON array.
/// Individual bad records are skipped, not errors.
pub fn ingest(payload: &str) -> Result<Vec<MenuItem>, CatalogError> {
    let records: Vec<Value> = serde_json::from_str(payload)?;
    let mut seen = HashSet::with_capacity(records.len());
    let mut items = Vec::with_capacity(records.len());

    for (index, raw) in records.into_iter().enumerate() {
        let record = match serde_json::from_value::<CatalogRecord>(raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed catalog record");
                continue;
            }
        };

        let id = record.id;
        match record.into_item() {
            Ok(item) if seen.insert(item.id) => items.push(item),
            Ok(_) => tracing::warn!(id, "Skipping duplicate catalog record"),
            Err(e) => tracing::warn!(id, error = %e, "Skipping catalog record"),
        }
    }

    Ok(items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_string_and_number_prices() {
        let items = ingest(
            r#"[
                {"id": 1, "name": "A", "price": "12.50", "category": "pizza"},
                {"id": 2, "name": "B", "price": 12.5, "category": "burger"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].price, Price::from_cents(1250));
        assert_eq!(items[1].price, Price::from_cents(1250));
        assert!(items[0].available);
    }

    #[test]
    fn test_bad_prices_are_skipped() {
        let items = ingest(
            r#"[
                {"id": 1, "name": "Negative", "price": "-1.00", "category": "pizza"},
                {"id": 2, "name": "Garbage", "price": "abc", "category": "pizza"},
                {"id": 3, "name": "Missing", "category": "pizza"},
                {"id": 4, "name": "Object", "price": {"amount": 1}, "category": "pizza"},
                {"id": 5, "name": "Fine", "price": "3.00", "category": "pizza"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Fine");
    }

    #[test]
    fn test_malformed_and_duplicate_records_are_skipped() {
        let items = ingest(
            r#"[
                {"name": "No id", "price": "1.00", "category": "pizza"},
                {"id": 1, "name": "First", "price": "1.00", "category": "dessert"},
                {"id": 1, "name": "Second", "price": "2.00", "category": "dessert"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "First");
    }

    #[test]
    fn test_field_normalization() {
        let items = ingest(
            r#"[{"id": 1, "name": " Soup ", "price": 4, "category": "tapas",
                 "image": "", "available": false, "rating": 0}]"#,
        )
        .unwrap();

        let soup = &items[0];
        assert_eq!(soup.name, "Soup");
        assert_eq!(soup.category, Category::Other);
        assert_eq!(soup.image, None);
        assert!(!soup.available);
        assert_eq!(soup.rating, None);
    }

    #[test]
    fn test_non_array_payload_is_an_error() {
        assert!(matches!(
            ingest(r#"{"detail": "Not found."}"#),
            Err(CatalogError::Parse(_))
        ));
    }
}
