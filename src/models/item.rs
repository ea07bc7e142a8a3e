// src/models/item.rs

//! Catalog item data structure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog entry as read from a snapshot.
///
/// The original JSON object is kept alongside the extracted fields so that
/// items written to the output files are the input records, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Item {
    title: String,
    details: Vec<String>,
    price: String,
    record: Map<String, Value>,
}

impl Item {
    /// Build an item from its three compared fields.
    pub fn new(
        title: impl Into<String>,
        details: impl IntoIterator<Item = impl Into<String>>,
        price: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let details: Vec<String> = details.into_iter().map(Into::into).collect();
        let price = price.into();

        let mut record = Map::new();
        record.insert("title".into(), Value::String(title.clone()));
        record.insert(
            "details".into(),
            Value::Array(details.iter().cloned().map(Value::String).collect()),
        );
        record.insert("price".into(), Value::String(price.clone()));

        Self {
            title,
            details,
            price,
            record,
        }
    }

    /// Item title as written in the snapshot (empty when absent).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text details (empty when absent).
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Price string as written in the snapshot (empty when absent).
    pub fn price(&self) -> &str {
        &self.price
    }
}

impl TryFrom<Map<String, Value>> for Item {
    type Error = String;

    fn try_from(record: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let title = string_field(&record, "title")?;
        let price = string_field(&record, "price")?;

        let details = match record.get("details") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(values)) => values
                .iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(format!("'details' entries must be strings, found {other}")),
                })
                .collect::<std::result::Result<_, _>>()?,
            Some(other) => return Err(format!("'details' must be an array, found {other}")),
        };

        Ok(Self {
            title,
            details,
            price,
            record,
        })
    }
}

impl From<Item> for Map<String, Value> {
    fn from(item: Item) -> Self {
        item.record
    }
}

/// Read a string field, defaulting absent/null to "".
///
/// Numbers are accepted as their JSON text, since prices are sometimes
/// exported unquoted.
fn string_field(record: &Map<String, Value>, key: &str) -> std::result::Result<String, String> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(format!("'{key}' must be a string, found {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        let item: Item = serde_json::from_value(json!({})).unwrap();
        assert_eq!(item.title(), "");
        assert!(item.details().is_empty());
        assert_eq!(item.price(), "");
    }

    #[test]
    fn test_null_fields_default() {
        let item: Item =
            serde_json::from_value(json!({"title": null, "details": null, "price": null}))
                .unwrap();
        assert_eq!(item.title(), "");
        assert!(item.details().is_empty());
    }

    #[test]
    fn test_numeric_price_is_accepted() {
        let item: Item = serde_json::from_value(json!({"title": "Pizza", "price": 1500})).unwrap();
        assert_eq!(item.price(), "1500");
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        assert!(serde_json::from_value::<Item>(json!({"title": ["x"]})).is_err());
        assert!(serde_json::from_value::<Item>(json!({"details": "x"})).is_err());
        assert!(serde_json::from_value::<Item>(json!({"details": [1]})).is_err());
        assert!(serde_json::from_value::<Item>(json!("not an object")).is_err());
    }

    #[test]
    fn test_serializes_source_record_verbatim() {
        let source = json!({
            "title": "Empanada",
            "category": "Entradas",
            "price": "$ 900",
            "image": null
        });
        let item: Item = serde_json::from_value(source.clone()).unwrap();

        // No `details` key is invented on the way out.
        assert_eq!(serde_json::to_value(&item).unwrap(), source);
    }

    #[test]
    fn test_new_builds_matching_record() {
        let item = Item::new("Pizza", ["muzzarella"], "1000");
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"title": "Pizza", "details": ["muzzarella"], "price": "1000"})
        );
    }
}
