use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::error::{LookupError, Result};

/// Ordered mapping of extracted field names to their values, as returned
/// by the extraction collaborator. Keys are unique; iteration order is
/// the order the collaborator reported the fields in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    fields: Vec<(String, String)>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Insert a field, replacing the value in place if the key already
    /// exists so keys stay unique without disturbing the order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build from the collaborator's JSON payload, which must be a single
    /// object. Member order is preserved.
    pub fn from_json_object(value: &serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(members) = value else {
            return Err(LookupError::ProcessingError {
                message: format!(
                    "extraction payload must be a JSON object, got: {}",
                    json_type_name(value)
                ),
            });
        };

        let mut result = Self::new();
        for (key, value) in members {
            result.insert(key.clone(), text_value(value));
        }
        Ok(result)
    }
}

/// One row as returned by the CRM collaborator, column name to value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    fn text_field(&self, name: &str) -> Result<String> {
        self.data
            .get(name)
            .map(text_value)
            .ok_or_else(|| LookupError::TemplateRenderError {
                message: format!("CRM record is missing the '{}' attribute", name),
            })
    }
}

/// A CRM opportunity row with the four attributes the results page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmRecord {
    pub company: String,
    pub premises: String,
    pub stage: String,
    pub invoice: String,
}

impl CrmRecord {
    /// Convert a wire row. A missing attribute is a fatal render error;
    /// the caller must not have emitted any output yet.
    pub fn from_row(row: &Record) -> Result<Self> {
        Ok(Self {
            company: row.text_field("company")?,
            premises: row.text_field("premises")?,
            stage: row.text_field("stage")?,
            invoice: row.text_field("invoice")?,
        })
    }
}

/// Everything the results page needs for one request. Assembled by the
/// engine, consumed by the view, then discarded.
#[derive(Debug, Clone)]
pub struct ResultsPage {
    pub extraction: ExtractionResult,
    pub rows: Vec<Record>,
    pub query: Option<String>,
}

/// Collaborators promise text values but the upstream LLM step emits
/// nulls and the odd number. Nulls become empty strings, other scalars
/// are stringified, nested values stay as compact JSON.
pub(crate) fn text_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_result_preserves_insertion_order() {
        let mut result = ExtractionResult::new();
        result.insert("payee", "Acme Ltd");
        result.insert("amount", "HKD 1,200.00");
        result.insert("invoice", "25-AVS-RES-00109-RN");

        let keys: Vec<&str> = result.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["payee", "amount", "invoice"]);
    }

    #[test]
    fn test_extraction_result_insert_replaces_duplicate_key_in_place() {
        let mut result = ExtractionResult::new();
        result.insert("invoice", "OLD");
        result.insert("payee", "Acme Ltd");
        result.insert("invoice", "NEW");

        assert_eq!(result.len(), 2);
        assert_eq!(result.get("invoice"), Some("NEW"));
        let keys: Vec<&str> = result.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["invoice", "payee"]);
    }

    #[test]
    fn test_from_json_object_keeps_member_order_and_stringifies() {
        let payload = serde_json::json!({
            "date": "2025-07-09",
            "amount": 1200,
            "payee": null,
            "invoice": "INV-1"
        });

        let result = ExtractionResult::from_json_object(&payload).unwrap();

        let entries: Vec<(&str, &str)> = result.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("date", "2025-07-09"),
                ("amount", "1200"),
                ("payee", ""),
                ("invoice", "INV-1"),
            ]
        );
    }

    #[test]
    fn test_from_json_object_rejects_non_object_payload() {
        let err = ExtractionResult::from_json_object(&serde_json::json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_crm_record_from_complete_row() {
        let mut data = HashMap::new();
        data.insert("company".to_string(), serde_json::json!("Acme Ltd"));
        data.insert("premises".to_string(), serde_json::json!("12/F Tower A"));
        data.insert("stage".to_string(), serde_json::json!("Won"));
        data.insert("invoice".to_string(), serde_json::json!("INV-1"));

        let record = CrmRecord::from_row(&Record { data }).unwrap();
        assert_eq!(record.company, "Acme Ltd");
        assert_eq!(record.invoice, "INV-1");
    }

    #[test]
    fn test_crm_record_missing_attribute_is_render_error() {
        let mut data = HashMap::new();
        data.insert("company".to_string(), serde_json::json!("Acme Ltd"));
        // premises, stage, invoice absent

        let err = CrmRecord::from_row(&Record { data }).unwrap_err();
        match err {
            LookupError::TemplateRenderError { message } => {
                assert!(message.contains("premises"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
