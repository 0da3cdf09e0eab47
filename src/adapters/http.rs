use crate::core::{CrmLookup, ExtractionResult, FieldExtractor, Record};
use crate::domain::model::json_type_name;
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client for the extraction collaborator. POSTs the document
/// reference and receives one JSON object of extracted fields whose
/// member order is meaningful.
pub struct HttpFieldExtractor {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl HttpFieldExtractor {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            endpoint,
            timeout,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl FieldExtractor for HttpFieldExtractor {
    async fn extract_fields(&self, document_ref: &str) -> Result<ExtractionResult> {
        tracing::debug!("Requesting field extraction from: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&serde_json::json!({ "document": document_ref }))
            .send()
            .await?;

        tracing::debug!("Extraction response status: {}", response.status());
        let payload: serde_json::Value = response.error_for_status()?.json().await?;

        ExtractionResult::from_json_object(&payload)
    }
}

/// HTTP client for the CRM search collaborator. GETs matching rows as a
/// JSON array of objects, order = relevance order.
pub struct HttpCrmLookup {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl HttpCrmLookup {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            endpoint,
            timeout,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CrmLookup for HttpCrmLookup {
    async fn search(&self, invoice: &str) -> Result<Vec<Record>> {
        tracing::debug!("Searching CRM at {} for invoice {}", self.endpoint, invoice);

        let response = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .query(&[("invoice", invoice)])
            .send()
            .await?;

        tracing::debug!("CRM response status: {}", response.status());
        let payload: serde_json::Value = response.error_for_status()?.json().await?;

        let items = match payload {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(LookupError::ProcessingError {
                    message: format!(
                        "CRM payload must be a JSON array, got: {}",
                        json_type_name(&other)
                    ),
                });
            }
        };

        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            match item {
                serde_json::Value::Object(members) => {
                    let mut data = HashMap::new();
                    for (key, value) in members {
                        data.insert(key, value);
                    }
                    rows.push(Record { data });
                }
                other => {
                    return Err(LookupError::ProcessingError {
                        message: format!(
                            "CRM rows must be JSON objects, got: {}",
                            json_type_name(&other)
                        ),
                    });
                }
            }
        }

        Ok(rows)
    }
}
