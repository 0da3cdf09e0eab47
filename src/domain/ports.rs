use crate::domain::model::{ExtractionResult, Record};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The OCR/LLM extraction collaborator: turns a document reference into
/// an ordered field mapping.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    async fn extract_fields(&self, document_ref: &str) -> Result<ExtractionResult>;
}

/// The CRM search collaborator: matching opportunity rows for an invoice
/// number, in relevance order.
#[async_trait]
pub trait CrmLookup: Send + Sync {
    async fn search(&self, invoice: &str) -> Result<Vec<Record>>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn extractor_endpoint(&self) -> &str;
    fn crm_endpoint(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
    fn monitoring_enabled(&self) -> bool;
}
