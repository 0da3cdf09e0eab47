use crate::core::{CrmLookup, ExtractionResult, FieldExtractor, ResultsPage};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives one lookup: extract fields from the document, derive the
/// invoice query, search the CRM, and hand the assembled page model to
/// the caller. Holds no per-request state.
pub struct LookupEngine<E: FieldExtractor, C: CrmLookup> {
    extractor: E,
    crm: C,
    monitor: SystemMonitor,
}

impl<E: FieldExtractor, C: CrmLookup> LookupEngine<E, C> {
    pub fn new(extractor: E, crm: C) -> Self {
        Self::new_with_monitoring(extractor, crm, false)
    }

    pub fn new_with_monitoring(extractor: E, crm: C, monitor_enabled: bool) -> Self {
        Self {
            extractor,
            crm,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self, document_ref: &str) -> Result<ResultsPage> {
        tracing::info!("🚀 Starting lookup for document: {}", document_ref);

        let extraction = self.extractor.extract_fields(document_ref).await?;
        tracing::info!("📋 Extracted {} field(s)", extraction.len());

        let query = derive_query(&extraction);

        let rows = match query.as_deref() {
            Some(invoice) => {
                tracing::info!("🔍 Searching CRM for invoice: {}", invoice);
                let rows = self.crm.search(invoice).await?;
                tracing::info!("✅ Found {} CRM record(s)", rows.len());
                rows
            }
            None => {
                tracing::warn!("No invoice number among extracted fields, skipping CRM search");
                Vec::new()
            }
        };

        self.monitor.log_stats("Lookup complete");

        Ok(ResultsPage {
            extraction,
            rows,
            query,
        })
    }
}

/// 從擷取欄位推導 CRM 查詢值
fn derive_query(extraction: &ExtractionResult) -> Option<String> {
    ["invoice", "invoice_number"]
        .into_iter()
        .filter_map(|key| extraction.get(key))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
