pub mod engine;

pub use crate::domain::model::{CrmRecord, ExtractionResult, Record, ResultsPage};
pub use crate::domain::ports::{ConfigProvider, CrmLookup, FieldExtractor};
pub use crate::utils::error::Result;
