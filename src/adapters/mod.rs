// Adapters layer: concrete implementations for the external collaborators.

pub mod http;

pub use http::{HttpCrmLookup, HttpFieldExtractor};
