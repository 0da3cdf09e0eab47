pub mod layout;
pub mod results;

pub use results::{index_page, results_page};
