pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod view;
pub mod web;

pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::engine::LookupEngine;
pub use utils::error::{LookupError, Result};
