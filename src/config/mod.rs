pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5002";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "invoice-lookup")]
#[command(about = "Serves the payment advice lookup page backed by extraction and CRM services")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: String,

    #[arg(long, default_value = "http://127.0.0.1:7801/extract")]
    pub extractor_endpoint: String,

    #[arg(long, default_value = "http://127.0.0.1:7802/opportunities")]
    pub crm_endpoint: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    #[arg(long, help = "Path to a TOML configuration file replacing the flags above")]
    pub config_file: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system resource monitoring")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    fn extractor_endpoint(&self) -> &str {
        &self.extractor_endpoint
    }

    fn crm_endpoint(&self) -> &str {
        &self.crm_endpoint
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_seconds
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_bind_addr("bind_addr", &self.bind_addr)?;
        validation::validate_url("extractor_endpoint", &self.extractor_endpoint)?;
        validation::validate_url("crm_endpoint", &self.crm_endpoint)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            extractor_endpoint: "http://127.0.0.1:7801/extract".to_string(),
            crm_endpoint: "http://127.0.0.1:7802/opportunities".to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            config_file: None,
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_default_style_config_validates() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut config = base_config();
        config.crm_endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = base_config();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
