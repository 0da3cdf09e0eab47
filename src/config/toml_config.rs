use crate::config::{DEFAULT_BIND_ADDR, DEFAULT_TIMEOUT_SECS};
use crate::core::ConfigProvider;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub extractor: Option<CollaboratorConfig>,
    pub crm: Option<CollaboratorConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub bind_addr: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorConfig {
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LookupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CRM_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let extractor = validation::validate_required_field("extractor", &self.extractor)?;
        validation::validate_url("extractor.endpoint", &extractor.endpoint)?;

        let crm = validation::validate_required_field("crm", &self.crm)?;
        validation::validate_url("crm.endpoint", &crm.endpoint)?;

        validation::validate_non_empty_string("service.name", &self.service.name)?;

        if let Some(bind_addr) = &self.service.bind_addr {
            validation::validate_bind_addr("service.bind_addr", bind_addr)?;
        }

        if let Some(timeout) = self.service.timeout_seconds {
            validation::validate_positive_number("service.timeout_seconds", timeout as usize, 1)?;
        }

        Ok(())
    }
}

// Accessors assume validate_config ran at startup; the empty-string
// fallbacks are unreachable after that.
impl ConfigProvider for TomlConfig {
    fn bind_addr(&self) -> &str {
        self.service.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    fn extractor_endpoint(&self) -> &str {
        self.extractor.as_ref().map(|c| c.endpoint.as_str()).unwrap_or("")
    }

    fn crm_endpoint(&self) -> &str {
        self.crm.as_ref().map(|c| c.endpoint.as_str()).unwrap_or("")
    }

    fn request_timeout_secs(&self) -> u64 {
        self.service.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
