use crate::config::{DEFAULT_DECIMALS, DEFAULT_TIMEOUT_SECS, MAX_DECIMALS};
use crate::core::ConfigProvider;
use crate::utils::error::{PetAgeError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub guide: GuideConfig,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuideConfig {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub decimals: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PetAgeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PetAgeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PET_GUIDE_ENDPOINT})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PetAgeError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於設定檔
    #[cfg(feature = "cli")]
    pub fn apply_cli_overrides(&mut self, cli: &crate::config::CliConfig) {
        if let Some(endpoint) = &cli.guide_endpoint {
            self.guide.endpoint = Some(endpoint.clone());
            tracing::debug!("Guide endpoint overridden to: {}", endpoint);
        }
        if cli.no_guide {
            self.guide.enabled = Some(false);
        }
        if let Some(timeout) = cli.timeout_seconds {
            self.guide.timeout_seconds = Some(timeout);
        }
        if let Some(decimals) = cli.decimals {
            self.display.get_or_insert_with(DisplayConfig::default).decimals = Some(decimals);
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(endpoint) = &self.guide.endpoint {
            validate_url("guide.endpoint", endpoint)?;
        }

        if let Some(timeout) = self.guide.timeout_seconds {
            validate_positive_number("guide.timeout_seconds", timeout, 1)?;
        }

        if let Some(decimals) = self.display.as_ref().and_then(|d| d.decimals) {
            validate_range("display.decimals", decimals, 0, MAX_DECIMALS)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn guide_endpoint(&self) -> Option<&str> {
        self.guide.endpoint.as_deref()
    }

    fn guide_enabled(&self) -> bool {
        self.guide.enabled.unwrap_or(true)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.guide.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    fn display_decimals(&self) -> usize {
        self.display
            .as_ref()
            .and_then(|d| d.decimals)
            .unwrap_or(DEFAULT_DECIMALS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
