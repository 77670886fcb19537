use crate::core::ConfigProvider;
use crate::utils::error::{NumcheckError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub validator: ValidatorConfig,
    pub presenter: PresenterConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Jsonl,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub data_dir: String,
    pub generated_collection: String,
    pub validation_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::Jsonl,
            data_dir: "./data".to_string(),
            generated_collection: "generated_numbers".to_string(),
            validation_collection: "validation_results".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub bind: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5001".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    pub bind: String,
    pub validator_url: String,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            validator_url: "http://127.0.0.1:5001/validate".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NumcheckError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用預設值
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NumcheckError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${VALIDATOR_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NumcheckError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_socket_addr("validator.bind", &self.validator.bind)?;
        validation::validate_socket_addr("presenter.bind", &self.presenter.bind)?;
        validation::validate_url("presenter.validator_url", &self.presenter.validator_url)?;

        if self.store.kind == StoreKind::Jsonl {
            validation::validate_path("store.data_dir", &self.store.data_dir)?;
        }
        validation::validate_non_empty_string(
            "store.generated_collection",
            &self.store.generated_collection,
        )?;
        validation::validate_non_empty_string(
            "store.validation_collection",
            &self.store.validation_collection,
        )?;

        if crate::utils::logger::LogFormat::from_name(&self.logging.format).is_none() {
            return Err(NumcheckError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: self.logging.format.clone(),
                reason: "Valid formats: compact, json".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for StoreConfig {
    fn generated_collection(&self) -> &str {
        &self.generated_collection
    }

    fn validation_collection(&self) -> &str {
        &self.validation_collection
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
