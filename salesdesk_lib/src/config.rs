//! Dashboard configuration: an optional YAML file with environment overrides.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use salesdesk_api::types::ApprovalStatus;
use serde::{Deserialize, Deserializer};

use crate::error::DashboardError;
use crate::format::{CurrencyFormat, Grouping};
use crate::validation;
use crate::view::StalePolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Settings for one dashboard session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DashboardConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub default_page_size: i64,
    /// Status the approvals list is filtered to. Matched case-insensitively.
    #[serde(deserialize_with = "approval_status_from_str")]
    pub approval_status: ApprovalStatus,
    pub stale_policy: StalePolicy,
    pub display: DisplayConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            default_page_size: 10,
            approval_status: ApprovalStatus::Pending,
            stale_policy: StalePolicy::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// How amounts are rendered in tables.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub currency_decimals: usize,
    pub grouping: Grouping,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let currency = CurrencyFormat::default();
        Self {
            currency_symbol: currency.symbol,
            currency_decimals: currency.decimals,
            grouping: currency.grouping,
        }
    }
}

impl DisplayConfig {
    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat {
            symbol: self.currency_symbol.clone(),
            decimals: self.currency_decimals,
            grouping: self.grouping,
        }
    }
}

impl DashboardConfig {
    /// Loads the YAML file at `path` (when given) and then applies
    /// `SALESDESK_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, DashboardError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    pub fn from_file(path: &Path) -> Result<Self, DashboardError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, DashboardError> {
        let config: Self = serde_yml::from_str(content)
            .map_err(|e| DashboardError::Config(format!("invalid config: {}", e)))?;
        config.validated()
    }

    fn with_env_overrides(mut self) -> Result<Self, DashboardError> {
        if let Some(url) = env_string("SALESDESK_BASE_URL") {
            self.base_url = url;
        }
        self.timeout_secs = env_parse("SALESDESK_TIMEOUT_SECS", self.timeout_secs);
        self.default_page_size = env_parse("SALESDESK_PAGE_SIZE", self.default_page_size);
        self.stale_policy = env_parse("SALESDESK_STALE_POLICY", self.stale_policy);
        self.validated()
    }

    fn validated(self) -> Result<Self, DashboardError> {
        validation::validate_page_size_option(self.default_page_size)
            .map_err(|e| DashboardError::Config(e.user_message()))?;
        if self.approval_status == ApprovalStatus::Unknown {
            return Err(DashboardError::Config(
                "approval_status must be Pending, Approved or Rejected".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(DashboardError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(DashboardError::Config("base_url must not be empty".to_string()));
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn approval_status_from_str<'de, D>(deserializer: D) -> Result<ApprovalStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<ApprovalStatus>().map_err(|_| {
        serde::de::Error::custom(format!(
            "unknown approval_status '{}', expected Pending, Approved or Rejected",
            raw
        ))
    })
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match env_string(key) {
        Some(val) => val.parse::<T>().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {}={}", key, val);
            default
        }),
        None => default,
    }
}
