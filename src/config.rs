use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CALORIE_BUDGET: f64 = 1800.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Notion,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub daily_table: String,
    pub food_table: String,
    pub calorie_budget: f64,
    pub utc_offset_hours: Option<i8>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend = match std::env::var("STORE_BACKEND").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            Ok("notion") | Err(_) => StoreBackend::Notion,
            Ok(other) => anyhow::bail!("unknown STORE_BACKEND {other:?}"),
        };

        let (token, daily_table, food_table) = match backend {
            StoreBackend::Notion => (
                std::env::var("NOTION_TOKEN").context("NOTION_TOKEN")?,
                std::env::var("DAILY_TABLE_ID").context("DAILY_TABLE_ID")?,
                std::env::var("FOOD_TABLE_ID").context("FOOD_TABLE_ID")?,
            ),
            StoreBackend::Memory => (
                String::new(),
                std::env::var("DAILY_TABLE_ID").unwrap_or_else(|_| "daily".into()),
                std::env::var("FOOD_TABLE_ID").unwrap_or_else(|_| "foods".into()),
            ),
        };

        let store = StoreConfig {
            backend,
            base_url: std::env::var("NOTION_BASE_URL")
                .unwrap_or_else(|_| "https://api.notion.com/v1".into()),
            token,
            timeout: Duration::from_secs(
                std::env::var("STORE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(10),
            ),
        };

        Ok(Self {
            store,
            daily_table,
            food_table,
            calorie_budget: std::env::var("CALORIE_BUDGET")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(DEFAULT_CALORIE_BUDGET),
            utc_offset_hours: std::env::var("APP_UTC_OFFSET_HOURS")
                .ok()
                .and_then(|v| v.parse::<i8>().ok()),
        })
    }

    /// In-memory configuration with default tables and budget.
    #[cfg(test)]
    pub fn memory() -> Self {
        Self {
            store: StoreConfig {
                backend: StoreBackend::Memory,
                base_url: String::new(),
                token: String::new(),
                timeout: Duration::from_secs(10),
            },
            daily_table: "daily".into(),
            food_table: "foods".into(),
            calorie_budget: DEFAULT_CALORIE_BUDGET,
            utc_offset_hours: None,
        }
    }
}
