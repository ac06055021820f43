//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{domain::chain::ChainSpec, error::EngineError};

/// 引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<CurrencyConfig>,
    #[serde(default)]
    pub explorer: ExplorerConfig,
    /// 额外注册的币种（默认已有 BTC / RBTC / RIF / DOC）
    #[serde(default)]
    pub chains: Vec<ChainSpec>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 展示精度配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 币种 → 展示小数位
    #[serde(default)]
    pub symbol_decimal_places: HashMap<String, u32>,
    /// 未配置币种的展示小数位
    pub default_decimal_places: u32,
    /// 法币资产价值的小数位
    pub asset_value_decimal_places: u32,
}

/// 法币配置（名称 + 符号）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub name: String,
    pub symbol: String,
}

/// 区块浏览器交易链接前缀
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub btc_mainnet: String,
    pub btc_testnet: String,
    pub rbtc_mainnet: String,
    pub rbtc_testnet: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

impl DisplayConfig {
    /// 内置默认值（不读环境变量）
    pub fn builtin() -> Self {
        let symbol_decimal_places = [("BTC", 8), ("RBTC", 6), ("RIF", 2), ("DOC", 2)]
            .into_iter()
            .map(|(symbol, places)| (symbol.to_string(), places))
            .collect();

        Self {
            symbol_decimal_places,
            default_decimal_places: 4,
            asset_value_decimal_places: 2,
        }
    }
}

/// 解析 "BTC:8,RBTC:6" 形式的精度配置，非法项跳过
pub fn parse_symbol_decimal_places(raw: &str) -> HashMap<String, u32> {
    raw.split(',')
        .filter_map(|item| {
            let (symbol, places) = item.split_once(':')?;
            let symbol = symbol.trim();
            if symbol.is_empty() {
                return None;
            }
            match places.trim().parse::<u32>() {
                Ok(places) => Some((symbol.to_uppercase(), places)),
                Err(_) => {
                    tracing::warn!("Ignoring invalid decimal places entry: {}", item);
                    None
                }
            }
        })
        .collect()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let builtin = Self::builtin();
        Self {
            symbol_decimal_places: std::env::var("SYMBOL_DECIMAL_PLACES")
                .ok()
                .map(|raw| parse_symbol_decimal_places(&raw))
                .filter(|places| !places.is_empty())
                .unwrap_or(builtin.symbol_decimal_places),
            default_decimal_places: std::env::var("DEFAULT_DECIMAL_PLACES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(builtin.default_decimal_places),
            asset_value_decimal_places: std::env::var("ASSET_VALUE_DECIMAL_PLACES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(builtin.asset_value_decimal_places),
        }
    }
}

/// 默认法币列表，第一个为默认币种
pub fn default_currencies() -> Vec<CurrencyConfig> {
    [
        ("USD", "$"),
        ("RMB", "￥"),
        ("ARS", "ARS$"),
        ("KRW", "₩"),
        ("JPY", "￥"),
        ("GBP", "£"),
        ("EUR", "€"),
    ]
    .into_iter()
    .map(|(name, symbol)| CurrencyConfig {
        name: name.to_string(),
        symbol: symbol.to_string(),
    })
    .collect()
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            btc_mainnet: std::env::var("BTC_EXPLORER_MAINNET")
                .unwrap_or_else(|_| "https://live.blockcypher.com/btc/tx".into()),
            btc_testnet: std::env::var("BTC_EXPLORER_TESTNET")
                .unwrap_or_else(|_| "https://live.blockcypher.com/btc-testnet/tx".into()),
            rbtc_mainnet: std::env::var("RBTC_EXPLORER_MAINNET")
                .unwrap_or_else(|_| "https://explorer.rsk.co/tx".into()),
            rbtc_testnet: std::env::var("RBTC_EXPLORER_TESTNET")
                .unwrap_or_else(|_| "https://explorer.testnet.rsk.co/tx".into()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            currencies: default_currencies(),
            explorer: ExplorerConfig::default(),
            chains: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self::default())
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: EngineConfig =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                config = Self::from_file(path)?;
            } else {
                tracing::warn!(
                    "Config file {:?} not found, using environment defaults",
                    path.as_ref()
                );
            }
        }

        Ok(config)
    }

    /// 加载 `.env`，再按 `CONFIG_PATH` 合并配置文件，最后校验
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config_path = std::env::var("CONFIG_PATH").ok();
        let config = Self::from_env_and_file(config_path.as_deref())?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        // 验证日志格式
        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        if self.currencies.is_empty() {
            anyhow::bail!("At least one currency must be configured");
        }

        // 超过 18 位的展示精度没有意义（账户模型基础单位就是 18 位）
        let too_precise = self
            .display
            .symbol_decimal_places
            .iter()
            .find(|(_, places)| **places > 18);
        if let Some((symbol, places)) = too_precise {
            anyhow::bail!(EngineError::Config(format!(
                "decimal places for {} must be <= 18, got {}",
                symbol, places
            )));
        }
        if self.display.default_decimal_places > 18 || self.display.asset_value_decimal_places > 18 {
            anyhow::bail!(EngineError::Config("decimal places must be <= 18".into()));
        }

        for spec in &self.chains {
            if spec.symbol.trim().is_empty() {
                anyhow::bail!(EngineError::Config("chain symbol cannot be empty".into()));
            }
        }

        Ok(())
    }

    /// 法币符号（"USD" → "$"），未知币种回退到第一个配置的法币符号
    pub fn currency_symbol(&self, currency: &str) -> &str {
        self.currencies
            .iter()
            .find(|c| c.name == currency)
            .or_else(|| self.currencies.first())
            .map(|c| c.symbol.as_str())
            .unwrap_or("")
    }

    /// 所有法币名称
    pub fn currency_names(&self) -> Vec<&str> {
        self.currencies.iter().map(|c| c.name.as_str()).collect()
    }
}
