//! 链族与币种注册表
//!
//! 币种 → 链族（UTXO / 账户模型）的映射，决定基础单位精度和地址校验方式。

use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// 链族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChainFamily {
    /// UTXO 模型（Bitcoin），基础单位 satoshi
    Utxo,
    /// 账户模型（RSK / EVM），基础单位 wei
    Account,
}

impl ChainFamily {
    /// 基础单位指数：UTXO = 8，账户模型 = 18
    pub const fn base_unit_exponent(self) -> u32 {
        match self {
            Self::Utxo => 8,
            Self::Account => 18,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utxo => "UTXO",
            Self::Account => "ACCOUNT",
        }
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 网络类型（钱包里的 "Mainnet" / "Testnet"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NetworkSelector {
    #[default]
    Mainnet,
    Testnet,
}

impl NetworkSelector {
    pub fn is_testnet(&self) -> bool {
        matches!(self, Self::Testnet)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "Mainnet",
            Self::Testnet => "Testnet",
        }
    }

    /// 币种全称：测试网加 "Test " 前缀
    pub fn symbol_full_name(&self, symbol: &str) -> String {
        match self {
            Self::Mainnet => symbol.to_string(),
            Self::Testnet => format!("Test {symbol}"),
        }
    }
}

impl fmt::Display for NetworkSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个币种的链配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSpec {
    /// 币种符号（大写）
    pub symbol: String,
    pub family: ChainFamily,
    /// 主网链ID（账户模型校验和使用，UTXO 为 None）
    #[serde(default)]
    pub mainnet_chain_id: Option<u64>,
    /// 测试网链ID
    #[serde(default)]
    pub testnet_chain_id: Option<u64>,
}

impl ChainSpec {
    pub fn utxo(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            family: ChainFamily::Utxo,
            mainnet_chain_id: None,
            testnet_chain_id: None,
        }
    }

    pub fn account(symbol: &str, mainnet_chain_id: u64, testnet_chain_id: u64) -> Self {
        Self {
            symbol: symbol.to_string(),
            family: ChainFamily::Account,
            mainnet_chain_id: Some(mainnet_chain_id),
            testnet_chain_id: Some(testnet_chain_id),
        }
    }

    /// 按网络取链ID
    pub fn chain_id(&self, network: NetworkSelector) -> Option<u64> {
        match network {
            NetworkSelector::Mainnet => self.mainnet_chain_id,
            NetworkSelector::Testnet => self.testnet_chain_id,
        }
    }
}

/// RSK 主网 / 测试网链ID
pub const RSK_MAINNET_CHAIN_ID: u64 = 30;
pub const RSK_TESTNET_CHAIN_ID: u64 = 31;

static DEFAULT_CHAINS: Lazy<Vec<ChainSpec>> = Lazy::new(|| {
    vec![
        ChainSpec::utxo("BTC"),
        ChainSpec::account("RBTC", RSK_MAINNET_CHAIN_ID, RSK_TESTNET_CHAIN_ID),
        ChainSpec::account("RIF", RSK_MAINNET_CHAIN_ID, RSK_TESTNET_CHAIN_ID),
        ChainSpec::account("DOC", RSK_MAINNET_CHAIN_ID, RSK_TESTNET_CHAIN_ID),
    ]
});

/// 币种注册表
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    specs: HashMap<String, ChainSpec>,
}

impl ChainRegistry {
    /// 预置 BTC / RBTC / RIF / DOC
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for spec in DEFAULT_CHAINS.iter() {
            registry.register(spec.clone());
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            specs: HashMap::new(),
        }
    }

    /// 注册（或覆盖）一个币种
    pub fn register(&mut self, spec: ChainSpec) {
        let key = spec.symbol.trim().to_uppercase();
        self.specs.insert(key, spec);
    }

    /// 默认币种 + 额外配置的币种
    pub fn with_extra(extra: &[ChainSpec]) -> Self {
        let mut registry = Self::new();
        for spec in extra {
            registry.register(spec.clone());
        }
        registry
    }

    pub fn get(&self, symbol: &str) -> EngineResult<&ChainSpec> {
        self.specs
            .get(&symbol.trim().to_uppercase())
            .ok_or_else(|| EngineError::UnsupportedSymbol(symbol.to_string()))
    }

    pub fn family(&self, symbol: &str) -> EngineResult<ChainFamily> {
        self.get(symbol).map(|spec| spec.family)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_ok()
    }

    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.specs.values().map(|s| s.symbol.as_str()).collect();
        symbols.sort_unstable();
        symbols
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 钱包身份
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletIdentity {
    pub address: String,
    pub symbol: String,
    pub chain_family: ChainFamily,
    #[serde(rename = "type", default)]
    pub network: NetworkSelector,
}

impl WalletIdentity {
    pub fn new(
        address: impl Into<String>,
        symbol: impl Into<String>,
        chain_family: ChainFamily,
        network: NetworkSelector,
    ) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            chain_family,
            network,
        }
    }
}

/// 最新区块高度（由外部拉取，按 chain + 网络类型区分）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockHeight {
    pub chain: String,
    #[serde(rename = "type")]
    pub network: NetworkSelector,
    #[serde(default)]
    pub block_height: Option<u64>,
}

/// 查找指定链和网络的最新区块高度
///
/// 找不到、或高度缺失 / 为 0 时返回 None。
pub fn find_latest_block_height(
    heights: &[LatestBlockHeight],
    chain: &str,
    network: NetworkSelector,
) -> Option<u64> {
    heights
        .iter()
        .find(|h| h.chain == chain && h.network == network)
        .and_then(|h| h.block_height)
        .filter(|height| *height != 0)
}
