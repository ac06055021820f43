use std::sync::Arc;

use crate::{
    config::EngineConfig,
    domain::chain::{ChainRegistry, NetworkSelector},
    service::{unit_converter::UnitConverter, valuation_service::ValuationService},
    utils::{address_validator::AddressValidator, explorer},
};

/// 引擎状态
/// 由同一份配置构建出的各个服务，构建后只读，可跨线程共享
#[derive(Clone)]
pub struct EngineState {
    pub config: Arc<EngineConfig>,
    pub converter: Arc<UnitConverter>,
    pub address_validator: Arc<AddressValidator>,
    pub valuation: Arc<ValuationService>,
}

impl EngineState {
    /// 从配置构建（不做校验，调用方负责 `validate`）
    pub fn new(config: EngineConfig) -> Self {
        let config = Arc::new(config);
        let registry = ChainRegistry::with_extra(&config.chains);

        tracing::info!(
            symbols = ?registry.symbols(),
            currencies = config.currencies.len(),
            "Engine state initialized"
        );

        Self {
            converter: Arc::new(UnitConverter::new(registry.clone(), &config.display)),
            address_validator: Arc::new(AddressValidator::new(registry)),
            valuation: Arc::new(ValuationService::new(config.clone())),
            config,
        }
    }

    /// 加载 `.env` / 配置文件并校验后构建
    pub fn load() -> anyhow::Result<Self> {
        let config = EngineConfig::load()?;
        Ok(Self::new(config))
    }

    /// 交易详情链接（浏览器地址取自配置）
    pub fn transaction_url(&self, symbol: &str, network: NetworkSelector, hash: &str) -> String {
        explorer::transaction_url(&self.config.explorer, symbol, network, hash)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
