//! rwallet-core - 钱包金额换算与交易分类引擎
//!
//! 基础单位 / 展示单位换算、地址校验、法币估值、锚定币价格合成、交易状态分类。
//! 不做网络请求，不持久化，所有输入由调用方提供。

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod infrastructure;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use engine::EngineState;
pub use error::{EngineError, EngineResult};

// 统一模块导出
pub mod prelude {
    pub use crate::{
        config::EngineConfig,
        domain::{
            Amount, ChainFamily, ChainRegistry, Decimal, NetworkSelector, PriceQuote, PriceTable,
            Transaction, TransactionState, WalletIdentity,
        },
        engine::EngineState,
        error::{EngineError, EngineResult},
        service::{PriceService, TransactionClassifier, UnitConverter, ValuationService},
        utils::AddressValidator,
    };
}
