//! Domain 模块
//!
//! 金额、币种、价格、交易等值类型

pub mod amount;
pub mod chain;
pub mod decimal;
pub mod price;
pub mod transaction;

// 重新导出常用类型
pub use amount::{Amount, Denomination};
pub use chain::{
    find_latest_block_height, ChainFamily, ChainRegistry, ChainSpec, LatestBlockHeight,
    NetworkSelector, WalletIdentity,
};
pub use decimal::Decimal;
pub use price::{PriceQuote, PriceTable};
pub use transaction::{ClassifiedTransaction, HexValue, Transaction, TransactionState};
