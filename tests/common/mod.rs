//! 测试辅助模块
//! 提供测试数据和辅助函数

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rwallet_core::{
    config::EngineConfig,
    domain::{
        ChainFamily, Decimal, HexValue, NetworkSelector, PriceQuote, PriceTable, Transaction,
        WalletIdentity,
    },
    EngineState,
};

pub const RSK_WALLET: &str = "0x7986b3df570230288501eea3d890bd66948c9b79";
pub const RSK_COUNTERPARTY: &str = "0x1234567890123456789012345678901234567890";
pub const BTC_TESTNET_WALLET: &str = "mipcBbFg9gMiCh81Kj8tqqdgoZub1ZJRfn";

pub fn dec(literal: &str) -> Decimal {
    Decimal::from_numeric_literal(literal).expect("valid test literal")
}

/// 与环境变量无关的引擎状态
pub fn engine() -> EngineState {
    EngineState::new(EngineConfig {
        display: rwallet_core::config::DisplayConfig::builtin(),
        ..EngineConfig::default()
    })
}

/// BTC = {USD: 10000, EUR: 9000}, RBTC = {USD: 9990}, RIF = {USD: 0.07}
pub fn price_table() -> PriceTable {
    PriceTable::new(vec![
        PriceQuote::new("BTC")
            .with_price("USD", dec("10000"))
            .with_price("EUR", dec("9000"))
            .with_price("JPY", dec("1100000")),
        PriceQuote::new("RBTC").with_price("USD", dec("9990")),
        PriceQuote::new("RIF").with_price("USD", dec("0.07")),
    ])
}

pub fn rsk_wallet(symbol: &str) -> WalletIdentity {
    WalletIdentity::new(RSK_WALLET, symbol, ChainFamily::Account, NetworkSelector::Mainnet)
}

pub fn btc_wallet() -> WalletIdentity {
    WalletIdentity::new(
        BTC_TESTNET_WALLET,
        "BTC",
        ChainFamily::Utxo,
        NetworkSelector::Testnet,
    )
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

/// 构造交易；block_height 为 -1 时不带 confirmedAt
pub fn transaction(from: &str, to: &str, value_hex: &str, block_height: i64) -> Transaction {
    Transaction {
        hash: Some(format!("0x{:064x}", block_height.unsigned_abs())),
        from: from.to_string(),
        to: to.to_string(),
        value: HexValue::parse(value_hex).expect("valid test hex"),
        block_height,
        created_at: at(2019, 3, 4),
        confirmed_at: (block_height != -1).then(|| at(2019, 3, 5)),
    }
}
