//! 法币估值服务
//!
//! 估值失败只会让界面显示空值，不会向上抛错。

use std::sync::Arc;

use crate::{
    config::EngineConfig,
    domain::{amount::Amount, decimal::Decimal, price::PriceTable},
    error::EngineResult,
    service::{price_service::PriceService, unit_converter::UnitConverter},
};

/// 余额法币价值的展示小数位
pub const BALANCE_VALUE_DECIMAL_PLACES: u32 = 2;

/// 缺失值的占位文本
pub const PLACEHOLDER_TEXT: &str = " ";

/// 估值服务
pub struct ValuationService {
    config: Arc<EngineConfig>,
}

impl ValuationService {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// 金额 × 价格
    ///
    /// 金额缺失或为 0、价格表为空、找不到报价时返回 None。
    pub fn valuate(
        amount: Option<&Decimal>,
        symbol: &str,
        currency: &str,
        table: &PriceTable,
    ) -> Option<Decimal> {
        let amount = amount.filter(|a| !a.is_zero())?;
        if table.is_empty() {
            return None;
        }
        let price = PriceService::lookup(table, symbol, currency)?;
        Some(amount.multiply(&price))
    }

    /// 带单位金额的估值；基础单位金额先换算为展示单位
    ///
    /// 任何失败都记录日志并返回 None。
    pub fn valuate_amount(
        converter: &UnitConverter,
        amount: Option<&Amount>,
        currency: &str,
        table: &PriceTable,
    ) -> Option<Decimal> {
        let amount = amount?;
        match Self::try_valuate_amount(converter, amount, currency, table) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(
                    symbol = %amount.symbol,
                    currency = %currency,
                    code = e.code(),
                    "Failed to valuate amount: {}",
                    e
                );
                None
            }
        }
    }

    fn try_valuate_amount(
        converter: &UnitConverter,
        amount: &Amount,
        currency: &str,
        table: &PriceTable,
    ) -> EngineResult<Option<Decimal>> {
        // 币种需已注册，且链族与注册表一致
        let family = converter.registry().family(&amount.symbol)?;
        let display = if family == amount.family {
            UnitConverter::amount_to_display(amount)
        } else {
            tracing::warn!(
                symbol = %amount.symbol,
                tagged = %amount.family,
                registered = %family,
                "Amount chain family differs from registry, using registry"
            );
            let mut retagged = amount.clone();
            retagged.family = family;
            UnitConverter::amount_to_display(&retagged)
        };
        Ok(Self::valuate(Some(&display), &amount.symbol, currency, table))
    }

    /// 资产价值字符串（按配置的小数位截断）
    pub fn asset_value_string(&self, value: Option<&Decimal>) -> Option<String> {
        UnitConverter::balance_string(value, self.config.display.asset_value_decimal_places)
    }

    /// 余额文本 "1.5 BTC"，缺失时为占位符
    pub fn balance_text(balance: Option<&Decimal>, symbol: &str) -> String {
        match balance {
            Some(balance) => format!("{} {}", balance, symbol),
            None => PLACEHOLDER_TEXT.to_string(),
        }
    }

    /// 余额价值文本 "15000.5 USD"（截断到 2 位），缺失时为占位符
    pub fn balance_value_text(value: Option<&Decimal>, currency: &str) -> String {
        match value {
            Some(value) => format!(
                "{} {}",
                value.truncate(BALANCE_VALUE_DECIMAL_PLACES),
                currency
            ),
            None => PLACEHOLDER_TEXT.to_string(),
        }
    }

    /// 法币符号（"USD" → "$"）
    pub fn currency_symbol(&self, currency: &str) -> &str {
        let symbol = self.config.currency_symbol(currency);
        if !self.config.currencies.iter().any(|c| c.name == currency) {
            tracing::warn!("Unknown currency {}, falling back to default symbol", currency);
        }
        symbol
    }
}
