//! 单位换算服务
//!
//! 基础单位（satoshi / wei）与展示单位之间的换算，以及按币种精度截断展示。

use std::collections::HashMap;

use num_bigint::BigInt;

use crate::{
    config::DisplayConfig,
    domain::{
        amount::Amount,
        chain::{ChainFamily, ChainRegistry},
        decimal::Decimal,
    },
    error::EngineResult,
};

/// 单位换算器
#[derive(Debug, Clone)]
pub struct UnitConverter {
    registry: ChainRegistry,
    symbol_decimal_places: HashMap<String, u32>,
    default_decimal_places: u32,
}

impl UnitConverter {
    pub fn new(registry: ChainRegistry, display: &DisplayConfig) -> Self {
        Self {
            registry,
            symbol_decimal_places: display.symbol_decimal_places.clone(),
            default_decimal_places: display.default_decimal_places,
        }
    }

    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// 基础单位指数：UTXO = 8，账户模型 = 18
    pub fn base_unit_exponent(&self, symbol: &str) -> EngineResult<u32> {
        self.registry
            .family(symbol)
            .map(ChainFamily::base_unit_exponent)
    }

    /// 基础单位 → 展示单位：`units / 10^exponent`（精确）
    pub fn to_display_amount(&self, symbol: &str, units: &BigInt) -> EngineResult<Decimal> {
        let family = self.registry.family(symbol)?;
        Ok(Self::units_to_display(family, units))
    }

    /// 同 `to_display_amount`，但按链族换算，不查注册表
    pub fn units_to_display(family: ChainFamily, units: &BigInt) -> Decimal {
        Decimal::new(units.clone(), i64::from(family.base_unit_exponent()))
    }

    /// 基础单位 → 展示单位，指数以注册表为准
    ///
    /// 未注册的币种才使用调用方给出的链族。
    pub fn display_amount_for(
        &self,
        symbol: &str,
        fallback: ChainFamily,
        units: &BigInt,
    ) -> Decimal {
        let family = match self.registry.family(symbol) {
            Ok(registered) => {
                if registered != fallback {
                    tracing::warn!(
                        symbol = %symbol,
                        tagged = %fallback,
                        registered = %registered,
                        "Chain family differs from registry, using registry"
                    );
                }
                registered
            }
            Err(_) => {
                tracing::debug!(
                    symbol = %symbol,
                    family = %fallback,
                    "Unregistered symbol, using tagged family"
                );
                fallback
            }
        };
        Self::units_to_display(family, units)
    }

    /// 展示单位 → 基础单位：`truncate(display × 10^exponent)`
    pub fn to_base_units(&self, symbol: &str, display: &Decimal) -> EngineResult<BigInt> {
        let exponent = self.base_unit_exponent(symbol)?;
        display.to_scaled_integer(exponent)
    }

    /// 展示单位 → 十六进制基础单位（"0x5f5e100"）
    pub fn to_base_units_hex(&self, symbol: &str, display: &Decimal) -> EngineResult<String> {
        let units = self.to_base_units(symbol, display)?;
        Ok(format!("0x{}", units.to_str_radix(16)))
    }

    /// 基础单位 → 展示单位；输入缺失返回 `Ok(None)`，与 0 区分
    pub fn convert_unit_to_coin_amount(
        &self,
        symbol: &str,
        units: Option<&BigInt>,
    ) -> EngineResult<Option<Decimal>> {
        units
            .map(|units| self.to_display_amount(symbol, units))
            .transpose()
    }

    /// 带单位金额 → 展示单位数值
    pub fn amount_to_display(amount: &Amount) -> Decimal {
        amount.to_display().value
    }

    /// 币种展示精度（未配置时取默认值）
    pub fn display_places(&self, symbol: &str) -> u32 {
        self.symbol_decimal_places
            .get(&symbol.to_uppercase())
            .copied()
            .unwrap_or(self.default_decimal_places)
    }

    /// 截断到指定小数位；金额缺失返回 None
    pub fn format_amount(amount: Option<&Decimal>, decimal_places: u32) -> Option<Decimal> {
        amount.map(|value| value.truncate(decimal_places))
    }

    /// 截断后的展示字符串；金额缺失返回 None
    pub fn balance_string(amount: Option<&Decimal>, decimal_places: u32) -> Option<String> {
        Self::format_amount(amount, decimal_places).map(|value| value.to_display_string())
    }

    /// 按币种展示精度截断
    pub fn format_amount_for_symbol(&self, symbol: &str, amount: Option<&Decimal>) -> Option<Decimal> {
        Self::format_amount(amount, self.display_places(symbol))
    }

    /// 按币种展示精度输出字符串
    pub fn balance_string_for_symbol(&self, symbol: &str, amount: Option<&Decimal>) -> Option<String> {
        Self::balance_string(amount, self.display_places(symbol))
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(ChainRegistry::new(), &DisplayConfig::builtin())
    }
}
