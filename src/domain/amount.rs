//! 带单位的金额

use std::fmt;

use num_bigint::BigInt;
use num_traits::One;
use serde::{Deserialize, Serialize};

use super::{chain::ChainFamily, decimal::Decimal};
use crate::error::EngineResult;

/// 金额面额：基础单位（satoshi / wei）或展示单位（BTC / RBTC）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    Base,
    Display,
}

/// 金额：数值 + 币种 + 链族 + 面额
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: Decimal,
    pub symbol: String,
    pub family: ChainFamily,
    pub denomination: Denomination,
}

impl Amount {
    /// 基础单位整数金额
    pub fn base_units(symbol: impl Into<String>, family: ChainFamily, units: BigInt) -> Self {
        Self {
            value: Decimal::from(units),
            symbol: symbol.into(),
            family,
            denomination: Denomination::Base,
        }
    }

    /// 展示单位金额
    pub fn display(symbol: impl Into<String>, family: ChainFamily, value: Decimal) -> Self {
        Self {
            value,
            symbol: symbol.into(),
            family,
            denomination: Denomination::Display,
        }
    }

    pub fn exponent(&self) -> u32 {
        self.family.base_unit_exponent()
    }

    /// 转换为展示单位
    #[must_use]
    pub fn to_display(&self) -> Self {
        match self.denomination {
            Denomination::Display => self.clone(),
            Denomination::Base => Self::display(
                self.symbol.clone(),
                self.family,
                self.value
                    .multiply(&Decimal::new(BigInt::one(), i64::from(self.exponent()))),
            ),
        }
    }

    /// 转换为基础单位（超出精度的部分向零截断）
    pub fn to_base(&self) -> EngineResult<Self> {
        match self.denomination {
            Denomination::Base => Ok(self.clone()),
            Denomination::Display => Ok(Self::base_units(
                self.symbol.clone(),
                self.family,
                self.value.to_scaled_integer(self.exponent())?,
            )),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl fmt::Display for Amount {
    /// 展示单位下输出 "1.5 BTC"；基础单位下输出整数
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.denomination {
            Denomination::Display => write!(f, "{} {}", self.value, self.symbol),
            Denomination::Base => write!(f, "{}", self.value),
        }
    }
}
