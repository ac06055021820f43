//! 任意精度十进制数
//!
//! 所有金额、价格计算都基于该类型，不使用二进制浮点数。
//! 唯一的舍入方式是向零截断（`truncate`）。

use std::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// 字面量去掉尾随零后十进制指数绝对值的上限
///
/// "1e300"、"1e-300" 以及展开后的同值写法都按 `ScaleOutOfRange` 拒绝。
pub const MAX_LITERAL_EXPONENT: u64 = 256;

static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-])?(\d*)(?:\.(\d*))?(?:[eE]([+-]?\d+))?$").expect("valid literal regex")
});

/// 精确十进制数（不可变值类型）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(BigDecimal);

impl Decimal {
    /// 从数值字面量解析
    ///
    /// 支持：`"1"`、`"-1.5"`、`".5"`、`"5."`、`"1e8"`、`"2.5E-3"`
    pub fn from_numeric_literal(literal: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidLiteral(literal.to_string());
        let out_of_range = || EngineError::ScaleOutOfRange(literal.to_string());
        let caps = NUMERIC_LITERAL.captures(literal.trim()).ok_or_else(invalid)?;

        let integer = caps.get(2).map_or("", |m| m.as_str());
        let fraction = caps.get(3).map_or("", |m| m.as_str());
        if integer.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        // 正则已保证指数是数字串，解析失败只可能是超出 i64
        let exponent = match caps.get(4) {
            Some(m) => m.as_str().parse::<i64>().map_err(|_| out_of_range())?,
            None => 0,
        };

        let digits = format!("{integer}{fraction}");
        let mut mantissa = BigInt::from_str(&digits).map_err(|_| invalid())?;
        if mantissa.is_zero() {
            return Ok(Self::zero());
        }
        if caps.get(1).map(|m| m.as_str()) == Some("-") {
            mantissa = -mantissa;
        }

        let fraction_len = i64::try_from(fraction.len()).map_err(|_| out_of_range())?;
        let scale = fraction_len
            .checked_sub(exponent)
            .ok_or_else(out_of_range)?;

        let canonical = canonical_scale(&mantissa, scale);
        if canonical.unsigned_abs() > MAX_LITERAL_EXPONENT {
            return Err(out_of_range());
        }
        Ok(Self::new(mantissa, scale))
    }

    /// `mantissa × 10^-scale`
    pub fn new(mantissa: BigInt, scale: i64) -> Self {
        Self(BigDecimal::new(mantissa, scale))
    }

    pub fn zero() -> Self {
        Self::from(0u64)
    }

    pub fn one() -> Self {
        Self::from(1u64)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// 当前标度（小数位数，可能为负）
    pub fn scale(&self) -> i64 {
        self.parts().1
    }

    fn parts(&self) -> (BigInt, i64) {
        self.0.as_bigint_and_exponent()
    }

    pub fn add(&self, rhs: &Self) -> Self {
        Self(&self.0 + &rhs.0)
    }

    pub fn multiply(&self, rhs: &Self) -> Self {
        Self(&self.0 * &rhs.0)
    }

    /// 除法，结果保留 `scale` 位小数并向零截断
    pub fn divide(&self, rhs: &Self, scale: u32) -> EngineResult<Self> {
        if rhs.is_zero() {
            return Err(EngineError::DivisionByZero);
        }
        let (lhs_digits, lhs_scale) = self.parts();
        let (rhs_digits, rhs_scale) = rhs.parts();

        // q = lhs_digits * 10^(scale - lhs_scale + rhs_scale) / rhs_digits
        let shift = i64::from(scale)
            .checked_sub(lhs_scale)
            .and_then(|s| s.checked_add(rhs_scale))
            .ok_or_else(|| scale_out_of_range(format!("division to scale {scale}")))?;
        let power = pow10(shift_exponent(shift.unsigned_abs())?);
        let quotient = if shift >= 0 {
            (lhs_digits * power) / rhs_digits
        } else {
            lhs_digits / (rhs_digits * power)
        };
        Ok(Self::new(quotient, i64::from(scale)))
    }

    /// 截断到 `scale` 位小数（向零舍入）
    ///
    /// 当前精度不足 `scale` 位时原样返回，不补零。
    #[must_use]
    pub fn truncate(&self, scale: u32) -> Self {
        let (mut digits, current) = self.parts();
        let target = i64::from(scale);
        if current <= target {
            return self.clone();
        }

        // current > target >= 0，差值不会溢出
        let mut remaining = (current - target).unsigned_abs();
        // 10^remaining > 2^bits > |digits|
        if remaining > digits.bits() {
            return Self::new(BigInt::zero(), target);
        }
        // BigInt 除法向零截断，分段相除结果不变
        while remaining > 0 {
            let step = u32::try_from(remaining).unwrap_or(u32::MAX);
            digits /= pow10(step);
            remaining -= u64::from(step);
        }
        Self::new(digits, target)
    }

    /// 乘以 10^exponent 后截断为整数
    pub fn to_scaled_integer(&self, exponent: u32) -> EngineResult<BigInt> {
        let (digits, scale) = self.truncate(exponent).parts();
        // 截断后 scale <= exponent，shift 非负
        let shift = i64::from(exponent)
            .checked_sub(scale)
            .ok_or_else(|| scale_out_of_range(format!("scale {scale}")))?;
        Ok(digits * pow10(shift_exponent(shift.unsigned_abs())?))
    }

    /// 去掉多余的尾随零
    #[must_use]
    pub fn normalized(&self) -> Self {
        let (mut digits, mut scale) = self.parts();
        if digits.is_zero() {
            return Self::zero();
        }
        let ten = BigInt::from(10u8);
        while scale > 0 && (&digits % &ten).is_zero() {
            digits /= &ten;
            scale -= 1;
        }
        Self::new(digits, scale)
    }

    /// 展示字符串：普通位置记数法，无尾随零，不使用科学记数法
    pub fn to_display_string(&self) -> String {
        let (digits, scale) = self.normalized().parts();
        let negative = digits.sign() == Sign::Minus;
        let mut body = digits.abs().to_string();

        if scale <= 0 {
            body.push_str(&"0".repeat(scale.unsigned_abs() as usize));
        } else {
            let scale = scale as usize;
            if body.len() <= scale {
                body = format!("{}{}", "0".repeat(scale + 1 - body.len()), body);
            }
            body.insert(body.len() - scale, '.');
        }

        if negative {
            format!("-{body}")
        } else {
            body
        }
    }
}

fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u8).pow(exponent)
}

fn scale_out_of_range(detail: String) -> EngineError {
    EngineError::ScaleOutOfRange(detail)
}

fn shift_exponent(shift: u64) -> EngineResult<u32> {
    u32::try_from(shift).map_err(|_| scale_out_of_range(format!("shift {shift}")))
}

/// 去掉全部尾随零（允许标度变为负数）后的标度
fn canonical_scale(mantissa: &BigInt, scale: i64) -> i64 {
    let ten = BigInt::from(10u8);
    let mut digits = mantissa.clone();
    let mut scale = scale;
    while !digits.is_zero() && (&digits % &ten).is_zero() {
        match scale.checked_sub(1) {
            Some(next) => scale = next,
            None => break,
        }
        digits /= &ten;
    }
    scale
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Decimal {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_numeric_literal(s)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl From<u128> for Decimal {
    fn from(value: u128) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl TryFrom<f64> for Decimal {
    type Error = EngineError;

    /// 经由 f64 的最短十进制表示转换
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(EngineError::InvalidLiteral(value.to_string()));
        }
        Self::from_numeric_literal(&value.to_string())
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_display_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DecimalVisitor;

        impl<'de> de::Visitor<'de> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a numeric string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
                Decimal::from_numeric_literal(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
                Ok(Decimal::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
                Ok(Decimal::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
                Decimal::try_from(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(DecimalVisitor)
    }
}
