//! 引擎错误定义
//!
//! 只有"输入本身有问题"才走这里的硬错误；"暂时没有价格"、"没有金额"这类情况
//! 由各接口以 `None` / `false` 表达，不会出现在这里。

use thiserror::Error;

/// 引擎统一 Result
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// 数值字面量格式错误
    #[error("invalid numeric literal: {0:?}")]
    InvalidLiteral(String),

    /// 数值格式正确，但十进制指数 / 标度超出允许范围
    #[error("numeric scale out of range: {0}")]
    ScaleOutOfRange(String),

    /// 十六进制基础单位数值格式错误
    #[error("invalid hex base-unit value: {0:?}")]
    InvalidHexValue(String),

    /// 锚定价格合成时缺少参考币种报价（或其中的某个币种价格）
    #[error("missing reference price for {symbol}{}", in_currency(.currency))]
    MissingReferencePrice {
        symbol: String,
        currency: Option<String>,
    },

    /// 参考价格不可用于换算（例如 USD 价格为 0）
    #[error("invalid reference price for {symbol} in {currency}: {price}")]
    InvalidReferencePrice {
        symbol: String,
        currency: String,
        price: String,
    },

    /// 除数为 0
    #[error("division by zero")]
    DivisionByZero,

    /// 未注册的币种
    #[error("unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    /// 配置错误
    #[error("configuration error: {0}")]
    Config(String),
}

fn in_currency(currency: &Option<String>) -> String {
    currency
        .as_ref()
        .map(|c| format!(" in {c}"))
        .unwrap_or_default()
}

impl EngineError {
    /// 标准错误代码
    ///
    /// - 1xxx: 输入格式错误
    /// - 2xxx: 价格数据错误
    /// - 3xxx: 配置 / 注册表错误
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidLiteral(_) => 1001,
            Self::InvalidHexValue(_) => 1002,
            Self::DivisionByZero => 1003,
            Self::ScaleOutOfRange(_) => 1004,
            Self::MissingReferencePrice { .. } => 2001,
            Self::InvalidReferencePrice { .. } => 2002,
            Self::UnsupportedSymbol(_) => 3001,
            Self::Config(_) => 3002,
        }
    }

    /// 错误类别（用于日志字段）
    pub fn category(&self) -> &'static str {
        match self.code() {
            1000..=1999 => "input",
            2000..=2999 => "price",
            _ => "config",
        }
    }

    pub fn missing_reference(symbol: impl Into<String>) -> Self {
        Self::MissingReferencePrice {
            symbol: symbol.into(),
            currency: None,
        }
    }

    pub fn missing_reference_currency(
        symbol: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self::MissingReferencePrice {
            symbol: symbol.into(),
            currency: Some(currency.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EngineError::InvalidLiteral("x".into()).code(), 1001);
        assert_eq!(EngineError::missing_reference("BTC").code(), 2001);
        assert_eq!(EngineError::UnsupportedSymbol("XYZ".into()).code(), 3001);
        assert_eq!(EngineError::DivisionByZero.category(), "input");
        assert_eq!(EngineError::ScaleOutOfRange("1e300".into()).code(), 1004);
        assert_eq!(EngineError::ScaleOutOfRange("1e300".into()).category(), "input");
        assert_eq!(EngineError::missing_reference("BTC").category(), "price");
    }

    #[test]
    fn test_missing_reference_message() {
        assert_eq!(
            EngineError::missing_reference("BTC").to_string(),
            "missing reference price for BTC"
        );
        assert_eq!(
            EngineError::missing_reference_currency("BTC", "USD").to_string(),
            "missing reference price for BTC in USD"
        );
    }
}
