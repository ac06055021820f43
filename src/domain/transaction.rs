//! 交易记录与展示状态
//!
//! `Transaction` 是外部拉取的原始记录；`TransactionState` / `ClassifiedTransaction`
//! 是相对某个钱包地址推导出来的展示结果，不持久化。

use std::fmt;

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::decimal::Decimal;
use crate::error::{EngineError, EngineResult};

/// 未上链交易的区块高度
pub const UNCONFIRMED_BLOCK_HEIGHT: i64 = -1;

/// 交易展示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionState {
    /// 已发送（本钱包转出，已上链）
    Sent,
    /// 发送中（本钱包转出，未上链）
    Sending,
    /// 已接收（转入，已上链）
    Received,
    /// 接收中（转入，未上链）
    Receiving,
}

impl TransactionState {
    /// 由"是否发送方"和"是否已确认"两个事实决定
    pub fn from_facts(is_sender: bool, is_confirmed: bool) -> Self {
        match (is_sender, is_confirmed) {
            (true, true) => Self::Sent,
            (true, false) => Self::Sending,
            (false, true) => Self::Received,
            (false, false) => Self::Receiving,
        }
    }

    pub fn is_outgoing(&self) -> bool {
        matches!(self, Self::Sent | Self::Sending)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Sending | Self::Receiving)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Sending => "Sending",
            Self::Received => "Received",
            Self::Receiving => "Receiving",
        }
    }

    /// 前端显示用的国际化key
    pub fn to_i18n_key(&self) -> &'static str {
        match self {
            Self::Sent => "transaction.state.sent",
            Self::Sending => "transaction.state.sending",
            Self::Received => "transaction.state.received",
            Self::Receiving => "transaction.state.receiving",
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 十六进制编码的基础单位数值（"0x2386f26fc10000"）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexValue(BigInt);

impl HexValue {
    /// 解析十六进制字符串，`0x` 前缀可选
    pub fn parse(text: &str) -> EngineResult<Self> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EngineError::InvalidHexValue(text.to_string()));
        }

        BigInt::parse_bytes(digits.as_bytes(), 16)
            .map(Self)
            .ok_or_else(|| EngineError::InvalidHexValue(text.to_string()))
    }

    pub fn from_units(units: BigInt) -> Self {
        Self(units)
    }

    pub fn units(&self) -> &BigInt {
        &self.0
    }

    pub fn to_hex_string(&self) -> String {
        format!("0x{}", self.0.to_str_radix(16))
    }
}

impl From<u64> for HexValue {
    fn from(value: u64) -> Self {
        Self(BigInt::from(value))
    }
}

impl Serialize for HexValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for HexValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}

/// 原始交易记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub hash: Option<String>,
    pub from: String,
    pub to: String,
    /// 基础单位数值（十六进制）
    pub value: HexValue,
    /// -1 表示未上链
    pub block_height: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn is_confirmed(&self) -> bool {
        self.block_height != UNCONFIRMED_BLOCK_HEIGHT
    }

    pub fn is_sent_by(&self, address: &str) -> bool {
        self.from == address
    }
}

/// 分类后的交易（展示用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedTransaction {
    pub state: TransactionState,
    /// 已确认取 confirmedAt，未确认取 createdAt
    pub display_timestamp: Option<DateTime<Utc>>,
    /// 格式化后的时间（"Mar 5. 2019"），时间缺失时为空串
    pub datetime: String,
    pub display_amount: Decimal,
    /// "1.5 BTC"
    pub amount: String,
}
