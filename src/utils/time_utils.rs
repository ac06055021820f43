//! 时间工具模块
//! 交易列表的时间展示格式

use chrono::{DateTime, Utc};

/// 交易列表日期格式（"Mar 5. 2019"）
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d. %Y";

/// 格式化展示日期，时间缺失时返回空串
pub fn format_display_date(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// 格式化时间戳为RFC3339格式
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
