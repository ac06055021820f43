//! 字符串工具模块
//! 用户输入的金额文本校验

use once_cell::sync::Lazy;
use regex::Regex;

// 非负十进制数：可选整数部分、至多一个小数点、至少一位数字
static AMOUNT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d*\.?\d+$").expect("valid amount regex"));

/// 检查文本是否为合法金额（"1"、"0.5"、".5"）
pub fn is_amount(text: &str) -> bool {
    AMOUNT_REGEX.is_match(text)
}

/// 检查字符串是否为空或只包含空白字符
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
