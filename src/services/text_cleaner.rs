//! 文本清理
//!
//! 卡片右下角印有三位数的卡号，OCR 会把它拼到最后一行的末尾

use regex::Regex;
use std::sync::LazyLock;

/// 行尾的三位卡号（后面可能跟空白）
static CARD_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{3}\s*$").expect("卡号正则表达式无效")
});

/// 按行拆分，去掉首尾空白和空行
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// 去掉行尾卡号并修剪空白
pub fn clean_text(text: &str) -> String {
    CARD_NUMBER.replace_all(text, "").trim().to_string()
}
