//! 文本处理工具

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// 合并连续空白为单个空格，并去掉首尾空白
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 按字符数截断（不加省略号）
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// 解码 base64 编码的 UTF-8 文本
///
/// 编码或 UTF-8 不合法时返回 `None`。
pub fn decode_base64_text(encoded: &str) -> Option<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact).ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handles_nbsp_and_newlines() {
        assert_eq!(normalize_whitespace("  a\u{a0}\u{a0}b \n c  "), "a b c");
        assert_eq!(normalize_whitespace(" \t\n"), "");
    }

    #[test]
    fn decode_valid_and_invalid() {
        // "Кошка"
        assert_eq!(decode_base64_text("0JrQvtGI0LrQsA==").as_deref(), Some("Кошка"));
        assert_eq!(decode_base64_text("aGVs\nbG8=").as_deref(), Some("hello"));
        assert_eq!(decode_base64_text("%%%not base64"), None);
        // 合法 base64，但不是 UTF-8
        assert_eq!(decode_base64_text("//79"), None);
    }

    #[test]
    fn truncate_is_char_based() {
        assert_eq!(truncate_chars("Привет", 3), "При");
    }
}
