use std::fmt::{self, Write};

// ======================== 输出截断工具函数 ========================
/// 空白字符折叠 + 截断 - 零堆分配的日志预览函数
/// 逻辑：
/// 1. 遍历字符，连续空白折叠为单个空格（不修改原字符串，仅格式化输出）
/// 2. 达到最大长度时追加省略号并终止
#[inline(always)]
pub fn preview_compact<'a>(s: &'a str, max_len: usize) -> impl fmt::Display + 'a {
    struct CompactView<'a> {
        source: &'a str,
        max_length: usize,
    }

    impl<'a> fmt::Display for CompactView<'a> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut char_count = 0;
            let mut last_was_whitespace = false;

            for ch in self.source.chars() {
                if char_count >= self.max_length {
                    f.write_str("…")?;
                    break;
                }

                if ch.is_whitespace() {
                    if !last_was_whitespace {
                        f.write_str(" ")?;
                        char_count += 1;
                        last_was_whitespace = true;
                    }
                } else {
                    f.write_char(ch)?;
                    char_count += 1;
                    last_was_whitespace = false;
                }
            }
            Ok(())
        }
    }

    CompactView {
        source: s,
        max_length: max_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_folds_whitespace() {
        let out = preview_compact("<blockquote>\n    <a>x</a>\n</blockquote>", 100).to_string();
        assert_eq!(out, "<blockquote> <a>x</a> </blockquote>");
    }

    #[test]
    fn test_preview_truncates() {
        let out = preview_compact("abcdefgh", 3).to_string();
        assert_eq!(out, "abc…");
    }

    #[test]
    fn test_preview_exact_length_no_ellipsis() {
        assert_eq!(preview_compact("abc", 3).to_string(), "abc");
    }
}
