//! URL 属性上下文转义
//! 行为对齐宿主的 esc_url（display 上下文）：清洗非法字符、补全协议、拒绝非白名单协议、编码 & 与 '

use url::Url;

/// 允许出现在输出 URL 中的协议
pub const ALLOWED_PROTOCOLS: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "irc6", "ircs", "gopher", "nntp",
    "feed", "telnet", "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

/// URL 转义协作者
pub trait UrlEscaper: Send + Sync {
    /// 将 URL 转义为可直接写入 HTML 属性的形式，不合法时返回空串
    fn esc_url(&self, url: &str) -> String;
}

impl<F> UrlEscaper for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn esc_url(&self, url: &str) -> String {
        self(url)
    }
}

/// 默认实现
#[derive(Debug, Clone, Default)]
pub struct WpUrlEscaper;

impl WpUrlEscaper {
    pub fn new() -> Self {
        Self
    }

    fn is_allowed_char(c: char) -> bool {
        c.is_ascii_alphanumeric()
            || !c.is_ascii()
            || "-~+_.?#=!&;,/:%@$|*'()[]".contains(c)
    }

    /// 反复剔除换行编码，防止拼接后重新出现
    fn strip_newline_escapes(url: &str) -> String {
        let mut current = url.to_string();
        loop {
            let next = ["%0d", "%0a", "%0D", "%0A"]
                .iter()
                .fold(current.clone(), |acc, needle| acc.replace(needle, ""));
            if next == current {
                return next;
            }
            current = next;
        }
    }

    fn looks_like_php_file(url: &str) -> bool {
        let lower = url.to_ascii_lowercase();
        match lower.find(".php") {
            Some(pos) if pos > 0 => lower[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-'),
            _ => false,
        }
    }

    /// & 统一编码为 &#038;（&amp; 同样归一），合法实体保留；' 编码为 &#039;
    fn encode_display(url: &str) -> String {
        let mut out = String::with_capacity(url.len() + 8);
        let mut rest = url;
        while let Some(ch) = rest.chars().next() {
            match ch {
                '&' if rest.starts_with("&amp;") => {
                    out.push_str("&#038;");
                    rest = &rest[5..];
                    continue;
                }
                '&' => match Self::entity_len(rest) {
                    Some(len) => {
                        out.push_str(&rest[..len]);
                        rest = &rest[len..];
                        continue;
                    }
                    None => out.push_str("&#038;"),
                },
                '\'' => out.push_str("&#039;"),
                _ => out.push(ch),
            }
            rest = &rest[ch.len_utf8()..];
        }
        out
    }

    /// rest 以 '&' 开头时，返回合法实体（含 ';'）的字节长度
    fn entity_len(rest: &str) -> Option<usize> {
        let body = &rest[1..];
        let end = body.find(';')?;
        let name = &body[..end];
        let valid = if let Some(num) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
            !num.is_empty() && num.chars().all(|c| c.is_ascii_hexdigit())
        } else if let Some(num) = name.strip_prefix('#') {
            !num.is_empty() && num.chars().all(|c| c.is_ascii_digit())
        } else {
            name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && name.chars().all(|c| c.is_ascii_alphanumeric())
        };
        valid.then_some(end + 2)
    }

    /// 提取协议名；优先交给 url 解析，失败时退回到手工切分
    fn scheme_of(url: &str) -> Option<String> {
        if let Ok(parsed) = Url::parse(url) {
            return Some(parsed.scheme().to_string());
        }
        let colon = url.find(':')?;
        let candidate = &url[..colon];
        if candidate.is_empty() || candidate.contains(['/', '?', '#']) {
            return None;
        }
        Some(candidate.to_ascii_lowercase())
    }
}

impl UrlEscaper for WpUrlEscaper {
    fn esc_url(&self, url: &str) -> String {
        if url.is_empty() {
            return String::new();
        }

        let url = url.trim_start().replace(' ', "%20");
        let url: String = url.chars().filter(|c| Self::is_allowed_char(*c)).collect();
        if url.is_empty() {
            return url;
        }

        let mut url = if url.to_ascii_lowercase().starts_with("mailto:") {
            url
        } else {
            Self::strip_newline_escapes(&url)
        };
        url = url.replace(";//", "://");

        if !url.contains(':')
            && !url.starts_with(['/', '#', '?'])
            && !Self::looks_like_php_file(&url)
        {
            url = format!("http://{url}");
        }

        let url = Self::encode_display(&url);

        if url.starts_with('/') {
            return url;
        }
        match Self::scheme_of(&url) {
            Some(scheme) if !ALLOWED_PROTOCOLS.contains(&scheme.as_str()) => String::new(),
            _ => url,
        }
    }
}
