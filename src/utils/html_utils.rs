//! HTML 标签构建工具
//! 负责属性名清洗、属性值转义（不重复编码已有实体）以及自定义元素的序列化

use once_cell::sync::Lazy;
use regex::Regex;

/// 已有的合法字符实体，转义时保留不再二次编码
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")
        .expect("entity regex is valid")
});

/// 有序属性表：保留插入顺序，重复设置时原位覆盖
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttributes {
    entries: Vec<(String, String)>,
}

impl TagAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置属性，已存在则覆盖值并保持原位置
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = TagAttributes::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

/// HTML 工具类
pub struct AmpHtmlUtils;

impl AmpHtmlUtils {
    /// 清洗标签名/属性名：转小写，仅保留 [a-z0-9_-]
    pub fn sanitize_key(key: &str) -> String {
        key.chars()
            .map(|c| c.to_ascii_lowercase())
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
            .collect()
    }

    /// 属性值转义，已存在的合法实体保持原样
    pub fn esc_attr(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for (idx, ch) in value.char_indices() {
            match ch {
                '&' if ENTITY_RE.is_match(&value[idx..]) => out.push('&'),
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#039;"),
                _ => out.push(ch),
            }
        }
        out
    }

    /// 文本节点转义，规则同属性值
    pub fn esc_html(text: &str) -> String {
        Self::esc_attr(text)
    }

    /// 序列化属性表：name="value"，空值同样输出 name=""
    pub fn build_attributes_string(attributes: &TagAttributes) -> String {
        attributes
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", Self::sanitize_key(name), Self::esc_attr(value)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 构建完整标签：<tag attrs>content</tag>
    /// content 视为已转义的标记片段，原样写入
    pub fn build_tag(tag_name: &str, attributes: &TagAttributes, content: &str) -> String {
        let tag = Self::sanitize_key(tag_name);
        let attr_string = Self::build_attributes_string(attributes);
        if attr_string.is_empty() {
            format!("<{tag}>{content}</{tag}>")
        } else {
            format!("<{tag} {attr_string}>{content}</{tag}>")
        }
    }
}
