//! 本地化协作者

use std::collections::HashMap;
use std::path::Path;

use crate::error::{RsampError, RsampResult};

/// 翻译协作者：按文本域翻译界面文案
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, domain: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn translate(&self, text: &str, domain: &str) -> String {
        self(text, domain)
    }
}

/// 原样返回源文案
#[derive(Debug, Clone, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str, _domain: &str) -> String {
        text.to_string()
    }
}

/// 基于 JSON 目录的翻译器
/// 目录格式：{"<domain>": {"<msgid>": "<msgstr>"}}，未命中时回退到源文案
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    catalog: HashMap<String, HashMap<String, String>>,
}

impl CatalogTranslator {
    pub fn new(catalog: HashMap<String, HashMap<String, String>>) -> Self {
        Self { catalog }
    }

    pub fn from_json(json: &str) -> RsampResult<Self> {
        let catalog = serde_json::from_str(json)
            .map_err(|e| RsampError::CatalogLoadError(format!("目录解析失败：{}", e)))?;
        Ok(Self { catalog })
    }

    pub fn from_file(path: &Path) -> RsampResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// 目录中的条目总数
    pub fn len(&self) -> usize {
        self.catalog.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, text: &str, domain: &str) -> String {
        self.catalog
            .get(domain)
            .and_then(|messages| messages.get(text))
            .filter(|msgstr| !msgstr.is_empty())
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
