//! 扫描设置的可序列化形式，供 JSON 文件与命令行使用

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::url_scanning_context::{UrlScanningContext, DEFAULT_LIMIT_PER_TYPE};
use crate::error::RsampResult;

fn default_limit_per_type() -> i64 {
    DEFAULT_LIMIT_PER_TYPE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    #[serde(default = "default_limit_per_type")]
    pub limit_per_type: i64,
    #[serde(default)]
    pub include_conditionals: Vec<String>,
    #[serde(default)]
    pub include_unsupported: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            limit_per_type: DEFAULT_LIMIT_PER_TYPE,
            include_conditionals: Vec::new(),
            include_unsupported: false,
        }
    }
}

impl ScanSettings {
    pub fn from_json(json: &str) -> RsampResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> RsampResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// 转为扫描上下文，值原样传入
    pub fn into_context(self) -> UrlScanningContext {
        UrlScanningContext::new(
            self.limit_per_type,
            self.include_conditionals,
            self.include_unsupported,
        )
    }
}

impl From<ScanSettings> for UrlScanningContext {
    fn from(settings: ScanSettings) -> Self {
        settings.into_context()
    }
}
