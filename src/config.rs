//! 全局配置管理,存储所有可配置项

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RsampError, RsampResult};

/// 嵌入默认宽度
pub const DEFAULT_EMBED_WIDTH: u32 = 600;
/// 文章嵌入默认高度：宿主允许的文章嵌入最小高度，保证 overflow 只会向上增长
pub const DEFAULT_EMBED_HEIGHT: u32 = 200;
/// 默认翻译文本域
pub const DEFAULT_TEXT_DOMAIN: &str = "amp";

/// 全局配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmpConfig {
    // 嵌入默认宽度（像素）
    pub embed_width: u32,
    // 嵌入默认高度（像素）
    pub embed_height: u32,
    // 本地化文本域
    pub text_domain: String,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for AmpConfig {
    fn default() -> Self {
        Self {
            embed_width: DEFAULT_EMBED_WIDTH,
            embed_height: DEFAULT_EMBED_HEIGHT,
            text_domain: DEFAULT_TEXT_DOMAIN.to_string(),
            verbose: false,
        }
    }
}

impl AmpConfig {
    /// 从JSON字符串加载配置，缺失字段取默认值
    pub fn from_json(json: &str) -> RsampResult<Self> {
        let config: AmpConfig = serde_json::from_str(json)?;
        if config.embed_height == 0 {
            return Err(RsampError::ConfigLoadError("embed_height 不能为 0".to_string()));
        }
        Ok(config)
    }

    /// 从JSON文件加载配置
    pub fn from_file(path: &Path) -> RsampResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> AmpConfig {
        AmpConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: AmpConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn embed_width(mut self, width: u32) -> Self {
        self.config.embed_width = width;
        self
    }

    pub fn embed_height(mut self, height: u32) -> Self {
        self.config.embed_height = height;
        self
    }

    pub fn text_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.text_domain = domain.into();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> AmpConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigManager::get_default();
        assert_eq!(config.embed_height, 200);
        assert_eq!(config.embed_width, 600);
        assert_eq!(config.text_domain, "amp");
        assert!(!config.verbose);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConfigManager::custom()
            .embed_height(320)
            .text_domain("amp-custom")
            .verbose(true)
            .build();
        assert_eq!(config.embed_height, 320);
        assert_eq!(config.embed_width, DEFAULT_EMBED_WIDTH);
        assert_eq!(config.text_domain, "amp-custom");
        assert!(config.verbose);
    }

    #[test]
    fn test_from_json_partial() {
        let config = AmpConfig::from_json(r#"{"embed_height": 250}"#).unwrap();
        assert_eq!(config.embed_height, 250);
        assert_eq!(config.text_domain, "amp");
    }

    #[test]
    fn test_from_json_rejects_zero_height() {
        let err = AmpConfig::from_json(r#"{"embed_height": 0}"#).unwrap_err();
        assert!(matches!(err, RsampError::ConfigLoadError(_)));
    }
}
