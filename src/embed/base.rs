//! 嵌入处理器公共部分

use crate::config::{AmpConfig, DEFAULT_EMBED_HEIGHT, DEFAULT_EMBED_WIDTH};
use crate::hooks::HookRegistry;
use crate::host::Translator;
use crate::utils::AmpHtmlUtils;

/// oEmbed 过滤器的附加参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OembedContext {
    /// 嵌入源 URL
    pub url: String,
    /// 所属文章 ID
    pub post_id: Option<u64>,
}

impl OembedContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            post_id: None,
        }
    }
}

/// oEmbed 输出过滤表：值为缓存的 HTML
pub type OembedFilterRegistry = HookRegistry<String, OembedContext>;

/// 嵌入尺寸参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedArgs {
    pub width: u32,
    pub height: u32,
}

impl Default for EmbedArgs {
    fn default() -> Self {
        Self {
            width: DEFAULT_EMBED_WIDTH,
            height: DEFAULT_EMBED_HEIGHT,
        }
    }
}

impl From<&AmpConfig> for EmbedArgs {
    fn from(config: &AmpConfig) -> Self {
        Self {
            width: config.embed_width,
            height: config.embed_height,
        }
    }
}

/// 嵌入处理器：注册/注销成对出现，操作同一个回调与优先级
pub trait EmbedHandler: Send + Sync {
    /// 尺寸参数
    fn args(&self) -> &EmbedArgs;

    /// 把过滤回调挂到注册表
    fn register_embed(&self, registry: &OembedFilterRegistry);

    /// 移除 register_embed 挂上的回调
    fn unregister_embed(&self, registry: &OembedFilterRegistry);
}

/// overflow 按钮：用户点击后展开高度受限的 iframe
/// text 为空时使用默认文案 "See more"
pub fn create_overflow_button_markup(
    translator: &dyn Translator,
    text_domain: &str,
    text: Option<&str>,
) -> String {
    let label = match text {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => translator.translate("See more", text_domain),
    };
    format!(
        r#"<button overflow type="button">{}</button>"#,
        AmpHtmlUtils::esc_html(&label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::IdentityTranslator;

    #[test]
    fn test_overflow_button_default_label() {
        let html = create_overflow_button_markup(&IdentityTranslator, "amp", None);
        assert_eq!(html, r#"<button overflow type="button">See more</button>"#);
    }

    #[test]
    fn test_overflow_button_escapes_label() {
        let html = create_overflow_button_markup(&IdentityTranslator, "amp", Some("<Open>"));
        assert_eq!(html, r#"<button overflow type="button">&lt;Open&gt;</button>"#);
    }

    #[test]
    fn test_embed_args_from_config() {
        let config = AmpConfig::default();
        assert_eq!(EmbedArgs::from(&config), EmbedArgs::default());
    }
}
