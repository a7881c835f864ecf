//! 文章嵌入处理器
//! 把宿主生成的文章嵌入（blockquote + iframe）改写为 <amp-wordpress-embed>
//!
//! 宿主输出示例：
//! ```html
//! <blockquote class="wp-embedded-content" data-secret="xUuZHketRt">
//!     <a href="https://make.wordpress.org/core/2015/10/28/new-embeds-feature-in-wordpress-4-4/">New Embeds Feature in WordPress 4.4</a>
//! </blockquote>
//! <iframe title="&#8220;New Embeds Feature in WordPress 4.4&#8221; &#8212; Make WordPress Core"
//!     class="wp-embedded-content" sandbox="allow-scripts" security="restricted"
//!     src="https://make.wordpress.org/core/2015/10/28/new-embeds-feature-in-wordpress-4-4/embed/#?secret=xUuZHketRt"
//!     data-secret="xUuZHketRt" width="600" height="338" frameborder="0" scrolling="no"></iframe>
//! ```
//!
//! 匹配基于正则而不是完整的 HTML 解析：属性顺序变化、嵌套 blockquote 等形状不会被识别，
//! 此时原样返回输入。

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::base::{create_overflow_button_markup, EmbedArgs, EmbedHandler, OembedContext, OembedFilterRegistry};
use crate::config::AmpConfig;
use crate::hooks::{CallbackId, EMBED_OEMBED_HTML};
use crate::host::{IdentityTranslator, Translator, UrlEscaper, WpUrlEscaper};
use crate::utils::log_macros::{log_debug, log_trace};
use crate::utils::{preview_compact, AmpHtmlUtils, TagAttributes};

/// AMP 组件标签名
pub const WORDPRESS_EMBED: &str = "amp-wordpress-embed";
/// 过滤器优先级
pub const FILTER_PRIORITY: i32 = 100;
/// 过滤器声明的参数个数（缓存 HTML、源 URL）
pub const FILTER_ACCEPTED_ARGS: usize = 2;

static BLOCKQUOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<blockquote\s+(?P<attrs>[^>]*class="[^"]*wp-embedded-content[^>]*)>(?P<contents>.+?)</blockquote>"#)
        .expect("blockquote regex is valid")
});

static IFRAME_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<iframe[^>]*?title="(?P<title>[^"]+?)""#)
        .expect("iframe title regex is valid")
});

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// 文章嵌入处理器
/// Clone 共享同一个实例标识，注册/注销时视为同一个回调
#[derive(Clone)]
pub struct WordPressEmbedHandler {
    args: EmbedArgs,
    text_domain: String,
    escaper: Arc<dyn UrlEscaper>,
    translator: Arc<dyn Translator>,
    callback_id: CallbackId,
}

impl std::fmt::Debug for WordPressEmbedHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordPressEmbedHandler")
            .field("args", &self.args)
            .field("text_domain", &self.text_domain)
            .field("callback_id", &self.callback_id)
            .finish()
    }
}

impl Default for WordPressEmbedHandler {
    fn default() -> Self {
        Self::new(&AmpConfig::default())
    }
}

impl WordPressEmbedHandler {
    /// 使用默认协作者创建处理器
    pub fn new(config: &AmpConfig) -> Self {
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        Self {
            args: EmbedArgs::from(config),
            text_domain: config.text_domain.clone(),
            escaper: Arc::new(WpUrlEscaper::new()),
            translator: Arc::new(IdentityTranslator),
            callback_id: CallbackId::new(format!(
                "wordpress_embed_handler#{instance}::filter_embed_oembed_html"
            )),
        }
    }

    /// 替换 URL 转义协作者
    pub fn with_escaper(mut self, escaper: Arc<dyn UrlEscaper>) -> Self {
        self.escaper = escaper;
        self
    }

    /// 替换本地化协作者
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// 注册表中使用的回调标识
    pub fn callback_id(&self) -> &CallbackId {
        &self.callback_id
    }

    /// 改写文章嵌入 HTML；不符合预期形状时原样返回
    pub fn filter_embed_oembed_html<'a>(&self, cache: &'a str, url: &str) -> Cow<'a, str> {
        let Some(matches) = BLOCKQUOTE_RE.captures(cache) else {
            log_trace!("未匹配文章嵌入，原样返回：{}", preview_compact(cache, 80));
            return Cow::Borrowed(cache);
        };

        let placeholder = format!(
            "<blockquote {} placeholder>{}</blockquote>",
            &matches["attrs"],
            &matches["contents"]
        );

        let mut attributes = TagAttributes::new();
        attributes
            .set("height", self.args.height.to_string())
            .set("title", "");
        if let Some(title) = IFRAME_TITLE_RE.captures(cache) {
            attributes.set("title", &title["title"]);
        }
        attributes.set("data-url", self.escaper.esc_url(url));

        let overflow = create_overflow_button_markup(
            self.translator.as_ref(),
            &self.text_domain,
            Some(&self.translator.translate("Expand", &self.text_domain)),
        );

        log_debug!(
            "文章嵌入改写为 {}：url={}，title={}",
            WORDPRESS_EMBED,
            url,
            attributes.get("title").unwrap_or_default()
        );

        Cow::Owned(AmpHtmlUtils::build_tag(
            WORDPRESS_EMBED,
            &attributes,
            &format!("{placeholder}{overflow}"),
        ))
    }
}

impl EmbedHandler for WordPressEmbedHandler {
    fn args(&self) -> &EmbedArgs {
        &self.args
    }

    fn register_embed(&self, registry: &OembedFilterRegistry) {
        let handler = self.clone();
        registry.add_filter(
            EMBED_OEMBED_HTML,
            self.callback_id.clone(),
            FILTER_PRIORITY,
            FILTER_ACCEPTED_ARGS,
            Arc::new(move |cache: String, ctx: &OembedContext| {
                // 未改写时交回原字符串
                let rewritten = match handler.filter_embed_oembed_html(&cache, &ctx.url) {
                    Cow::Borrowed(_) => None,
                    Cow::Owned(rewritten) => Some(rewritten),
                };
                rewritten.unwrap_or(cache)
            }),
        );
    }

    fn unregister_embed(&self, registry: &OembedFilterRegistry) {
        registry.remove_filter(EMBED_OEMBED_HTML, &self.callback_id, FILTER_PRIORITY);
    }
}
