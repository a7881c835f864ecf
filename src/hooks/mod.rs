//! 钩子模块：显式注入的过滤器分发表，替代宿主的全局钩子表
pub mod registry;

pub use self::registry::{CallbackId, FilterCallback, HookEntry, HookRegistry};

/// 文章 oEmbed 输出过滤点
pub const EMBED_OEMBED_HTML: &str = "embed_oembed_html";
/// 扫描任务每类 URL 数量覆盖点
pub const URL_VALIDATION_LIMIT_PER_TYPE: &str = "amp_url_validation_limit_per_type";
/// 宿主默认优先级
pub const DEFAULT_PRIORITY: i32 = 10;
