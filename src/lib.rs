//! rsamp - AMP 支持组件：文章嵌入改写、站点扫描配置、编辑器校验辅助

// 导出全局错误类型
pub use self::error::{RsampError, RsampResult};

// 导出配置模块
pub use self::config::{AmpConfig, ConfigManager, CustomConfigBuilder};

// 导出钩子模块核心接口
pub use self::hooks::{CallbackId, FilterCallback, HookEntry, HookRegistry};

// 导出宿主协作者
pub use self::host::{CatalogTranslator, IdentityTranslator, Translator, UrlEscaper, WpUrlEscaper};

// 导出嵌入模块核心接口
pub use self::embed::{
    EmbedArgs, EmbedHandler, OembedContext, OembedFilterRegistry, WordPressEmbedHandler,
};

// 导出校验模块核心接口
pub use self::validation::{HookLimitResolver, LimitResolver, ScanSettings, UrlScanningContext};

// 导出编辑器辅助
pub use self::editor::{FeaturedImage, FeaturedImageIssue, minimum_featured_image_dimensions, validate_featured_image};

// 导出工具模块核心接口
pub use self::utils::{AmpHtmlUtils, TagAttributes};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod hooks;
pub mod host;
pub mod embed;
pub mod validation;
pub mod editor;
pub mod utils;
