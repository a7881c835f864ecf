//! 宿主协作者：URL 转义与本地化
//! 核心改写逻辑只依赖这里的 trait，具体实现由调用方注入
pub mod url_escaper;
pub mod translator;

pub use self::url_escaper::{UrlEscaper, WpUrlEscaper, ALLOWED_PROTOCOLS};
pub use self::translator::{CatalogTranslator, IdentityTranslator, Translator};
