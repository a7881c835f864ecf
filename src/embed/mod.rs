//! 嵌入模块：把宿主 oEmbed 输出改写为 AMP 组件
pub mod base;
pub mod wordpress;

pub use self::base::{create_overflow_button_markup, EmbedArgs, EmbedHandler, OembedContext, OembedFilterRegistry};
pub use self::wordpress::{WordPressEmbedHandler, WORDPRESS_EMBED};
