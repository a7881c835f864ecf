//! 工具模块：提供通用工具函数
pub(crate) mod log_macros;
pub mod preview;
pub mod html_utils;

pub use self::preview::preview_compact;
pub use self::html_utils::{AmpHtmlUtils, TagAttributes};
