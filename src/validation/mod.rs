//! 校验模块：站点扫描任务使用的配置
pub mod url_scanning_context;
pub mod settings;

pub use self::url_scanning_context::{
    HookLimitResolver, LimitResolver, UrlScanningContext, DEFAULT_LIMIT_PER_TYPE,
};
pub use self::settings::ScanSettings;
