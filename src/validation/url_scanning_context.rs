//! 站点扫描上下文
//! 构造后字段不再变化；只有 limit_per_type 的读取会经过注入的覆盖策略

use std::fmt;
use std::sync::Arc;

use crate::hooks::{HookRegistry, URL_VALIDATION_LIMIT_PER_TYPE};
use crate::utils::log_macros::log_warn;

/// 每类 URL 的默认扫描数量
pub const DEFAULT_LIMIT_PER_TYPE: i64 = 1;

/// 每类数量的覆盖策略，每次读取恰好调用一次
pub trait LimitResolver: Send + Sync {
    fn resolve(&self, limit_per_type: i64) -> i64;
}

impl<F> LimitResolver for F
where
    F: Fn(i64) -> i64 + Send + Sync,
{
    fn resolve(&self, limit_per_type: i64) -> i64 {
        self(limit_per_type)
    }
}

/// 通过注册表上的 amp_url_validation_limit_per_type 过滤器覆盖
#[derive(Debug, Clone)]
pub struct HookLimitResolver {
    registry: Arc<HookRegistry<i64>>,
}

impl HookLimitResolver {
    pub fn new(registry: Arc<HookRegistry<i64>>) -> Self {
        Self { registry }
    }
}

impl LimitResolver for HookLimitResolver {
    fn resolve(&self, limit_per_type: i64) -> i64 {
        self.registry
            .apply_filters(URL_VALIDATION_LIMIT_PER_TYPE, limit_per_type, &())
    }
}

/// 扫描设置
#[derive(Clone)]
pub struct UrlScanningContext {
    // 每类（每个模板、每种文章类型）最多校验的 URL 数，-1 表示不限
    limit_per_type: i64,
    // 条件白名单：非空时只查询这些条件对应的模板
    include_conditionals: Vec<String>,
    // 是否包含不支持 AMP 的 URL
    include_unsupported: bool,
    limit_resolver: Option<Arc<dyn LimitResolver>>,
}

impl Default for UrlScanningContext {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT_PER_TYPE, Vec::new(), false)
    }
}

impl fmt::Debug for UrlScanningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlScanningContext")
            .field("limit_per_type", &self.limit_per_type)
            .field("include_conditionals", &self.include_conditionals)
            .field("include_unsupported", &self.include_unsupported)
            .field("has_limit_resolver", &self.limit_resolver.is_some())
            .finish()
    }
}

impl UrlScanningContext {
    /// 原样保存构造参数
    pub fn new(limit_per_type: i64, include_conditionals: Vec<String>, include_unsupported: bool) -> Self {
        Self {
            limit_per_type,
            include_conditionals,
            include_unsupported,
            limit_resolver: None,
        }
    }

    /// 注入每类数量的覆盖策略
    pub fn with_limit_resolver(mut self, resolver: Arc<dyn LimitResolver>) -> Self {
        self.limit_resolver = Some(resolver);
        self
    }

    /// 每类数量：先经过覆盖策略，再校验；小于 -1 的值回退为 1，-1 保留为不限
    pub fn get_limit_per_type(&self) -> i64 {
        let limit = match &self.limit_resolver {
            Some(resolver) => resolver.resolve(self.limit_per_type),
            None => self.limit_per_type,
        };

        if limit < -1 {
            log_warn!("limit_per_type 无效：{}，回退为 {}", limit, DEFAULT_LIMIT_PER_TYPE);
            return DEFAULT_LIMIT_PER_TYPE;
        }
        limit
    }

    pub fn get_include_conditionals(&self) -> &[String] {
        &self.include_conditionals
    }

    pub fn get_include_unsupported(&self) -> bool {
        self.include_unsupported
    }
}
