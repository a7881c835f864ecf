//! 过滤器注册表
//! 钩子名 -> 优先级（升序）-> 回调（插入顺序）。调用回调时不持有锁

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::utils::log_macros::{log_debug, log_trace};

/// 过滤回调：接收当前值与附加参数，返回新值
pub type FilterCallback<T, A> = Arc<dyn Fn(T, &A) -> T + Send + Sync>;

/// 回调标识，注册与注销依靠它定位同一个回调
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(String);

impl CallbackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallbackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// 注册表快照条目
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HookEntry {
    pub hook: String,
    pub priority: i32,
    pub id: CallbackId,
    pub accepted_args: usize,
}

struct RegisteredFilter<T, A> {
    id: CallbackId,
    accepted_args: usize,
    callback: FilterCallback<T, A>,
}

type PriorityTable<T, A> = BTreeMap<i32, Vec<RegisteredFilter<T, A>>>;

/// 过滤器注册表
pub struct HookRegistry<T, A = ()> {
    hooks: RwLock<HashMap<String, PriorityTable<T, A>>>,
}

impl<T, A> Default for HookRegistry<T, A> {
    fn default() -> Self {
        Self {
            hooks: RwLock::new(HashMap::new()),
        }
    }
}

impl<T, A> fmt::Debug for HookRegistry<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("entries", &self.snapshot())
            .finish()
    }
}

impl<T, A> HookRegistry<T, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册过滤器；同一钩子、同一优先级下相同 id 的回调会被替换而不是重复添加
    pub fn add_filter(
        &self,
        hook: &str,
        id: impl Into<CallbackId>,
        priority: i32,
        accepted_args: usize,
        callback: FilterCallback<T, A>,
    ) {
        let id = id.into();
        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
        let bucket = hooks
            .entry(hook.to_string())
            .or_default()
            .entry(priority)
            .or_default();

        let entry = RegisteredFilter {
            id: id.clone(),
            accepted_args,
            callback,
        };
        match bucket.iter_mut().find(|f| f.id == id) {
            Some(existing) => *existing = entry,
            None => bucket.push(entry),
        }
        log_debug!("注册过滤器：hook={}，id={}，priority={}", hook, id, priority);
    }

    /// 注销过滤器；只移除 id 与优先级都匹配的回调，空桶一并清理
    pub fn remove_filter(&self, hook: &str, id: &CallbackId, priority: i32) -> bool {
        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
        let Some(table) = hooks.get_mut(hook) else {
            return false;
        };
        let Some(bucket) = table.get_mut(&priority) else {
            return false;
        };

        let before = bucket.len();
        bucket.retain(|f| &f.id != id);
        let removed = bucket.len() != before;

        if bucket.is_empty() {
            table.remove(&priority);
        }
        if table.is_empty() {
            hooks.remove(hook);
        }
        if removed {
            log_debug!("注销过滤器：hook={}，id={}，priority={}", hook, id, priority);
        }
        removed
    }

    /// 查询回调注册的优先级
    pub fn has_filter(&self, hook: &str, id: &CallbackId) -> Option<i32> {
        let hooks = self.hooks.read().unwrap_or_else(PoisonError::into_inner);
        hooks.get(hook).and_then(|table| {
            table
                .iter()
                .find(|(_, bucket)| bucket.iter().any(|f| &f.id == id))
                .map(|(priority, _)| *priority)
        })
    }

    /// 钩子上是否有任何回调
    pub fn has_filters(&self, hook: &str) -> bool {
        let hooks = self.hooks.read().unwrap_or_else(PoisonError::into_inner);
        hooks.contains_key(hook)
    }

    /// 依优先级顺序把值传过所有回调；无回调时原样返回
    pub fn apply_filters(&self, hook: &str, value: T, args: &A) -> T {
        let callbacks: Vec<FilterCallback<T, A>> = {
            let hooks = self.hooks.read().unwrap_or_else(PoisonError::into_inner);
            match hooks.get(hook) {
                Some(table) => table
                    .values()
                    .flat_map(|bucket| bucket.iter().map(|f| Arc::clone(&f.callback)))
                    .collect(),
                None => return value,
            }
        };

        log_trace!("执行过滤器：hook={}，回调数={}", hook, callbacks.len());
        callbacks.iter().fold(value, |acc, callback| callback(acc, args))
    }

    /// 按 (钩子, 优先级, id) 排序的注册表快照
    pub fn snapshot(&self) -> Vec<HookEntry> {
        let hooks = self.hooks.read().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<HookEntry> = hooks
            .iter()
            .flat_map(|(hook, table)| {
                table.iter().flat_map(move |(priority, bucket)| {
                    bucket.iter().map(move |f| HookEntry {
                        hook: hook.clone(),
                        priority: *priority,
                        id: f.id.clone(),
                        accepted_args: f.accepted_args,
                    })
                })
            })
            .collect();
        entries.sort();
        entries
    }
}
