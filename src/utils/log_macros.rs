//! 日志宏：启用 `logging` 特性时转发到 tracing，否则编译为空

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        ::tracing::debug!($($arg)*);
    }};
}

macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        ::tracing::trace!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        ::tracing::warn!($($arg)*);
    }};
}

pub(crate) use {log_debug, log_trace, log_warn};
