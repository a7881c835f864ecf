//! 全局错误类型定义
//! 核心改写/配置路径不会失败，错误仅出现在外围：配置/目录/设置文件的解析与读取

use thiserror::Error;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum RsampError {
    // 配置相关错误
    #[error("配置加载失败：{0}")]
    ConfigLoadError(String),
    #[error("翻译目录加载失败：{0}")]
    CatalogLoadError(String),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
}

// 全局Result类型
pub type RsampResult<T> = Result<T, RsampError>;
