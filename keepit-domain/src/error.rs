//! 领域层统一错误定义
//!
//! 聚焦解析、存储读写、提交冲突与取消等最小必要集合，
//! 便于各存储实现统一转换为 `DomainError`。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("parse error: {reason}")]
    Parse { reason: String },

    // --- 仓储/持久化 ---
    #[error("storage error: {reason}")]
    Storage { reason: String },
    #[error("commit conflict: {reason}")]
    Conflict { reason: String },

    #[error("operation cancelled")]
    Cancelled,
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<uuid::Error> for DomainError {
    fn from(err: uuid::Error) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}
