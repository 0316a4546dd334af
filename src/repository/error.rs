// ==========================================
// 库存批量导入系统 - 外部存储错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 外部存储抛出的任何错误，在导入管道中都只作用于当前行
// ==========================================

use thiserror::Error;

/// 外部存储（对象/元数据/应用服务）错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("{0}")]
    OperationFailed(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub fn operation_failed(message: impl Into<String>) -> Self {
        StoreError::OperationFailed(message.into())
    }
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;
