// ==========================================
// 库存批量导入系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分层: ImportError 终止整次运行；LineError 只作用于当前行
// ==========================================

use crate::i18n::t_with_args;
use crate::repository::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 导入模块错误类型（运行级，致命）
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("report write failed ({path}): {message}")]
    ReportWriteError { path: String, message: String },

    #[error("upload write failed ({path}): {message}")]
    UploadWriteError { path: String, message: String },

    // ===== 配置错误 =====
    #[error("config read failed (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("invalid config value (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 并发执行错误 =====
    #[error("import task failed: {0}")]
    TaskJoinError(String),

    // ===== 通用错误 =====
    #[error("internal error: {0}")]
    InternalError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<tokio::task::JoinError>
impl From<tokio::task::JoinError> for ImportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ImportError::TaskJoinError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

// ==========================================
// LineErrorKind - 行级错误分类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineErrorKind {
    Structural,
    AttributeNotFound,
    AttributeTypeMismatch,
    ListTypeItemNotFound,
    StoreOperationFailed,
}

// ==========================================
// LineError - 行级错误
// ==========================================
// 消息在构造时按当前语言渲染，账本直接使用
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("{message}")]
    Structural { message: String },

    #[error("{message}")]
    AttributeNotFound { attribute: String, message: String },

    #[error("{message}")]
    AttributeTypeMismatch { attribute: String, message: String },

    #[error("{message}")]
    ListTypeItemNotFound { value: String, message: String },

    #[error("{message}")]
    StoreOperationFailed { message: String },
}

impl LineError {
    pub fn kind(&self) -> LineErrorKind {
        match self {
            LineError::Structural { .. } => LineErrorKind::Structural,
            LineError::AttributeNotFound { .. } => LineErrorKind::AttributeNotFound,
            LineError::AttributeTypeMismatch { .. } => LineErrorKind::AttributeTypeMismatch,
            LineError::ListTypeItemNotFound { .. } => LineErrorKind::ListTypeItemNotFound,
            LineError::StoreOperationFailed { .. } => LineErrorKind::StoreOperationFailed,
        }
    }

    // ===== 结构错误 =====

    pub fn not_enough_fields(found: usize, expected: usize) -> Self {
        LineError::Structural {
            message: t_with_args(
                "import.not_enough_fields",
                &[("found", &found.to_string()), ("expected", &expected.to_string())],
            ),
        }
    }

    pub fn fields_not_paired(found: usize) -> Self {
        LineError::Structural {
            message: t_with_args("import.fields_not_paired", &[("found", &found.to_string())]),
        }
    }

    pub fn attribute_definition_incomplete(definition: &str) -> Self {
        LineError::Structural {
            message: t_with_args(
                "import.attribute_definition_incomplete",
                &[("definition", definition)],
            ),
        }
    }

    pub fn attribute_without_value(attribute: &str) -> Self {
        LineError::Structural {
            message: t_with_args("import.attribute_without_value", &[("attribute", attribute)]),
        }
    }

    pub fn attribute_value_malformed(attribute: &str, value: &str, operator: &str) -> Self {
        LineError::Structural {
            message: t_with_args(
                "import.attribute_value_malformed",
                &[("attribute", attribute), ("value", value), ("operator", operator)],
            ),
        }
    }

    pub fn parent_selector_malformed(selector: &str, operator: &str) -> Self {
        LineError::Structural {
            message: t_with_args(
                "import.parent_selector_malformed",
                &[("selector", selector), ("operator", operator)],
            ),
        }
    }

    pub fn root_selector_with_class(class_name: &str) -> Self {
        LineError::Structural {
            message: t_with_args("import.root_selector_with_class", &[("class", class_name)]),
        }
    }

    // ===== 解析错误 =====

    pub fn attribute_not_found(attribute: &str) -> Self {
        LineError::AttributeNotFound {
            attribute: attribute.to_string(),
            message: t_with_args("import.attribute_not_found", &[("attribute", attribute)]),
        }
    }

    pub fn attribute_type_mismatch(attribute: &str, declared: &str, actual: &str) -> Self {
        LineError::AttributeTypeMismatch {
            attribute: attribute.to_string(),
            message: t_with_args(
                "import.attribute_type_mismatch",
                &[("attribute", attribute), ("declared", declared), ("actual", actual)],
            ),
        }
    }

    pub fn list_type_not_found(value: &str) -> Self {
        LineError::ListTypeItemNotFound {
            value: value.to_string(),
            message: t_with_args("import.list_type_not_found", &[("value", value)]),
        }
    }

    // ===== 存储错误 =====

    pub fn store_failed(err: &StoreError) -> Self {
        LineError::StoreOperationFailed {
            message: t_with_args(
                "import.store_operation_failed",
                &[("message", &err.to_string())],
            ),
        }
    }
}

impl From<StoreError> for LineError {
    fn from(err: StoreError) -> Self {
        LineError::store_failed(&err)
    }
}

/// 将同一行的多个错误合并为一条账本消息
pub fn join_line_errors(errors: &[LineError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
