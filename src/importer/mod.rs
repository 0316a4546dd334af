// ==========================================
// 库存批量导入系统 - 导入层
// ==========================================
// 职责: 文本行 → 校验 → 解析 → 对外部存储的创建/更新调用
// 流程: 拆分 → 校验 → 类型/引用解析 → 物化 → 报告
// ==========================================

// 模块声明
pub mod bulk_importer_impl;
pub mod error;
pub mod field_splitter;
pub mod import_session;
pub mod importer_trait;
pub mod line_validator;
pub mod materializer;
pub mod reference_resolver;
pub mod run_reporter;
pub mod type_resolver;

// 重导出核心类型
pub use bulk_importer_impl::BulkImporterImpl;
pub use error::{ImportError, ImportResult, LineError, LineErrorKind};
pub use field_splitter::FieldSplitter;
pub use import_session::{ImportSession, SessionState};
pub use line_validator::{ListTypeLinePolicy, ObjectLinePolicy, ValidatedLine};
pub use materializer::{MaterializeFailure, ObjectMaterializer};
pub use reference_resolver::ReferenceResolver;
pub use run_reporter::RunReporter;
pub use type_resolver::AttributeTypeResolver;

// 重导出 Trait 接口
pub use importer_trait::{BulkImporter, ImportJob};
pub use line_validator::LineValidator;
