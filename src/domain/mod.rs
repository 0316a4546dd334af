// ==========================================
// 库存批量导入系统 - 领域模型层
// ==========================================
// 职责: 导入记录、行级结果、运行报告等值对象
// 红线: 不含存储访问逻辑，不含导入流程逻辑
// ==========================================

pub mod record;
pub mod report;
pub mod types;

// 重导出核心类型
pub use record::{AttributeMap, ImportRecord, ParentPlacement, ParentSelector};
pub use report::{ImportOutcome, RunReport, RunSummary};
pub use types::{AttributeType, ImportMode, ObjectId, PRIMITIVE_TYPES};
