// ==========================================
// 库存批量导入系统 - 核心库
// ==========================================
// 系统定位: 列表类型条目与层级业务对象的批量导入/同步管道
// 外部协作者: 对象存储、元数据服务、应用服务（由宿主注入）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录、结果与报告
pub mod domain;

// 外部存储接口层
pub mod repository;

// 导入层 - 管道本体
pub mod importer;

// 配置层 - 导入参数
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AttributeMap, AttributeType, ImportMode, ImportOutcome, ImportRecord, ObjectId, RunReport,
    RunSummary,
};

// 协作者接口
pub use repository::{ApplicationStore, MetadataStore, ObjectStore, StoreError};

// 导入器
pub use importer::{
    BulkImporter, BulkImporterImpl, ImportError, ImportJob, ImportSession, LineError,
    RunReporter,
};

// 配置
pub use config::ImportConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存批量导入系统";
