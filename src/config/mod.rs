// ==========================================
// 库存批量导入系统 - 配置层
// ==========================================
// 职责: 导入参数（分隔符、哨兵、产物目录、运行命名）
// 存储: JSON 文件 / 代码内默认值
// ==========================================

pub mod import_config;

// 重导出核心配置
pub use import_config::{AttributeLayout, ImportConfig, RunNaming, APP_DIR_NAME};
