// ==========================================
// 库存批量导入系统 - 批量导入 Trait
// ==========================================
// 职责: 定义上传/导入/下载接口（不包含实现）
// 实现者: BulkImporterImpl
// ==========================================

use crate::domain::report::RunReport;
use crate::domain::types::ImportMode;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

// ==========================================
// ImportJob - 批量导入中的单个任务
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportJob {
    pub path: PathBuf,    // 源文件
    pub mode: ImportMode, // 导入模式
    pub user_id: String,  // 发起用户（用于运行命名）
}

impl ImportJob {
    pub fn new(path: impl Into<PathBuf>, mode: ImportMode, user_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode,
            user_id: user_id.into(),
        }
    }
}

// ==========================================
// BulkImporter Trait
// ==========================================
#[async_trait]
pub trait BulkImporter: Send + Sync {
    /// 导入上传内容
    ///
    /// 内容先写入 upload_dir/<运行名>，再按文件运行会话
    ///
    /// # 返回
    /// - Ok(RunReport): file_name 即运行名，可用于下载产物
    /// - Err: 写入上传文件失败、读取失败或报告写出失败
    async fn import_bytes(
        &self,
        data: Vec<u8>,
        mode: ImportMode,
        user_id: &str,
    ) -> ImportResult<RunReport>;

    /// 导入已有文件
    async fn import_file(
        &self,
        path: &Path,
        mode: ImportMode,
        user_id: &str,
    ) -> ImportResult<RunReport>;

    /// 批量导入多个文件（并发执行）
    ///
    /// # 说明
    /// - 每个文件在独立的阻塞任务中运行
    /// - 某个文件失败不影响其他文件
    /// - 结果顺序与 jobs 顺序一致
    async fn batch_import(&self, jobs: Vec<ImportJob>) -> Vec<ImportResult<RunReport>>;

    /// 下载日志产物
    async fn download_log(&self, run_name: &str) -> ImportResult<Vec<u8>>;

    /// 下载错误行产物（仅对象模式且有失败行时存在）
    async fn download_errors(&self, run_name: &str) -> ImportResult<Vec<u8>>;
}
