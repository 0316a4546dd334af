// ==========================================
// 库存批量导入系统 - 批量导入器实现
// ==========================================
// 职责: 运行命名、上传落盘、在阻塞任务中驱动导入会话
// 并发: 每次运行独占一个阻塞任务，运行之间只共享外部协作者
// ==========================================

use crate::config::ImportConfig;
use crate::domain::report::RunReport;
use crate::domain::types::ImportMode;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::import_session::ImportSession;
use crate::importer::importer_trait::{BulkImporter, ImportJob};
use crate::importer::run_reporter::RunReporter;
use crate::repository::{ApplicationStore, MetadataStore, ObjectStore};
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, instrument};

// ==========================================
// BulkImporterImpl - 批量导入器实现
// ==========================================
#[derive(Clone)]
pub struct BulkImporterImpl {
    // 外部协作者（由外层工厂建立连接后注入）
    objects: Arc<dyn ObjectStore>,
    metadata: Arc<dyn MetadataStore>,
    application: Arc<dyn ApplicationStore>,

    config: Arc<ImportConfig>,
    reporter: RunReporter,
}

impl BulkImporterImpl {
    /// 创建批量导入器
    ///
    /// # 返回
    /// - Err(ConfigValueError): 配置不合法
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        metadata: Arc<dyn MetadataStore>,
        application: Arc<dyn ApplicationStore>,
        config: ImportConfig,
    ) -> ImportResult<Self> {
        config.validate()?;
        let reporter = RunReporter::from_config(&config);
        Ok(Self {
            objects,
            metadata,
            application,
            config: Arc::new(config),
            reporter,
        })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    fn next_run_name(&self, user_id: &str) -> String {
        RunReporter::run_name(user_id, self.config.run_naming, Utc::now())
    }

    /// 在阻塞任务中运行一次会话
    async fn run_in_background(
        &self,
        source: PathBuf,
        upload: Option<Vec<u8>>,
        mode: ImportMode,
        run_name: String,
    ) -> ImportResult<RunReport> {
        let importer = self.clone();
        tokio::task::spawn_blocking(move || {
            if let Some(data) = upload {
                save_upload(&source, &data)?;
            }
            let mut session = ImportSession::new(
                mode,
                &importer.config,
                importer.objects.as_ref(),
                importer.metadata.as_ref(),
                importer.application.as_ref(),
            );
            session.run_file(&source, &run_name, &importer.reporter)
        })
        .await?
    }
}

fn save_upload(path: &Path, data: &[u8]) -> ImportResult<()> {
    let to_error = |e: std::io::Error| ImportError::UploadWriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, data).map_err(to_error)
}

#[async_trait]
impl BulkImporter for BulkImporterImpl {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn import_bytes(
        &self,
        data: Vec<u8>,
        mode: ImportMode,
        user_id: &str,
    ) -> ImportResult<RunReport> {
        let run_name = self.next_run_name(user_id);
        let upload_path = self.config.upload_dir.join(&run_name);
        info!(run_name = %run_name, upload = %upload_path.display(), "接收上传文件");

        self.run_in_background(upload_path, Some(data), mode, run_name)
            .await
    }

    #[instrument(skip(self))]
    async fn import_file(
        &self,
        path: &Path,
        mode: ImportMode,
        user_id: &str,
    ) -> ImportResult<RunReport> {
        let run_name = self.next_run_name(user_id);
        self.run_in_background(path.to_path_buf(), None, mode, run_name)
            .await
    }

    async fn batch_import(&self, jobs: Vec<ImportJob>) -> Vec<ImportResult<RunReport>> {
        info!(count = jobs.len(), "开始批量导入文件");

        let import_tasks = jobs.into_iter().map(|job| async move {
            let result = self.import_file(&job.path, job.mode, &job.user_id).await;
            match &result {
                Ok(report) => info!(
                    file = %job.path.display(),
                    run_name = %report.file_name,
                    failed = report.summary.failed,
                    "文件导入完成"
                ),
                Err(e) => error!(file = %job.path.display(), error = %e, "文件导入失败"),
            }
            result
        });

        // 并发执行所有导入任务
        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量导入完成"
        );
        results
    }

    async fn download_log(&self, run_name: &str) -> ImportResult<Vec<u8>> {
        let reporter = self.reporter.clone();
        let run_name = run_name.to_string();
        tokio::task::spawn_blocking(move || reporter.read_log(&run_name)).await?
    }

    async fn download_errors(&self, run_name: &str) -> ImportResult<Vec<u8>> {
        let reporter = self.reporter.clone();
        let run_name = run_name.to_string();
        tokio::task::spawn_blocking(move || reporter.read_errors(&run_name)).await?
    }
}
