// ==========================================
// 库存批量导入系统 - 运行报告写出器
// ==========================================
// 产物:
// - 日志文件 log_dir/<运行名>: 头部 + 账本
// - 错误行文件 errors_dir/<运行名>: 失败行原文（仅对象模式）
// 命名: <用户>-<yyyy-MM-ddTHH-mm-ss>[-<8 位随机后缀>]
// ==========================================

use crate::config::{ImportConfig, RunNaming};
use crate::domain::report::RunReport;
use crate::domain::types::ImportMode;
use crate::i18n::{t, t_with_args};
use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// 运行名中的时间戳格式
const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

#[derive(Debug, Clone)]
pub struct RunReporter {
    log_dir: PathBuf,
    errors_dir: PathBuf,
}

impl RunReporter {
    pub fn new(log_dir: impl Into<PathBuf>, errors_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            errors_dir: errors_dir.into(),
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(config.log_dir.clone(), config.errors_dir.clone())
    }

    /// 生成运行名（同时作为上传文件与产物文件名）
    pub fn run_name(user_id: &str, naming: RunNaming, now: DateTime<Utc>) -> String {
        let user: String = user_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let base = format!("{}-{}", user, now.format(RUN_TIMESTAMP_FORMAT));

        match naming {
            RunNaming::UserTimestamp => base,
            RunNaming::UserTimestampRandom => {
                let suffix = Uuid::new_v4().simple().to_string();
                format!("{}-{}", base, &suffix[..8])
            }
        }
    }

    /// 渲染日志产物内容
    pub fn render_log(report: &RunReport) -> String {
        let timestamp = report.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        if !report.had_errors {
            return format!("[{}] {}\n", timestamp, t("report.success"));
        }

        let header = t_with_args(
            "report.failure_header",
            &[
                ("failed", &report.summary.failed.to_string()),
                ("processed", &report.summary.processed.to_string()),
                ("file", &report.file_name),
            ],
        );
        let mut content = format!("[{}] {}\n", timestamp, header);
        for entry in &report.error_messages {
            content.push_str(entry);
            content.push('\n');
        }
        content
    }

    /// 写出报告产物（每次运行调用一次）
    pub fn write(&self, report: &RunReport) -> ImportResult<()> {
        let log_path = artifact_path(&self.log_dir, &report.file_name)?;
        write_artifact(&log_path, Self::render_log(report).as_bytes())?;

        if report.mode == ImportMode::Object && report.had_errors {
            let errors_path = artifact_path(&self.errors_dir, &report.file_name)?;
            let mut content = report.failed_lines.join("\n");
            content.push('\n');
            write_artifact(&errors_path, content.as_bytes())?;
        }

        if let Ok(summary) = serde_json::to_string(&report.summary) {
            debug!(run_name = %report.file_name, summary = %summary, "运行汇总");
        }
        info!(
            run_name = %report.file_name,
            had_errors = report.had_errors,
            log = %log_path.display(),
            "运行报告已写出"
        );
        Ok(())
    }

    /// 读取日志产物
    pub fn read_log(&self, run_name: &str) -> ImportResult<Vec<u8>> {
        read_artifact(&artifact_path(&self.log_dir, run_name)?)
    }

    /// 读取错误行产物
    pub fn read_errors(&self, run_name: &str) -> ImportResult<Vec<u8>> {
        read_artifact(&artifact_path(&self.errors_dir, run_name)?)
    }
}

// 运行名只允许单段文件名
fn artifact_path(dir: &Path, run_name: &str) -> ImportResult<PathBuf> {
    let valid = !run_name.is_empty()
        && run_name != "."
        && run_name != ".."
        && !run_name.contains(|c: char| c == '/' || c == '\\');
    if !valid {
        return Err(ImportError::ConfigValueError {
            key: "run_name".to_string(),
            value: run_name.to_string(),
            message: "not a plain file name".to_string(),
        });
    }
    Ok(dir.join(run_name))
}

fn write_artifact(path: &Path, content: &[u8]) -> ImportResult<()> {
    let to_error = |e: std::io::Error| ImportError::ReportWriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, content).map_err(to_error)
}

fn read_artifact(path: &Path) -> ImportResult<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ImportError::FileNotFound(path.display().to_string()),
        _ => ImportError::FileReadError(format!("{}: {}", path.display(), e)),
    })
}
