// ==========================================
// 库存批量导入系统 - 导入结果与运行报告
// ==========================================
// 职责: 行级结果（ImportOutcome）与运行级报告（RunReport）
// 红线: 结果按行序追加，创建后不再修改
// ==========================================

use crate::domain::types::{ImportMode, ObjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ImportOutcome - 行级结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportOutcome {
    /// 对象已创建
    Created { line: usize, object_id: ObjectId },
    /// 列表类型条目已创建并写入属性
    Updated { line: usize, object_id: ObjectId },
    /// 行失败；object_id 非空表示存储调用成功但该行仍有错误
    Failed {
        line: usize,
        message: String,
        object_id: Option<ObjectId>,
    },
    /// 注释行或空行
    Skipped { line: usize },
}

impl ImportOutcome {
    pub fn line(&self) -> usize {
        match self {
            ImportOutcome::Created { line, .. }
            | ImportOutcome::Updated { line, .. }
            | ImportOutcome::Failed { line, .. }
            | ImportOutcome::Skipped { line } => *line,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ImportOutcome::Failed { .. })
    }

    /// 账本条目（仅失败行）
    pub fn ledger_entry(&self) -> Option<String> {
        match self {
            ImportOutcome::Failed { line, message, .. } => {
                Some(format!("Line {}: {}", line, message))
            }
            _ => None,
        }
    }
}

// ==========================================
// RunSummary - 运行汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub processed: usize, // 读取的行数
    pub created: usize,   // 创建的对象
    pub updated: usize,   // 创建并更新的列表类型条目
    pub failed: usize,    // 失败行
    pub skipped: usize,   // 跳过的注释/空行
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[ImportOutcome]) -> Self {
        let mut summary = RunSummary {
            processed: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                ImportOutcome::Created { .. } => summary.created += 1,
                ImportOutcome::Updated { .. } => summary.updated += 1,
                ImportOutcome::Failed { .. } => summary.failed += 1,
                ImportOutcome::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }
}

// ==========================================
// RunReport - 运行报告
// ==========================================
// 每次运行创建一次，由 RunReporter 写出一次
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub file_name: String,               // 运行名（同时是产物文件名）
    pub mode: ImportMode,                // 导入模式
    pub had_errors: bool,                // 是否存在行级错误
    pub error_messages: Vec<String>,     // 账本（按行序）
    pub failed_lines: Vec<String>,       // 失败行原文（按行序）
    pub timestamp: DateTime<Utc>,        // 报告时间
    pub summary: RunSummary,             // 汇总统计
    pub outcomes: Vec<ImportOutcome>,    // 行级结果
}

impl RunReport {
    /// 由行级结果构造报告
    ///
    /// # 参数
    /// - failed_lines: 失败行原文，与 Failed 结果一一对应
    pub fn from_outcomes(
        file_name: impl Into<String>,
        mode: ImportMode,
        outcomes: Vec<ImportOutcome>,
        failed_lines: Vec<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let error_messages: Vec<String> =
            outcomes.iter().filter_map(ImportOutcome::ledger_entry).collect();
        let summary = RunSummary::from_outcomes(&outcomes);

        Self {
            file_name: file_name.into(),
            mode,
            had_errors: !error_messages.is_empty(),
            error_messages,
            failed_lines,
            timestamp,
            summary,
            outcomes,
        }
    }
}
