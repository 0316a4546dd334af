// ==========================================
// 库存批量导入系统 - 导入会话
// ==========================================
// 职责: 驱动一次完整运行（一个文件）
// 行流程: 读取 → 拆分 → 校验 → 解析 → 物化 → 记录结果
// 会话状态: Open → Processing → Reporting → Closed
// 红线:
// - 行级错误只记入账本，会话继续处理下一行
// - 只有读取源文件失败才终止运行
// - 读取失败时对象模式仍写出已累计的报告，列表类型模式不写
// ==========================================

use crate::config::ImportConfig;
use crate::domain::record::{AttributeMap, ImportRecord};
use crate::domain::report::{ImportOutcome, RunReport};
use crate::domain::types::{ImportMode, ObjectId};
use crate::importer::error::{join_line_errors, ImportError, ImportResult, LineError};
use crate::importer::field_splitter::FieldSplitter;
use crate::importer::line_validator::{
    LineValidator, ListTypeLinePolicy, ObjectLinePolicy, ValidatedLine,
};
use crate::importer::materializer::ObjectMaterializer;
use crate::importer::reference_resolver::ReferenceResolver;
use crate::importer::run_reporter::RunReporter;
use crate::importer::type_resolver::AttributeTypeResolver;
use crate::repository::{ApplicationStore, MetadataStore, ObjectStore};
use chrono::Utc;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// SessionState - 会话状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Processing,
    Reporting,
    Closed,
}

// ==========================================
// ImportSession - 导入会话
// ==========================================
// 生命周期 = 一次运行；属性类型缓存随会话丢弃
pub struct ImportSession<'a> {
    mode: ImportMode,
    splitter: FieldSplitter,
    validator: Box<dyn LineValidator>,
    types: AttributeTypeResolver<'a>,
    references: ReferenceResolver<'a>,
    materializer: ObjectMaterializer<'a>,
    skip_comments: bool,
    comment_prefix: String,
    state: SessionState,
    outcomes: Vec<ImportOutcome>,
    failed_lines: Vec<String>,
}

impl<'a> ImportSession<'a> {
    /// 创建会话
    ///
    /// # 参数
    /// - mode: 导入模式（决定校验策略与物化形状）
    /// - config: 导入配置
    /// - objects / metadata / application: 外部协作者
    pub fn new(
        mode: ImportMode,
        config: &ImportConfig,
        objects: &'a dyn ObjectStore,
        metadata: &'a dyn MetadataStore,
        application: &'a dyn ApplicationStore,
    ) -> Self {
        let splitter = FieldSplitter::from_config(config);
        let validator: Box<dyn LineValidator> = match mode {
            ImportMode::ListType => Box::new(ListTypeLinePolicy::new(
                splitter.clone(),
                config.list_type_attribute_layout,
            )),
            ImportMode::Object => Box::new(ObjectLinePolicy::new(splitter.clone(), config)),
        };

        Self {
            mode,
            splitter,
            validator,
            types: AttributeTypeResolver::new(metadata),
            references: ReferenceResolver::new(application),
            materializer: ObjectMaterializer::new(
                objects,
                application,
                config.root_sentinel.as_str(),
                config.value_operator.as_str(),
            ),
            skip_comments: config.skip_comments,
            comment_prefix: config.comment_prefix.clone(),
            state: SessionState::Open,
            outcomes: Vec::new(),
            failed_lines: Vec::new(),
        }
    }

    pub fn mode(&self) -> ImportMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 已记录的行级结果
    pub fn outcomes(&self) -> &[ImportOutcome] {
        &self.outcomes
    }

    /// 打开源文件并运行
    pub fn run_file(
        &mut self,
        path: &Path,
        run_name: &str,
        reporter: &RunReporter,
    ) -> ImportResult<RunReport> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ImportError::FileNotFound(path.display().to_string()),
            _ => ImportError::FileReadError(format!("{}: {}", path.display(), e)),
        })?;
        self.run(BufReader::new(file), run_name, reporter)
    }

    /// 逐行处理直到文件结束，然后写出报告
    ///
    /// # 返回
    /// - Ok(RunReport): 运行完成（可能含行级错误）
    /// - Err(ImportError): 读取失败或报告写出失败
    #[instrument(skip(self, reader, reporter), fields(mode = %self.mode))]
    pub fn run<R: BufRead>(
        &mut self,
        mut reader: R,
        run_name: &str,
        reporter: &RunReporter,
    ) -> ImportResult<RunReport> {
        if self.state != SessionState::Open {
            return Err(ImportError::InternalError(format!(
                "import session already used (state: {:?})",
                self.state
            )));
        }
        self.state = SessionState::Processing;
        info!(run_name = run_name, "开始导入");

        let mut buf = Vec::new();
        let mut line_number = 0;
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    line_number += 1;
                    let line = decode_line(&buf);
                    if let Cow::Owned(_) = line {
                        warn!(run_name = run_name, line = line_number, "行内含非法 UTF-8 字节，已替换为 U+FFFD");
                    }
                    self.process_line(line_number, &line);
                }
                Err(e) => {
                    let failed_line = line_number + 1;
                    error!(run_name = run_name, line = failed_line, error = %e, "读取源文件失败，运行终止");
                    if self.mode == ImportMode::Object {
                        let report = self.finish(run_name);
                        // 读取错误优先于报告写出错误返回
                        if let Err(write_err) = reporter.write(&report) {
                            error!(run_name = run_name, error = %write_err, "读取失败后写出报告失败");
                        }
                    }
                    self.state = SessionState::Closed;
                    return Err(ImportError::FileReadError(e.to_string()));
                }
            }
        }

        let report = self.finish(run_name);
        reporter.write(&report)?;
        self.state = SessionState::Closed;

        info!(
            run_name = run_name,
            processed = report.summary.processed,
            created = report.summary.created,
            updated = report.summary.updated,
            failed = report.summary.failed,
            skipped = report.summary.skipped,
            "导入完成"
        );
        Ok(report)
    }

    /// 处理单行并记录结果
    pub fn process_line(&mut self, line_number: usize, raw: &str) -> &ImportOutcome {
        let line = raw.trim_end_matches('\r');
        let outcome = if self.is_skippable(line) {
            ImportOutcome::Skipped { line: line_number }
        } else {
            let fields = self.splitter.split_fields(line);
            match self.validator.validate(line_number, &fields) {
                Ok(validated) => match self.mode {
                    ImportMode::ListType => self.import_list_type_item(validated),
                    ImportMode::Object => self.import_object(validated),
                },
                Err(err) => failed(line_number, &[err], None),
            }
        };

        if let ImportOutcome::Failed { message, .. } = &outcome {
            warn!(line = line_number, error = %message, "行导入失败");
            self.failed_lines.push(line.to_string());
        }
        self.outcomes.push(outcome);
        &self.outcomes[self.outcomes.len() - 1]
    }

    fn is_skippable(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.is_empty() || (self.skip_comments && trimmed.starts_with(&self.comment_prefix))
    }

    // ===== 列表类型: 任一属性错误 → 整行失败，不发起创建 =====

    fn import_list_type_item(&mut self, validated: ValidatedLine) -> ImportOutcome {
        let line = validated.record.line_number;
        let record = match self.resolve_list_type_attributes(validated.record) {
            Ok(record) => record,
            Err(err) => return failed(line, &[err], None),
        };

        match self.materializer.create_list_type_item(&record) {
            Ok(object_id) => ImportOutcome::Updated { line, object_id },
            Err(failure) => failed(line, &[failure.error], failure.object_id),
        }
    }

    fn resolve_list_type_attributes(
        &mut self,
        record: ImportRecord,
    ) -> Result<ImportRecord, LineError> {
        let mut resolved = AttributeMap::new();
        for (name, values) in record.attributes.iter() {
            let attribute_type = self.types.resolve(&record.class_name, name)?;
            resolved.insert(name, self.references.resolve_values(&attribute_type, values)?);
        }
        Ok(record.with_attributes(resolved))
    }

    // ===== 对象: 属性错误只丢弃该属性，对象照常创建 =====

    fn import_object(&mut self, validated: ValidatedLine) -> ImportOutcome {
        let ValidatedLine {
            record,
            declared_types,
            mut attribute_errors,
        } = validated;
        let line = record.line_number;

        let mut resolved = AttributeMap::new();
        for (name, values) in record.attributes.iter() {
            let declared = declared_types.get(name).map(String::as_str);
            match self.resolve_object_attribute(&record.class_name, name, values, declared) {
                Ok(values) => resolved.insert(name, values),
                Err(err) => attribute_errors.push(err),
            }
        }
        let record = record.with_attributes(resolved);

        match self.materializer.create_object(&record) {
            Ok(object_id) if attribute_errors.is_empty() => {
                ImportOutcome::Created { line, object_id }
            }
            Ok(object_id) => {
                debug!(line = line, object_id = %object_id, dropped = attribute_errors.len(), "对象已创建，部分属性被丢弃");
                failed(line, &attribute_errors, Some(object_id))
            }
            Err(err) => {
                attribute_errors.push(err);
                failed(line, &attribute_errors, None)
            }
        }
    }

    fn resolve_object_attribute(
        &mut self,
        class_name: &str,
        name: &str,
        values: &[String],
        declared: Option<&str>,
    ) -> Result<Vec<String>, LineError> {
        let attribute_type = self.types.resolve(class_name, name)?;
        if let Some(declared) = declared {
            if declared != attribute_type.name() {
                return Err(LineError::attribute_type_mismatch(
                    name,
                    declared,
                    attribute_type.name(),
                ));
            }
        }
        self.references.resolve_values(&attribute_type, values)
    }

    fn finish(&mut self, run_name: &str) -> RunReport {
        self.state = SessionState::Reporting;
        RunReport::from_outcomes(
            run_name,
            self.mode,
            std::mem::take(&mut self.outcomes),
            std::mem::take(&mut self.failed_lines),
            Utc::now(),
        )
    }
}

/// 去掉行尾换行符；非法 UTF-8 字节按 U+FFFD 替换，不中断运行
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

fn failed(line: usize, errors: &[LineError], object_id: Option<ObjectId>) -> ImportOutcome {
    ImportOutcome::Failed {
        line,
        message: join_line_errors(errors),
        object_id,
    }
}
