// ==========================================
// 库存批量导入系统 - 导入配置
// ==========================================
// 职责: 分隔符、哨兵、产物目录、运行命名等导入参数
// 存储: JSON 文件（所有字段均有默认值，可只覆写部分字段）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// 产物根目录名（位于平台数据目录下）
pub const APP_DIR_NAME: &str = "inventory-loader";

// ==========================================
// AttributeLayout - 属性字段布局
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeLayout {
    /// 每个字段自带名称与值: name<c>v1<c>v2
    #[default]
    Packed,
    /// 名称字段后跟值字段（对象模式为 类型:值，即同步文件格式）
    Paired,
}

// ==========================================
// RunNaming - 运行名生成策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunNaming {
    /// <用户>-<时间戳>，同一用户同一秒内重复运行会重名
    UserTimestamp,
    /// <用户>-<时间戳>-<随机后缀>
    #[default]
    UserTimestampRandom,
}

// ==========================================
// ImportConfig - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// 顶层字段分隔符
    pub field_delimiter: String,

    /// 属性字段内的组成部分分隔符
    pub component_delimiter: String,

    /// 复合值操作符（name:City1 / String:SN-001）
    pub value_operator: String,

    /// 对象模式属性布局
    pub object_attribute_layout: AttributeLayout,

    /// 列表类型模式属性布局
    /// 紧凑布局保留第 2 列，只能导入奇数个属性；成对布局为 类名 <d> 属性 <d> 值 ...
    pub list_type_attribute_layout: AttributeLayout,

    /// 合成根哨兵（父类名/父对象名）
    pub root_sentinel: String,

    /// 根对象标记（父对象选择器列中的 -1）
    pub object_root_marker: String,

    /// 无模板标记
    pub no_template_marker: String,

    /// 是否跳过注释行与空行
    pub skip_comments: bool,

    /// 注释行前缀
    pub comment_prefix: String,

    /// 提交批量大小（保留配置项，当前每条记录单独落库）
    pub commit_size: Option<usize>,

    /// 上传文件目录
    pub upload_dir: PathBuf,

    /// 运行日志目录
    pub log_dir: PathBuf,

    /// 失败行目录（仅对象模式）
    pub errors_dir: PathBuf,

    /// 运行名生成策略
    pub run_naming: RunNaming,
}

impl Default for ImportConfig {
    fn default() -> Self {
        let base = default_base_dir();
        Self {
            field_delimiter: "~t~".to_string(),
            component_delimiter: "~c~".to_string(),
            value_operator: ":".to_string(),
            object_attribute_layout: AttributeLayout::Packed,
            list_type_attribute_layout: AttributeLayout::Packed,
            root_sentinel: "root".to_string(),
            object_root_marker: "-1".to_string(),
            no_template_marker: "none".to_string(),
            skip_comments: true,
            comment_prefix: "#".to_string(),
            commit_size: None,
            upload_dir: base.join("uploads"),
            log_dir: base.join("logs"),
            errors_dir: base.join("errors"),
            run_naming: RunNaming::UserTimestampRandom,
        }
    }
}

fn default_base_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
}

impl ImportConfig {
    /// 同步文件格式预设: `;` 分隔，属性为 名称;类型:值 成对字段
    pub fn sync_preset() -> Self {
        Self {
            field_delimiter: ";".to_string(),
            object_attribute_layout: AttributeLayout::Paired,
            ..Self::default()
        }
    }

    /// 将三个产物目录统一放到 base 下
    pub fn with_base_dir(mut self, base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        self.upload_dir = base.join("uploads");
        self.log_dir = base.join("logs");
        self.errors_dir = base.join("errors");
        self
    }

    /// 从 JSON 文件加载配置并校验
    pub fn from_json_file(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// 从 JSON 文本加载配置并校验
    pub fn from_json_str(raw: &str) -> ImportResult<Self> {
        let config: ImportConfig =
            serde_json::from_str(raw).map_err(|e| ImportError::ConfigReadError {
                key: "import_config".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> ImportResult<()> {
        for (key, value) in [
            ("field_delimiter", &self.field_delimiter),
            ("component_delimiter", &self.component_delimiter),
            ("value_operator", &self.value_operator),
            ("root_sentinel", &self.root_sentinel),
        ] {
            if value.is_empty() {
                return Err(ImportError::ConfigValueError {
                    key: key.to_string(),
                    value: String::new(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        // 空前缀会让每一行都被当作注释跳过
        if self.skip_comments && self.comment_prefix.is_empty() {
            return Err(ImportError::ConfigValueError {
                key: "comment_prefix".to_string(),
                value: String::new(),
                message: "must not be empty when skip_comments is enabled".to_string(),
            });
        }

        if self.field_delimiter == self.component_delimiter {
            return Err(ImportError::ConfigValueError {
                key: "component_delimiter".to_string(),
                value: self.component_delimiter.clone(),
                message: "must differ from field_delimiter".to_string(),
            });
        }

        match self.commit_size {
            Some(0) => {
                return Err(ImportError::ConfigValueError {
                    key: "commit_size".to_string(),
                    value: "0".to_string(),
                    message: "must be greater than zero".to_string(),
                })
            }
            Some(size) => {
                warn!(commit_size = size, "commit_size 已设置但不生效：每条记录单独落库");
            }
            None => {}
        }

        Ok(())
    }
}
