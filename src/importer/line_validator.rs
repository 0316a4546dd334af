// ==========================================
// 库存批量导入系统 - 行校验器
// ==========================================
// 职责: 字段数量与结构校验，产出待解析的 ImportRecord
// 两种策略（有意保持不一致）:
// - 列表类型: 任一属性结构错误 → 整行失败
// - 对象: 属性结构错误只丢弃该属性，其余属性继续
// ==========================================

use crate::config::{AttributeLayout, ImportConfig};
use crate::domain::record::{AttributeMap, ImportRecord, ParentPlacement, ParentSelector};
use crate::domain::types::ImportMode;
use crate::importer::error::LineError;
use crate::importer::field_splitter::FieldSplitter;
use std::collections::HashMap;

/// 列表类型行最少字段数
pub const MIN_LIST_TYPE_FIELDS: usize = 3;

/// 对象行最少字段数
pub const MIN_OBJECT_FIELDS: usize = 6;

// 对象行固定列
const OBJECT_CLASS: usize = 0;
const OBJECT_TEMPLATE: usize = 1;
const OBJECT_PARENT_CLASS: usize = 2;
const OBJECT_PARENT_SELECTOR: usize = 4;
const OBJECT_FIRST_ATTRIBUTE: usize = 5;

// 列表类型行固定列
const LIST_TYPE_CLASS: usize = 0;
const LIST_TYPE_FIRST_ATTRIBUTE: usize = 2;

// ==========================================
// ValidatedLine - 校验结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLine {
    /// 属性为原始文本的记录
    pub record: ImportRecord,
    /// 成对布局中声明的属性类型（属性名 → 类型名）
    pub declared_types: HashMap<String, String>,
    /// 被丢弃属性的错误（仅对象模式）
    pub attribute_errors: Vec<LineError>,
}

// ==========================================
// LineValidator Trait
// ==========================================
pub trait LineValidator: Send + Sync {
    /// 该策略对应的导入模式
    fn mode(&self) -> ImportMode;

    /// 校验已拆分的字段
    ///
    /// # 返回
    /// - Ok(ValidatedLine): 可进入解析阶段
    /// - Err(LineError): 行级结构错误，不应发起任何存储调用
    fn validate(&self, line_number: usize, fields: &[&str]) -> Result<ValidatedLine, LineError>;
}

// ==========================================
// ListTypeLinePolicy - 列表类型策略
// ==========================================
// 紧凑布局: 类名 <d> 保留列 <d> 属性名<c>值 <d> ...
// 成对布局: 类名 <d> 属性名 <d> 值<c>值 <d> ...
pub struct ListTypeLinePolicy {
    splitter: FieldSplitter,
    layout: AttributeLayout,
}

impl ListTypeLinePolicy {
    pub fn new(splitter: FieldSplitter, layout: AttributeLayout) -> Self {
        Self { splitter, layout }
    }

    fn collect_packed(&self, fields: &[&str]) -> Result<AttributeMap, LineError> {
        let mut attributes = AttributeMap::new();
        for field in &fields[LIST_TYPE_FIRST_ATTRIBUTE..] {
            let parts = self.splitter.split_components(field);
            if parts.len() < 2 {
                return Err(LineError::attribute_definition_incomplete(field));
            }
            attributes.insert(parts[0], to_owned_values(&parts[1..]));
        }
        Ok(attributes)
    }

    /// 奇偶校验已保证类名之后的字段两两成对
    fn collect_paired(&self, fields: &[&str]) -> Result<AttributeMap, LineError> {
        let mut attributes = AttributeMap::new();
        for pair in fields[LIST_TYPE_CLASS + 1..].chunks(2) {
            let (name, raw_value) = (pair[0], pair[1]);
            if name.trim().is_empty() {
                return Err(LineError::attribute_definition_incomplete(raw_value));
            }
            let values = self.splitter.split_components(raw_value);
            attributes.insert(name, to_owned_values(&values));
        }
        Ok(attributes)
    }
}

impl LineValidator for ListTypeLinePolicy {
    fn mode(&self) -> ImportMode {
        ImportMode::ListType
    }

    fn validate(&self, line_number: usize, fields: &[&str]) -> Result<ValidatedLine, LineError> {
        if fields.len() < MIN_LIST_TYPE_FIELDS {
            return Err(LineError::not_enough_fields(fields.len(), MIN_LIST_TYPE_FIELDS));
        }
        // 类名之后的字段必须成对出现
        if (fields.len() - 1) % 2 != 0 {
            return Err(LineError::fields_not_paired(fields.len()));
        }

        let attributes = match self.layout {
            AttributeLayout::Packed => self.collect_packed(fields)?,
            AttributeLayout::Paired => self.collect_paired(fields)?,
        };

        Ok(ValidatedLine {
            record: ImportRecord {
                line_number,
                class_name: fields[LIST_TYPE_CLASS].to_string(),
                parent: None,
                attributes,
                template_id: None,
            },
            declared_types: HashMap::new(),
            attribute_errors: Vec::new(),
        })
    }
}

// ==========================================
// ObjectLinePolicy - 对象策略
// ==========================================
// 行格式: 类名 <d> 模板 <d> 父类名 <d> 根标记列 <d> 父对象选择器 <d> 属性...
pub struct ObjectLinePolicy {
    splitter: FieldSplitter,
    layout: AttributeLayout,
    root_sentinel: String,
    object_root_marker: String,
    no_template_marker: String,
}

impl ObjectLinePolicy {
    pub fn new(splitter: FieldSplitter, config: &ImportConfig) -> Self {
        Self {
            splitter,
            layout: config.object_attribute_layout,
            root_sentinel: config.root_sentinel.clone(),
            object_root_marker: config.object_root_marker.clone(),
            no_template_marker: config.no_template_marker.clone(),
        }
    }

    fn parse_template(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() || raw == self.no_template_marker {
            None
        } else {
            Some(raw.to_string())
        }
    }

    fn parse_selector(&self, raw: &str) -> Result<ParentSelector, LineError> {
        if raw == self.root_sentinel || raw == self.object_root_marker {
            return Ok(ParentSelector::Root);
        }
        match self.splitter.split_compound(raw) {
            Some((key, value)) if !key.is_empty() && !value.is_empty() => {
                Ok(ParentSelector::Criterion {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
            Some(_) => Err(LineError::parent_selector_malformed(
                raw,
                self.splitter.value_operator(),
            )),
            // 不带操作符时按名称查找
            None => Ok(ParentSelector::Criterion {
                key: "name".to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// 紧凑布局: 每个字段为 name<c>v1<c>v2
    fn collect_packed(
        &self,
        fields: &[&str],
        attributes: &mut AttributeMap,
        errors: &mut Vec<LineError>,
    ) {
        for field in fields {
            let parts = self.splitter.split_components(field);
            if parts.len() < 2 {
                errors.push(LineError::attribute_definition_incomplete(field));
                continue;
            }
            attributes.insert(parts[0], to_owned_values(&parts[1..]));
        }
    }

    /// 成对布局: name <d> Type:value
    fn collect_paired(
        &self,
        fields: &[&str],
        attributes: &mut AttributeMap,
        declared_types: &mut HashMap<String, String>,
        errors: &mut Vec<LineError>,
    ) {
        for pair in fields.chunks(2) {
            let name = pair[0];
            let Some(raw_value) = pair.get(1) else {
                errors.push(LineError::attribute_without_value(name));
                continue;
            };
            match self.splitter.split_compound(raw_value) {
                Some((declared, value)) => {
                    declared_types.insert(name.to_string(), declared.to_string());
                    attributes.insert(name, vec![value.to_string()]);
                }
                None => errors.push(LineError::attribute_value_malformed(
                    name,
                    raw_value,
                    self.splitter.value_operator(),
                )),
            }
        }
    }
}

impl LineValidator for ObjectLinePolicy {
    fn mode(&self) -> ImportMode {
        ImportMode::Object
    }

    fn validate(&self, line_number: usize, fields: &[&str]) -> Result<ValidatedLine, LineError> {
        if fields.len() < MIN_OBJECT_FIELDS {
            return Err(LineError::not_enough_fields(fields.len(), MIN_OBJECT_FIELDS));
        }

        let parent_class = fields[OBJECT_PARENT_CLASS];
        let selector = self.parse_selector(fields[OBJECT_PARENT_SELECTOR])?;
        if selector.is_root() && parent_class != self.root_sentinel {
            return Err(LineError::root_selector_with_class(parent_class));
        }

        let mut attributes = AttributeMap::new();
        let mut declared_types = HashMap::new();
        let mut attribute_errors = Vec::new();
        let attribute_fields = &fields[OBJECT_FIRST_ATTRIBUTE..];
        match self.layout {
            AttributeLayout::Packed => {
                self.collect_packed(attribute_fields, &mut attributes, &mut attribute_errors)
            }
            AttributeLayout::Paired => self.collect_paired(
                attribute_fields,
                &mut attributes,
                &mut declared_types,
                &mut attribute_errors,
            ),
        }

        Ok(ValidatedLine {
            record: ImportRecord {
                line_number,
                class_name: fields[OBJECT_CLASS].to_string(),
                parent: Some(ParentPlacement {
                    class_name: parent_class.to_string(),
                    selector,
                }),
                attributes,
                template_id: self.parse_template(fields[OBJECT_TEMPLATE]),
            },
            declared_types,
            attribute_errors,
        })
    }
}

fn to_owned_values(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
