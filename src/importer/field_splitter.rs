// ==========================================
// 库存批量导入系统 - 字段拆分器
// ==========================================
// 职责: 按固定分隔符拆分行与属性字段
// 红线: 不做任何校验，字段过少由调用方判断
// ==========================================

use crate::config::ImportConfig;

/// 字段拆分器
///
/// 分隔符为多字符字面量（默认 `~t~` / `~c~`），避开业务数据中的常见标点。
/// 空字段保留，不含分隔符的行返回单元素序列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSplitter {
    field_delimiter: String,
    component_delimiter: String,
    value_operator: String,
}

impl FieldSplitter {
    pub fn new(
        field_delimiter: impl Into<String>,
        component_delimiter: impl Into<String>,
        value_operator: impl Into<String>,
    ) -> Self {
        Self {
            field_delimiter: field_delimiter.into(),
            component_delimiter: component_delimiter.into(),
            value_operator: value_operator.into(),
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(
            config.field_delimiter.as_str(),
            config.component_delimiter.as_str(),
            config.value_operator.as_str(),
        )
    }

    pub fn value_operator(&self) -> &str {
        &self.value_operator
    }

    /// 拆分顶层字段
    pub fn split_fields<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.split(self.field_delimiter.as_str()).collect()
    }

    /// 拆分属性定义: [属性名, 值1, 值2, ...]
    pub fn split_components<'a>(&self, field: &'a str) -> Vec<&'a str> {
        field.split(self.component_delimiter.as_str()).collect()
    }

    /// 拆分复合值（在第一个操作符处）: "String:SN-001" → ("String", "SN-001")
    pub fn split_compound<'a>(&self, value: &'a str) -> Option<(&'a str, &'a str)> {
        value.split_once(self.value_operator.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter() -> FieldSplitter {
        FieldSplitter::new("~t~", "~c~", ":")
    }

    #[test]
    fn test_split_fields_keeps_empty_fields() {
        let fields = splitter().split_fields("Brand~t~~t~model~c~X~t~");
        assert_eq!(fields, vec!["Brand", "", "model~c~X", ""]);
    }

    #[test]
    fn test_split_without_delimiter_is_single_field() {
        assert_eq!(splitter().split_fields("Brand"), vec!["Brand"]);
        assert_eq!(splitter().split_fields(""), vec![""]);
    }

    #[test]
    fn test_split_is_idempotent() {
        let s = splitter();
        let line = "Router~t~none~t~City~t~-1~t~root~t~name~c~R1";
        assert_eq!(s.split_fields(line), s.split_fields(line));
    }

    #[test]
    fn test_single_char_punctuation_is_not_a_delimiter() {
        let fields = splitter().split_fields("Brand~t~unused~t~name~c~Acme, Inc.; ~t");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[2], "name~c~Acme, Inc.; ~t");
    }

    #[test]
    fn test_split_components() {
        let parts = splitter().split_components("ports~c~Gi0/1~c~Gi0/2");
        assert_eq!(parts, vec!["ports", "Gi0/1", "Gi0/2"]);
        assert_eq!(splitter().split_components("model"), vec!["model"]);
    }

    #[test]
    fn test_split_compound_on_first_operator() {
        let s = splitter();
        assert_eq!(s.split_compound("String:SN-001"), Some(("String", "SN-001")));
        assert_eq!(s.split_compound("Date:10:30"), Some(("Date", "10:30")));
        assert_eq!(s.split_compound("SN-001"), None);
    }

    #[test]
    fn test_sync_preset_delimiters() {
        let s = FieldSplitter::from_config(&ImportConfig::sync_preset());
        let fields = s.split_fields("Router;none;root;-1;name:City1;serialNumber;String:SN-001");
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[4], "name:City1");
    }
}
