// ==========================================
// 库存批量导入系统 - 领域类型定义
// ==========================================
// 职责: 导入模式、属性类型、对象标识等基础值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 导入模式 (Import Mode)
// ==========================================
// 一次运行只处理一种行格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportMode {
    ListType, // 列表类型条目
    Object,   // 层级业务对象
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::ListType => write!(f, "LIST_TYPE"),
            ImportMode::Object => write!(f, "OBJECT"),
        }
    }
}

// ==========================================
// 属性类型 (Attribute Type)
// ==========================================
// 原始类型按值存储; 其他类型一律视为列表类型条目引用
pub const PRIMITIVE_TYPES: [&str; 6] = ["String", "Integer", "Long", "Float", "Boolean", "Date"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeType(String);

impl AttributeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// 是否原始类型（封闭集合，大小写敏感）
    pub fn is_primitive(&self) -> bool {
        PRIMITIVE_TYPES.contains(&self.0.as_str())
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// 对象标识 (Object Id)
// ==========================================
// 外部存储返回的标识，导入管道只持有标识不持有实体
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ObjectId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_types() {
        for name in ["String", "Integer", "Long", "Float", "Boolean", "Date"] {
            assert!(AttributeType::new(name).is_primitive(), "{} 应为原始类型", name);
        }
        assert!(!AttributeType::new("EquipmentVendor").is_primitive());
        // 大小写敏感
        assert!(!AttributeType::new("string").is_primitive());
    }

    #[test]
    fn test_object_id_from_number() {
        let id = ObjectId::from(42);
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_import_mode_serde() {
        let json = serde_json::to_string(&ImportMode::ListType).unwrap();
        assert_eq!(json, "\"LIST_TYPE\"");
        let mode: ImportMode = serde_json::from_str("\"OBJECT\"").unwrap();
        assert_eq!(mode, ImportMode::Object);
    }
}
