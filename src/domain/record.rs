// ==========================================
// 库存批量导入系统 - 导入记录模型
// ==========================================
// 职责: 单行解析结果（ImportRecord）及其属性映射
// 生命周期: 拆分器创建 → 解析器充实 → 物化器消费后丢弃
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// AttributeMap - 有序属性映射
// ==========================================
// 插入顺序即文件中的字段顺序；同名属性后写覆盖先写（位置不变）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMap {
    entries: Vec<(String, Vec<String>)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入属性值（多值列表）
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = values,
            None => self.entries.push((name, values)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for AttributeMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut map = AttributeMap::new();
        for (name, values) in iter {
            map.insert(name, values);
        }
        map
    }
}

// ==========================================
// ParentSelector - 父对象选择器
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParentSelector {
    /// 合成根（无真实父对象）
    Root,
    /// 按条件定位父对象，如 name:City1
    Criterion { key: String, value: String },
}

impl ParentSelector {
    pub fn is_root(&self) -> bool {
        matches!(self, ParentSelector::Root)
    }

    /// 渲染为外部存储接受的检索条件（key + 操作符 + value）
    pub fn criterion(&self, value_operator: &str) -> Option<String> {
        match self {
            ParentSelector::Root => None,
            ParentSelector::Criterion { key, value } => {
                Some(format!("{}{}{}", key, value_operator, value))
            }
        }
    }
}

// ==========================================
// ParentPlacement - 包含层级中的位置（仅对象模式）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentPlacement {
    pub class_name: String,         // 父类名（可为根哨兵）
    pub selector: ParentSelector,   // 父对象选择器
}

// ==========================================
// ImportRecord - 单行导入记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub line_number: usize,                 // 行号（从 1 开始）
    pub class_name: String,                 // 目标类名
    pub parent: Option<ParentPlacement>,    // 父对象位置（列表类型模式为 None）
    pub attributes: AttributeMap,           // 属性名 → 值列表
    pub template_id: Option<String>,        // 模板 ID（已解析，尚未用于创建）
}

impl ImportRecord {
    /// 用解析后的属性替换原始属性
    pub fn with_attributes(mut self, attributes: AttributeMap) -> Self {
        self.attributes = attributes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_map_keeps_file_order() {
        let mut map = AttributeMap::new();
        map.insert("serialNumber", vec!["SN-001".to_string()]);
        map.insert("vendor", vec!["Cisco".to_string()]);
        map.insert("name", vec!["R1".to_string()]);

        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["serialNumber", "vendor", "name"]);
    }

    #[test]
    fn test_attribute_map_overwrite_in_place() {
        let mut map = AttributeMap::new();
        map.insert("a", vec!["1".to_string()]);
        map.insert("b", vec!["2".to_string()]);
        map.insert("a", vec!["3".to_string(), "4".to_string()]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.names().next(), Some("a"));
        assert_eq!(map.get("a"), Some(&["3".to_string(), "4".to_string()][..]));
    }

    #[test]
    fn test_parent_selector_criterion() {
        let selector = ParentSelector::Criterion {
            key: "name".to_string(),
            value: "City1".to_string(),
        };
        assert_eq!(selector.criterion(":"), Some("name:City1".to_string()));
        assert_eq!(ParentSelector::Root.criterion(":"), None);
        assert!(ParentSelector::Root.is_root());
    }
}
