// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供内存版外部协作者、测试输入文件、测试配置
// ==========================================

#![allow(dead_code)]

use inventory_loader::domain::{AttributeMap, AttributeType, ObjectId};
use inventory_loader::repository::{
    ApplicationStore, AttributeMetadata, ListTypeItemRef, MetadataStore, ObjectStore,
    ParentLocator, StoreError, StoreResult,
};
use inventory_loader::ImportConfig;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// 对外部存储的一次调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    CreateObject {
        class_name: String,
        parent: Option<(String, String)>,
        attributes: Vec<(String, Vec<String>)>,
    },
    UpdateObject {
        class_name: String,
        object_id: String,
        attributes: Vec<(String, Vec<String>)>,
    },
    GetAttribute {
        class_name: String,
        attribute: String,
    },
    CreateListTypeItem {
        class_name: String,
    },
    GetListTypeItem {
        name: String,
    },
}

/// 内存版库存：同时实现三个协作者接口并记录所有调用
pub struct InMemoryInventory {
    attribute_types: HashMap<String, String>,
    list_items: HashMap<String, ObjectId>,
    failing_parent_classes: HashSet<String>,
    next_id: AtomicI64,
    calls: Mutex<Vec<StoreCall>>,
}

impl InMemoryInventory {
    /// 预置常见属性与列表类型条目
    pub fn new() -> Self {
        Self {
            attribute_types: HashMap::new(),
            list_items: HashMap::new(),
            failing_parent_classes: HashSet::new(),
            next_id: AtomicI64::new(1000),
            calls: Mutex::new(Vec::new()),
        }
        .with_attribute("name", "String")
        .with_attribute("serialNumber", "String")
        .with_attribute("rackUnits", "Integer")
        .with_attribute("vendor", "EquipmentVendor")
        .with_attribute("model", "EquipmentModel")
        .with_list_item("Cisco", 101)
        .with_list_item("Juniper", 102)
    }

    pub fn with_attribute(mut self, name: &str, attribute_type: &str) -> Self {
        self.attribute_types
            .insert(name.to_string(), attribute_type.to_string());
        self
    }

    pub fn with_list_item(mut self, name: &str, id: i64) -> Self {
        self.list_items.insert(name.to_string(), ObjectId::from(id));
        self
    }

    /// 在该父类下创建对象时返回存储错误
    pub fn failing_parent(mut self, class_name: &str) -> Self {
        self.failing_parent_classes.insert(class_name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&StoreCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    pub fn creates(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::CreateObject { .. }))
    }

    pub fn list_type_creates(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::CreateListTypeItem { .. }))
    }

    pub fn updates(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::UpdateObject { .. }))
    }

    pub fn metadata_lookups(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::GetAttribute { .. }))
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_id(&self) -> ObjectId {
        ObjectId::from(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

fn snapshot(attributes: &AttributeMap) -> Vec<(String, Vec<String>)> {
    attributes
        .iter()
        .map(|(name, values)| (name.to_string(), values.to_vec()))
        .collect()
}

impl ObjectStore for InMemoryInventory {
    fn create_object(
        &self,
        class_name: &str,
        parent: ParentLocator<'_>,
        attributes: &AttributeMap,
        _template_id: Option<&str>,
    ) -> StoreResult<ObjectId> {
        let parent = match parent {
            ParentLocator::Root => None,
            ParentLocator::Criteria { class_name, criteria } => {
                if self.failing_parent_classes.contains(class_name) {
                    return Err(StoreError::operation_failed(format!(
                        "no {} matches {}",
                        class_name, criteria
                    )));
                }
                Some((class_name.to_string(), criteria.to_string()))
            }
        };
        self.record(StoreCall::CreateObject {
            class_name: class_name.to_string(),
            parent,
            attributes: snapshot(attributes),
        });
        Ok(self.next_id())
    }

    fn update_object(
        &self,
        class_name: &str,
        object_id: &ObjectId,
        attributes: &AttributeMap,
    ) -> StoreResult<()> {
        self.record(StoreCall::UpdateObject {
            class_name: class_name.to_string(),
            object_id: object_id.to_string(),
            attributes: snapshot(attributes),
        });
        Ok(())
    }
}

impl MetadataStore for InMemoryInventory {
    fn get_attribute(
        &self,
        class_name: &str,
        attribute_name: &str,
    ) -> StoreResult<Option<AttributeMetadata>> {
        self.record(StoreCall::GetAttribute {
            class_name: class_name.to_string(),
            attribute: attribute_name.to_string(),
        });
        Ok(self
            .attribute_types
            .get(attribute_name)
            .map(|attribute_type| AttributeMetadata {
                name: attribute_name.to_string(),
                attribute_type: AttributeType::new(attribute_type.as_str()),
            }))
    }
}

impl ApplicationStore for InMemoryInventory {
    fn create_list_type_item(&self, class_name: &str) -> StoreResult<ObjectId> {
        self.record(StoreCall::CreateListTypeItem {
            class_name: class_name.to_string(),
        });
        Ok(self.next_id())
    }

    fn get_list_type_item(&self, name: &str) -> StoreResult<Option<ListTypeItemRef>> {
        self.record(StoreCall::GetListTypeItem {
            name: name.to_string(),
        });
        Ok(self.list_items.get(name).map(|id| ListTypeItemRef {
            id: id.clone(),
            class_name: "EquipmentVendor".to_string(),
            name: name.to_string(),
        }))
    }
}

/// 写入测试输入文件
pub fn write_input(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// 默认格式配置，产物目录位于 dir 下
pub fn test_config(dir: &Path) -> ImportConfig {
    ImportConfig::default().with_base_dir(dir)
}

/// 同步格式配置，产物目录位于 dir 下
pub fn sync_config(dir: &Path) -> ImportConfig {
    ImportConfig::sync_preset().with_base_dir(dir)
}
