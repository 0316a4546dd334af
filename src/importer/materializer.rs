// ==========================================
// 库存批量导入系统 - 对象物化器
// ==========================================
// 职责: 把已解析的 ImportRecord 变成对外部存储的创建/更新调用
// 调用形状:
// - 根下创建: 父类名与选择器均为根哨兵
// - 命名父对象下创建: 父类名 + key:value 检索条件
// - 列表类型条目: 先创建空条目，再写入属性（两次调用）
// 红线: 存储错误只转换为当前行的失败，不向上传播
// ==========================================

use crate::domain::record::ImportRecord;
use crate::domain::types::ObjectId;
use crate::importer::error::LineError;
use crate::repository::{ApplicationStore, ObjectStore, ParentLocator};
use tracing::debug;

/// 物化失败：object_id 非空表示条目已创建但后续调用失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeFailure {
    pub error: LineError,
    pub object_id: Option<ObjectId>,
}

impl From<LineError> for MaterializeFailure {
    fn from(error: LineError) -> Self {
        Self {
            error,
            object_id: None,
        }
    }
}

pub struct ObjectMaterializer<'a> {
    objects: &'a dyn ObjectStore,
    application: &'a dyn ApplicationStore,
    root_sentinel: String,
    value_operator: String,
}

impl<'a> ObjectMaterializer<'a> {
    pub fn new(
        objects: &'a dyn ObjectStore,
        application: &'a dyn ApplicationStore,
        root_sentinel: impl Into<String>,
        value_operator: impl Into<String>,
    ) -> Self {
        Self {
            objects,
            application,
            root_sentinel: root_sentinel.into(),
            value_operator: value_operator.into(),
        }
    }

    /// 创建业务对象（根下或命名父对象下）
    pub fn create_object(&self, record: &ImportRecord) -> Result<ObjectId, LineError> {
        let criteria;
        let locator = match &record.parent {
            None => ParentLocator::Root,
            Some(parent)
                if parent.class_name == self.root_sentinel && parent.selector.is_root() =>
            {
                ParentLocator::Root
            }
            Some(parent) => {
                criteria = parent
                    .selector
                    .criterion(&self.value_operator)
                    .ok_or_else(|| LineError::root_selector_with_class(&parent.class_name))?;
                ParentLocator::Criteria {
                    class_name: &parent.class_name,
                    criteria: &criteria,
                }
            }
        };

        // TODO: 存储端支持模板实例化后改为传入 record.template_id
        let object_id =
            self.objects
                .create_object(&record.class_name, locator, &record.attributes, None)?;

        debug!(
            line = record.line_number,
            class = %record.class_name,
            object_id = %object_id,
            under_root = matches!(locator, ParentLocator::Root),
            "对象已创建"
        );
        Ok(object_id)
    }

    /// 创建列表类型条目并写入属性
    pub fn create_list_type_item(
        &self,
        record: &ImportRecord,
    ) -> Result<ObjectId, MaterializeFailure> {
        let object_id = self.application.create_list_type_item(&record.class_name)?;

        self.objects
            .update_object(&record.class_name, &object_id, &record.attributes)
            .map_err(|e| MaterializeFailure {
                error: LineError::from(e),
                object_id: Some(object_id.clone()),
            })?;

        debug!(
            line = record.line_number,
            class = %record.class_name,
            object_id = %object_id,
            attributes = record.attributes.len(),
            "列表类型条目已创建"
        );
        Ok(object_id)
    }
}

impl From<crate::repository::StoreError> for MaterializeFailure {
    fn from(err: crate::repository::StoreError) -> Self {
        LineError::from(err).into()
    }
}
