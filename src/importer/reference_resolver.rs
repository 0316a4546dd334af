// ==========================================
// 库存批量导入系统 - 引用解析器
// ==========================================
// 职责: 非原始类型属性值 → 列表类型条目 ID
// 说明: 只返回标识，不缓存被引用的实体
// ==========================================

use crate::domain::types::AttributeType;
use crate::importer::error::LineError;
use crate::repository::ApplicationStore;
use tracing::debug;

pub struct ReferenceResolver<'a> {
    application: &'a dyn ApplicationStore,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(application: &'a dyn ApplicationStore) -> Self {
        Self { application }
    }

    /// 按名称查找列表类型条目，返回其 ID 文本
    pub fn resolve(&self, raw_value: &str) -> Result<String, LineError> {
        let item = self
            .application
            .get_list_type_item(raw_value)?
            .ok_or_else(|| LineError::list_type_not_found(raw_value))?;

        debug!(value = raw_value, item_id = %item.id, class = %item.class_name, "列表类型引用已解析");
        Ok(item.id.to_string())
    }

    /// 按属性类型解析一组原始值
    ///
    /// 原始类型原样返回；引用类型逐个查找，遇到第一个失败即返回
    pub fn resolve_values<S: AsRef<str>>(
        &self,
        attribute_type: &AttributeType,
        raw_values: &[S],
    ) -> Result<Vec<String>, LineError> {
        if attribute_type.is_primitive() {
            return Ok(raw_values.iter().map(|v| v.as_ref().to_string()).collect());
        }
        raw_values.iter().map(|v| self.resolve(v.as_ref())).collect()
    }
}
