// ==========================================
// 库存批量导入系统 - 属性类型解析器
// ==========================================
// 职责: (类名, 属性名) → 属性声明类型，按属性名在运行内缓存
// 风险: 缓存键不含类名；若同名属性在不同类中类型不同，
//       后出现的类会沿用先解析到的类型
// ==========================================

use crate::domain::types::AttributeType;
use crate::importer::error::LineError;
use crate::repository::MetadataStore;
use std::collections::HashMap;
use tracing::{debug, trace};

/// 属性类型解析器（生命周期 = 一次导入运行）
pub struct AttributeTypeResolver<'a> {
    metadata: &'a dyn MetadataStore,
    cache: HashMap<String, AttributeType>,
}

impl<'a> AttributeTypeResolver<'a> {
    pub fn new(metadata: &'a dyn MetadataStore) -> Self {
        Self {
            metadata,
            cache: HashMap::new(),
        }
    }

    /// 解析属性类型
    ///
    /// # 返回
    /// - Ok(AttributeType): 缓存命中或元数据查询成功
    /// - Err(AttributeNotFound): 元数据中无此属性
    /// - Err(StoreOperationFailed): 元数据服务报错
    pub fn resolve(
        &mut self,
        class_name: &str,
        attribute_name: &str,
    ) -> Result<AttributeType, LineError> {
        if let Some(cached) = self.cache.get(attribute_name) {
            trace!(attribute = attribute_name, attribute_type = %cached, "属性类型缓存命中");
            return Ok(cached.clone());
        }

        let metadata = self
            .metadata
            .get_attribute(class_name, attribute_name)?
            .ok_or_else(|| LineError::attribute_not_found(attribute_name))?;

        debug!(
            class = class_name,
            attribute = attribute_name,
            attribute_type = %metadata.attribute_type,
            "属性类型已解析"
        );
        self.cache
            .insert(attribute_name.to_string(), metadata.attribute_type.clone());
        Ok(metadata.attribute_type)
    }

    /// 已缓存的属性数量
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
