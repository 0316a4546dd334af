// ==========================================
// 库存批量导入系统 - 外部存储接口 Trait
// ==========================================
// 职责: 定义导入管道消费的三个协作者接口（不包含实现）
// 红线: 连接建立/重连/事务由外部工厂与存储负责，导入管道只调用
// ==========================================

use crate::domain::record::AttributeMap;
use crate::domain::types::{AttributeType, ObjectId};
use crate::repository::error::StoreResult;
use serde::{Deserialize, Serialize};

// ==========================================
// 存储调用的数据形状
// ==========================================

/// 属性元数据（仅导入管道需要的部分）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMetadata {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// 列表类型条目的轻量引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTypeItemRef {
    pub id: ObjectId,
    pub class_name: String,
    pub name: String,
}

/// 新对象的父对象定位方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLocator<'a> {
    /// 创建在合成根下
    Root,
    /// 在 class_name 类中按 criteria（如 name:City1）查找父对象
    Criteria {
        class_name: &'a str,
        criteria: &'a str,
    },
}

// ==========================================
// ObjectStore Trait
// ==========================================
// 用途: 业务对象创建与更新
pub trait ObjectStore: Send + Sync {
    /// 创建业务对象
    ///
    /// # 参数
    /// - class_name: 对象类名
    /// - parent: 父对象定位方式
    /// - attributes: 已解析的属性（原始值或引用 ID）
    /// - template_id: 模板 ID
    ///
    /// # 返回
    /// - Ok(ObjectId): 新对象标识
    /// - Err: 存储拒绝（包含层级不允许、父对象不存在等）
    fn create_object(
        &self,
        class_name: &str,
        parent: ParentLocator<'_>,
        attributes: &AttributeMap,
        template_id: Option<&str>,
    ) -> StoreResult<ObjectId>;

    /// 更新对象属性
    fn update_object(
        &self,
        class_name: &str,
        object_id: &ObjectId,
        attributes: &AttributeMap,
    ) -> StoreResult<()>;
}

// ==========================================
// MetadataStore Trait
// ==========================================
// 用途: 类/属性元数据查询
pub trait MetadataStore: Send + Sync {
    /// 查询属性元数据
    ///
    /// # 返回
    /// - Ok(Some): 属性存在
    /// - Ok(None): 类中无此属性
    /// - Err: 存储错误
    fn get_attribute(
        &self,
        class_name: &str,
        attribute_name: &str,
    ) -> StoreResult<Option<AttributeMetadata>>;
}

// ==========================================
// ApplicationStore Trait
// ==========================================
// 用途: 列表类型条目创建与查找
pub trait ApplicationStore: Send + Sync {
    /// 创建空的列表类型条目
    fn create_list_type_item(&self, class_name: &str) -> StoreResult<ObjectId>;

    /// 按名称查找列表类型条目
    ///
    /// # 返回
    /// - Ok(None): 不存在同名条目
    fn get_list_type_item(&self, name: &str) -> StoreResult<Option<ListTypeItemRef>>;
}
