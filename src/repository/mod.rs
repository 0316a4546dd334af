// ==========================================
// 库存批量导入系统 - 外部存储接口层
// ==========================================
// 职责: 导入管道依赖的协作者接口与错误类型
// 实现: 由宿主应用注入（远程对象存储、元数据服务、应用服务）
// ==========================================

pub mod error;
pub mod store_traits;

pub use error::{StoreError, StoreResult};
pub use store_traits::{
    ApplicationStore, AttributeMetadata, ListTypeItemRef, MetadataStore, ObjectStore,
    ParentLocator,
};
