//! # 组件引用管理实现
//!
//! 提供组件存储、引用装饰器链和托管引用集合。
//!
//! 装饰器链自底向上为：
//!
//! - [`ComponentStore`] - 有序的 定位符 → 组件 映射
//! - [`BuildReferencesDecorator`] - 必需查找失败时用工厂自动创建组件
//! - [`LinkReferencesDecorator`] - 打开后自动设置/撤销组件引用
//! - [`RunReferencesDecorator`] - 打开后自动打开/关闭组件
//!
//! [`ManagedReferences`] 组装整条链，[`ContainerReferences`] 在其上按配置创建组件。

pub mod build;
pub mod container_references;
pub mod decorator;
pub mod factory;
pub mod link;
pub mod managed;
pub mod run;
pub mod store;
pub mod types;

pub use build::BuildReferencesDecorator;
pub use container_references::ContainerReferences;
pub use decorator::ReferencesDecorator;
pub use factory::{CompositeFactory, DescriptorFactory};
pub use link::LinkReferencesDecorator;
pub use managed::ManagedReferences;
pub use run::RunReferencesDecorator;
pub use store::ComponentStore;
pub use types::TypeRegistry;

#[cfg(test)]
mod tests;
