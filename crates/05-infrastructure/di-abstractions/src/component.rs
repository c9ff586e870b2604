//! 组件与能力角色
//!
//! 组件以 `Arc<dyn Component>` 的形式保存在引用集合中。生命周期的每一步
//! 都通过能力查询（`as_openable` 等）判断组件是否扮演对应角色，
//! 未实现的角色默认返回 `None`。

use crate::factory::ComponentFactory;
use crate::log::Logger;
use crate::references::References;
use infrastructure_common::{Configurable, InfrastructureResult};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 类型擦除辅助 trait
pub trait AsAny: Any + Send + Sync {
    /// 以 `Any` 引用访问
    fn as_any(&self) -> &dyn Any;

    /// 转换为 `Arc<dyn Any>`，用于向下转型
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// 组件基础 trait
///
/// 通常通过 `#[derive(Component)]` 生成实现，由 `#[component(...)]`
/// 属性声明组件扮演的角色。
pub trait Component: AsAny + fmt::Debug {
    /// 可配置角色
    fn as_configurable(&self) -> Option<&dyn Configurable> {
        None
    }

    /// 可接收引用角色
    fn as_referenceable(&self) -> Option<&dyn Referenceable> {
        None
    }

    /// 可撤销引用角色
    fn as_unreferenceable(&self) -> Option<&dyn Unreferenceable> {
        None
    }

    /// 可打开角色
    fn as_openable(&self) -> Option<&dyn Openable> {
        None
    }

    /// 可关闭角色
    fn as_closeable(&self) -> Option<&dyn Closeable> {
        None
    }

    /// 工厂角色
    fn as_factory(&self) -> Option<&dyn ComponentFactory> {
        None
    }

    /// 日志记录器角色
    fn as_logger(&self) -> Option<&dyn Logger> {
        None
    }
}

/// 向下转型为具体组件类型
pub fn downcast_component<T: Component>(component: Arc<dyn Component>) -> Option<Arc<T>> {
    component.into_any().downcast::<T>().ok()
}

/// 可接收引用的组件
pub trait Referenceable: Send + Sync {
    /// 设置对其它组件的引用
    fn set_references(&self, references: &dyn References) -> InfrastructureResult<()>;
}

/// 可撤销引用的组件
pub trait Unreferenceable: Send + Sync {
    /// 释放之前获取的引用
    fn unset_references(&self);
}

/// 可关闭的组件
pub trait Closeable: Send + Sync {
    /// 关闭组件并释放资源
    fn close(&self, correlation_id: &str) -> InfrastructureResult<()>;
}

/// 可打开的组件
pub trait Openable: Closeable {
    /// 组件是否已打开
    fn is_open(&self) -> bool;

    /// 打开组件
    fn open(&self, correlation_id: &str) -> InfrastructureResult<()>;
}
