//! 引用集合抽象接口

use crate::component::{downcast_component, Component};
use infrastructure_common::{InfrastructureResult, Locator, ReferenceError};
use std::sync::Arc;

/// 组件引用集合 trait
///
/// 按插入顺序保存 定位符 → 组件 的映射，多个组件可以共享匹配的定位符。
/// 所有方法都通过 `&self` 调用，实现方自行负责内部可变性。
pub trait References: Send + Sync {
    /// 注册组件
    fn put(&self, locator: Locator, component: Arc<dyn Component>) -> InfrastructureResult<()>;

    /// 删除第一个匹配的组件
    fn remove(&self, locator: &Locator) -> InfrastructureResult<Option<Arc<dyn Component>>>;

    /// 删除所有匹配的组件
    fn remove_all(&self, locator: &Locator) -> InfrastructureResult<Vec<Arc<dyn Component>>>;

    /// 获取所有定位符
    fn get_all_locators(&self) -> Vec<Locator>;

    /// 获取所有组件
    fn get_all(&self) -> Vec<Arc<dyn Component>>;

    /// 查找匹配的组件
    ///
    /// `required` 为 `true` 且没有找到组件时返回引用未找到错误。
    fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> InfrastructureResult<Vec<Arc<dyn Component>>>;

    /// 获取所有匹配的组件，没有时返回空列表
    fn get_optional(&self, locator: &Locator) -> Vec<Arc<dyn Component>> {
        self.find(locator, false).unwrap_or_default()
    }

    /// 获取所有匹配的组件，没有时返回错误
    fn get_required(&self, locator: &Locator) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        self.find(locator, true)
    }

    /// 获取第一个匹配的组件
    fn get_one_optional(&self, locator: &Locator) -> Option<Arc<dyn Component>> {
        self.get_optional(locator).into_iter().next()
    }

    /// 获取第一个匹配的组件，没有时返回错误
    fn get_one_required(&self, locator: &Locator) -> InfrastructureResult<Arc<dyn Component>> {
        self.find(locator, true)?
            .into_iter()
            .next()
            .ok_or_else(|| ReferenceError::not_found(locator).into())
    }
}

/// 带类型转换的查找辅助方法
pub trait ReferencesExt: References {
    /// 获取第一个匹配且类型为 `T` 的组件
    fn get_one_optional_as<T: Component>(&self, locator: &Locator) -> Option<Arc<T>> {
        self.get_optional(locator)
            .into_iter()
            .find_map(downcast_component::<T>)
    }

    /// 获取第一个匹配且类型为 `T` 的组件，没有时返回错误
    fn get_one_required_as<T: Component>(&self, locator: &Locator) -> InfrastructureResult<Arc<T>> {
        self.get_required(locator)?
            .into_iter()
            .find_map(downcast_component::<T>)
            .ok_or_else(|| ReferenceError::not_found(locator).into())
    }

    /// 获取所有匹配且类型为 `T` 的组件
    fn get_optional_as<T: Component>(&self, locator: &Locator) -> Vec<Arc<T>> {
        self.get_optional(locator)
            .into_iter()
            .filter_map(downcast_component::<T>)
            .collect()
    }
}

impl<R: References + ?Sized> ReferencesExt for R {}
