//! 构建装饰器
//!
//! 必需查找没有结果时，用已注册的工厂自动创建缺失的组件。

use crate::decorator::ReferencesDecorator;
use di_abstractions::{Component, ComponentFactory, References};
use infrastructure_common::{InfrastructureResult, Locator, ReferenceError};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use tracing::debug;

/// 自动创建组件的引用装饰器
#[derive(Debug, Clone)]
pub struct BuildReferencesDecorator {
    base: ReferencesDecorator,
}

impl BuildReferencesDecorator {
    /// 创建构建装饰器
    pub fn new(next: Arc<dyn References>, top: Option<Weak<dyn References>>) -> Self {
        Self {
            base: ReferencesDecorator::new(next, top),
        }
    }

    /// 查找第一个能创建该定位符组件的工厂组件
    pub fn find_factory(&self, locator: &Locator) -> Option<Arc<dyn Component>> {
        self.get_all().into_iter().find(|component| {
            component
                .as_factory()
                .is_some_and(|factory| factory.can_create(locator).is_some())
        })
    }

    /// 用工厂创建组件
    ///
    /// 创建失败（包括工厂 panic）视为没有组件，只记录调试日志。
    pub fn create(
        &self,
        locator: &Locator,
        factory: &dyn ComponentFactory,
    ) -> Option<Arc<dyn Component>> {
        match catch_unwind(AssertUnwindSafe(|| factory.create(locator))) {
            Ok(Ok(component)) => Some(component),
            Ok(Err(err)) => {
                debug!(locator = %locator, error = %err, "工厂创建组件失败");
                None
            }
            Err(_) => {
                debug!(locator = %locator, "工厂创建组件时发生 panic");
                None
            }
        }
    }

    /// 用工厂注册的定位符补全查找定位符中的通配字段
    ///
    /// 只有描述符会被补全，其它定位符原样返回。
    pub fn clarify_locator(&self, locator: &Locator, factory: &dyn ComponentFactory) -> Locator {
        match (locator, factory.can_create(locator)) {
            (Locator::Descriptor(requested), Some(Locator::Descriptor(offered))) => {
                Locator::Descriptor(requested.clarify(&offered))
            }
            _ => locator.clone(),
        }
    }

    /// 查找工厂并创建组件，返回补全后的定位符和组件
    pub fn build(&self, locator: &Locator) -> Option<(Locator, Arc<dyn Component>)> {
        let factory_component = self.find_factory(locator)?;
        let factory = factory_component.as_factory()?;
        let component = self.create(locator, factory)?;
        Some((self.clarify_locator(locator, factory), component))
    }
}

impl References for BuildReferencesDecorator {
    fn put(&self, locator: Locator, component: Arc<dyn Component>) -> InfrastructureResult<()> {
        self.base.put(locator, component)
    }

    fn remove(&self, locator: &Locator) -> InfrastructureResult<Option<Arc<dyn Component>>> {
        self.base.remove(locator)
    }

    fn remove_all(&self, locator: &Locator) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        self.base.remove_all(locator)
    }

    fn get_all_locators(&self) -> Vec<Locator> {
        self.base.get_all_locators()
    }

    fn get_all(&self) -> Vec<Arc<dyn Component>> {
        self.base.get_all()
    }

    fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        let mut components = self.base.find(locator, false)?;

        if required && components.is_empty() {
            if let Some((clarified, component)) = self.build(locator) {
                debug!(locator = %clarified, "自动创建组件");
                self.base.top().put(clarified, component.clone())?;
                components.push(component);
            }
        }

        if required && components.is_empty() {
            return Err(ReferenceError::not_found(locator).into());
        }
        Ok(components)
    }
}
