//! 运行装饰器
//!
//! 打开后，新加入的组件立即被打开，被移除的组件先关闭再移除。

use crate::decorator::ReferencesDecorator;
use di_abstractions::{close_components, open_components, Closeable, Component, Openable, References};
use infrastructure_common::{InfrastructureResult, Locator};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::trace;

/// 后台加入或移除组件时使用的关联 ID
const BACKGROUND_CORRELATION_ID: &str = "";

/// 自动打开和关闭组件的装饰器
#[derive(Debug)]
pub struct RunReferencesDecorator {
    base: ReferencesDecorator,
    opened: AtomicBool,
}

impl RunReferencesDecorator {
    /// 创建运行装饰器
    pub fn new(next: Arc<dyn References>, top: Option<Weak<dyn References>>) -> Self {
        Self {
            base: ReferencesDecorator::new(next, top),
            opened: AtomicBool::new(false),
        }
    }
}

impl Closeable for RunReferencesDecorator {
    fn close(&self, correlation_id: &str) -> InfrastructureResult<()> {
        if !self.is_open() {
            return Ok(());
        }

        trace!(correlation_id, "关闭所有组件");
        let result = close_components(correlation_id, &self.get_all());
        self.opened.store(false, Ordering::SeqCst);
        result
    }
}

impl Openable for RunReferencesDecorator {
    fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    fn open(&self, correlation_id: &str) -> InfrastructureResult<()> {
        if self.is_open() {
            return Ok(());
        }

        trace!(correlation_id, "打开所有组件");
        open_components(correlation_id, &self.get_all())?;
        self.opened.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl References for RunReferencesDecorator {
    fn put(&self, locator: Locator, component: Arc<dyn Component>) -> InfrastructureResult<()> {
        self.base.put(locator, component.clone())?;

        if self.is_open() {
            open_components(BACKGROUND_CORRELATION_ID, &[component])?;
        }
        Ok(())
    }

    fn remove(&self, locator: &Locator) -> InfrastructureResult<Option<Arc<dyn Component>>> {
        if self.is_open() {
            if let Some(component) = self.base.get_one_optional(locator) {
                close_components(BACKGROUND_CORRELATION_ID, &[component])?;
            }
        }
        self.base.remove(locator)
    }

    fn remove_all(&self, locator: &Locator) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        if self.is_open() {
            let components = self.base.find(locator, false)?;
            close_components(BACKGROUND_CORRELATION_ID, &components)?;
        }
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
        self.base.find(locator, required)
    }
}
