//! 链接装饰器
//!
//! 打开后，新加入的组件立即获得对整个组件图的引用，被移除的组件撤销引用。

use crate::decorator::ReferencesDecorator;
use di_abstractions::{
    set_references_for, unset_references_for, Closeable, Component, Openable, References,
};
use infrastructure_common::{InfrastructureResult, Locator};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::trace;

/// 自动链接组件引用的装饰器
#[derive(Debug)]
pub struct LinkReferencesDecorator {
    base: ReferencesDecorator,
    opened: AtomicBool,
}

impl LinkReferencesDecorator {
    /// 创建链接装饰器
    pub fn new(next: Arc<dyn References>, top: Option<Weak<dyn References>>) -> Self {
        Self {
            base: ReferencesDecorator::new(next, top),
            opened: AtomicBool::new(false),
        }
    }
}

impl Closeable for LinkReferencesDecorator {
    fn close(&self, _correlation_id: &str) -> InfrastructureResult<()> {
        if self.opened.swap(false, Ordering::SeqCst) {
            trace!("撤销所有组件引用");
            unset_references_for(&self.get_all());
        }
        Ok(())
    }
}

impl Openable for LinkReferencesDecorator {
    fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    fn open(&self, _correlation_id: &str) -> InfrastructureResult<()> {
        if !self.opened.swap(true, Ordering::SeqCst) {
            trace!("链接所有组件引用");
            let top = self.base.top();
            set_references_for(top.as_ref(), &self.get_all())?;
        }
        Ok(())
    }
}

impl References for LinkReferencesDecorator {
    fn put(&self, locator: Locator, component: Arc<dyn Component>) -> InfrastructureResult<()> {
        self.base.put(locator, component.clone())?;

        if self.is_open() {
            let top = self.base.top();
            set_references_for(top.as_ref(), &[component])?;
        }
        Ok(())
    }

    fn remove(&self, locator: &Locator) -> InfrastructureResult<Option<Arc<dyn Component>>> {
        let removed = self.base.remove(locator)?;

        if self.is_open() {
            if let Some(component) = &removed {
                unset_references_for(std::slice::from_ref(component));
            }
        }
        Ok(removed)
    }

    fn remove_all(&self, locator: &Locator) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        let removed = self.base.remove_all(locator)?;

        if self.is_open() {
            unset_references_for(&removed);
        }
        Ok(removed)
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
