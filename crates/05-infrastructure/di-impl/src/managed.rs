//! 托管引用集合
//!
//! 按 存储 → 构建 → 链接 → 运行 的顺序组装装饰器链，外部的读写都经过运行装饰器。

use crate::build::BuildReferencesDecorator;
use crate::link::LinkReferencesDecorator;
use crate::run::RunReferencesDecorator;
use crate::store::ComponentStore;
use di_abstractions::{Closeable, Component, Openable, References};
use infrastructure_common::{InfrastructureResult, Locator};
use std::sync::{Arc, Weak};
use tracing::debug;

/// 托管引用集合
///
/// 每一层装饰器的 `top` 都是指向托管引用集合自身的弱引用。
#[derive(Debug)]
pub struct ManagedReferences {
    references: Arc<ComponentStore>,
    builder: Arc<BuildReferencesDecorator>,
    linker: Arc<LinkReferencesDecorator>,
    runner: Arc<RunReferencesDecorator>,
}

impl ManagedReferences {
    /// 创建空的托管引用集合
    pub fn new() -> Arc<Self> {
        Self::with_components(Vec::new())
    }

    /// 用初始组件创建托管引用集合
    pub fn with_components(components: Vec<(Locator, Arc<dyn Component>)>) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<ManagedReferences>| {
            let top: Weak<dyn References> = this.clone();
            let references = Arc::new(ComponentStore::with_components(components));
            let builder = Arc::new(BuildReferencesDecorator::new(
                references.clone(),
                Some(top.clone()),
            ));
            let linker = Arc::new(LinkReferencesDecorator::new(
                builder.clone(),
                Some(top.clone()),
            ));
            let runner = Arc::new(RunReferencesDecorator::new(linker.clone(), Some(top)));

            Self {
                references,
                builder,
                linker,
                runner,
            }
        })
    }

    /// 底层组件存储
    pub fn store(&self) -> &Arc<ComponentStore> {
        &self.references
    }

    /// 构建装饰器
    pub fn builder(&self) -> &Arc<BuildReferencesDecorator> {
        &self.builder
    }

    /// 链接装饰器
    pub fn linker(&self) -> &Arc<LinkReferencesDecorator> {
        &self.linker
    }

    /// 运行装饰器
    pub fn runner(&self) -> &Arc<RunReferencesDecorator> {
        &self.runner
    }
}

impl Closeable for ManagedReferences {
    fn close(&self, correlation_id: &str) -> InfrastructureResult<()> {
        debug!(correlation_id, "关闭托管引用集合");
        let run_result = self.runner.close(correlation_id);
        let link_result = self.linker.close(correlation_id);
        run_result.and(link_result)
    }
}

impl Openable for ManagedReferences {
    fn is_open(&self) -> bool {
        self.linker.is_open() && self.runner.is_open()
    }

    fn open(&self, correlation_id: &str) -> InfrastructureResult<()> {
        debug!(correlation_id, "打开托管引用集合");
        self.linker.open(correlation_id)?;
        self.runner.open(correlation_id)
    }
}

impl References for ManagedReferences {
    fn put(&self, locator: Locator, component: Arc<dyn Component>) -> InfrastructureResult<()> {
        self.runner.put(locator, component)
    }

    fn remove(&self, locator: &Locator) -> InfrastructureResult<Option<Arc<dyn Component>>> {
        self.runner.remove(locator)
    }

    fn remove_all(&self, locator: &Locator) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        self.runner.remove_all(locator)
    }

    fn get_all_locators(&self) -> Vec<Locator> {
        self.runner.get_all_locators()
    }

    fn get_all(&self) -> Vec<Arc<dyn Component>> {
        self.runner.get_all()
    }

    fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        self.runner.find(locator, required)
    }
}
