//! 容器引用集合
//!
//! 在托管引用集合之上，按容器配置依次创建、注册和配置组件。

use crate::managed::ManagedReferences;
use crate::types::TypeRegistry;
use config_impl::{ComponentConfig, ContainerConfig};
use di_abstractions::{Closeable, Component, Openable, References};
use infrastructure_common::{CreateError, InfrastructureResult, Locator};
use std::sync::Arc;
use tracing::debug;

/// 容器引用集合
#[derive(Debug, Clone)]
pub struct ContainerReferences {
    managed: Arc<ManagedReferences>,
    types: Arc<TypeRegistry>,
}

impl ContainerReferences {
    /// 创建容器引用集合
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        Self {
            managed: ManagedReferences::new(),
            types,
        }
    }

    /// 托管引用集合
    pub fn managed(&self) -> &Arc<ManagedReferences> {
        &self.managed
    }

    /// 类型注册表
    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    /// 按配置顺序创建并注册组件
    ///
    /// 任意一项无法创建时立即返回错误，后续配置项不再处理。
    pub fn put_from_config(&self, config: &ContainerConfig) -> InfrastructureResult<()> {
        for component_config in config {
            let (locator, component) = self.create_from_config(component_config)?;
            debug!(locator = %locator, "根据配置创建组件");

            self.managed.store().put(locator, component.clone())?;

            if let Some(configurable) = component.as_configurable() {
                configurable.configure(component_config.config());
            }

            if component.as_factory().is_some() {
                if let Some(referenceable) = component.as_referenceable() {
                    referenceable.set_references(self.managed.as_ref())?;
                }
            }
        }
        Ok(())
    }

    fn create_from_config(
        &self,
        config: &ComponentConfig,
    ) -> InfrastructureResult<(Locator, Arc<dyn Component>)> {
        if let Some(type_) = config.type_() {
            let component = self.types.create(type_)?;
            return Ok((Locator::Type(type_.clone()), component));
        }

        config
            .descriptor()
            .and_then(|descriptor| {
                self.managed
                    .builder()
                    .build(&Locator::Descriptor(descriptor.clone()))
            })
            .ok_or_else(|| {
                CreateError::CannotCreateComponent {
                    config: config.to_string(),
                }
                .into()
            })
    }
}

impl Closeable for ContainerReferences {
    fn close(&self, correlation_id: &str) -> InfrastructureResult<()> {
        self.managed.close(correlation_id)
    }
}

impl Openable for ContainerReferences {
    fn is_open(&self) -> bool {
        self.managed.is_open()
    }

    fn open(&self, correlation_id: &str) -> InfrastructureResult<()> {
        self.managed.open(correlation_id)
    }
}

impl References for ContainerReferences {
    fn put(&self, locator: Locator, component: Arc<dyn Component>) -> InfrastructureResult<()> {
        self.managed.put(locator, component)
    }

    fn remove(&self, locator: &Locator) -> InfrastructureResult<Option<Arc<dyn Component>>> {
        self.managed.remove(locator)
    }

    fn remove_all(&self, locator: &Locator) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        self.managed.remove_all(locator)
    }

    fn get_all_locators(&self) -> Vec<Locator> {
        self.managed.get_all_locators()
    }

    fn get_all(&self) -> Vec<Arc<dyn Component>> {
        self.managed.get_all()
    }

    fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        self.managed.find(locator, required)
    }
}
