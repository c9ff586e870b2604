//! 示例组件工厂

use crate::controller::DummyController;
use component_macros::Component;
use di_abstractions::{Component, ComponentFactory};
use di_impl::DescriptorFactory;
use infrastructure_common::{CreateError, Descriptor, Locator};
use infrastructure_composition::{ProcessContainer, ShutdownSignal};
use std::sync::Arc;

/// 示例控制器描述符
pub fn controller_descriptor() -> Descriptor {
    Descriptor::new("lorn-adsp-dummies", "controller", "default", "*", "1.0")
}

/// 示例组件工厂
#[derive(Debug, Component)]
#[component(factory)]
pub struct DummyFactory {
    factory: DescriptorFactory,
}

impl DummyFactory {
    /// 创建工厂，控制器通过关闭信号请求进程退出
    pub fn new(shutdown: ShutdownSignal) -> Self {
        let mut factory = DescriptorFactory::new();
        factory.register(controller_descriptor(), move |_| {
            Arc::new(DummyController::new(shutdown.clone()))
        });
        Self { factory }
    }
}

impl ComponentFactory for DummyFactory {
    fn can_create(&self, locator: &Locator) -> Option<Locator> {
        self.factory.can_create(locator)
    }

    fn create(&self, locator: &Locator) -> Result<Arc<dyn Component>, CreateError> {
        self.factory.create(locator)
    }
}

/// 创建示例进程
pub fn new_dummy_process() -> ProcessContainer {
    let mut process = ProcessContainer::new("dummy", "Sample dummy process");
    process.set_config_path("./example-app/config/dummy.yaml");
    let factory = DummyFactory::new(process.shutdown_signal());
    process.container().add_factory(Arc::new(factory));
    process
}
