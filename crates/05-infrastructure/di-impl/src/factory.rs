//! 组件工厂实现

use di_abstractions::{Component, ComponentFactory};
use infrastructure_common::{CreateError, Descriptor, Locator};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

type Constructor = Arc<dyn Fn(&Locator) -> Result<Arc<dyn Component>, CreateError> + Send + Sync>;

/// 按描述符注册构造函数的工厂
///
/// 请求的描述符与注册的描述符部分匹配即可创建，`can_create` 返回注册的描述符。
#[derive(Default)]
pub struct DescriptorFactory {
    registrations: Vec<(Descriptor, Constructor)>,
}

impl DescriptorFactory {
    /// 创建空工厂
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册构造函数
    pub fn register<F>(&mut self, descriptor: Descriptor, constructor: F)
    where
        F: Fn(&Locator) -> Arc<dyn Component> + Send + Sync + 'static,
    {
        self.register_fallible(descriptor, move |locator| Ok(constructor(locator)));
    }

    /// 注册可能失败的构造函数
    pub fn register_fallible<F>(&mut self, descriptor: Descriptor, constructor: F)
    where
        F: Fn(&Locator) -> Result<Arc<dyn Component>, CreateError> + Send + Sync + 'static,
    {
        self.registrations.push((descriptor, Arc::new(constructor)));
    }

    /// 注册的描述符
    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        self.registrations.iter().map(|(descriptor, _)| descriptor)
    }

    fn lookup(&self, locator: &Locator) -> Option<&(Descriptor, Constructor)> {
        let requested = locator.as_descriptor()?;
        self.registrations
            .iter()
            .find(|(registered, _)| registered.matches(requested))
    }
}

impl fmt::Debug for DescriptorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.descriptors().map(ToString::to_string))
            .finish()
    }
}

impl Component for DescriptorFactory {
    fn as_factory(&self) -> Option<&dyn ComponentFactory> {
        Some(self)
    }
}

impl ComponentFactory for DescriptorFactory {
    fn can_create(&self, locator: &Locator) -> Option<Locator> {
        self.lookup(locator)
            .map(|(registered, _)| Locator::Descriptor(registered.clone()))
    }

    fn create(&self, locator: &Locator) -> Result<Arc<dyn Component>, CreateError> {
        let (_, constructor) = self
            .lookup(locator)
            .ok_or_else(|| CreateError::unsupported(locator))?;
        constructor(locator)
    }
}

/// 组合工厂
///
/// 按添加顺序依次询问内部工厂。组合工厂本身也是扮演工厂角色的组件。
#[derive(Default)]
pub struct CompositeFactory {
    factories: RwLock<Vec<Arc<dyn ComponentFactory>>>,
}

impl CompositeFactory {
    /// 创建空的组合工厂
    pub fn new() -> Self {
        Self::default()
    }

    /// 用一组工厂创建组合工厂
    pub fn with_factories(factories: Vec<Arc<dyn ComponentFactory>>) -> Self {
        Self {
            factories: RwLock::new(factories),
        }
    }

    /// 添加工厂
    pub fn add(&self, factory: Arc<dyn ComponentFactory>) {
        self.factories.write().push(factory);
    }

    /// 内部工厂数量
    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    /// 是否没有内部工厂
    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }

    fn snapshot(&self) -> Vec<Arc<dyn ComponentFactory>> {
        self.factories.read().clone()
    }
}

impl fmt::Debug for CompositeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeFactory")
            .field("factories", &self.len())
            .finish()
    }
}

impl Component for CompositeFactory {
    fn as_factory(&self) -> Option<&dyn ComponentFactory> {
        Some(self)
    }
}

impl ComponentFactory for CompositeFactory {
    fn can_create(&self, locator: &Locator) -> Option<Locator> {
        self.snapshot()
            .iter()
            .find_map(|factory| factory.can_create(locator))
    }

    fn create(&self, locator: &Locator) -> Result<Arc<dyn Component>, CreateError> {
        let factory = self
            .snapshot()
            .into_iter()
            .find(|factory| factory.can_create(locator).is_some())
            .ok_or_else(|| CreateError::unsupported(locator))?;
        factory.create(locator)
    }
}
