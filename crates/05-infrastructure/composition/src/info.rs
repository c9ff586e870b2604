//! 上下文信息组件
//!
//! 容器打开时把上下文信息注册到引用集合中，其它组件可以查到进程名称、
//! 描述和启动时间。

use chrono::{DateTime, Duration, Utc};
use component_macros::Component;
use di_abstractions::{Component, ComponentFactory};
use di_impl::DescriptorFactory;
use infrastructure_common::{
    ConfigParams, Configurable, CreateError, Descriptor, Locator, FRAMEWORK_GROUP,
};
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// 上下文信息描述符
pub fn context_info_descriptor() -> Descriptor {
    Descriptor::new(FRAMEWORK_GROUP, "context-info", "default", "default", "1.0")
}

/// 上下文信息
#[derive(Debug, Component)]
#[component(configurable)]
pub struct ContextInfo {
    name: RwLock<String>,
    description: RwLock<String>,
    properties: RwLock<ConfigParams>,
    context_id: Uuid,
    start_time: DateTime<Utc>,
}

impl ContextInfo {
    /// 创建上下文信息
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: RwLock::new(name.into()),
            description: RwLock::new(description.into()),
            properties: RwLock::new(ConfigParams::new()),
            context_id: Uuid::new_v4(),
            start_time: Utc::now(),
        }
    }

    /// 上下文名称
    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    /// 设置上下文名称
    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.write() = name.into();
    }

    /// 上下文描述
    pub fn description(&self) -> String {
        self.description.read().clone()
    }

    /// 设置上下文描述
    pub fn set_description(&self, description: impl Into<String>) {
        *self.description.write() = description.into();
    }

    /// 附加属性
    pub fn properties(&self) -> ConfigParams {
        self.properties.read().clone()
    }

    /// 上下文唯一标识
    pub fn context_id(&self) -> Uuid {
        self.context_id
    }

    /// 启动时间
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// 已运行时长
    pub fn uptime(&self) -> Duration {
        Utc::now() - self.start_time
    }
}

impl Default for ContextInfo {
    fn default() -> Self {
        Self::new("unknown", "")
    }
}

impl Configurable for ContextInfo {
    fn configure(&self, config: &ConfigParams) {
        let mut name = self.name();
        let mut description = self.description();

        for prefix in ["", "info."] {
            if let Some(value) = config.get_as_string(&format!("{prefix}name")) {
                name = value;
            }
            if let Some(value) = config.get_as_string(&format!("{prefix}description")) {
                description = value;
            }
        }

        self.set_name(name);
        self.set_description(description);
        *self.properties.write() = config.get_section("properties");
    }
}

/// 信息组件工厂
///
/// 创建 `context-info` 和 `container-info` 组件。
#[derive(Debug, Component)]
#[component(factory)]
pub struct InfoFactory {
    factory: DescriptorFactory,
}

impl InfoFactory {
    /// 创建信息组件工厂
    pub fn new() -> Self {
        let mut factory = DescriptorFactory::new();
        factory.register(
            Descriptor::new(FRAMEWORK_GROUP, "context-info", "*", "*", "1.0"),
            |_| Arc::new(ContextInfo::default()),
        );
        factory.register(
            Descriptor::new(FRAMEWORK_GROUP, "container-info", "*", "*", "1.0"),
            |_| Arc::new(ContextInfo::default()),
        );
        Self { factory }
    }
}

impl Default for InfoFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentFactory for InfoFactory {
    fn can_create(&self, locator: &Locator) -> Option<Locator> {
        self.factory.can_create(locator)
    }

    fn create(&self, locator: &Locator) -> Result<Arc<dyn Component>, CreateError> {
        self.factory.create(locator)
    }
}
