//! 日志组件
//!
//! [`TracingLogger`] 把日志转发为 `tracing` 事件，[`CompositeLogger`] 在设置引用时
//! 收集所有 `*:logger:*:*:*` 组件并逐一转发。

use component_macros::Component;
use di_abstractions::{
    Component, ComponentFactory, LogLevel, Logger, Referenceable, References, Unreferenceable,
};
use di_impl::DescriptorFactory;
use infrastructure_common::{
    ConfigParams, Configurable, CreateError, Descriptor, InfrastructureResult, Locator,
    FRAMEWORK_GROUP,
};
use parking_lot::RwLock;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

/// 转发到 `tracing` 的日志组件
///
/// 可配置 `level` 和 `source`。
#[derive(Debug, Component)]
#[component(configurable, logger)]
pub struct TracingLogger {
    level: RwLock<LogLevel>,
    source: RwLock<String>,
}

impl TracingLogger {
    /// 创建日志组件
    pub fn new() -> Self {
        Self {
            level: RwLock::new(LogLevel::Info),
            source: RwLock::new(String::new()),
        }
    }

    /// 日志来源
    pub fn source(&self) -> String {
        self.source.read().clone()
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for TracingLogger {
    fn configure(&self, config: &ConfigParams) {
        if let Some(level) = config.get_as_string("level") {
            let current = self.level();
            self.set_level(LogLevel::parse_or(&level, current));
        }
        if let Some(source) = config.get_as_string("source") {
            *self.source.write() = source;
        }
    }
}

impl Logger for TracingLogger {
    fn level(&self) -> LogLevel {
        *self.level.read()
    }

    fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    fn log(
        &self,
        level: LogLevel,
        correlation_id: &str,
        error: Option<&(dyn Error + 'static)>,
        message: &str,
    ) {
        if level == LogLevel::None || level > self.level() {
            return;
        }

        let source = self.source();
        let error = error.map(ToString::to_string).unwrap_or_default();
        match level {
            LogLevel::None => {}
            LogLevel::Fatal | LogLevel::Error => {
                let fatal = level == LogLevel::Fatal;
                error!(correlation_id, source = %source, error = %error, fatal, "{}", message)
            }
            LogLevel::Warn => warn!(correlation_id, source = %source, error = %error, "{}", message),
            LogLevel::Info => info!(correlation_id, source = %source, "{}", message),
            LogLevel::Debug => debug!(correlation_id, source = %source, "{}", message),
            LogLevel::Trace => trace!(correlation_id, source = %source, "{}", message),
        }
    }
}

/// 丢弃所有日志的日志组件
#[derive(Debug, Default, Component)]
#[component(logger)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn level(&self) -> LogLevel {
        LogLevel::None
    }

    fn set_level(&self, _level: LogLevel) {}

    fn log(
        &self,
        _level: LogLevel,
        _correlation_id: &str,
        _error: Option<&(dyn Error + 'static)>,
        _message: &str,
    ) {
    }
}

/// 组合日志组件
///
/// 自身不输出日志，只转发给引用集合中的日志组件。
#[derive(Debug, Component)]
#[component(referenceable, unreferenceable, logger)]
pub struct CompositeLogger {
    loggers: RwLock<Vec<Arc<dyn Component>>>,
    level: RwLock<LogLevel>,
}

impl CompositeLogger {
    /// 创建未连接任何日志组件的组合日志
    pub fn new() -> Self {
        Self {
            loggers: RwLock::new(Vec::new()),
            level: RwLock::new(LogLevel::Trace),
        }
    }

    /// 从引用集合收集日志组件
    pub fn from_references(references: &dyn References) -> InfrastructureResult<Self> {
        let logger = Self::new();
        logger.set_references(references)?;
        Ok(logger)
    }

    /// 已连接的日志组件数量
    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    /// 是否没有连接任何日志组件
    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    fn is_self(&self, component: &Arc<dyn Component>) -> bool {
        std::ptr::eq(
            Arc::as_ptr(component).cast::<()>(),
            (self as *const Self).cast::<()>(),
        )
    }
}

impl Default for CompositeLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Referenceable for CompositeLogger {
    fn set_references(&self, references: &dyn References) -> InfrastructureResult<()> {
        let found: Vec<Arc<dyn Component>> = references
            .get_optional(&Descriptor::new("*", "logger", "*", "*", "*").into())
            .into_iter()
            .filter(|component| component.as_logger().is_some() && !self.is_self(component))
            .collect();
        *self.loggers.write() = found;
        Ok(())
    }
}

impl Unreferenceable for CompositeLogger {
    fn unset_references(&self) {
        self.loggers.write().clear();
    }
}

impl Logger for CompositeLogger {
    fn level(&self) -> LogLevel {
        *self.level.read()
    }

    fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    fn log(
        &self,
        level: LogLevel,
        correlation_id: &str,
        error: Option<&(dyn Error + 'static)>,
        message: &str,
    ) {
        if level > self.level() {
            return;
        }
        let loggers = self.loggers.read().clone();
        for logger in loggers.iter().filter_map(|component| component.as_logger()) {
            logger.log(level, correlation_id, error, message);
        }
    }
}

/// 日志组件工厂
#[derive(Debug, Component)]
#[component(factory)]
pub struct LoggerFactory {
    factory: DescriptorFactory,
}

impl LoggerFactory {
    /// 创建日志组件工厂
    pub fn new() -> Self {
        let mut factory = DescriptorFactory::new();
        factory.register(
            Descriptor::new(FRAMEWORK_GROUP, "logger", "console", "*", "1.0"),
            |_| Arc::new(TracingLogger::new()),
        );
        factory.register(
            Descriptor::new(FRAMEWORK_GROUP, "logger", "null", "*", "1.0"),
            |_| Arc::new(NullLogger),
        );
        factory.register(
            Descriptor::new(FRAMEWORK_GROUP, "logger", "composite", "*", "1.0"),
            |_| Arc::new(CompositeLogger::new()),
        );
        Self { factory }
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentFactory for LoggerFactory {
    fn can_create(&self, locator: &Locator) -> Option<Locator> {
        self.factory.can_create(locator)
    }

    fn create(&self, locator: &Locator) -> Result<Arc<dyn Component>, CreateError> {
        self.factory.create(locator)
    }
}
