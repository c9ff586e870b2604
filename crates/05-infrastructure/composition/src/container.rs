//! 组件容器
//!
//! 容器根据配置创建组件，并统一驱动它们的链接、打开、关闭和撤销链接。
//!
//! 打开流程：
//!
//! 1. 创建新的容器引用集合，注册上下文信息和工厂
//! 2. 按配置顺序创建、注册并配置组件
//! 3. 调用继承容器的引用钩子，重新获取上下文信息和组合日志
//! 4. 打开引用集合（先链接全部组件，再打开全部组件）
//!
//! 任意一步失败都会尽力关闭已创建的组件并返回错误。

use crate::default_factory::default_container_factory;
use crate::info::{context_info_descriptor, ContextInfo};
use crate::logger::CompositeLogger;
use config_impl::{ContainerConfig, ContainerConfigReader};
use di_abstractions::{
    downcast_component, Closeable, Component, ComponentFactory, Openable, References,
};
use di_impl::{CompositeFactory, ContainerReferences, TypeRegistry};
use infrastructure_common::{
    ConfigParams, ConfigResult, ContainerState, Descriptor, InfrastructureResult, LifecycleError,
    TypeDescriptor, FRAMEWORK_GROUP,
};
use std::any::Any;
use std::path::Path;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 工厂注册表描述符
pub fn container_factory_descriptor() -> Descriptor {
    Descriptor::new(FRAMEWORK_GROUP, "factory", "container", "default", "1.0")
}

/// 组件容器
#[derive(Debug)]
pub struct Container {
    info: Arc<ContextInfo>,
    config: ContainerConfig,
    factories: Arc<CompositeFactory>,
    types: Arc<TypeRegistry>,
    logger: Arc<CompositeLogger>,
    references: Option<ContainerReferences>,
    referenceable: Option<Arc<dyn Component>>,
    state: ContainerState,
}

impl Container {
    /// 创建容器
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            info: Arc::new(ContextInfo::new(name, description)),
            config: ContainerConfig::default(),
            factories: Arc::new(default_container_factory()),
            types: Arc::new(TypeRegistry::new()),
            logger: Arc::new(CompositeLogger::new()),
            references: None,
            referenceable: None,
            state: ContainerState::Closed,
        }
    }

    /// 创建带引用钩子的容器
    ///
    /// 钩子组件的 `set_references` 在配置组件创建完成后调用，
    /// `unset_references` 在关闭组件之前调用。
    pub fn inherit(
        name: impl Into<String>,
        description: impl Into<String>,
        referenceable: Arc<dyn Component>,
    ) -> Self {
        Self {
            referenceable: Some(referenceable),
            ..Self::new(name, description)
        }
    }

    /// 从原始配置树读取容器配置
    pub fn configure(&mut self, config: &ConfigParams) -> ConfigResult<()> {
        self.config = ContainerConfig::from_config_params(config)?;
        Ok(())
    }

    /// 从配置文件读取容器配置
    pub fn read_config_from_file(
        &mut self,
        path: impl AsRef<Path>,
        parameters: Option<&ConfigParams>,
    ) -> ConfigResult<()> {
        self.config = ContainerConfigReader::read_from_file(path, parameters)?;
        Ok(())
    }

    /// 直接设置容器配置
    pub fn set_config(&mut self, config: ContainerConfig) {
        self.config = config;
    }

    /// 当前容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 追加组件工厂
    pub fn add_factory(&self, factory: Arc<dyn ComponentFactory>) {
        self.factories.add(factory);
    }

    /// 注册可在配置中以 `type` 引用的组件类型
    pub fn register_type<T, F>(&self, type_: TypeDescriptor, constructor: F)
    where
        T: Component,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.types.register(type_, constructor);
    }

    /// 上下文信息
    pub fn info(&self) -> &Arc<ContextInfo> {
        &self.info
    }

    /// 组合日志
    pub fn logger(&self) -> &Arc<CompositeLogger> {
        &self.logger
    }

    /// 当前引用集合，关闭状态下为空
    pub fn references(&self) -> Option<&ContainerReferences> {
        self.references.as_ref()
    }

    /// 生命周期状态
    pub fn state(&self) -> ContainerState {
        self.state
    }

    /// 容器是否已打开
    pub fn is_open(&self) -> bool {
        self.references.is_some()
    }

    /// 打开容器
    pub fn open(&mut self, correlation_id: &str) -> InfrastructureResult<()> {
        let name = self.info.name();
        if !self.state.can_open() {
            return Err(LifecycleError::AlreadyOpened { name }.into());
        }

        self.state = ContainerState::Opening;
        debug!(correlation_id, container = %name, "正在启动容器");

        let references = ContainerReferences::new(self.types.clone());
        self.references = Some(references.clone());

        let result = catch_unwind(AssertUnwindSafe(|| {
            self.start(&references, correlation_id)
        }))
        .unwrap_or_else(|panic| {
            Err(LifecycleError::fault(&name, "open", panic_message(panic.as_ref())).into())
        });

        match result {
            Ok(()) => {
                self.state = ContainerState::Open;
                info!(correlation_id, container = %self.info.name(), "容器已启动");
                Ok(())
            }
            Err(err) => {
                error!(correlation_id, container = %name, stage = "open", error = %err, "容器启动失败");
                if let Err(close_err) = self.shutdown(correlation_id) {
                    warn!(correlation_id, container = %name, error = %close_err, "启动失败后关闭容器出错");
                }
                Err(err)
            }
        }
    }

    /// 关闭容器
    ///
    /// 无论关闭是否成功，引用集合都会被丢弃。
    pub fn close(&mut self, correlation_id: &str) -> InfrastructureResult<()> {
        if !self.state.can_close() {
            return Ok(());
        }

        let name = self.info.name();
        let result = self.shutdown(correlation_id);
        match &result {
            Ok(()) => info!(correlation_id, container = %name, "容器已停止"),
            Err(err) => {
                error!(correlation_id, container = %name, stage = "close", error = %err, "容器关闭失败")
            }
        }
        result
    }

    fn start(
        &mut self,
        references: &ContainerReferences,
        correlation_id: &str,
    ) -> InfrastructureResult<()> {
        self.init_references(references)?;
        references.put_from_config(&self.config)?;

        if let Some(referenceable) = self
            .referenceable
            .as_ref()
            .and_then(|hook| hook.as_referenceable())
        {
            referenceable.set_references(references)?;
        }

        // 与组件按同样的方式取上下文信息
        if let Some(info) = references
            .get_one_optional(&Descriptor::new("*", "context-info", "*", "*", "*").into())
            .and_then(downcast_component::<ContextInfo>)
        {
            self.info = info;
        }

        self.logger = Arc::new(CompositeLogger::from_references(references)?);
        references.open(correlation_id)
    }

    fn init_references(&self, references: &ContainerReferences) -> InfrastructureResult<()> {
        // 配置中声明了上下文信息时不注册默认的
        let pattern = Descriptor::new(FRAMEWORK_GROUP, "context-info", "*", "*", "*");
        let configured = self
            .config
            .iter()
            .filter_map(|entry| entry.descriptor())
            .any(|descriptor| pattern.matches(descriptor));

        if !configured {
            references.put(context_info_descriptor().into(), self.info.clone())?;
        }

        references.put(container_factory_descriptor().into(), self.factories.clone())
    }

    fn shutdown(&mut self, correlation_id: &str) -> InfrastructureResult<()> {
        let Some(references) = self.references.clone() else {
            return Ok(());
        };

        self.state = ContainerState::Closing;
        debug!(correlation_id, container = %self.info.name(), "正在停止容器");

        let name = self.info.name();
        let referenceable = self.referenceable.clone();
        let result = catch_unwind(AssertUnwindSafe(|| {
            if let Some(unreferenceable) = referenceable
                .as_ref()
                .and_then(|hook| hook.as_unreferenceable())
            {
                unreferenceable.unset_references();
            }
            rollback_opened(&references, correlation_id).and(references.close(correlation_id))
        }))
        .unwrap_or_else(|panic| {
            Err(LifecycleError::fault(&name, "close", panic_message(panic.as_ref())).into())
        });

        self.references = None;
        self.state = ContainerState::Closed;
        result
    }
}

/// 打开未完成时，运行装饰器不会关闭组件，由容器关闭已经打开的组件
///
/// 每个已打开的组件都会尝试关闭，返回第一个错误。
fn rollback_opened(
    references: &ContainerReferences,
    correlation_id: &str,
) -> InfrastructureResult<()> {
    if references.managed().runner().is_open() {
        return Ok(());
    }

    let mut first_error = None;
    for component in references.get_all() {
        let Some(openable) = component.as_openable().filter(|openable| openable.is_open()) else {
            continue;
        };
        if let Err(err) = openable.close(correlation_id) {
            warn!(correlation_id, error = %err, "回滚时关闭组件失败");
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "未知故障".to_string())
}
