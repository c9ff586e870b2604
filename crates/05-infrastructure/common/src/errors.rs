//! 错误类型定义

use crate::descriptor::Locator;
use thiserror::Error;

/// 装箱的底层错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError { source: BoxError },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("描述符格式无效: {value}, 原因: {message}")]
    InvalidDescriptor { value: String, message: String },

    #[error("组件配置无效: {message}")]
    InvalidComponentConfig { message: String },

    #[error("命令行参数无效: {message}")]
    InvalidArguments { message: String },
}

impl ConfigError {
    /// 创建解析错误
    pub fn parse_error(source: impl Into<BoxError>) -> Self {
        Self::ParseError {
            source: source.into(),
        }
    }

    /// 创建描述符格式错误
    pub fn invalid_descriptor(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            value: value.into(),
            message: message.into(),
        }
    }

    /// 创建组件配置错误
    pub fn invalid_component_config(message: impl Into<String>) -> Self {
        Self::InvalidComponentConfig {
            message: message.into(),
        }
    }
}

/// 引用查找错误类型
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("无法找到引用: {locator}")]
    NotFound { locator: Locator },
}

impl ReferenceError {
    /// 创建引用未找到错误
    pub fn not_found(locator: &Locator) -> Self {
        Self::NotFound {
            locator: locator.clone(),
        }
    }

    /// 出错时使用的定位符
    pub fn locator(&self) -> &Locator {
        match self {
            Self::NotFound { locator } => locator,
        }
    }
}

/// 组件创建错误类型
#[derive(Error, Debug)]
pub enum CreateError {
    #[error("没有工厂可以创建组件: {locator}")]
    Unsupported { locator: Locator },

    #[error("无法根据配置创建组件: {config}")]
    CannotCreateComponent { config: String },

    #[error("未注册的组件类型: {type_name}")]
    UnknownType { type_name: String },
}

impl CreateError {
    /// 创建不支持的定位符错误
    pub fn unsupported(locator: &Locator) -> Self {
        Self::Unsupported {
            locator: locator.clone(),
        }
    }
}

/// 生命周期管理错误类型
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("容器已经打开: {name}")]
    AlreadyOpened { name: String },

    #[error("组件运行失败: {component}, 原因: {message}")]
    ComponentFailed { component: String, message: String },

    #[error("容器 {container} 在{stage}阶段发生未处理故障: {message}")]
    Fault {
        container: String,
        stage: String,
        message: String,
    },

    #[error("进程被终止: {message}")]
    Terminated { message: String },
}

impl LifecycleError {
    /// 创建组件运行失败错误
    pub fn component_failed(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ComponentFailed {
            component: component.into(),
            message: message.into(),
        }
    }

    /// 创建未处理故障错误
    pub fn fault(
        container: impl Into<String>,
        stage: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Fault {
            container: container.into(),
            stage: stage.into(),
            message: message.into(),
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("引用错误: {source}")]
    ReferenceError {
        #[from]
        source: ReferenceError,
    },

    #[error("创建错误: {source}")]
    CreateError {
        #[from]
        source: CreateError,
    },

    #[error("生命周期错误: {source}")]
    LifecycleError {
        #[from]
        source: LifecycleError,
    },
}

impl InfrastructureError {
    /// 是否为引用未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ReferenceError {
                source: ReferenceError::NotFound { .. }
            }
        )
    }

    /// 是否为容器重复打开错误
    pub fn is_already_opened(&self) -> bool {
        matches!(
            self,
            Self::LifecycleError {
                source: LifecycleError::AlreadyOpened { .. }
            }
        )
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
