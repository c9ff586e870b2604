//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn ADSP 组件容器的公共类型。
//!
//! ## 核心类型
//!
//! - [`Descriptor`] / [`Locator`] - 组件定位符
//! - [`ConfigParams`] / [`Configurable`] - 组件配置
//! - [`ContainerState`] - 容器生命周期状态
//! - [`InfrastructureError`] - 统一错误类型

pub mod configuration;
pub mod descriptor;
pub mod errors;
pub mod lifecycle;

pub use configuration::*;
pub use descriptor::*;
pub use errors::*;
pub use lifecycle::*;

/// 框架保留的描述符分组
pub const FRAMEWORK_GROUP: &str = "lorn-adsp";
