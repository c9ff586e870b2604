//! # Component Abstractions
//!
//! 组件抽象层，定义组件能力角色和引用集合的核心接口。
//!
//! ## 核心接口
//!
//! - [`Component`] - 组件基础 trait 与能力查询
//! - [`References`] - 组件引用集合接口
//! - [`ComponentFactory`] - 组件工厂接口
//! - [`Logger`] - 日志记录器角色

pub mod component;
pub mod factory;
pub mod lifecycle;
pub mod log;
pub mod references;

pub use component::*;
pub use factory::*;
pub use lifecycle::*;
pub use log::*;
pub use references::*;

pub use infrastructure_common::{ConfigParams, Configurable};
