//! # Configuration Implementation
//!
//! 容器配置的具体实现：组件配置模型和配置文件读取。
//!
//! ## 主要组件
//!
//! - [`ContainerConfig`] - 有序的组件配置列表
//! - [`ComponentConfig`] - 单个组件的描述符/类型与参数
//! - [`ContainerConfigReader`] - JSON / YAML / TOML 配置文件读取器

pub mod config;
pub mod reader;
pub mod template;

pub use config::*;
pub use reader::*;

#[cfg(test)]
mod tests;
