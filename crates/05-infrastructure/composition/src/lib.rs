//! # 基础设施组合层
//!
//! 把组件引用管理、容器配置和日志组合成可运行的容器。
//!
//! ## 主要类型
//!
//! - [`Container`] - 按配置创建组件并驱动其生命周期
//! - [`ProcessContainer`] - 从命令行启动容器并等待关闭请求
//! - [`ShutdownSignal`] - 组件请求进程关闭的信号
//! - [`ContextInfo`] - 进程上下文信息组件
//! - [`CompositeLogger`] / [`TracingLogger`] - 日志组件
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::ProcessContainer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut process = ProcessContainer::new("demo", "示例进程");
//!     process.set_config_path("./config/demo.yaml");
//!     process.run(std::env::args()).await?;
//!     Ok(())
//! }
//! ```

pub mod container;
pub mod default_factory;
pub mod info;
pub mod logger;
pub mod process;
pub mod shutdown;

pub use container::{container_factory_descriptor, Container};
pub use default_factory::default_container_factory;
pub use info::{context_info_descriptor, ContextInfo, InfoFactory};
pub use logger::{CompositeLogger, LoggerFactory, NullLogger, TracingLogger};
pub use process::{ProcessArgs, ProcessContainer, DEFAULT_CONFIG_PATH};
pub use shutdown::ShutdownSignal;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;

#[cfg(test)]
mod tests;
