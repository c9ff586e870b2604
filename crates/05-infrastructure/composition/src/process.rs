//! 进程容器
//!
//! 从命令行读取配置路径和参数，打开容器后等待停止信号或关闭请求，再关闭容器。
//! Unix 上 SIGTERM、SIGQUIT 和 SIGHUP 与 Ctrl-C 一样触发正常关闭。
//!
//! ```text
//! app -c ./config/config.yml -p key1=value1 -p key2=value2
//! ```

use crate::container::Container;
use crate::shutdown::ShutdownSignal;
use clap::error::ErrorKind;
use clap::Parser;
use di_abstractions::Component;
use infrastructure_common::{ConfigError, ConfigParams, InfrastructureResult, LifecycleError};
use serde_json::Value;
use std::ffi::OsString;
use tracing::{error, info, warn};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "./config/config.yml";

/// 进程命令行参数
#[derive(Debug, Clone, Parser)]
#[command(disable_version_flag = true)]
pub struct ProcessArgs {
    /// 配置文件路径
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<String>,

    /// 配置参数，可重复指定
    #[arg(
        short = 'p',
        long = "param",
        visible_alias = "params",
        value_name = "KEY=VALUE"
    )]
    pub params: Vec<String>,
}

impl ProcessArgs {
    /// 合并环境变量和命令行参数
    ///
    /// 同名键以命令行 `-p` 的值为准，环境变量只提供默认值。
    pub fn parameters(&self) -> ConfigParams {
        let mut environment = ConfigParams::new();
        for (key, value) in std::env::vars_os() {
            if let (Some(key), Some(value)) = (key.to_str(), value.to_str()) {
                environment.set(key, Value::String(value.to_string()));
            }
        }
        environment.override_with(&ConfigParams::parse(&self.params.join(";")))
    }
}

/// 进程容器
#[derive(Debug)]
pub struct ProcessContainer {
    container: Container,
    config_path: String,
    shutdown: ShutdownSignal,
}

impl ProcessContainer {
    /// 创建进程容器
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::from_container(Container::new(name, description))
    }

    /// 创建带引用钩子的进程容器
    pub fn inherit(
        name: impl Into<String>,
        description: impl Into<String>,
        referenceable: std::sync::Arc<dyn Component>,
    ) -> Self {
        Self::from_container(Container::inherit(name, description, referenceable))
    }

    fn from_container(container: Container) -> Self {
        Self {
            container,
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            shutdown: ShutdownSignal::new(),
        }
    }

    /// 设置默认配置文件路径，命令行 `-c` 优先
    pub fn set_config_path(&mut self, path: impl Into<String>) {
        self.config_path = path.into();
    }

    /// 默认配置文件路径
    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    /// 内部容器
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// 可变的内部容器
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// 关闭信号，可克隆给需要请求关闭的组件
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// 解析命令行参数
    ///
    /// 请求帮助时打印帮助并返回 `None`。
    pub fn parse_args<I, T>(args: I) -> Result<Option<ProcessArgs>, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match ProcessArgs::try_parse_from(args) {
            Ok(args) => Ok(Some(args)),
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                if let Err(print_err) = err.print() {
                    warn!(error = %print_err, "无法输出帮助信息");
                }
                Ok(None)
            }
            Err(err) => Err(ConfigError::InvalidArguments {
                message: err.to_string(),
            }),
        }
    }

    /// 运行进程容器直到收到关闭请求
    pub async fn run<I, T>(&mut self, args: I) -> InfrastructureResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let Some(args) = Self::parse_args(args)? else {
            return Ok(());
        };

        let correlation_id = self.container.info().name();
        let path = args.config.clone().unwrap_or_else(|| self.config_path.clone());
        let parameters = args.parameters();

        if let Err(err) = self.container.read_config_from_file(&path, Some(&parameters)) {
            error!(correlation_id = %correlation_id, path = %path, error = %err, "读取容器配置失败");
            return Err(err.into());
        }

        info!(correlation_id = %correlation_id, "按 Ctrl-C 停止服务...");

        self.container.open(&correlation_id)?;

        let terminated = tokio::select! {
            signal = stop_signal() => match signal {
                Ok(name) => {
                    info!(correlation_id = %correlation_id, signal = name, "收到停止信号");
                    None
                }
                Err(err) => Some(err.to_string()),
            },
            _ = self.shutdown.cancelled() => self.shutdown.take_error(),
        };

        let closed = self.container.close(&correlation_id);

        if let Some(message) = terminated {
            error!(correlation_id = %correlation_id, error = %message, "进程被终止");
            return Err(LifecycleError::Terminated { message }.into());
        }

        info!(correlation_id = %correlation_id, "再见!");
        closed
    }
}

/// 等待停止信号，返回信号名称
#[cfg(unix)]
async fn stop_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;
    let mut hangup = signal(SignalKind::hangup())?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
        _ = quit.recv() => Ok("SIGQUIT"),
        _ = hangup.recv() => Ok("SIGHUP"),
    }
}

/// 等待停止信号，返回信号名称
#[cfg(not(unix))]
async fn stop_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|()| "SIGINT")
}
