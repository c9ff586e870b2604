//! 组件日志记录器角色

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// 日志级别
///
/// 数值越大越详细，`None` 表示关闭日志。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 不输出
    None,
    /// 致命错误
    Fatal,
    /// 错误
    Error,
    /// 警告
    Warn,
    /// 信息
    #[default]
    Info,
    /// 调试
    Debug,
    /// 追踪
    Trace,
}

impl LogLevel {
    /// 按名称或数值解析，无法识别时返回默认值
    pub fn parse_or(value: &str, default: LogLevel) -> LogLevel {
        value.parse().unwrap_or(default)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "0" | "none" | "nothing" => Ok(Self::None),
            "1" | "fatal" => Ok(Self::Fatal),
            "2" | "error" => Ok(Self::Error),
            "3" | "warn" | "warning" => Ok(Self::Warn),
            "4" | "info" => Ok(Self::Info),
            "5" | "debug" => Ok(Self::Debug),
            "6" | "trace" => Ok(Self::Trace),
            other => Err(format!("未知的日志级别: {other}")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::None => "NONE",
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        };
        f.write_str(text)
    }
}

/// 日志记录器角色
pub trait Logger: Send + Sync {
    /// 当前日志级别
    fn level(&self) -> LogLevel;

    /// 设置日志级别
    fn set_level(&self, level: LogLevel);

    /// 记录一条日志
    fn log(
        &self,
        level: LogLevel,
        correlation_id: &str,
        error: Option<&(dyn Error + 'static)>,
        message: &str,
    );

    /// 致命错误
    fn fatal(&self, correlation_id: &str, error: Option<&(dyn Error + 'static)>, message: &str) {
        self.log(LogLevel::Fatal, correlation_id, error, message);
    }

    /// 错误
    fn error(&self, correlation_id: &str, error: Option<&(dyn Error + 'static)>, message: &str) {
        self.log(LogLevel::Error, correlation_id, error, message);
    }

    /// 警告
    fn warn(&self, correlation_id: &str, message: &str) {
        self.log(LogLevel::Warn, correlation_id, None, message);
    }

    /// 信息
    fn info(&self, correlation_id: &str, message: &str) {
        self.log(LogLevel::Info, correlation_id, None, message);
    }

    /// 调试
    fn debug(&self, correlation_id: &str, message: &str) {
        self.log(LogLevel::Debug, correlation_id, None, message);
    }

    /// 追踪
    fn trace(&self, correlation_id: &str, message: &str) {
        self.log(LogLevel::Trace, correlation_id, None, message);
    }
}
