//! 容器配置文件读取

use crate::config::ContainerConfig;
use crate::template;
use infrastructure_common::{ConfigError, ConfigParams, ConfigResult};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// TOML
    Toml,
}

impl ConfigFormat {
    /// 根据扩展名判断格式，无法识别时按 JSON 处理
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// 容器配置读取器
///
/// 读取 JSON、YAML 或 TOML 格式的容器配置文件。TOML 没有顶层数组，
/// 组件列表写在 `[[components]]` 表数组中。
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerConfigReader;

impl ContainerConfigReader {
    /// 读取容器配置文件，格式由扩展名决定
    pub fn read_from_file(
        path: impl AsRef<Path>,
        parameters: Option<&ConfigParams>,
    ) -> ConfigResult<ContainerConfig> {
        let path = path.as_ref();
        let value = Self::read_value(path, parameters)?;
        let config = ContainerConfig::from_value(value)?;
        debug!(path = %path.display(), components = config.len(), "容器配置读取完成");
        Ok(config)
    }

    /// 解析已经读入内存的配置内容
    pub fn parse(
        content: &str,
        format: ConfigFormat,
        parameters: Option<&ConfigParams>,
    ) -> ConfigResult<Value> {
        let content = match parameters {
            Some(parameters) => template::render(content, parameters)?,
            None => content.to_string(),
        };

        match format {
            ConfigFormat::Json => Ok(serde_json::from_str(&content)?),
            ConfigFormat::Yaml => {
                serde_yaml::from_str::<Value>(&content).map_err(ConfigError::parse_error)
            }
            ConfigFormat::Toml => {
                let table = toml::from_str::<toml::Table>(&content)
                    .map_err(ConfigError::parse_error)?;
                let value = toml_to_json(&toml::Value::Table(table));
                Ok(unwrap_components(value))
            }
        }
    }

    fn read_value(path: &Path, parameters: Option<&ConfigParams>) -> ConfigResult<Value> {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::FileNotFound {
                path: String::new(),
            });
        }
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!(path = %path.display(), "读取容器配置文件");
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, ConfigFormat::from_path(path), parameters)
    }
}

/// 将 TOML 值转换为 JSON 值
fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number(serde_json::Number::from(*i)),
        toml::Value::Float(f) => Value::Number(
            serde_json::Number::from_f64(*f).unwrap_or_else(|| serde_json::Number::from(0)),
        ),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Array(arr) => Value::Array(arr.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}

fn unwrap_components(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("components") => {
            map.remove("components").unwrap_or(Value::Null)
        }
        other => other,
    }
}
