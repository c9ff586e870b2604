//! 配置相关的基础接口定义

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 可配置组件 trait
///
/// 容器在组件创建后、打开前调用 `configure`。配置是尽力而为的，
/// 组件应自行处理缺失或无效的配置项。
pub trait Configurable: Send + Sync {
    /// 应用配置
    fn configure(&self, config: &ConfigParams);
}

/// 配置参数
///
/// 以 `serde_json` 值树保存的配置节，支持 `a.b.c` 形式的点分路径访问。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigParams {
    data: Map<String, Value>,
}

impl ConfigParams {
    /// 创建空的配置参数
    pub fn new() -> Self {
        Self { data: Map::new() }
    }

    /// 从任意 JSON 值创建配置参数
    ///
    /// 数组会被转换为以下标 `"0"`、`"1"` … 为键的对象；根节点不是对象或数组时结果为空。
    pub fn from_value(value: Value) -> Self {
        match normalize_arrays(value) {
            Value::Object(data) => Self { data },
            _ => Self::new(),
        }
    }

    /// 解析 `key1=value1;key2=value2` 形式的字符串
    pub fn parse(text: &str) -> Self {
        let mut params = Self::new();
        for pair in text.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.set(key.trim(), Value::String(value.trim().to_string()));
        }
        params
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 顶层键数量
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 顶层键
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    /// 获取配置项，支持点分路径
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.data.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// 是否包含配置项
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 以字符串形式获取配置项
    pub fn get_as_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    /// 以字符串形式获取配置项，缺失时返回默认值
    pub fn get_as_string_with_default(&self, key: &str, default: &str) -> String {
        self.get_as_string(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// 以整数形式获取配置项
    pub fn get_as_integer(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(value) => value.as_i64(),
            Value::String(value) => value.trim().parse().ok(),
            _ => None,
        }
    }

    /// 以布尔形式获取配置项
    pub fn get_as_boolean(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(value) => Some(*value),
            Value::Number(value) => value.as_i64().map(|v| v != 0),
            Value::String(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// 获取子配置节，不存在时返回空配置
    pub fn get_section(&self, key: &str) -> ConfigParams {
        match self.get(key) {
            Some(Value::Object(data)) => Self { data: data.clone() },
            _ => Self::new(),
        }
    }

    /// 所有值为对象的顶层键
    pub fn section_names(&self) -> Vec<String> {
        self.data
            .iter()
            .filter(|(_, value)| value.is_object())
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// 设置配置项，按点分路径创建中间节点
    pub fn set(&mut self, key: &str, value: Value) {
        let segments: Vec<&str> = key.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.data;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(next) = entry else {
                return;
            };
            current = next;
        }
        current.insert(last.to_string(), value);
    }

    /// 删除顶层配置项，其余配置项保持原有顺序
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// 用另一组参数覆盖当前参数，返回合并后的结果
    pub fn override_with(&self, other: &ConfigParams) -> ConfigParams {
        let mut data = self.data.clone();
        merge_into(&mut data, &other.data);
        Self { data }
    }

    /// 绑定到具体类型
    pub fn bind<T>(&self) -> Result<T, ConfigError>
    where
        T: for<'de> Deserialize<'de>,
    {
        serde_json::from_value(self.to_value())
            .map_err(|source| ConfigError::SerializationError { source })
    }

    /// 转换为 JSON 对象
    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    /// 底层数据
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl From<Map<String, Value>> for ConfigParams {
    fn from(data: Map<String, Value>) -> Self {
        Self::from_value(Value::Object(data))
    }
}

fn normalize_arrays(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Object(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), normalize_arrays(item)))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, normalize_arrays(item)))
                .collect(),
        ),
        other => other,
    }
}

fn merge_into(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dotted_access() {
        let params = ConfigParams::from_value(json!({
            "info": { "name": "dummy", "retries": "3" },
            "enabled": "yes"
        }));

        assert_eq!(params.get_as_string("info.name").as_deref(), Some("dummy"));
        assert_eq!(params.get_as_integer("info.retries"), Some(3));
        assert_eq!(params.get_as_boolean("enabled"), Some(true));
        assert_eq!(params.get_as_string_with_default("info.missing", "x"), "x");
        assert_eq!(params.section_names(), vec!["info".to_string()]);
    }

    #[test]
    fn test_arrays_become_indexed_sections() {
        let params = ConfigParams::from_value(json!([{ "a": 1 }, { "b": 2 }]));

        assert_eq!(params.len(), 2);
        assert_eq!(params.get_section("1").get_as_integer("b"), Some(2));
    }

    #[test]
    fn test_parse_and_override() {
        let defaults = ConfigParams::parse("level=info;source.name=app");
        let overrides = ConfigParams::parse("level=debug; flag");

        let merged = defaults.override_with(&overrides);

        assert_eq!(merged.get_as_string("level").as_deref(), Some("debug"));
        assert_eq!(merged.get_as_string("source.name").as_deref(), Some("app"));
        assert_eq!(merged.get_as_string("flag").as_deref(), Some(""));
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut params = ConfigParams::parse("first=1;second=2;third=3;fourth=4");

        assert_eq!(params.remove("first"), Some(json!("1")));

        let keys: Vec<&String> = params.keys().collect();
        assert_eq!(keys, vec!["second", "third", "fourth"]);
    }

    #[test]
    fn test_bind_to_struct() {
        #[derive(Deserialize)]
        struct Settings {
            message: String,
        }

        let params = ConfigParams::parse("message=hi");
        let settings: Settings = params.bind().unwrap();

        assert_eq!(settings.message, "hi");
    }
}
