//! 容器配置模型
//!
//! 容器配置是一组有序的组件配置，列表顺序即组件的创建顺序。

use infrastructure_common::{ConfigError, ConfigParams, ConfigResult, Descriptor, Locator, TypeDescriptor};
use serde_json::Value;
use std::fmt;

/// 组件描述符配置键
pub const DESCRIPTOR_KEY: &str = "descriptor";
/// 组件类型配置键
pub const TYPE_KEY: &str = "type";

/// 单个组件的配置
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentConfig {
    descriptor: Option<Descriptor>,
    type_: Option<TypeDescriptor>,
    config: ConfigParams,
}

impl ComponentConfig {
    /// 按描述符创建组件配置
    pub fn from_descriptor(descriptor: Descriptor, config: ConfigParams) -> Self {
        Self {
            descriptor: Some(descriptor),
            type_: None,
            config,
        }
    }

    /// 按类型创建组件配置
    pub fn from_type(type_: TypeDescriptor, config: ConfigParams) -> Self {
        Self {
            descriptor: None,
            type_: Some(type_),
            config,
        }
    }

    /// 从配置节读取组件配置
    ///
    /// 配置节必须包含 `descriptor` 或 `type` 键，这两个键不会出现在组件参数中。
    pub fn from_config_params(params: &ConfigParams) -> ConfigResult<Self> {
        let descriptor = params
            .get_as_string(DESCRIPTOR_KEY)
            .map(|value| value.parse::<Descriptor>())
            .transpose()?;
        let type_ = params
            .get_as_string(TYPE_KEY)
            .map(|value| value.parse::<TypeDescriptor>())
            .transpose()?;

        if descriptor.is_none() && type_.is_none() {
            return Err(ConfigError::invalid_component_config(
                "组件配置必须包含 descriptor 或 type",
            ));
        }

        let mut config = params.clone();
        config.remove(DESCRIPTOR_KEY);
        config.remove(TYPE_KEY);

        Ok(Self {
            descriptor,
            type_,
            config,
        })
    }

    /// 组件描述符
    pub fn descriptor(&self) -> Option<&Descriptor> {
        self.descriptor.as_ref()
    }

    /// 组件类型
    pub fn type_(&self) -> Option<&TypeDescriptor> {
        self.type_.as_ref()
    }

    /// 传给组件 `configure` 的参数
    pub fn config(&self) -> &ConfigParams {
        &self.config
    }

    /// 组件注册时使用的定位符，优先使用描述符
    pub fn locator(&self) -> Locator {
        match (&self.descriptor, &self.type_) {
            (Some(descriptor), _) => Locator::Descriptor(descriptor.clone()),
            (None, Some(type_)) => Locator::Type(type_.clone()),
            (None, None) => Locator::Anonymous,
        }
    }
}

impl fmt::Display for ComponentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.descriptor, &self.type_) {
            (Some(descriptor), _) => write!(f, "descriptor={}", descriptor),
            (None, Some(type_)) => write!(f, "type={}", type_),
            (None, None) => f.write_str("<empty>"),
        }
    }
}

/// 容器配置
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerConfig {
    components: Vec<ComponentConfig>,
}

impl ContainerConfig {
    /// 创建容器配置
    pub fn new(components: Vec<ComponentConfig>) -> Self {
        Self { components }
    }

    /// 从 JSON 值读取容器配置
    ///
    /// 数组按顺序逐项读取；带有 `descriptor` 或 `type` 的对象视为单个组件；
    /// 其它对象的每个子节视为一个组件。
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        let single = matches!(
            &value,
            Value::Object(map) if map.contains_key(DESCRIPTOR_KEY) || map.contains_key(TYPE_KEY)
        );

        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) if single => {
                let params = ConfigParams::from_value(value);
                Ok(Self::new(vec![ComponentConfig::from_config_params(&params)?]))
            }
            Value::Object(_) | Value::Array(_) => {
                Self::from_config_params(&ConfigParams::from_value(value))
            }
            other => Err(ConfigError::invalid_component_config(format!(
                "容器配置必须是列表或对象: {other}"
            ))),
        }
    }

    /// 从配置参数读取容器配置，每个子节对应一个组件
    ///
    /// 节名全部为数字时按数值排序，否则保持文档顺序。
    pub fn from_config_params(params: &ConfigParams) -> ConfigResult<Self> {
        let mut names = params.section_names();
        if names.iter().all(|name| name.parse::<u64>().is_ok()) {
            names.sort_by_key(|name| name.parse::<u64>().unwrap_or(u64::MAX));
        }

        let components = names
            .iter()
            .map(|name| ComponentConfig::from_config_params(&params.get_section(name)))
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self { components })
    }

    /// 追加组件配置
    pub fn push(&mut self, component: ComponentConfig) {
        self.components.push(component);
    }

    /// 组件配置数量
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// 按顺序遍历组件配置
    pub fn iter(&self) -> std::slice::Iter<'_, ComponentConfig> {
        self.components.iter()
    }
}

impl<'a> IntoIterator for &'a ContainerConfig {
    type Item = &'a ComponentConfig;
    type IntoIter = std::slice::Iter<'a, ComponentConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl FromIterator<ComponentConfig> for ContainerConfig {
    fn from_iter<I: IntoIterator<Item = ComponentConfig>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
