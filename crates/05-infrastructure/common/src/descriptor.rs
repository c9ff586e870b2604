//! 组件定位符定义
//!
//! 组件通过定位符注册和查找。最常用的定位符是五段式的 [`Descriptor`]
//! （`group:type:kind:name:version`），任意一段都可以是通配符 `*`。

use crate::errors::ConfigError;
use std::fmt;
use std::str::FromStr;

/// 通配符
pub const WILDCARD: &str = "*";

fn normalize(part: &str) -> Option<String> {
    let part = part.trim();
    if part.is_empty() || part == WILDCARD {
        None
    } else {
        Some(part.to_string())
    }
}

fn part_matches(left: &Option<String>, right: &Option<String>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => l == r,
        _ => true,
    }
}

/// 组件描述符
///
/// 由 group、type、kind、name、version 五个字段组成，`None` 表示通配。
/// 匹配是双向宽松的：任意一方为通配时该字段即视为匹配。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Descriptor {
    group: Option<String>,
    type_: Option<String>,
    kind: Option<String>,
    name: Option<String>,
    version: Option<String>,
}

impl Descriptor {
    /// 创建新的描述符，`"*"` 或空字符串表示通配
    pub fn new(group: &str, type_: &str, kind: &str, name: &str, version: &str) -> Self {
        Self {
            group: normalize(group),
            type_: normalize(type_),
            kind: normalize(kind),
            name: normalize(name),
            version: normalize(version),
        }
    }

    /// 组件分组
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// 组件逻辑类型
    pub fn type_(&self) -> Option<&str> {
        self.type_.as_deref()
    }

    /// 实现种类
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// 组件名称
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 实现版本
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// 部分匹配，通配字段与任意值匹配
    pub fn matches(&self, other: &Descriptor) -> bool {
        part_matches(&self.group, &other.group)
            && part_matches(&self.type_, &other.type_)
            && part_matches(&self.kind, &other.kind)
            && part_matches(&self.name, &other.name)
            && part_matches(&self.version, &other.version)
    }

    /// 所有字段是否都已指定
    pub fn is_complete(&self) -> bool {
        self.group.is_some()
            && self.type_.is_some()
            && self.kind.is_some()
            && self.name.is_some()
            && self.version.is_some()
    }

    /// 用另一个描述符补全通配字段
    ///
    /// 自身已指定的字段保持不变，只有通配字段才取 `other` 的值。
    pub fn clarify(&self, other: &Descriptor) -> Descriptor {
        Descriptor {
            group: self.group.clone().or_else(|| other.group.clone()),
            type_: self.type_.clone().or_else(|| other.type_.clone()),
            kind: self.kind.clone().or_else(|| other.kind.clone()),
            name: self.name.clone().or_else(|| other.name.clone()),
            version: self.version.clone().or_else(|| other.version.clone()),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |p: &Option<String>| p.as_deref().unwrap_or(WILDCARD).to_string();
        write!(
            f,
            "{}:{}:{}:{}:{}",
            part(&self.group),
            part(&self.type_),
            part(&self.kind),
            part(&self.name),
            part(&self.version)
        )
    }
}

impl FromStr for Descriptor {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(':').collect();
        if parts.len() != 5 {
            return Err(ConfigError::invalid_descriptor(
                value,
                "描述符必须由 group:type:kind:name:version 五段组成",
            ));
        }
        Ok(Self::new(parts[0], parts[1], parts[2], parts[3], parts[4]))
    }
}

/// 类型描述符
///
/// 用于按类型名动态创建组件，只参与创建，不参与部分匹配。
#[derive(Debug, Clone, Eq)]
pub struct TypeDescriptor {
    name: String,
    library: Option<String>,
}

impl TypeDescriptor {
    /// 创建新的类型描述符
    pub fn new(name: impl Into<String>, library: Option<&str>) -> Self {
        Self {
            name: name.into(),
            library: library.and_then(normalize),
        }
    }

    /// 类型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 类型所在的库
    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && part_matches(&self.library, &other.library)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.library {
            Some(library) => write!(f, "{},{}", self.name, library),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.splitn(2, ',');
        let name = parts.next().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(ConfigError::invalid_descriptor(value, "类型名称不能为空"));
        }
        Ok(Self::new(name, parts.next()))
    }
}

/// 组件定位符
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// 五段式描述符，支持通配匹配
    Descriptor(Descriptor),
    /// 类型描述符，按相等比较
    Type(TypeDescriptor),
    /// 普通名称，按相等比较
    Name(String),
    /// 无定位符注册的组件，任何查找都不会命中
    Anonymous,
}

impl Locator {
    /// 判断两个定位符是否匹配
    pub fn matches(&self, other: &Locator) -> bool {
        match (self, other) {
            (Self::Descriptor(left), Self::Descriptor(right)) => left.matches(right),
            (Self::Type(left), Self::Type(right)) => left == right,
            (Self::Name(left), Self::Name(right)) => left == right,
            _ => false,
        }
    }

    /// 作为描述符访问
    pub fn as_descriptor(&self) -> Option<&Descriptor> {
        match self {
            Self::Descriptor(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    /// 是否为匿名定位符
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descriptor(descriptor) => write!(f, "{}", descriptor),
            Self::Type(type_descriptor) => write!(f, "type:{}", type_descriptor),
            Self::Name(name) => f.write_str(name),
            Self::Anonymous => f.write_str("<anonymous>"),
        }
    }
}

impl From<Descriptor> for Locator {
    fn from(descriptor: Descriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<TypeDescriptor> for Locator {
    fn from(type_descriptor: TypeDescriptor) -> Self {
        Self::Type(type_descriptor)
    }
}

impl From<&str> for Locator {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Locator {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
