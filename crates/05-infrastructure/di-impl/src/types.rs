//! 组件类型注册表
//!
//! 配置中以 `type` 声明的组件通过类型注册表创建。

use di_abstractions::Component;
use infrastructure_common::{CreateError, TypeDescriptor};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

type TypeConstructor = Arc<dyn Fn() -> Arc<dyn Component> + Send + Sync>;

/// 组件类型注册表
#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<Vec<(TypeDescriptor, TypeConstructor)>>,
}

impl TypeRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册组件类型
    pub fn register<T, F>(&self, type_: TypeDescriptor, constructor: F)
    where
        T: Component,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let constructor: TypeConstructor =
            Arc::new(move || -> Arc<dyn Component> { Arc::new(constructor()) });
        self.types.write().push((type_, constructor));
    }

    /// 是否已注册该类型
    pub fn contains(&self, type_: &TypeDescriptor) -> bool {
        self.types.read().iter().any(|(registered, _)| registered == type_)
    }

    /// 创建组件实例
    pub fn create(&self, type_: &TypeDescriptor) -> Result<Arc<dyn Component>, CreateError> {
        let constructor = self
            .types
            .read()
            .iter()
            .find(|(registered, _)| registered == type_)
            .map(|(_, constructor)| constructor.clone())
            .ok_or_else(|| CreateError::UnknownType {
                type_name: type_.to_string(),
            })?;
        Ok(constructor())
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .types
            .read()
            .iter()
            .map(|(type_, _)| type_.to_string())
            .collect();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::Probe;

    #[test]
    fn test_create_registered_type() {
        let registry = TypeRegistry::new();
        registry.register(TypeDescriptor::new("Probe", Some("di-impl")), || {
            Probe::named("typed")
        });

        let component = registry.create(&TypeDescriptor::new("Probe", None)).unwrap();

        assert_eq!(Probe::name_of(&component), "typed");
        assert!(registry.contains(&TypeDescriptor::new("Probe", Some("di-impl"))));
    }

    #[test]
    fn test_unknown_type_is_a_create_error() {
        let registry = TypeRegistry::new();

        let err = registry.create(&TypeDescriptor::new("Missing", None)).unwrap_err();

        assert!(matches!(err, CreateError::UnknownType { .. }));
    }
}
