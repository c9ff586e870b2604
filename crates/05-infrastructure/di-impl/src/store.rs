//! 组件存储
//!
//! 引用装饰器链最底层的有序 定位符 → 组件 映射。

use di_abstractions::{Component, References};
use infrastructure_common::{InfrastructureResult, Locator, ReferenceError};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

struct Reference {
    locator: Locator,
    component: Arc<dyn Component>,
}

/// 组件存储
///
/// 按插入顺序保存组件，查找按插入顺序返回所有匹配项。
/// 锁只在读写列表时持有，不会在调用组件时持有。
#[derive(Default)]
pub struct ComponentStore {
    references: RwLock<Vec<Reference>>,
}

impl ComponentStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 用初始组件创建存储
    pub fn with_components(components: Vec<(Locator, Arc<dyn Component>)>) -> Self {
        let references = components
            .into_iter()
            .map(|(locator, component)| Reference { locator, component })
            .collect();
        Self {
            references: RwLock::new(references),
        }
    }

    /// 已注册组件数量
    pub fn len(&self) -> usize {
        self.references.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.references.read().is_empty()
    }
}

impl fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locators: Vec<String> = self
            .references
            .read()
            .iter()
            .map(|r| r.locator.to_string())
            .collect();
        f.debug_struct("ComponentStore")
            .field("locators", &locators)
            .finish()
    }
}

impl References for ComponentStore {
    fn put(&self, locator: Locator, component: Arc<dyn Component>) -> InfrastructureResult<()> {
        debug!(locator = %locator, "注册组件");
        self.references.write().push(Reference { locator, component });
        Ok(())
    }

    fn remove(&self, locator: &Locator) -> InfrastructureResult<Option<Arc<dyn Component>>> {
        let mut references = self.references.write();
        let removed = references
            .iter()
            .position(|r| r.locator.matches(locator))
            .map(|index| references.remove(index).component);
        drop(references);

        if removed.is_some() {
            debug!(locator = %locator, "移除组件");
        }
        Ok(removed)
    }

    fn remove_all(&self, locator: &Locator) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        let mut references = self.references.write();
        let mut removed = Vec::new();
        references.retain(|r| {
            if r.locator.matches(locator) {
                removed.push(r.component.clone());
                false
            } else {
                true
            }
        });
        drop(references);

        debug!(locator = %locator, count = removed.len(), "移除所有匹配组件");
        Ok(removed)
    }

    fn get_all_locators(&self) -> Vec<Locator> {
        self.references
            .read()
            .iter()
            .map(|r| r.locator.clone())
            .collect()
    }

    fn get_all(&self) -> Vec<Arc<dyn Component>> {
        self.references
            .read()
            .iter()
            .map(|r| r.component.clone())
            .collect()
    }

    fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        let components: Vec<Arc<dyn Component>> = self
            .references
            .read()
            .iter()
            .filter(|r| r.locator.matches(locator))
            .map(|r| r.component.clone())
            .collect();

        if required && components.is_empty() {
            return Err(ReferenceError::not_found(locator).into());
        }
        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::Probe;
    use infrastructure_common::Descriptor;

    fn descriptor(kind: &str, name: &str) -> Locator {
        Descriptor::new("test", "probe", kind, name, "1.0").into()
    }

    #[test]
    fn test_find_returns_matches_in_insertion_order() {
        let store = ComponentStore::new();
        store.put(descriptor("a", "first"), Probe::arc("first")).unwrap();
        store.put(Locator::from("plain"), Probe::arc("plain")).unwrap();
        store.put(descriptor("b", "second"), Probe::arc("second")).unwrap();

        let found = store
            .find(&Descriptor::new("*", "probe", "*", "*", "*").into(), true)
            .unwrap();

        let names: Vec<String> = found.iter().map(|c| Probe::name_of(c)).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(store.get_all_locators().len(), 3);
    }

    #[test]
    fn test_required_find_without_match_fails() {
        let store = ComponentStore::new();

        let err = store.find(&Locator::from("missing"), true).unwrap_err();

        assert!(err.is_not_found());
        assert!(store.find(&Locator::from("missing"), false).unwrap().is_empty());
    }

    #[test]
    fn test_remove_takes_first_match_and_remove_all_takes_rest() {
        let store = ComponentStore::new();
        store.put(descriptor("a", "one"), Probe::arc("one")).unwrap();
        store.put(descriptor("a", "two"), Probe::arc("two")).unwrap();
        store.put(descriptor("a", "three"), Probe::arc("three")).unwrap();
        let any_probe: Locator = Descriptor::new("test", "probe", "a", "*", "*").into();

        let removed = store.remove(&any_probe).unwrap().unwrap();
        assert_eq!(Probe::name_of(&removed), "one");

        let rest = store.remove_all(&any_probe).unwrap();
        assert_eq!(rest.len(), 2);
        assert!(store.is_empty());
        assert!(store.remove(&any_probe).unwrap().is_none());
    }

    #[test]
    fn test_anonymous_components_are_stored_but_never_found() {
        let store = ComponentStore::new();
        store.put(Locator::Anonymous, Probe::arc("hidden")).unwrap();

        assert_eq!(store.get_all().len(), 1);
        assert!(store.find(&Locator::Anonymous, false).unwrap().is_empty());
    }
}
