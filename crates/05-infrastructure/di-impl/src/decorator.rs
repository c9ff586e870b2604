//! 引用装饰器基类

use di_abstractions::{Component, References};
use infrastructure_common::{InfrastructureResult, Locator};
use std::fmt;
use std::sync::{Arc, Weak};

/// 引用装饰器
///
/// 所有操作都转发给 `next`。`top` 指向最外层的引用集合，装饰器产生的写入
/// （例如自动创建的组件）都写到 `top`，使其对整条链可见。单独使用时
/// `top` 未设置，退化为 `next`。
#[derive(Clone)]
pub struct ReferencesDecorator {
    next: Arc<dyn References>,
    top: Option<Weak<dyn References>>,
}

impl ReferencesDecorator {
    /// 创建装饰器
    pub fn new(next: Arc<dyn References>, top: Option<Weak<dyn References>>) -> Self {
        Self { next, top }
    }

    /// 下一层引用集合
    pub fn next(&self) -> &Arc<dyn References> {
        &self.next
    }

    /// 最外层引用集合
    pub fn top(&self) -> Arc<dyn References> {
        self.top
            .as_ref()
            .and_then(Weak::upgrade)
            .unwrap_or_else(|| self.next.clone())
    }
}

impl fmt::Debug for ReferencesDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferencesDecorator")
            .field("has_top", &self.top.is_some())
            .finish()
    }
}

impl References for ReferencesDecorator {
    fn put(&self, locator: Locator, component: Arc<dyn Component>) -> InfrastructureResult<()> {
        self.next.put(locator, component)
    }

    fn remove(&self, locator: &Locator) -> InfrastructureResult<Option<Arc<dyn Component>>> {
        self.next.remove(locator)
    }

    fn remove_all(&self, locator: &Locator) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        self.next.remove_all(locator)
    }

    fn get_all_locators(&self) -> Vec<Locator> {
        self.next.get_all_locators()
    }

    fn get_all(&self) -> Vec<Arc<dyn Component>> {
        self.next.get_all()
    }

    fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> InfrastructureResult<Vec<Arc<dyn Component>>> {
        self.next.find(locator, required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ComponentStore;
    use crate::tests::Probe;

    #[test]
    fn test_standalone_decorator_writes_through_to_next() {
        let store = Arc::new(ComponentStore::new());
        let decorator = ReferencesDecorator::new(store.clone(), None);

        decorator.put(Locator::from("a"), Probe::arc("a")).unwrap();
        decorator.top().put(Locator::from("b"), Probe::arc("b")).unwrap();

        assert_eq!(store.len(), 2);
        assert!(decorator.get_one_required(&Locator::from("b")).is_ok());
        assert!(decorator
            .get_one_required(&Locator::from("c"))
            .unwrap_err()
            .is_not_found());
    }
}
