//! 组件工厂抽象接口

use crate::component::Component;
use infrastructure_common::{CreateError, Locator};
use std::sync::Arc;

/// 组件工厂 trait
///
/// 工厂本身也是组件，注册到引用集合后可被构建装饰器发现并用于按需创建组件。
pub trait ComponentFactory: Send + Sync {
    /// 判断能否创建定位符对应的组件
    ///
    /// 返回工厂注册的定位符，调用方用它补全查找定位符中的通配字段。
    fn can_create(&self, locator: &Locator) -> Option<Locator>;

    /// 创建组件
    fn create(&self, locator: &Locator) -> Result<Arc<dyn Component>, CreateError>;
}
