//! 容器默认工厂

use crate::info::InfoFactory;
use crate::logger::LoggerFactory;
use di_impl::CompositeFactory;
use std::sync::Arc;

/// 创建容器默认工厂
///
/// 包含信息组件工厂和日志组件工厂，用户工厂通过 `add` 追加在其后。
pub fn default_container_factory() -> CompositeFactory {
    CompositeFactory::with_factories(vec![
        Arc::new(InfoFactory::new()),
        Arc::new(LoggerFactory::new()),
    ])
}
