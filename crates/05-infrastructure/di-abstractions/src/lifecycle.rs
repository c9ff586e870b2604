//! 批量生命周期辅助函数
//!
//! 引用装饰器和容器用这些函数对一组组件执行同一个生命周期步骤，
//! 不扮演对应角色的组件会被跳过。

use crate::component::Component;
use crate::references::References;
use infrastructure_common::InfrastructureResult;
use std::sync::Arc;
use tracing::trace;

/// 为所有可接收引用的组件设置引用，遇到第一个错误即停止
pub fn set_references_for(
    references: &dyn References,
    components: &[Arc<dyn Component>],
) -> InfrastructureResult<()> {
    for component in components {
        if let Some(referenceable) = component.as_referenceable() {
            trace!(component = ?component, "设置组件引用");
            referenceable.set_references(references)?;
        }
    }
    Ok(())
}

/// 撤销所有可撤销引用组件的引用
pub fn unset_references_for(components: &[Arc<dyn Component>]) {
    for component in components {
        if let Some(unreferenceable) = component.as_unreferenceable() {
            trace!(component = ?component, "撤销组件引用");
            unreferenceable.unset_references();
        }
    }
}

/// 依次打开所有可打开的组件，遇到第一个错误即停止
pub fn open_components(
    correlation_id: &str,
    components: &[Arc<dyn Component>],
) -> InfrastructureResult<()> {
    for component in components {
        if let Some(openable) = component.as_openable() {
            trace!(correlation_id, component = ?component, "打开组件");
            openable.open(correlation_id)?;
        }
    }
    Ok(())
}

/// 依次关闭所有可关闭的组件，遇到第一个错误即停止
pub fn close_components(
    correlation_id: &str,
    components: &[Arc<dyn Component>],
) -> InfrastructureResult<()> {
    for component in components {
        if let Some(closeable) = component.as_closeable() {
            trace!(correlation_id, component = ?component, "关闭组件");
            closeable.close(correlation_id)?;
        }
    }
    Ok(())
}

/// 所有可打开的组件是否都已打开
pub fn are_components_open(components: &[Arc<dyn Component>]) -> bool {
    components
        .iter()
        .filter_map(|component| component.as_openable())
        .all(|openable| openable.is_open())
}
