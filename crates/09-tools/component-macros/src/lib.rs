//! # Component Macros
//!
//! 这个 crate 提供 `#[derive(Component)]`，根据 `#[component(...)]` 属性
//! 为结构体生成 `di_abstractions::Component` 的能力查询方法。
//!
//! ## 支持的角色
//!
//! - `configurable` - `Configurable`
//! - `referenceable` - `Referenceable`
//! - `unreferenceable` - `Unreferenceable`
//! - `openable` - `Openable`（同时声明 `closeable`）
//! - `closeable` - `Closeable`
//! - `factory` - `ComponentFactory`
//! - `logger` - `Logger`
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Component;
//! use di_abstractions::{Closeable, Openable};
//!
//! #[derive(Debug, Component)]
//! #[component(configurable, openable)]
//! pub struct MyController {
//!     // 字段
//! }
//! ```
//!
//! 使用方需要依赖 `di-abstractions`，生成的代码以 `::di_abstractions` 路径引用各角色 trait。

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;

/// 组件派生宏
///
/// 每个声明的角色生成一个返回 `Some(self)` 的能力查询方法，
/// 未声明的角色沿用 trait 默认实现返回 `None`。
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(&input).into()
}
