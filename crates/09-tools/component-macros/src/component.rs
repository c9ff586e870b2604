//! `#[derive(Component)]` 实现

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DeriveInput, Result};

/// 组件声明的能力角色
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ComponentRoles {
    pub configurable: bool,
    pub referenceable: bool,
    pub unreferenceable: bool,
    pub openable: bool,
    pub closeable: bool,
    pub factory: bool,
    pub logger: bool,
}

impl ComponentRoles {
    /// 从 `#[component(...)]` 属性解析角色
    pub fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut roles = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("component")) {
            attr.parse_nested_meta(|meta| {
                let flag = if meta.path.is_ident("configurable") {
                    &mut roles.configurable
                } else if meta.path.is_ident("referenceable") {
                    &mut roles.referenceable
                } else if meta.path.is_ident("unreferenceable") {
                    &mut roles.unreferenceable
                } else if meta.path.is_ident("openable") {
                    &mut roles.openable
                } else if meta.path.is_ident("closeable") {
                    &mut roles.closeable
                } else if meta.path.is_ident("factory") {
                    &mut roles.factory
                } else if meta.path.is_ident("logger") {
                    &mut roles.logger
                } else {
                    return Err(meta.error("未知的组件角色"));
                };
                *flag = true;
                Ok(())
            })?;
        }

        // Openable 以 Closeable 为父 trait
        if roles.openable {
            roles.closeable = true;
        }

        Ok(roles)
    }
}

/// 实现 #[derive(Component)] 宏
pub fn derive_component_impl(input: &DeriveInput) -> TokenStream {
    expand(input).unwrap_or_else(|err| err.to_compile_error())
}

fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let roles = ComponentRoles::from_attributes(&input.attrs)?;
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let declared = [
        (roles.configurable, quote!(as_configurable), quote!(Configurable)),
        (roles.referenceable, quote!(as_referenceable), quote!(Referenceable)),
        (roles.unreferenceable, quote!(as_unreferenceable), quote!(Unreferenceable)),
        (roles.openable, quote!(as_openable), quote!(Openable)),
        (roles.closeable, quote!(as_closeable), quote!(Closeable)),
        (roles.factory, quote!(as_factory), quote!(ComponentFactory)),
        (roles.logger, quote!(as_logger), quote!(Logger)),
    ];

    let methods = declared
        .into_iter()
        .filter(|(enabled, _, _)| *enabled)
        .map(|(_, method, role)| {
            quote! {
                fn #method(&self) -> ::core::option::Option<&dyn ::di_abstractions::#role> {
                    ::core::option::Option::Some(self)
                }
            }
        });

    Ok(quote! {
        impl #impl_generics ::di_abstractions::Component for #struct_name #ty_generics #where_clause {
            #(#methods)*
        }
    })
}
