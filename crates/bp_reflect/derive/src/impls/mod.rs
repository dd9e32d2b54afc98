//! Code generation for `#[derive(Bean)]`.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_bean;
mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanStruct;

/// Generates the descriptor table and all trait impls of a bean.
///
/// Everything lives in an anonymous const block so the static tables
/// do not leak into the user's namespace.
pub(crate) fn impl_bean(bean: &BeanStruct) -> TokenStream {
    let info_tokens = trait_typed::bean_info_statics(bean);
    let typed_tokens = trait_typed::impl_trait_typed(bean);
    let reflect_tokens = trait_reflect::impl_trait_reflect(bean);
    let bean_tokens = trait_bean::impl_trait_bean(bean);
    let auto_register_tokens = auto_register::get_auto_register_impl(bean);

    quote! {
        const _: () = {
            #info_tokens

            #typed_tokens

            #reflect_tokens

            #bean_tokens

            #auto_register_tokens
        };
    }
}
