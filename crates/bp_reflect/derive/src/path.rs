//! Paths into `bp_reflect` used by the generated code.
//!
//! Kept in one place so a module move in `bp_reflect` only touches this file.

use proc_macro2::TokenStream;
use quote::quote;

/// The default crate path, overridable with `#[bean(crate = "...")]`.
pub(crate) fn bp_reflect() -> syn::Path {
    syn::parse_quote!(::bp_reflect)
}

#[inline(always)]
pub(crate) fn reflect_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::Reflect }
}

#[inline(always)]
pub(crate) fn typed_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::info::Typed }
}

#[inline(always)]
pub(crate) fn type_info_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::info::TypeInfo }
}

#[inline(always)]
pub(crate) fn bean_info_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::info::BeanInfo }
}

#[inline(always)]
pub(crate) fn field_info_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::info::FieldInfo }
}

#[inline(always)]
pub(crate) fn field_access_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::info::FieldAccess }
}

#[inline(always)]
pub(crate) fn bean_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::ops::Bean }
}

#[inline(always)]
pub(crate) fn set_field_error_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::ops::SetFieldError }
}

#[inline(always)]
pub(crate) fn reflect_ref_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::ops::ReflectRef }
}

#[inline(always)]
pub(crate) fn reflect_mut_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::ops::ReflectMut }
}

#[inline(always)]
pub(crate) fn macro_exports_(bp_reflect_path: &syn::Path) -> TokenStream {
    quote! { #bp_reflect_path::__macro_exports }
}
