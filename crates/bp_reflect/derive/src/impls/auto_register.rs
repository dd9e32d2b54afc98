use proc_macro2::TokenStream;

use crate::derive_data::BeanStruct;

/// Generates the `inventory` submission of the bean.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(bean: &BeanStruct) -> TokenStream {
    let bp_reflect_path = &bean.crate_path;
    let macro_exports_ = crate::path::macro_exports_(bp_reflect_path);
    let typed_ = crate::path::typed_(bp_reflect_path);
    let ident = bean.ident;

    quote::quote! {
        #macro_exports_::inventory::submit! {
            #macro_exports_::AutoRegistration::new(<#ident as #typed_>::type_info)
        }
    }
}

/// Generates the `inventory` submission of the bean.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &BeanStruct) -> TokenStream {
    TokenStream::new()
}
