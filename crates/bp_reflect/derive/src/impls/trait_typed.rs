use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanStruct;

/// Generates the `FIELDS` and `INFO` statics.
pub(crate) fn bean_info_statics(bean: &BeanStruct) -> TokenStream {
    let bp_reflect_path = &bean.crate_path;
    let bean_info_ = crate::path::bean_info_(bp_reflect_path);
    let field_info_ = crate::path::field_info_(bp_reflect_path);
    let field_access_ = crate::path::field_access_(bp_reflect_path);

    let ident = bean.ident;
    let type_name = ident.to_string();
    let field_count = bean.fields.len();

    let field_infos = bean.fields.iter().map(|field| {
        let name = field.property_name();
        let ty = field.ty;
        let access = if field.attrs.read_only {
            quote! { .with_access(#field_access_::ReadOnly) }
        } else if field.attrs.setter.is_some() {
            quote! { .with_access(#field_access_::Setter) }
        } else {
            TokenStream::new()
        };
        quote! {
            #field_info_::new::<#ty>(#name) #access
        }
    });

    quote! {
        static FIELDS: [#field_info_; #field_count] = [ #(#field_infos),* ];

        static INFO: #bean_info_ = #bean_info_::new(
            ::core::concat!(::core::module_path!(), "::", #type_name),
            #type_name,
            &FIELDS,
        );
    }
}

/// Generates the `Typed` impl.
pub(crate) fn impl_trait_typed(bean: &BeanStruct) -> TokenStream {
    let bp_reflect_path = &bean.crate_path;
    let typed_ = crate::path::typed_(bp_reflect_path);
    let type_info_ = crate::path::type_info_(bp_reflect_path);
    let ident = bean.ident;

    quote! {
        impl #typed_ for #ident {
            #[inline]
            fn type_info() -> #type_info_ {
                #type_info_::bean::<Self>(&INFO)
            }
        }
    }
}
