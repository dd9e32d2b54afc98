use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanStruct;

/// Generates the `Bean` impl.
///
/// `set_field_at` is only generated when some field has a setter; the
/// trait default writes through `field_at_mut`.
pub(crate) fn impl_trait_bean(bean: &BeanStruct) -> TokenStream {
    let bp_reflect_path = &bean.crate_path;
    let bean_ = crate::path::bean_(bp_reflect_path);
    let bean_info_ = crate::path::bean_info_(bp_reflect_path);
    let reflect_ = crate::path::reflect_(bp_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(bp_reflect_path);
    let ident = bean.ident;

    let read_arms = bean.fields.iter().enumerate().map(|(index, field)| {
        let member = field.ident;
        match &field.attrs.getter {
            Some(getter) => quote! { #index => #macro_exports_::Option::Some(self.#getter()), },
            None => quote! { #index => #macro_exports_::Option::Some(&self.#member), },
        }
    });

    let write_arms = bean.fields.iter().enumerate().map(|(index, field)| {
        let member = field.ident;
        quote! { #index => #macro_exports_::Option::Some(&mut self.#member), }
    });

    let set_field_at = if bean.has_setters() {
        impl_set_field_at(bean)
    } else {
        TokenStream::new()
    };

    quote! {
        impl #bean_ for #ident {
            #[inline]
            fn bean_info(&self) -> &'static #bean_info_ {
                &INFO
            }

            fn field_at(&self, index: usize) -> #macro_exports_::Option<&dyn #reflect_> {
                match index {
                    #(#read_arms)*
                    _ => #macro_exports_::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #macro_exports_::Option<&mut dyn #reflect_> {
                match index {
                    #(#write_arms)*
                    _ => #macro_exports_::Option::None,
                }
            }

            #set_field_at
        }
    }
}

fn impl_set_field_at(bean: &BeanStruct) -> TokenStream {
    let bp_reflect_path = &bean.crate_path;
    let reflect_ = crate::path::reflect_(bp_reflect_path);
    let bean_ = crate::path::bean_(bp_reflect_path);
    let set_field_error_ = crate::path::set_field_error_(bp_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(bp_reflect_path);

    let setter_arms = bean.fields.iter().enumerate().filter_map(|(index, field)| {
        let setter = field.attrs.setter.as_ref()?;
        let ty = field.ty;
        Some(quote! {
            #index => {
                let value = value.take::<#ty>().map_err(#set_field_error_::Mismatch)?;
                #macro_exports_::SetterOutput::into_set_result(self.#setter(value))
            }
        })
    });

    quote! {
        fn set_field_at(
            &mut self,
            index: usize,
            value: #macro_exports_::Box<dyn #reflect_>,
        ) -> #macro_exports_::Result<(), #set_field_error_> {
            match index {
                #(#setter_arms)*
                _ => match <Self as #bean_>::field_at_mut(self, index) {
                    #macro_exports_::Option::Some(field) => {
                        #reflect_::set(field, value).map_err(#set_field_error_::Mismatch)
                    }
                    #macro_exports_::Option::None => {
                        #macro_exports_::Result::Err(#set_field_error_::Missing)
                    }
                },
            }
        }
    }
}
