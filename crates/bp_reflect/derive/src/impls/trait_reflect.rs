use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanStruct;

/// Generates the `Reflect` impl.
pub(crate) fn impl_trait_reflect(bean: &BeanStruct) -> TokenStream {
    let bp_reflect_path = &bean.crate_path;
    let reflect_ = crate::path::reflect_(bp_reflect_path);
    let typed_ = crate::path::typed_(bp_reflect_path);
    let type_info_ = crate::path::type_info_(bp_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(bp_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(bp_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(bp_reflect_path);
    let ident = bean.ident;

    quote! {
        impl #reflect_ for #ident {
            #[inline]
            fn reflect_type_info(&self) -> #type_info_ {
                <Self as #typed_>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::Bean(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::Bean(self)
            }

            fn set(
                &mut self,
                value: #macro_exports_::Box<dyn #reflect_>,
            ) -> #macro_exports_::Result<(), #macro_exports_::Box<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                #macro_exports_::Result::Ok(())
            }
        }
    }
}
