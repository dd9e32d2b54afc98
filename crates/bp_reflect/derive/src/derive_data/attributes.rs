//! Parsing of `#[bean(...)]` attributes.

use syn::{Attribute, Ident, LitStr};

use crate::BEAN_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Type attributes

/// Attributes on the struct itself.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `crate = "path"`
    pub crate_path: Option<syn::Path>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(BEAN_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.crate_path = Some(lit.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported bean attribute, expected `crate`"))
                }
            })?;
        }
        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// Field attributes

/// Attributes on one field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `rename = "name"`
    pub rename: Option<LitStr>,
    /// `skip`
    pub skip: bool,
    /// `read_only`
    pub read_only: bool,
    /// `getter = "method"`
    pub getter: Option<Ident>,
    /// `setter = "method"`
    pub setter: Option<Ident>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(BEAN_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(meta.error("property name must not be empty"));
                    }
                    out.rename = Some(lit);
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                } else if meta.path.is_ident("read_only") {
                    out.read_only = true;
                } else if meta.path.is_ident("getter") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.getter = Some(lit.parse()?);
                } else if meta.path.is_ident("setter") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.setter = Some(lit.parse()?);
                } else {
                    return Err(meta.error(
                        "unsupported bean attribute, expected one of \
                         `rename`, `skip`, `read_only`, `getter`, `setter`",
                    ));
                }
                Ok(())
            })?;
        }
        if out.read_only && out.setter.is_some() {
            return Err(syn::Error::new_spanned(
                out.setter.as_ref(),
                "a `read_only` field cannot have a setter",
            ));
        }
        Ok(out)
    }
}
