//! Parsed form of a `#[derive(Bean)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};

use std::collections::HashSet;

use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, spanned::Spanned};

/// One exposed field.
pub(crate) struct BeanField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl BeanField<'_> {
    /// The property name of the field.
    pub fn property_name(&self) -> LitStr {
        match &self.attrs.rename {
            Some(name) => name.clone(),
            None => {
                let ident = self.ident.to_string();
                let ident = ident.strip_prefix("r#").unwrap_or(&ident);
                LitStr::new(ident, self.ident.span())
            }
        }
    }
}

/// A struct with named fields, skipped fields removed.
pub(crate) struct BeanStruct<'a> {
    pub ident: &'a Ident,
    pub crate_path: syn::Path,
    pub fields: Vec<BeanField<'a>>,
}

impl<'a> BeanStruct<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let type_attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`#[derive(Bean)]` does not support generic types",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`#[derive(Bean)]` requires a struct with named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`#[derive(Bean)]` only supports structs",
                ));
            }
        };

        let mut fields = Vec::with_capacity(named.named.len());
        let mut names = HashSet::new();
        for field in &named.named {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if attrs.skip {
                continue;
            }
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let field = BeanField {
                ident,
                ty: &field.ty,
                attrs,
            };
            let name = field.property_name();
            if !names.insert(name.value()) {
                return Err(syn::Error::new(
                    name.span(),
                    format!("duplicate property name `{}`", name.value()),
                ));
            }
            fields.push(field);
        }

        Ok(Self {
            ident: &ast.ident,
            crate_path: type_attrs.crate_path.unwrap_or_else(crate::path::bp_reflect),
            fields,
        })
    }

    /// Returns `true` if any field writes through a setter.
    pub fn has_setters(&self) -> bool {
        self.fields.iter().any(|field| field.attrs.setter.is_some())
    }
}
