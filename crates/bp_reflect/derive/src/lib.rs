//! See [`Bean`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static BEAN_ATTRIBUTE_NAME: &str = "bean";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Bean Derivation
///
/// `#[derive(Bean)]` implements `Typed`, `Reflect` and `Bean` for a struct
/// with named fields, and builds its field descriptor table. Fields are
/// exposed in declaration order, under their own names.
///
/// Generic structs, tuple structs and enums are not supported.
///
/// ## Field Attributes
///
/// - `#[bean(rename = "name")]`: expose the field under another name.
/// - `#[bean(skip)]`: do not expose the field. Its type needs no
///   reflection support.
/// - `#[bean(read_only)]`: reads work, writes fail with `NoSuchProperty`.
/// - `#[bean(getter = "method")]`: read through `fn method(&self) -> &T`
///   instead of the field.
/// - `#[bean(setter = "method")]`: write through `fn method(&mut self, T)`
///   instead of the field. The method may return `()` or
///   `Result<(), E>`; an `Err` surfaces as an `Invocation` error carrying `E`.
///
/// ```rust, ignore
/// #[derive(Bean)]
/// struct Account {
///     #[bean(rename = "holder")]
///     owner: String,
///     #[bean(read_only)]
///     id: u64,
///     #[bean(setter = "set_balance")]
///     balance: i64,
///     #[bean(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Type Attributes
///
/// - `#[bean(crate = "path")]`: the path of the reflection crate, for
///   code that reaches it through a re-export. Defaults to `::bp_reflect`.
///
/// ```rust, ignore
/// #[derive(Bean)]
/// #[bean(crate = "beanprop::reflect")]
/// struct Point { x: i64, y: i64 }
/// ```
///
/// ## Auto Registration
///
/// With the `auto_register` feature, every derived bean is submitted for
/// `TypeRegistry::auto_register`.
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::BeanStruct::from_ast(&ast) {
        Ok(bean) => impls::impl_bean(&bean).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
