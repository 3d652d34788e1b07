//! `#[derive(Serial)]` for `phpser_codec`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static SERIAL_ATTRIBUTE_NAME: &str = "serial";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod derive_data;
mod path;
mod record;

// -----------------------------------------------------------------------------
// Macros

/// # Derive `Serial`
///
/// Implements `Typed`, `Serial` and `ops::Record` for a struct with named
/// fields. Every field type must itself implement `Serial` and `Typed`.
///
/// ## Field tags
///
/// Wire names come from tags, one per namespace:
///
/// ```rust, ignore
/// #[derive(Serial, Default)]
/// struct User {
///     #[serial(php = "id", json = "user_id")]
///     id: u64,
///     #[serial(php = "nick,omitempty")]
///     nick: String,
///     #[serial(php = "-")]
///     session: String,
///     #[serial(php = ",inline")]
///     audit: Audit,
/// }
/// ```
///
/// A tag is `name[,option...]`:
///
/// - an empty name keeps the declared field name;
/// - the name `-` leaves the field out;
/// - `omitempty` leaves the field out of the output when its value is empty;
/// - `inline` lifts the fields of a nested record into this one.
///
/// The decoder and encoder read the `php` namespace unless configured
/// otherwise, and may fall back to a second namespace such as `json`.
///
/// ## Opaque types
///
/// `#[serial(opaque)]` describes a type without a wire form. It can sit in
/// containers, but decoding or encoding it fails with `Unsupported`. Any
/// struct or enum may be marked opaque.
///
/// ```rust, ignore
/// #[derive(Serial, Default)]
/// #[serial(opaque)]
/// struct Handle(u32);
/// ```
///
/// Tuple structs, unit structs, enums and types with lifetime parameters
/// are only accepted as opaque.
#[proc_macro_derive(Serial, attributes(serial))]
pub fn derive_serial(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let derived = match derive_data::SerialDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let impls = match &derived {
        derive_data::SerialDerive::Record(info) => record::impl_record(info),
        derive_data::SerialDerive::Opaque(meta) => record::impl_opaque(meta),
    };

    TokenStream::from(quote! {
        const _: () = {
            #impls
        };
    })
}
