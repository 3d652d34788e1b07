//! Paths into `phpser_codec` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// The path generated code uses to reach `phpser_codec`.
///
/// - `::phpser_codec` for crates depending on it directly.
/// - `::phpser::codec` for crates depending on the facade.
///
/// Resolving it reads the caller's manifest, so it is done once per
/// derive and passed around.
pub(crate) fn phpser_codec() -> syn::Path {
    phpser_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("phpser_codec"))
}

#[inline(always)]
pub(crate) fn serial_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::Serial)
}

#[inline(always)]
pub(crate) fn serial_ref_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::SerialRef)
}

#[inline(always)]
pub(crate) fn serial_mut_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::SerialMut)
}

#[inline(always)]
pub(crate) fn typed_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::info::Typed)
}

#[inline(always)]
pub(crate) fn type_info_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::info::TypeInfo)
}

#[inline(always)]
pub(crate) fn type_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::info::Type)
}

#[inline(always)]
pub(crate) fn record_info_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::info::RecordInfo)
}

#[inline(always)]
pub(crate) fn named_field_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::info::NamedField)
}

#[inline(always)]
pub(crate) fn record_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::ops::Record)
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::impls::NonGenericTypeInfoCell)
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(codec_path: &syn::Path) -> TokenStream {
    quote!(#codec_path::impls::GenericTypeInfoCell)
}
