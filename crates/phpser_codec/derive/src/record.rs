//! Code generation for records and opaque types.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::derive_data::{SerialMeta, SerialRecord};

/// Implements `Typed`, `Serial` and `ops::Record` for a named-field struct.
pub(crate) fn impl_record(info: &SerialRecord) -> TokenStream {
    let meta = info.meta();
    let codec_path = meta.codec_path();
    let type_info_ = crate::path::type_info_(codec_path);
    let record_info_ = crate::path::record_info_(codec_path);
    let named_field_ = crate::path::named_field_(codec_path);

    let where_clause = meta.where_clause(&info.field_types());

    let named_fields = info.fields().iter().map(|field| {
        let ty = field.ty;
        let name = field.name();
        let tags = field
            .attrs
            .tags
            .iter()
            .map(|(namespace, value)| quote!((#namespace, #value)));
        if field.attrs.tags.is_empty() {
            quote!(#named_field_::new::<#ty>(#name))
        } else {
            quote!(#named_field_::new::<#ty>(#name).with_tags(&[#(#tags),*]))
        }
    });

    let type_info_tokens = quote! {
        #type_info_::Record(#record_info_::new::<Self>(&[#(#named_fields),*]))
    };

    let typed_trait_tokens = impl_trait_typed(meta, &where_clause, type_info_tokens);
    let serial_trait_tokens = impl_trait_serial(meta, &where_clause, quote!(Record(self)));
    let record_trait_tokens = impl_trait_record(info, &where_clause);

    quote! {
        #typed_trait_tokens

        #serial_trait_tokens

        #record_trait_tokens
    }
}

/// Implements `Typed` and `Serial` with the `Opaque` kind.
pub(crate) fn impl_opaque(meta: &SerialMeta) -> TokenStream {
    let codec_path = meta.codec_path();
    let type_info_ = crate::path::type_info_(codec_path);
    let type_ = crate::path::type_(codec_path);

    let where_clause = meta.where_clause(&[]);
    let type_info_tokens = quote!(#type_info_::Opaque(#type_::of::<Self>()));

    let typed_trait_tokens = impl_trait_typed(meta, &where_clause, type_info_tokens);
    let serial_trait_tokens = impl_trait_serial(meta, &where_clause, quote!(Opaque));

    quote! {
        #typed_trait_tokens

        #serial_trait_tokens
    }
}

fn impl_trait_typed(
    meta: &SerialMeta,
    where_clause: &TokenStream,
    type_info_tokens: TokenStream,
) -> TokenStream {
    let codec_path = meta.codec_path();
    let typed_ = crate::path::typed_(codec_path);
    let type_info_ = crate::path::type_info_(codec_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(codec_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(codec_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}

fn impl_trait_serial(meta: &SerialMeta, where_clause: &TokenStream, view: TokenStream) -> TokenStream {
    let codec_path = meta.codec_path();
    let serial_ = crate::path::serial_(codec_path);
    let serial_ref_ = crate::path::serial_ref_(codec_path);
    let serial_mut_ = crate::path::serial_mut_(codec_path);

    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();

    quote! {
        impl #impl_generics #serial_ for #ident #ty_generics #where_clause {
            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            #[inline]
            fn serial_ref(&self) -> #serial_ref_<'_> {
                #serial_ref_::#view
            }

            #[inline]
            fn serial_mut(&mut self) -> #serial_mut_<'_> {
                #serial_mut_::#view
            }
        }
    }
}

fn impl_trait_record(info: &SerialRecord, where_clause: &TokenStream) -> TokenStream {
    let meta = info.meta();
    let codec_path = meta.codec_path();
    let serial_ = crate::path::serial_(codec_path);
    let record_ = crate::path::record_(codec_path);

    let idents: Vec<_> = info.fields().iter().map(|field| field.ident).collect();
    let indices: Vec<_> = (0..idents.len()).map(Literal::usize_unsuffixed).collect();
    let field_count = idents.len();

    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();

    quote! {
        impl #impl_generics #record_ for #ident #ty_generics #where_clause {
            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #serial_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #serial_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
