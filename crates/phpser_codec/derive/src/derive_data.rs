//! The parsed form of a derive input.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::{Data, DataStruct, DeriveInput, Fields, Generics, Ident, Path, Type};

use crate::attributes::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// SerialMeta

/// What every generated impl needs: the crate path, the type name and its
/// generics.
pub(crate) struct SerialMeta<'a> {
    codec_path: Path,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl<'a> SerialMeta<'a> {
    fn new(ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            codec_path: crate::path::phpser_codec(),
            ident,
            generics,
        }
    }

    #[inline]
    pub fn codec_path(&self) -> &Path {
        &self.codec_path
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn generics(&self) -> &'a Generics {
        self.generics
    }

    /// Generic types need one descriptor per instantiation.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// Builds the `where` clause shared by all generated impls.
    ///
    /// Type parameters must be `Send + Sync + 'static`, and every listed
    /// field type must implement `Serial` and `Typed`. Non-generic types
    /// keep their own clause unchanged.
    pub fn where_clause(&self, field_types: &[&Type]) -> TokenStream {
        if !self.impl_with_generic() {
            return self.generics.where_clause.to_token_stream();
        }

        let serial_ = crate::path::serial_(&self.codec_path);
        let typed_ = crate::path::typed_(&self.codec_path);

        let params = self.generics.type_params().map(|param| {
            let ident = &param.ident;
            quote!(#ident: ::core::marker::Send + ::core::marker::Sync + 'static)
        });
        let fields = field_types
            .iter()
            .map(|ty| quote!(#ty: #serial_ + #typed_));
        let existing = self
            .generics
            .where_clause
            .iter()
            .flat_map(|clause| clause.predicates.iter())
            .map(ToTokens::to_token_stream);

        let predicates: Vec<TokenStream> = params.chain(fields).chain(existing).collect();
        quote!(where #(#predicates),*)
    }
}

// -----------------------------------------------------------------------------
// SerialRecord

pub(crate) struct RecordField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl RecordField<'_> {
    /// The declared name, without a raw-identifier prefix.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
}

pub(crate) struct SerialRecord<'a> {
    meta: SerialMeta<'a>,
    fields: Vec<RecordField<'a>>,
}

impl<'a> SerialRecord<'a> {
    #[inline]
    pub fn meta(&self) -> &SerialMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[RecordField<'a>] {
        &self.fields
    }

    pub fn field_types(&self) -> Vec<&'a Type> {
        self.fields.iter().map(|field| field.ty).collect()
    }
}

// -----------------------------------------------------------------------------
// SerialDerive

pub(crate) enum SerialDerive<'a> {
    Record(SerialRecord<'a>),
    Opaque(SerialMeta<'a>),
}

impl<'a> SerialDerive<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        if let Some(lifetime) = ast.generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "`Serial` types must be 'static; lifetime parameters are not supported",
            ));
        }

        let meta = SerialMeta::new(&ast.ident, &ast.generics);
        if attrs.opaque.is_some() {
            return Ok(Self::Opaque(meta));
        }

        match &ast.data {
            Data::Struct(DataStruct {
                fields: Fields::Named(named),
                ..
            }) => {
                let fields = named
                    .named
                    .iter()
                    .map(|field| {
                        Ok(RecordField {
                            ident: field
                                .ident
                                .as_ref()
                                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?,
                            ty: &field.ty,
                            attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;
                Ok(Self::Record(SerialRecord { meta, fields }))
            }
            Data::Struct(_) => Err(syn::Error::new_spanned(
                &ast.ident,
                "`Serial` needs named fields; mark tuple and unit structs `#[serial(opaque)]`",
            )),
            Data::Enum(_) | Data::Union(_) => Err(syn::Error::new_spanned(
                &ast.ident,
                "enums and unions are only supported as `#[serial(opaque)]`",
            )),
        }
    }
}
