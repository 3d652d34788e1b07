//! Parsing of `#[serial(...)]`.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::SERIAL_ATTRIBUTE_NAME;

fn serial_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(SERIAL_ATTRIBUTE_NAME))
}

// -----------------------------------------------------------------------------
// Type attributes

/// Container-level options.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// Span of `opaque`, if present.
    pub opaque: Option<Span>,
}

impl TypeAttributes {
    /// Format: `#[serial(opaque)]`
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in serial_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if !meta.path.is_ident("opaque") {
                    return Err(meta.error("unknown `serial` type attribute, expected `opaque`"));
                }
                if parsed.opaque.is_some() {
                    return Err(meta.error("`opaque` is already set"));
                }
                parsed.opaque = Some(meta.path.span());
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// Field attributes

/// Field-level tags, one raw string per namespace.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub tags: Vec<(String, String)>,
}

impl FieldAttributes {
    /// Format: `#[serial(php = "name,omitempty", json = "name")]`
    ///
    /// Any identifier names a namespace. Tag strings are kept raw; their
    /// options are interpreted at run time.
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in serial_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                let Some(namespace) = meta.path.get_ident().map(ToString::to_string) else {
                    return Err(meta.error("expected a tag namespace such as `php`"));
                };
                let value: LitStr = meta.value()?.parse()?;
                if parsed.tags.iter().any(|(known, _)| *known == namespace) {
                    return Err(syn::Error::new(
                        value.span(),
                        format!("duplicate `{namespace}` tag"),
                    ));
                }
                parsed.tags.push((namespace, value.value()));
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}
