use alloc::boxed::Box;

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// NamedField

/// A declared field of a record.
///
/// Besides the declared name it carries the raw tag strings attached with
/// `#[serial(php = "...", json = "...")]`, one `(namespace, value)` pair per
/// namespace. Tags are interpreted later, per namespace, by the
/// [field cache](crate::registry::FieldCache).
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    // Delayed so that recursive records can describe themselves.
    type_info: fn() -> &'static TypeInfo,
    tags: &'static [(&'static str, &'static str)],
}

impl NamedField {
    /// Creates a field of type `T` without tags.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            tags: &[],
        }
    }

    /// Attaches the raw `(namespace, value)` tag pairs.
    #[inline]
    pub const fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    /// The declared field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    /// Returns the raw tag value for `namespace`, if any.
    pub fn tag(&self, namespace: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(ns, _)| *ns == namespace)
            .map(|(_, value)| *value)
    }
}

// -----------------------------------------------------------------------------
// RecordInfo

/// Descriptor of a struct with named fields.
///
/// Field order is declaration order; the record's `field_at(index)` uses
/// the same indices.
///
/// # Examples
///
/// ```
/// use phpser_codec::Serial;
/// use phpser_codec::info::Typed;
///
/// #[derive(Serial, Default)]
/// struct Point {
///     #[serial(php = "px")]
///     x: i32,
///     y: i32,
/// }
///
/// let info = Point::type_info().as_record().unwrap();
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.field_at(0).unwrap().tag("php"), Some("px"));
/// assert_eq!(info.index_of("y"), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct RecordInfo {
    ty: Type,
    fields: Box<[NamedField]>,
}

impl RecordInfo {
    pub fn new<T: Typed>(fields: &[NamedField]) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
