use crate::registry::TagConfig;

/// What a record does with a key that matches none of its fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnknownFields {
    /// Skip the value and keep going.
    #[default]
    Lenient,
    /// Fail with [`Error::UnknownField`](crate::Error::UnknownField).
    Strict,
}

/// Options of a [`Decoder`](crate::Decoder).
///
/// ```
/// use phpser_codec::codec::{DecodeConfig, UnknownFields};
/// use phpser_codec::registry::TagConfig;
///
/// let config = DecodeConfig::new()
///     .strict()
///     .with_tags(TagConfig::PHP.with_fallback("json"));
/// assert_eq!(config.unknown_fields(), UnknownFields::Strict);
/// assert_eq!(config.tags().fallback(), Some("json"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeConfig {
    unknown_fields: UnknownFields,
    tags: TagConfig,
}

impl DecodeConfig {
    /// Lenient about unknown fields, `php` tags.
    #[inline]
    pub const fn new() -> Self {
        Self {
            unknown_fields: UnknownFields::Lenient,
            tags: TagConfig::PHP,
        }
    }

    /// Rejects record keys that match no field.
    #[inline]
    pub const fn strict(self) -> Self {
        self.with_unknown_fields(UnknownFields::Strict)
    }

    #[inline]
    pub const fn with_unknown_fields(mut self, unknown_fields: UnknownFields) -> Self {
        self.unknown_fields = unknown_fields;
        self
    }

    #[inline]
    pub const fn with_tags(mut self, tags: TagConfig) -> Self {
        self.tags = tags;
        self
    }

    #[inline]
    pub const fn unknown_fields(&self) -> UnknownFields {
        self.unknown_fields
    }

    #[inline]
    pub const fn tags(&self) -> TagConfig {
        self.tags
    }
}

/// Options of an [`Encoder`](crate::Encoder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeConfig {
    tags: TagConfig,
}

impl EncodeConfig {
    #[inline]
    pub const fn new() -> Self {
        Self {
            tags: TagConfig::PHP,
        }
    }

    #[inline]
    pub const fn with_tags(mut self, tags: TagConfig) -> Self {
        self.tags = tags;
        self
    }

    #[inline]
    pub const fn tags(&self) -> TagConfig {
        self.tags
    }
}
