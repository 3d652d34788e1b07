use bitflags::bitflags;

// -----------------------------------------------------------------------------
// TagConfig

/// Which tag namespaces name the wire fields of a record.
///
/// The primary namespace is read first. When a field has no primary tag,
/// or an empty one, the fallback namespace is read instead.
///
/// # Examples
///
/// ```
/// use phpser_codec::registry::TagConfig;
///
/// let tags = TagConfig::default().with_fallback("json");
/// assert_eq!(tags.primary(), "php");
/// assert_eq!(tags.fallback(), Some("json"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagConfig {
    primary: &'static str,
    fallback: Option<&'static str>,
}

impl TagConfig {
    /// The `php` namespace, without fallback.
    pub const PHP: Self = Self::new("php");

    #[inline]
    pub const fn new(primary: &'static str) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    #[inline]
    pub const fn with_fallback(mut self, namespace: &'static str) -> Self {
        self.fallback = Some(namespace);
        self
    }

    #[inline]
    pub const fn primary(&self) -> &'static str {
        self.primary
    }

    #[inline]
    pub const fn fallback(&self) -> Option<&'static str> {
        self.fallback
    }
}

impl Default for TagConfig {
    #[inline]
    fn default() -> Self {
        Self::PHP
    }
}

// -----------------------------------------------------------------------------
// FieldFlags

bitflags! {
    /// Options parsed from the part of a tag after the name.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        /// `omitempty`: skip the field on encode when its value is empty.
        const OMIT_EMPTY = 1;
        /// `inline`: promote the fields of a nested record into this one.
        const INLINE = 1 << 1;
    }
}

// -----------------------------------------------------------------------------
// FieldTag

/// A parsed `name[,option...]` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTag {
    pub name: &'static str,
    pub flags: FieldFlags,
}

impl FieldTag {
    /// Splits a raw tag into its name and options. Unknown options are
    /// ignored.
    ///
    /// ```
    /// use phpser_codec::registry::{FieldFlags, FieldTag};
    ///
    /// let tag = FieldTag::parse("v,omitempty");
    /// assert_eq!(tag.name, "v");
    /// assert_eq!(tag.flags, FieldFlags::OMIT_EMPTY);
    /// ```
    pub fn parse(raw: &'static str) -> Self {
        let mut parts = raw.split(',');
        let name = parts.next().unwrap_or_default().trim();
        let flags = parts.fold(FieldFlags::empty(), |flags, option| match option.trim() {
            "omitempty" => flags | FieldFlags::OMIT_EMPTY,
            "inline" => flags | FieldFlags::INLINE,
            _ => flags,
        });
        Self { name, flags }
    }

    /// Returns `true` for the `-` name, which removes the field.
    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.name == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldFlags, FieldTag};

    #[test]
    fn parse_options() {
        let tag = FieldTag::parse(",inline,omitempty,bogus");
        assert_eq!(tag.name, "");
        assert_eq!(tag.flags, FieldFlags::INLINE | FieldFlags::OMIT_EMPTY);

        assert!(FieldTag::parse("-").is_skipped());
        assert!(!FieldTag::parse("dash").is_skipped());
        assert_eq!(FieldTag::parse("").flags, FieldFlags::empty());
    }
}
