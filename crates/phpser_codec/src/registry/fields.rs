use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock};

use phpser_utils::hash::{FixedHashState, HashMap};

use crate::info::{NamedField, RecordInfo, Type, TypeInfo};
use crate::ops::{field_by_path, field_by_path_mut};
use crate::registry::{FieldFlags, FieldTag, Strategy, StrategyTable, TagConfig};
use crate::Serial;

// -----------------------------------------------------------------------------
// FieldDescriptor

/// One wire field of a record.
///
/// `path` holds the field indices leading from the record to the value.
/// It has one step for a plain field and more for fields promoted from an
/// `inline` record.
pub struct FieldDescriptor {
    name: &'static str,
    path: Box<[usize]>,
    field: &'static NamedField,
    flags: FieldFlags,
    strategy: OnceLock<&'static Strategy>,
}

impl FieldDescriptor {
    /// The key written on the wire.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// The declaration this wire field comes from.
    #[inline]
    pub fn field(&self) -> &'static NamedField {
        self.field
    }

    #[inline]
    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    #[inline]
    pub fn omit_empty(&self) -> bool {
        self.flags.contains(FieldFlags::OMIT_EMPTY)
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.field.type_info()
    }

    /// The strategy of the field's type, bound on first use.
    pub fn strategy(&self) -> &'static Strategy {
        self.strategy
            .get_or_init(|| StrategyTable::global().resolve(self.type_info()))
    }

    /// Reaches the field's value inside `record`.
    #[inline]
    pub fn locate<'a>(&self, record: &'a dyn Serial) -> Option<&'a dyn Serial> {
        field_by_path(record, &self.path)
    }

    #[inline]
    pub fn locate_mut<'a>(&self, record: &'a mut dyn Serial) -> Option<&'a mut dyn Serial> {
        field_by_path_mut(record, &self.path)
    }
}

// -----------------------------------------------------------------------------
// RecordFields

/// The wire fields of one record type under one [`TagConfig`].
///
/// Names are unique. Order is declaration order, with promoted fields in
/// place of the `inline` field that holds them.
pub struct RecordFields {
    ty: Type,
    list: Box<[FieldDescriptor]>,
    by_name: HashMap<&'static str, usize>,
}

impl RecordFields {
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Looks up a wire name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&index| &self.list[index])
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FieldDescriptor> {
        self.list.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    fn build(info: &'static RecordInfo, tags: TagConfig) -> Self {
        let mut list = Vec::with_capacity(info.field_len());
        let mut visiting = alloc::vec![info.ty().id()];
        collect(info, tags, &[], &mut visiting, &mut list);

        let by_name = list
            .iter()
            .enumerate()
            .map(|(index, field): (usize, &FieldDescriptor)| (field.name, index))
            .collect();

        log::debug!(
            "computed {} wire fields for `{}` (tags: {:?}, fallback: {:?})",
            list.len(),
            info.type_path(),
            tags.primary(),
            tags.fallback(),
        );

        Self {
            ty: *info.ty(),
            list: list.into_boxed_slice(),
            by_name,
        }
    }
}

/// Resolves the tag of a declared field: the primary namespace, then the
/// fallback, then the declared name. Returns `None` for excluded fields.
fn resolve_tag(field: &NamedField, tags: TagConfig) -> Option<FieldTag> {
    let raw = field
        .tag(tags.primary())
        .filter(|raw| !raw.is_empty())
        .or_else(|| {
            tags.fallback()
                .and_then(|namespace| field.tag(namespace))
                .filter(|raw| !raw.is_empty())
        })
        .unwrap_or_default();

    let mut tag = FieldTag::parse(raw);
    if tag.is_skipped() {
        return None;
    }
    if tag.name.is_empty() {
        tag.name = field.name();
    }
    Some(tag)
}

fn collect(
    info: &'static RecordInfo,
    tags: TagConfig,
    prefix: &[usize],
    visiting: &mut Vec<TypeId>,
    out: &mut Vec<FieldDescriptor>,
) {
    for (index, field) in info.iter().enumerate() {
        let Some(tag) = resolve_tag(field, tags) else {
            continue;
        };

        let mut path = Vec::with_capacity(prefix.len() + 1);
        path.extend_from_slice(prefix);
        path.push(index);

        if tag.flags.contains(FieldFlags::INLINE) {
            match field.type_info() {
                TypeInfo::Record(nested) if !visiting.contains(&nested.ty().id()) => {
                    visiting.push(nested.ty().id());
                    collect(nested, tags, &path, visiting, out);
                    visiting.pop();
                    continue;
                }
                TypeInfo::Record(nested) => log::warn!(
                    "`{}::{}` inlines `{}` into itself; kept as a nested field",
                    info.type_path(),
                    field.name(),
                    nested.type_path(),
                ),
                other => log::warn!(
                    "`{}::{}` is marked inline but `{}` is not a record",
                    info.type_path(),
                    field.name(),
                    other.type_path(),
                ),
            }
        }

        if let Some(shadowed) = out.iter().position(|known| known.name == tag.name) {
            log::warn!(
                "`{}::{}` reuses wire name `{}`; the earlier field is dropped",
                info.type_path(),
                field.name(),
                tag.name,
            );
            out.remove(shadowed);
        }

        out.push(FieldDescriptor {
            name: tag.name,
            path: path.into_boxed_slice(),
            field,
            flags: tag.flags,
            strategy: OnceLock::new(),
        });
    }
}

// -----------------------------------------------------------------------------
// FieldCache

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct FieldKey {
    type_id: TypeId,
    tags: TagConfig,
}

/// Process-wide map from (record type, [`TagConfig`]) to [`RecordFields`].
///
/// # Examples
///
/// ```
/// use phpser_codec::Serial;
/// use phpser_codec::info::Typed;
/// use phpser_codec::registry::{FieldCache, TagConfig};
///
/// #[derive(Serial, Default)]
/// struct Item {
///     #[serial(php = "n", json = "name")]
///     name: String,
///     #[serial(json = "qty")]
///     count: u32,
///     #[serial(php = "-")]
///     scratch: u32,
/// }
///
/// let info = Item::type_info().as_record().unwrap();
///
/// let php = FieldCache::global().fields(info, TagConfig::PHP);
/// let names: Vec<_> = php.iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["n", "count"]);
///
/// let json = FieldCache::global().fields(info, TagConfig::new("json"));
/// let names: Vec<_> = json.iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["name", "qty", "scratch"]);
/// ```
pub struct FieldCache {
    entries: RwLock<HashMap<FieldKey, &'static RecordFields>>,
}

static GLOBAL_FIELDS: FieldCache = FieldCache::new();

impl FieldCache {
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::with_hasher(FixedHashState)),
        }
    }

    #[inline]
    pub fn global() -> &'static Self {
        &GLOBAL_FIELDS
    }

    /// Returns the wire fields of `info` under `tags`, computing them on
    /// first request.
    pub fn fields(&self, info: &'static RecordInfo, tags: TagConfig) -> &'static RecordFields {
        let key = FieldKey {
            type_id: info.ty().id(),
            tags,
        };

        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied();
        if let Some(fields) = cached {
            return fields;
        }

        let fields = RecordFields::build(info, tags);

        *self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert_with(|| Box::leak(Box::new(fields)))
    }
}
