use std::borrow::Borrow;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use hashbrown::HashTable;
use hashbrown::hash_table::Entry;
use nametab_log::{debug, fatal};
use rustc_hash::{FxHashMap, FxHasher};

use crate::indexvec::{Index, IndexThinVec};
use crate::name_ref::{ConstantId, MAX_INDEX, NameKind, NameRef, UniqueId, Utf8Id};
use crate::names::{ConstantName, NameView, UniqueName, UniqueNameKind, Utf8Name};
use crate::params::NameTableParams;
use crate::well_known;

pub(crate) fn fxhash(s: &str) -> u64 {
    let mut hasher = FxHasher::default();
    s.hash(&mut hasher);
    hasher.finish()
}

/// Appends to one of the name arenas. Running out of index space is fatal.
fn push_name<T, I: Index>(arena: &mut IndexThinVec<T, I>, kind: NameKind, value: T) -> I {
    if arena.len() > MAX_INDEX as usize {
        fatal!("{kind} name arena is full ({} entries)", arena.len());
    }
    match arena.try_push(value) {
        Ok(id) => id,
        Err(_) => fatal!("{kind} name arena is full ({} entries)", arena.len()),
    }
}

/// Number of entries per name kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct NameCounts {
    pub utf8: usize,
    pub unique: usize,
    pub constant: usize,
}

impl NameCounts {
    pub fn total(&self) -> usize {
        self.utf8 + self.unique + self.constant
    }
}

/// Owns every name of one compilation.
///
/// Handles minted here stay valid for as long as the table lives, and in every table
/// produced by [`GlobalNames::fork`]. Entries are never removed.
///
/// Not `Clone`: a second table that accepts these handles comes from [`GlobalNames::fork`].
#[derive(Debug)]
pub struct GlobalNames {
    pub(crate) utf8: IndexThinVec<Utf8Name, Utf8Id>,
    /// Dedup index over `utf8`, keyed by the hash of the text.
    pub(crate) utf8_index: HashTable<Utf8Id>,
    pub(crate) unique: IndexThinVec<UniqueName, UniqueId>,
    pub(crate) unique_index: FxHashMap<UniqueName, UniqueId>,
    /// Last counter handed out per bucket.
    pub(crate) unique_counters: FxHashMap<(NameRef, UniqueNameKind), u32>,
    pub(crate) constants: IndexThinVec<ConstantName, ConstantId>,
    pub(crate) constant_index: FxHashMap<NameRef, ConstantId>,
    pub(crate) well_known_utf8: u32,
    pub(crate) well_known_constants: u32,
    pub(crate) frozen: bool,
}

impl Default for GlobalNames {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalNames {
    pub fn new() -> Self {
        Self::with_params(NameTableParams::default())
    }

    pub fn with_params(params: NameTableParams) -> Self {
        let mut names = Self::empty(&params);

        if params.well_known() {
            for text in well_known::PREINTERNED_UTF8 {
                names.intern_utf8(*text);
            }
            for original in well_known::PREINTERNED_CONSTANTS {
                names.intern_constant(*original);
            }
            names.well_known_utf8 = well_known::PREINTERNED_UTF8.len() as u32;
            names.well_known_constants = well_known::PREINTERNED_CONSTANTS.len() as u32;
            debug_assert_eq!(names.utf8.len(), well_known::PREINTERNED_UTF8.len());
        }

        debug!(
            well_known = params.well_known(),
            utf8 = names.utf8.len(),
            constant = names.constants.len(),
            "created name table"
        );
        names
    }

    fn empty(params: &NameTableParams) -> Self {
        Self {
            utf8: IndexThinVec::with_capacity(params.utf8_capacity()),
            utf8_index: HashTable::with_capacity(params.utf8_capacity()),
            unique: IndexThinVec::with_capacity(params.unique_capacity()),
            unique_index: FxHashMap::default(),
            unique_counters: FxHashMap::default(),
            constants: IndexThinVec::with_capacity(params.constant_capacity()),
            constant_index: FxHashMap::default(),
            well_known_utf8: 0,
            well_known_constants: 0,
            frozen: false,
        }
    }

    /// Interns `text`, returning the existing handle if the same text was interned before.
    pub fn intern_utf8(&mut self, text: impl Borrow<str>) -> NameRef {
        let text = text.borrow();
        let hash = fxhash(text);
        let Self {
            utf8,
            utf8_index,
            frozen,
            ..
        } = self;

        match utf8_index.entry(hash, |&id| *utf8[id].utf8 == *text, |&id| fxhash(&utf8[id].utf8)) {
            Entry::Occupied(entry) => NameRef::from(*entry.get()),
            Entry::Vacant(entry) => {
                if *frozen {
                    fatal!("attempted to intern {text:?} while the name table is frozen");
                }
                let id = push_name(utf8, NameKind::Utf8, Utf8Name { utf8: Arc::from(text) });
                entry.insert(id);
                NameRef::from(id)
            }
        }
    }

    /// Mints a new synthetic name derived from `original`.
    ///
    /// Never deduplicates: every call returns a fresh handle whose counter is one more than the
    /// previous counter for the same `(original, kind)`, starting at 1.
    pub fn intern_unique(&mut self, original: NameRef, kind: UniqueNameKind) -> NameRef {
        self.assert_owned(original);
        if self.frozen {
            fatal!(
                "attempted to mint a {kind:?} name from {} while the name table is frozen",
                self.show(original)
            );
        }

        let counter = self.unique_counters.entry((original, kind)).or_insert(0);
        let Some(num) = counter.checked_add(1) else {
            fatal!("unique name counter overflowed for {original:?} ({kind:?})");
        };
        *counter = num;

        let name = UniqueName { original, num, kind };
        let id = push_name(&mut self.unique, NameKind::Unique, name);
        self.unique_index.insert(name, id);
        NameRef::from(id)
    }

    /// Returns the constant-namespace twin of `original`, interning it on first use.
    pub fn intern_constant(&mut self, original: NameRef) -> NameRef {
        self.assert_owned(original);
        if let Some(&id) = self.constant_index.get(&original) {
            return NameRef::from(id);
        }
        if self.frozen {
            fatal!(
                "attempted to intern constant {} while the name table is frozen",
                self.show(original)
            );
        }

        let id = push_name(&mut self.constants, NameKind::Constant, ConstantName { original });
        self.constant_index.insert(original, id);
        NameRef::from(id)
    }

    /// Returns the payload behind `name`.
    ///
    /// # Panics
    /// If `name` was not minted by this table or a table it was forked from.
    pub fn resolve(&self, name: NameRef) -> NameView<'_> {
        let view = match name.kind() {
            NameKind::Utf8 => self.utf8.get(Utf8Id(name.index())).map(NameView::Utf8),
            NameKind::Unique => self.unique.get(UniqueId(name.index())).map(NameView::Unique),
            NameKind::Constant => self.constants.get(ConstantId(name.index())).map(NameView::Constant),
        };
        view.unwrap_or_else(|| self.foreign(name))
    }

    /// The text of a utf8 name.
    ///
    /// # Panics
    /// If `name` is not a utf8 name of this table.
    pub fn utf8_text(&self, name: NameRef) -> &str {
        match self.resolve(name) {
            NameView::Utf8(utf8) => &utf8.utf8,
            other => fatal!("expected a utf8 name, found {other:?}"),
        }
    }

    pub fn lookup_utf8(&self, text: &str) -> Option<NameRef> {
        self.utf8_index
            .find(fxhash(text), |&id| *self.utf8[id].utf8 == *text)
            .map(|&id| NameRef::from(id))
    }

    pub fn lookup_constant(&self, original: NameRef) -> Option<NameRef> {
        self.constant_index.get(&original).map(|&id| NameRef::from(id))
    }

    pub fn lookup_unique(&self, original: NameRef, kind: UniqueNameKind, num: u32) -> Option<NameRef> {
        self.unique_index
            .get(&UniqueName { original, num, kind })
            .map(|&id| NameRef::from(id))
    }

    /// The counter the next [`intern_unique`](Self::intern_unique) for this bucket would receive.
    pub fn next_unique_num(&self, original: NameRef, kind: UniqueNameKind) -> u32 {
        self.unique_counters.get(&(original, kind)).copied().unwrap_or(0) + 1
    }

    /// Whether `name` resolves in this table.
    pub fn contains(&self, name: NameRef) -> bool {
        match name.kind() {
            NameKind::Utf8 => self.utf8.contains(Utf8Id(name.index())),
            NameKind::Unique => self.unique.contains(UniqueId(name.index())),
            NameKind::Constant => self.constants.contains(ConstantId(name.index())),
        }
    }

    /// Whether `name` is one of the statically known handles in [`well_known`](crate::well_known).
    pub fn is_well_known(&self, name: NameRef) -> bool {
        match name.kind() {
            NameKind::Utf8 => name.index() < self.well_known_utf8,
            NameKind::Unique => false,
            NameKind::Constant => name.index() < self.well_known_constants,
        }
    }

    pub fn counts(&self) -> NameCounts {
        NameCounts {
            utf8: self.utf8.len(),
            unique: self.unique.len(),
            constant: self.constants.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.counts().total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every handle in the table: utf8 names first, then unique names, then constants,
    /// each in the order they were interned.
    pub fn iter(&self) -> impl Iterator<Item = NameRef> + '_ {
        let utf8 = (0..self.utf8.len() as u32).map(|i| NameRef::from_parts(NameKind::Utf8, i));
        let unique = (0..self.unique.len() as u32).map(|i| NameRef::from_parts(NameKind::Unique, i));
        let constants = (0..self.constants.len() as u32).map(|i| NameRef::from_parts(NameKind::Constant, i));
        utf8.chain(unique).chain(constants)
    }

    /// Forbids creating new names from now on. Lookups that hit an existing entry keep working.
    pub fn freeze(&mut self) {
        if !self.frozen {
            debug!(names = self.len(), "name table frozen");
        }
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Temporarily allows new names. The previous state is restored when the guard is dropped.
    pub fn unfreeze(&mut self) -> UnfreezeNames<'_> {
        let was_frozen = std::mem::replace(&mut self.frozen, false);
        UnfreezeNames {
            names: self,
            was_frozen,
        }
    }

    fn assert_owned(&self, name: NameRef) {
        if !self.contains(name) {
            self.foreign(name);
        }
    }

    #[cold]
    fn foreign(&self, name: NameRef) -> ! {
        let counts = self.counts();
        fatal!(
            "{name:?} does not belong to this name table (utf8: {}, unique: {}, constant: {})",
            counts.utf8,
            counts.unique,
            counts.constant
        )
    }
}

/// Guard returned by [`GlobalNames::unfreeze`].
pub struct UnfreezeNames<'a> {
    names: &'a mut GlobalNames,
    was_frozen: bool,
}

impl Deref for UnfreezeNames<'_> {
    type Target = GlobalNames;

    fn deref(&self) -> &Self::Target {
        self.names
    }
}

impl DerefMut for UnfreezeNames<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.names
    }
}

impl Drop for UnfreezeNames<'_> {
    fn drop(&mut self) {
        self.names.frozen = self.was_frozen;
    }
}
