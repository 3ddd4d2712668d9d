//! On-disk cache of a name table.
//!
//! Layout: the little endian format version, the [`LAYOUT_FINGERPRINT`] of the writing build, then
//! the bincode encoded arenas. Dedup indices and unique counters are rebuilt on load.

use hashbrown::HashTable;
use hashbrown::hash_table::Entry;
use nametab_log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indexvec::IndexThinVec;
use crate::name_ref::{ConstantId, MAX_INDEX, NameKind, NameRef, UniqueId, Utf8Id};
use crate::names::{ConstantName, LAYOUT_FINGERPRINT, UniqueName, Utf8Name};
use crate::table::{GlobalNames, fxhash};
use crate::well_known::{PREINTERNED_CONSTANTS, PREINTERNED_UTF8};

const NAMES_FORMAT_VERSION: u32 = 1;
const HEADER_LEN: usize = 4 + LAYOUT_FINGERPRINT.len();

#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("name cache is truncated")]
    Truncated,
    #[error("name cache has format version {0}, expected {}", NAMES_FORMAT_VERSION)]
    InvalidVersion(u32),
    #[error("name cache was written by a build with a different record layout")]
    LayoutMismatch,
    #[error("failed to decode name cache: {0}")]
    Bincode(#[from] bincode::error::DecodeError),
    #[error("name cache holds more names than a table can index")]
    TooLarge,
    #[error("name cache contains {0:?} twice")]
    DuplicateName(String),
    #[error("name cache entry refers to missing name {0:?}")]
    DanglingReference(NameRef),
    #[error("name cache entry {0:?} is derived from itself")]
    Cycle(NameRef),
    #[error("name cache has a malformed unique name counter for {0:?}")]
    BadCounter(NameRef),
    #[error("name cache was written by a build with different well-known names")]
    WellKnownMismatch,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    well_known_utf8: u32,
    well_known_constants: u32,
    frozen: bool,
    utf8: &'a IndexThinVec<Utf8Name, Utf8Id>,
    unique: &'a IndexThinVec<UniqueName, UniqueId>,
    constants: &'a IndexThinVec<ConstantName, ConstantId>,
}

#[derive(Deserialize)]
struct Snapshot {
    well_known_utf8: u32,
    well_known_constants: u32,
    frozen: bool,
    utf8: IndexThinVec<Utf8Name, Utf8Id>,
    unique: IndexThinVec<UniqueName, UniqueId>,
    constants: IndexThinVec<ConstantName, ConstantId>,
}

pub fn serialize(names: &GlobalNames) -> Result<Vec<u8>, bincode::error::EncodeError> {
    let snapshot = SnapshotRef {
        well_known_utf8: names.well_known_utf8,
        well_known_constants: names.well_known_constants,
        frozen: names.frozen,
        utf8: &names.utf8,
        unique: &names.unique,
        constants: &names.constants,
    };

    let mut buffer = NAMES_FORMAT_VERSION.to_le_bytes().to_vec();
    buffer.extend_from_slice(&LAYOUT_FINGERPRINT);
    buffer.extend(bincode::serde::encode_to_vec(&snapshot, bincode::config::standard())?);
    Ok(buffer)
}

pub fn deserialize(buf: &[u8]) -> Result<GlobalNames, DeserializeError> {
    let header = buf.get(..HEADER_LEN).ok_or(DeserializeError::Truncated)?;
    let (version, fingerprint) = header.split_at(4);

    let version = u32::from_le_bytes(version.try_into().map_err(|_| DeserializeError::Truncated)?);
    if version != NAMES_FORMAT_VERSION {
        return Err(DeserializeError::InvalidVersion(version));
    }
    if fingerprint != LAYOUT_FINGERPRINT {
        return Err(DeserializeError::LayoutMismatch);
    }

    let (snapshot, _): (Snapshot, usize) =
        bincode::serde::decode_from_slice(&buf[HEADER_LEN..], bincode::config::standard())?;
    let names = rebuild(snapshot)?;

    debug!(names = names.len(), "loaded name table from cache");
    Ok(names)
}

fn rebuild(snapshot: Snapshot) -> Result<GlobalNames, DeserializeError> {
    let Snapshot {
        well_known_utf8,
        well_known_constants,
        frozen,
        utf8,
        unique,
        constants,
    } = snapshot;

    let limit = MAX_INDEX as usize + 1;
    if utf8.len() > limit || unique.len() > limit || constants.len() > limit {
        return Err(DeserializeError::TooLarge);
    }

    let mut utf8_index = HashTable::with_capacity(utf8.len());
    for (id, name) in utf8.iter_enumerated() {
        let hash = fxhash(&name.utf8);
        match utf8_index.entry(hash, |&other: &Utf8Id| utf8[other].utf8 == name.utf8, |&other| {
            fxhash(&utf8[other].utf8)
        }) {
            Entry::Occupied(_) => return Err(DeserializeError::DuplicateName(name.utf8.to_string())),
            Entry::Vacant(entry) => {
                entry.insert(id);
            }
        }
    }

    let exists = |name: NameRef| match name.kind() {
        NameKind::Utf8 => utf8.contains(Utf8Id(name.index())),
        NameKind::Unique => unique.contains(UniqueId(name.index())),
        NameKind::Constant => constants.contains(ConstantId(name.index())),
    };
    let originals = unique
        .as_slice()
        .iter()
        .map(|name| name.original)
        .chain(constants.as_slice().iter().map(|name| name.original));
    for original in originals {
        if !exists(original) {
            return Err(DeserializeError::DanglingReference(original));
        }
    }
    check_chains(&unique, &constants)?;

    let mut unique_index = FxHashMap::default();
    let mut unique_counters: FxHashMap<_, u32> = FxHashMap::default();
    for (id, name) in unique.iter_enumerated() {
        let counter = unique_counters.entry((name.original, name.kind)).or_insert(0);
        if name.num != *counter + 1 {
            return Err(DeserializeError::BadCounter(name.original));
        }
        *counter = name.num;
        unique_index.insert(*name, id);
    }

    let mut constant_index = FxHashMap::default();
    for (id, name) in constants.iter_enumerated() {
        if constant_index.insert(name.original, id).is_some() {
            return Err(DeserializeError::DuplicateName(format!("{:?}", name.original)));
        }
    }

    check_well_known(well_known_utf8, well_known_constants, &utf8, &constants)?;

    Ok(GlobalNames {
        utf8,
        utf8_index,
        unique,
        unique_index,
        unique_counters,
        constants,
        constant_index,
        well_known_utf8,
        well_known_constants,
        frozen,
    })
}

/// A table that claims the well-known names has to start with exactly the ones this build defines,
/// otherwise the handles in [`well_known`](crate::well_known) would point at other names.
fn check_well_known(
    well_known_utf8: u32,
    well_known_constants: u32,
    utf8: &IndexThinVec<Utf8Name, Utf8Id>,
    constants: &IndexThinVec<ConstantName, ConstantId>,
) -> Result<(), DeserializeError> {
    if well_known_utf8 == 0 && well_known_constants == 0 {
        return Ok(());
    }

    let texts = utf8.as_slice().iter().map(|name| &*name.utf8);
    let originals = constants.as_slice().iter().map(|name| name.original);
    let same = well_known_utf8 as usize == PREINTERNED_UTF8.len()
        && well_known_constants as usize == PREINTERNED_CONSTANTS.len()
        && texts.take(PREINTERNED_UTF8.len()).eq(PREINTERNED_UTF8.iter().copied())
        && originals
            .take(PREINTERNED_CONSTANTS.len())
            .eq(PREINTERNED_CONSTANTS.iter().copied());

    if !same {
        return Err(DeserializeError::WellKnownMismatch);
    }
    Ok(())
}

/// Every chain of originals has to end in a utf8 name.
fn check_chains(
    unique: &IndexThinVec<UniqueName, UniqueId>,
    constants: &IndexThinVec<ConstantName, ConstantId>,
) -> Result<(), DeserializeError> {
    let original_of = |name: NameRef| match name.kind() {
        NameKind::Utf8 => None,
        NameKind::Unique => Some(unique[UniqueId(name.index())].original),
        NameKind::Constant => Some(constants[ConstantId(name.index())].original),
    };

    // true once a name is known to end in utf8, false while it is on the chain being walked
    let mut grounded: FxHashMap<NameRef, bool> = FxHashMap::default();
    let starts = (0..unique.len() as u32)
        .map(|i| NameRef::from(UniqueId(i)))
        .chain((0..constants.len() as u32).map(|i| NameRef::from(ConstantId(i))));

    for start in starts {
        let mut path = Vec::new();
        let mut current = start;
        loop {
            match grounded.get(&current) {
                Some(true) => break,
                Some(false) => return Err(DeserializeError::Cycle(current)),
                None => {}
            }
            let Some(original) = original_of(current) else {
                break;
            };
            grounded.insert(current, false);
            path.push(current);
            current = original;
        }
        for name in path {
            grounded.insert(name, true);
        }
    }
    Ok(())
}
