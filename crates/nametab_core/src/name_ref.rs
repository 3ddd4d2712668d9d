use std::fmt;

#[cfg(feature = "format")]
use serde::{Deserialize, Serialize};

/// Which arena of a name table a [`NameRef`] points into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "format", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum NameKind {
    #[display("utf8")]
    Utf8 = 0,
    #[display("unique")]
    Unique = 1,
    #[display("constant")]
    Constant = 2,
}

const KIND_SHIFT: u32 = 30;
const INDEX_MASK: u32 = (1 << KIND_SHIFT) - 1;

/// The largest index any one arena can hand out.
pub const MAX_INDEX: u32 = INDEX_MASK;

/// A handle to one interned name.
///
/// The top two bits hold the [`NameKind`], the rest is the index into that kind's arena.
/// A `NameRef` is only meaningful together with the table that minted it, or a fork of that table.
/// The `Ord` impl exists so handles can key ordered maps; the order means nothing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "format",
    derive(Serialize, Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub struct NameRef(u32);

check_layout!(NameRef, 4, 4);

impl NameRef {
    /// # Panics
    /// If `index` exceeds [`MAX_INDEX`].
    pub const fn from_parts(kind: NameKind, index: u32) -> Self {
        assert!(index <= MAX_INDEX, "name index out of range");
        Self(((kind as u32) << KIND_SHIFT) | index)
    }

    pub const fn kind(self) -> NameKind {
        match self.0 >> KIND_SHIFT {
            0 => NameKind::Utf8,
            1 => NameKind::Unique,
            _ => NameKind::Constant,
        }
    }

    pub const fn index(self) -> u32 {
        self.0 & INDEX_MASK
    }

    /// This should only be used if you *really* need to. Prefer `NameRef`s directly wherever possible.
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_utf8(self) -> bool {
        matches!(self.kind(), NameKind::Utf8)
    }

    pub const fn is_unique(self) -> bool {
        matches!(self.kind(), NameKind::Unique)
    }

    pub const fn is_constant(self) -> bool {
        matches!(self.kind(), NameKind::Constant)
    }
}

/// A packed word whose kind bits name no arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{_0:#010x} is not a name handle")]
pub struct InvalidNameRef(pub u32);

impl TryFrom<u32> for NameRef {
    type Error = InvalidNameRef;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        if raw >> KIND_SHIFT > NameKind::Constant as u32 {
            return Err(InvalidNameRef(raw));
        }
        Ok(Self(raw))
    }
}

impl From<NameRef> for u32 {
    fn from(name: NameRef) -> Self {
        name.0
    }
}

impl fmt::Debug for NameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameRef({}#{})", self.kind(), self.index())
    }
}

crate::index_type!(
    /// Index into the utf8 arena.
    Utf8Id u32
);
crate::index_type!(
    /// Index into the unique name arena.
    UniqueId u32
);
crate::index_type!(
    /// Index into the constant name arena.
    ConstantId u32
);

impl From<Utf8Id> for NameRef {
    fn from(id: Utf8Id) -> Self {
        Self::from_parts(NameKind::Utf8, id.0)
    }
}

impl From<UniqueId> for NameRef {
    fn from(id: UniqueId) -> Self {
        Self::from_parts(NameKind::Unique, id.0)
    }
}

impl From<ConstantId> for NameRef {
    fn from(id: ConstantId) -> Self {
        Self::from_parts(NameKind::Constant, id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidNameRef, MAX_INDEX, NameKind, NameRef};

    #[test]
    fn kind_and_index_round_trip_through_the_packed_word() {
        for kind in [NameKind::Utf8, NameKind::Unique, NameKind::Constant] {
            for index in [0, 1, 12345, MAX_INDEX] {
                let r = NameRef::from_parts(kind, index);
                assert_eq!(r.kind(), kind);
                assert_eq!(r.index(), index);
            }
        }
    }

    #[test]
    fn same_index_different_kind_is_a_different_name() {
        let utf8 = NameRef::from_parts(NameKind::Utf8, 7);
        let constant = NameRef::from_parts(NameKind::Constant, 7);
        assert_ne!(utf8, constant);
        assert!(utf8.is_utf8() && constant.is_constant());
    }

    #[test]
    fn packed_words_with_an_unused_kind_are_refused() {
        let constant = NameRef::from_parts(NameKind::Constant, MAX_INDEX);
        assert_eq!(NameRef::try_from(constant.raw()), Ok(constant));
        assert_eq!(NameRef::try_from(0xC000_0000_u32), Err(InvalidNameRef(0xC000_0000)));
    }

    #[test]
    #[should_panic]
    fn oversized_index_is_rejected() {
        NameRef::from_parts(NameKind::Unique, MAX_INDEX + 1);
    }

    #[test]
    fn debug_names_the_kind() {
        assert_eq!(format!("{:?}", NameRef::from_parts(NameKind::Unique, 3)), "NameRef(unique#3)");
    }
}
