use std::sync::Arc;

#[cfg(feature = "format")]
use serde::{Deserialize, Serialize};
use strum_macros::{EnumCount, EnumIter};

use crate::name_ref::NameRef;

/// A plain identifier, as it appeared in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "format", derive(Serialize, Deserialize))]
pub struct Utf8Name {
    pub utf8: Arc<str>,
}

#[cfg(target_pointer_width = "64")]
check_layout!(Utf8Name, 16, 8);

/// Why a synthetic name was minted.
///
/// Two passes that mint names for unrelated reasons use different kinds, so they can never
/// end up with the same synthesized identity even when they start from the same original.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
#[cfg_attr(feature = "format", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum UniqueNameKind {
    Parser,
    Desugar,
    Namer,
    MangleRename,
    MangleRenameOverload,
    Singleton,
    Overload,
    TypeVarName,
    PositionalArg,
    /// Only minted for duplicated keyword arguments.
    MangledKeywordArg,
    /// Stub classes the resolver enters for missing constants in static fields.
    ResolverMissingClass,
    /// Classes backing enum values.
    TEnum,
    Struct,
    Packager,
    /// Temporaries introduced when extracting a safe-navigation call into a variable.
    DesugarCsend,
}

impl UniqueNameKind {
    /// The marker rendered between the original and the counter.
    ///
    /// Tags contain no digits, so `tag` followed by the counter always splits back apart.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Parser => "parser",
            Self::Desugar => "desugar",
            Self::Namer => "namer",
            Self::MangleRename => "mangle",
            Self::MangleRenameOverload => "mangle_overload",
            Self::Singleton => "singleton",
            Self::Overload => "overload",
            Self::TypeVarName => "tvar",
            Self::PositionalArg => "arg",
            Self::MangledKeywordArg => "kwarg",
            Self::ResolverMissingClass => "missing",
            Self::TEnum => "tenum",
            Self::Struct => "struct",
            Self::Packager => "pkg",
            Self::DesugarCsend => "csend",
        }
    }
}

/// A compiler-generated name derived from `original`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "format", derive(Serialize, Deserialize))]
pub struct UniqueName {
    pub original: NameRef,
    pub num: u32,
    pub kind: UniqueNameKind,
}

check_layout!(UniqueName, 12, 4);

/// Marks `original` as living in the constant namespace.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "format", derive(Serialize, Deserialize))]
pub struct ConstantName {
    pub original: NameRef,
}

check_layout!(ConstantName, 4, 4);

/// A borrowed view of one name's payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NameView<'a> {
    Utf8(&'a Utf8Name),
    Unique(&'a UniqueName),
    Constant(&'a ConstantName),
}

impl<'a> NameView<'a> {
    pub fn as_utf8(self) -> Option<&'a str> {
        match self {
            Self::Utf8(name) => Some(&name.utf8),
            _ => None,
        }
    }

    pub fn as_unique(self) -> Option<&'a UniqueName> {
        match self {
            Self::Unique(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_constant(self) -> Option<&'a ConstantName> {
        match self {
            Self::Constant(name) => Some(name),
            _ => None,
        }
    }

    /// The name this one was derived from, if it is not a plain identifier.
    pub fn original(self) -> Option<NameRef> {
        match self {
            Self::Utf8(_) => None,
            Self::Unique(name) => Some(name.original),
            Self::Constant(name) => Some(name.original),
        }
    }
}

/// Sizes and alignments of the name records, in the order utf8, unique, constant, handle.
///
/// Written into cached name tables so a cache from a build with a different layout is refused.
pub const LAYOUT_FINGERPRINT: [u8; 8] = [
    std::mem::size_of::<Utf8Name>() as u8,
    std::mem::align_of::<Utf8Name>() as u8,
    std::mem::size_of::<UniqueName>() as u8,
    std::mem::align_of::<UniqueName>() as u8,
    std::mem::size_of::<ConstantName>() as u8,
    std::mem::align_of::<ConstantName>() as u8,
    std::mem::size_of::<NameRef>() as u8,
    std::mem::align_of::<NameRef>() as u8,
];
