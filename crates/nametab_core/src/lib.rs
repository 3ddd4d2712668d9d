//! The name layer of the type checker.
//!
//! Every identifier, synthesized name and constant name is interned into a [`GlobalNames`] table
//! and passed around as a 4 byte [`NameRef`]. Independent or speculative work gets its own copy of
//! the table through [`GlobalNames::fork`] instead of sharing one behind a lock.

/// Fails the build if `$ty` does not have exactly the given size and alignment.
///
/// Cached name tables assume fixed record sizes, so these are part of the format.
#[macro_export]
macro_rules! check_layout {
    ($ty:ty, $size:expr, $align:expr) => {
        const _: () = {
            assert!(
                ::std::mem::size_of::<$ty>() == $size,
                concat!("unexpected size of ", stringify!($ty))
            );
            assert!(
                ::std::mem::align_of::<$ty>() == $align,
                concat!("unexpected alignment of ", stringify!($ty))
            );
        };
    };
}

pub mod actions;
pub mod fork;
#[cfg(feature = "format")]
pub mod format;
pub mod indexvec;
pub mod name_ref;
pub mod names;
pub mod params;
pub mod show;
pub mod table;
pub mod well_known;

#[cfg(test)]
mod test;

pub use fork::fork_each;
pub use name_ref::{NameKind, NameRef};
pub use names::{ConstantName, NameView, UniqueName, UniqueNameKind, Utf8Name};
pub use params::NameTableParams;
pub use table::{GlobalNames, NameCounts, UnfreezeNames};
