//! Logging for the nametab crates.
//!
//! The other crates go through these macros instead of depending on tracing themselves.
//! Nothing is logged unless `NAMETAB_LOG` was set when the crate was built, and then the
//! macros expand to tracing calls behind a constant that folds away otherwise.

#[doc(hidden)]
pub use tracing as __tracing;
#[doc(hidden)]
pub const ENABLED: bool = option_env!("NAMETAB_LOG").is_some();

pub use tracing::Level;

#[macro_export]
macro_rules! debug {
    ($($tok:tt)*) => {
        if $crate::ENABLED {
            $crate::__tracing::debug!($($tok)*)
        }
    };
}

/// Reports a broken name table invariant and panics.
///
/// The message is also logged at error level when logging is compiled in.
#[macro_export]
macro_rules! fatal {
    ($($tok:tt)*) => {{
        let message = ::std::format!($($tok)*);
        if $crate::ENABLED {
            $crate::__tracing::error!(target: "nametab::fatal", "{}", message);
        }
        ::std::panic!("{}", message)
    }};
}

/// Opens a [`Span`], which is a no-op when logging is compiled out.
#[macro_export]
macro_rules! span {
    ($($tok:tt)*) => {
        if $crate::ENABLED {
            $crate::Span::Enabled($crate::__tracing::span!($($tok)*))
        } else {
            $crate::Span::Disabled
        }
    }
}

pub enum Span {
    Enabled(tracing::Span),
    Disabled,
}

impl Span {
    pub fn enter(&self) -> Entered<'_> {
        match self {
            Self::Enabled(span) => Entered::Enabled(span.enter()),
            Self::Disabled => Entered::Disabled,
        }
    }
}

/// Keeps a [`Span`] entered until dropped.
pub enum Entered<'a> {
    Enabled(tracing::span::Entered<'a>),
    Disabled,
}
