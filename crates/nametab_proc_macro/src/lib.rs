use proc_macro::TokenStream;

mod define_names;

/// Declares the well-known names every fresh name table starts with.
///
/// Takes an array of `Names { .. }` and `Constants { .. }` groups. Each entry is either a bare
/// identifier (the text is the identifier itself) or `ident: "text"`. Emits a `NameRef` const per
/// entry plus the `PREINTERNED_UTF8` and `PREINTERNED_CONSTANTS` tables the name table is seeded from.
#[proc_macro]
pub fn define_names(tt: TokenStream) -> TokenStream {
    define_names::define_names_impl(tt)
}
