use crate::name_ref::NameRef;
use crate::names::UniqueNameKind;
use crate::table::GlobalNames;

/// Mints a synthetic local for a refactoring such as "extract to variable".
///
/// The result renders differently from every utf8 name currently in the table, so it can be
/// spliced into source without shadowing anything the user wrote.
pub fn fresh_local(names: &mut GlobalNames, base: &str, kind: UniqueNameKind) -> NameRef {
    let original = names.intern_utf8(base);
    loop {
        let candidate = names.intern_unique(original, kind);
        if names.lookup_utf8(&names.show(candidate)).is_none() {
            return candidate;
        }
    }
}
