use std::fmt;

use crate::name_ref::NameRef;
use crate::names::NameView;
use crate::table::GlobalNames;

/// Renders a name for diagnostics. Created by [`GlobalNames::display`] and [`GlobalNames::display_raw`].
#[derive(Copy, Clone)]
pub struct ShowName<'a> {
    names: &'a GlobalNames,
    name: NameRef,
    raw: bool,
}

impl fmt::Display for ShowName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw {
            write_raw(self.names, self.name, f)
        } else {
            write_shown(self.names, self.name, f)
        }
    }
}

impl fmt::Debug for ShowName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_raw(self.names, self.name, f)
    }
}

// a unique name's original was interned before it, so the recursion always bottoms out
fn write_shown(names: &GlobalNames, name: NameRef, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match names.resolve(name) {
        NameView::Utf8(utf8) => f.write_str(&utf8.utf8),
        NameView::Unique(unique) => {
            write_shown(names, unique.original, f)?;
            write!(f, "${}${}", unique.kind.tag(), unique.num)
        }
        NameView::Constant(constant) => write_shown(names, constant.original, f),
    }
}

fn write_raw(names: &GlobalNames, name: NameRef, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match names.resolve(name) {
        NameView::Utf8(utf8) => write!(f, "<U {}>", utf8.utf8),
        NameView::Unique(unique) => {
            f.write_str("<N ")?;
            write_raw(names, unique.original, f)?;
            write!(f, " ${} {}>", unique.kind.tag(), unique.num)
        }
        NameView::Constant(constant) => {
            f.write_str("<C ")?;
            write_raw(names, constant.original, f)?;
            f.write_str(">")
        }
    }
}

impl GlobalNames {
    /// Human readable form of `name`.
    ///
    /// Utf8 names render as their text and constants as the name they wrap. Unique names render
    /// as `original$tag$num`, so two unique names from the same original never look alike.
    pub fn show(&self, name: NameRef) -> String {
        self.display(name).to_string()
    }

    /// Structural form of `name`, e.g. `<C <U Foo>>` or `<N <U tmp> $desugar 1>`.
    pub fn show_raw(&self, name: NameRef) -> String {
        self.display_raw(name).to_string()
    }

    pub fn display(&self, name: NameRef) -> ShowName<'_> {
        ShowName {
            names: self,
            name,
            raw: false,
        }
    }

    pub fn display_raw(&self, name: NameRef) -> ShowName<'_> {
        ShowName {
            names: self,
            name,
            raw: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use crate::names::UniqueNameKind;
    use crate::params::NameTableParams;
    use crate::table::GlobalNames;

    #[test]
    fn utf8_and_constant_show_the_same_text() {
        let mut names = GlobalNames::with_params(NameTableParams::new().set_well_known(false));
        let foo = names.intern_utf8("Foo");
        let constant = names.intern_constant(foo);
        assert_eq!(names.show(foo), "Foo");
        assert_eq!(names.show(constant), "Foo");
        assert_eq!(names.show_raw(foo), "<U Foo>");
        assert_eq!(names.show_raw(constant), "<C <U Foo>>");
    }

    #[test]
    fn unique_names_show_original_kind_and_counter() {
        let mut names = GlobalNames::new();
        let tmp = names.intern_utf8("tmp");
        let u1 = names.intern_unique(tmp, UniqueNameKind::Desugar);
        let u2 = names.intern_unique(tmp, UniqueNameKind::Desugar);
        assert_eq!(names.show(u1), "tmp$desugar$1");
        assert_eq!(names.show(u2), "tmp$desugar$2");
        assert_eq!(names.show_raw(u1), "<N <U tmp> $desugar 1>");
        assert_eq!(format!("{}", names.display(u2)), names.show(u2));
        assert_eq!(format!("{:?}", names.display(u2)), names.show_raw(u2));
    }

    #[test]
    fn distinct_unique_names_never_render_alike() {
        let mut names = GlobalNames::new();
        let x = names.intern_utf8("x");
        let mut seen = HashSet::new();
        for kind in UniqueNameKind::iter() {
            for _ in 0..12 {
                let unique = names.intern_unique(x, kind);
                assert!(seen.insert(names.show(unique)), "{}", names.show_raw(unique));
            }
        }
    }

    #[test]
    fn nested_names_render_recursively() {
        let mut names = GlobalNames::new();
        let x = names.intern_utf8("x");
        let inner = names.intern_unique(x, UniqueNameKind::Namer);
        let outer = names.intern_unique(inner, UniqueNameKind::Overload);
        let constant = names.intern_constant(outer);
        assert_eq!(names.show(outer), "x$namer$1$overload$1");
        assert_eq!(names.show(constant), "x$namer$1$overload$1");
        assert_eq!(names.show_raw(constant), "<C <N <N <U x> $namer 1> $overload 1>>");
    }

    #[test]
    fn show_is_deterministic() {
        let mut names = GlobalNames::new();
        let x = names.intern_utf8("x");
        let u = names.intern_unique(x, UniqueNameKind::MangleRename);
        assert_eq!(names.show(u), names.show(u));
    }
}
