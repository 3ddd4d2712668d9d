// End to end scenarios over the public table API.

use std::thread;

use crate::actions::fresh_local;
use crate::fork::fork_each;
use crate::{GlobalNames, NameTableParams, NameView, UniqueNameKind, well_known};

fn contents(names: &GlobalNames) -> Vec<String> {
    names.iter().map(|name| names.show_raw(name)).collect()
}

#[test]
fn same_text_same_handle() {
    let mut names = GlobalNames::new();
    let r1 = names.intern_utf8("foo");
    let r2 = names.intern_utf8("foo");
    assert_eq!(r1, r2);
}

#[test]
fn repeated_unique_mints_count_up() {
    let mut names = GlobalNames::new();
    let orig = names.intern_utf8("tmp");
    let u1 = names.intern_unique(orig, UniqueNameKind::Desugar);
    let u2 = names.intern_unique(orig, UniqueNameKind::Desugar);
    assert_ne!(u1, u2);

    let NameView::Unique(first) = names.resolve(u1) else {
        panic!("expected a unique name");
    };
    let NameView::Unique(second) = names.resolve(u2) else {
        panic!("expected a unique name");
    };
    assert_eq!((first.original, first.num, first.kind), (orig, 1, UniqueNameKind::Desugar));
    assert_eq!((second.original, second.num), (orig, 2));
}

#[test]
fn constant_is_shared_but_distinct_from_its_original() {
    let mut names = GlobalNames::new();
    let orig = names.intern_utf8("tmp");
    let c1 = names.intern_constant(orig);
    let c2 = names.intern_constant(orig);
    assert_eq!(c1, c2);
    assert_ne!(c1, orig);
}

#[test]
fn names_added_to_a_fork_stay_in_the_fork() {
    let mut base = GlobalNames::new();
    let r1 = base.intern_utf8("foo");
    let snapshot = contents(&base);

    let mut fork = base.fork();
    let bar = fork.intern_utf8("bar");

    assert_eq!(fork.resolve(r1), base.resolve(r1));
    assert_eq!(fork.show(bar), "bar");
    assert_eq!(contents(&base), snapshot);
    assert!(!contents(&base).contains(&"<U bar>".to_owned()));
}

#[test]
fn base_mutations_after_fork_stay_in_the_base() {
    let mut base = GlobalNames::new();
    base.intern_utf8("foo");
    let fork = base.fork();
    let snapshot = contents(&fork);

    let x = base.intern_utf8("x");
    base.intern_unique(x, UniqueNameKind::Namer);
    let constant = base.intern_utf8("Foo");
    base.intern_constant(constant);

    assert_eq!(contents(&fork), snapshot);
}

#[test]
fn same_original_different_kind_renders_differently() {
    let mut names = GlobalNames::new();
    let x = names.intern_utf8("x");
    let overload = names.intern_unique(x, UniqueNameKind::Overload);
    let mangled = names.intern_unique(x, UniqueNameKind::MangleRename);
    assert_ne!(names.show(overload), names.show(mangled));
}

#[test]
fn forks_can_be_extended_on_worker_threads() {
    let mut base = GlobalNames::with_params(NameTableParams::new().set_utf8_capacity(256));
    let idents: Vec<_> = (0..64).map(|i| base.intern_utf8(format!("ident{i}"))).collect();
    let before = contents(&base);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let mut fork = base.fork();
            let idents = idents.clone();
            thread::spawn(move || {
                for &ident in &idents {
                    fork.intern_unique(ident, UniqueNameKind::Desugar);
                }
                fork.intern_utf8(format!("worker{worker}"));
                fork
            })
        })
        .collect();

    for (worker, handle) in handles.into_iter().enumerate() {
        let fork = handle.join().unwrap();
        assert_eq!(fork.counts().unique, idents.len());
        assert!(fork.lookup_utf8(&format!("worker{worker}")).is_some());
        for other in (0..4).filter(|&other| other != worker) {
            assert!(fork.lookup_utf8(&format!("worker{other}")).is_none());
        }
        for &ident in &idents {
            assert_eq!(fork.next_unique_num(ident, UniqueNameKind::Desugar), 2);
        }
    }

    assert_eq!(contents(&base), before);
}

#[test]
fn code_action_candidates_are_computed_on_forks() {
    let mut base = GlobalNames::new();
    base.intern_utf8("result");
    base.freeze();

    let candidates = fork_each(&base, vec!["result", "value", "result"], |names, hint| {
        let mut names = names.unfreeze();
        let local = fresh_local(&mut names, hint, UniqueNameKind::DesugarCsend);
        names.show(local)
    });

    assert_eq!(candidates, ["result$csend$1", "value$csend$1", "result$csend$1"]);
    assert!(base.is_frozen());
    assert!(base.lookup_utf8("value").is_none());
}

#[test]
fn well_known_names_survive_forks() {
    let base = GlobalNames::new();
    let fork = base.fork();
    assert_eq!(fork.show(well_known::Object), "Object");
    assert_eq!(fork.show(well_known::assign_temp), "<assignTemp>");
    assert!(fork.is_well_known(well_known::Kernel));
}
