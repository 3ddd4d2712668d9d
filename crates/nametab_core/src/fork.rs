//! Forking a name table into independent copies.
//!
//! A table is never shared mutably. Work that needs to extend the symbol universe in parallel or
//! speculatively forks its own private table from a common base, mutates it freely and then either
//! hands its results on or drops the fork.

use nametab_log::{Level, debug, span};
use rayon::prelude::*;

use crate::table::GlobalNames;

impl GlobalNames {
    /// Copies every entry of this table into a new, independent table.
    ///
    /// All handles valid here resolve to the same names in the fork. Names interned into either
    /// table afterwards are invisible to the other. The frozen state is carried over.
    pub fn fork(&self) -> GlobalNames {
        let span = span!(Level::DEBUG, "fork", names = self.len());
        let _enter = span.enter();

        let forked = GlobalNames {
            utf8: self.utf8.clone(),
            utf8_index: self.utf8_index.clone(),
            unique: self.unique.clone(),
            unique_index: self.unique_index.clone(),
            unique_counters: self.unique_counters.clone(),
            constants: self.constants.clone(),
            constant_index: self.constant_index.clone(),
            well_known_utf8: self.well_known_utf8,
            well_known_constants: self.well_known_constants,
            frozen: self.frozen,
        };

        debug!(
            utf8 = forked.utf8.len(),
            unique = forked.unique.len(),
            constant = forked.constants.len(),
            "forked name table"
        );
        forked
    }
}

/// Runs `work` once per job, each on its own fork of `base`, in parallel.
///
/// `base` is only read. Results come back in job order; the forks are dropped once `work` returns.
pub fn fork_each<J, R, F>(base: &GlobalNames, jobs: Vec<J>, work: F) -> Vec<R>
where
    J: Send,
    R: Send,
    F: Fn(&mut GlobalNames, J) -> R + Sync + Send,
{
    let span = span!(Level::DEBUG, "fork_each", jobs = jobs.len());
    let _enter = span.enter();

    jobs.into_par_iter()
        .map(|job| {
            let mut names = base.fork();
            work(&mut names, job)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::fork_each;
    use crate::names::UniqueNameKind;
    use crate::table::GlobalNames;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn tables_can_cross_threads() {
        assert_send_sync::<GlobalNames>();
    }

    #[test]
    fn fork_preserves_handles() {
        let mut base = GlobalNames::new();
        let foo = base.intern_utf8("foo");
        let unique = base.intern_unique(foo, UniqueNameKind::Desugar);
        let constant = base.intern_constant(foo);

        let fork = base.fork();
        assert_eq!(fork.len(), base.len());
        for name in base.iter() {
            assert_eq!(fork.resolve(name), base.resolve(name));
        }
        assert_eq!(fork.lookup_utf8("foo"), Some(foo));
        assert_eq!(fork.lookup_constant(foo), Some(constant));
        assert_eq!(fork.lookup_unique(foo, UniqueNameKind::Desugar, 1), Some(unique));
    }

    #[test]
    fn fork_continues_unique_counters() {
        let mut base = GlobalNames::new();
        let tmp = base.intern_utf8("tmp");
        base.intern_unique(tmp, UniqueNameKind::Desugar);

        let mut fork = base.fork();
        let next = fork.intern_unique(tmp, UniqueNameKind::Desugar);
        assert_eq!(fork.resolve(next).as_unique().unwrap().num, 2);
        assert_eq!(base.next_unique_num(tmp, UniqueNameKind::Desugar), 2);
    }

    #[test]
    fn forks_are_isolated_both_ways() {
        let mut base = GlobalNames::new();
        base.intern_utf8("foo");
        let mut fork = base.fork();

        let bar = fork.intern_utf8("bar");
        assert!(base.lookup_utf8("bar").is_none());
        assert!(!base.contains(bar));

        let baz = base.intern_utf8("baz");
        assert!(fork.lookup_utf8("baz").is_none());
        // both tables handed out the same next index, for different text
        assert_eq!(bar, baz);
        assert_eq!(fork.show(bar), "bar");
        assert_eq!(base.show(baz), "baz");
    }

    #[test]
    fn fork_inherits_frozen_state() {
        let mut base = GlobalNames::new();
        base.freeze();
        assert!(base.fork().is_frozen());
    }

    #[test]
    fn fork_each_gives_every_job_a_private_table() {
        let mut base = GlobalNames::new();
        let x = base.intern_utf8("x");
        let before = base.len();

        let shown = fork_each(&base, (0..8).collect(), |names, job: u32| {
            for _ in 0..job {
                names.intern_unique(x, UniqueNameKind::Desugar);
            }
            let last = names.intern_unique(x, UniqueNameKind::Desugar);
            names.show(last)
        });

        let expected: Vec<_> = (1..=8).map(|n| format!("x$desugar${n}")).collect();
        assert_eq!(shown, expected);
        assert_eq!(base.len(), before);
        assert_eq!(base.next_unique_num(x, UniqueNameKind::Desugar), 1);
    }
}
