use std::time::Instant;

use anyhow::bail;
use clap::ArgMatches;
use nametab_core::{GlobalNames, UniqueNameKind, fork_each};

use crate::util;

pub fn fork(args: &ArgMatches) -> anyhow::Result<()> {
    let source = util::read_source(args)?;
    let jobs = *args.get_one::<usize>("jobs").unwrap_or(&4);

    let mut base = GlobalNames::with_params(util::params_from_matches(args, 0));
    let occurrences = util::intern_source(&mut base, &source);
    let before = base.counts();
    let timing = args.get_flag("timing").then(Instant::now);

    // each job renames every occurrence, job `n` additionally runs `n` extra rounds
    let results = fork_each(&base, (0..jobs).collect(), |names, job| {
        for _ in 0..=job {
            for &name in &occurrences {
                names.intern_unique(name, UniqueNameKind::Desugar);
            }
        }
        names.counts()
    });

    if let Some(timing) = timing {
        println!("forked {jobs} tables in {:?}", timing.elapsed());
    }

    util::print_counts(&base);
    for (job, counts) in results.iter().enumerate() {
        println!(
            "fork {job}: utf8: {}, unique: {}, constant: {}",
            counts.utf8, counts.unique, counts.constant
        );
    }

    if base.counts() != before {
        bail!("base table changed while its forks were mutated");
    }

    Ok(())
}
