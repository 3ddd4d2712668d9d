use clap::ArgMatches;
use nametab_core::GlobalNames;

use crate::util;

pub fn intern(args: &ArgMatches) -> anyhow::Result<()> {
    let source = util::read_source(args)?;
    let idents = util::identifiers(&source);

    let mut names = GlobalNames::with_params(util::params_from_matches(args, idents.len()));
    let interned = util::intern_source(&mut names, &source);

    println!("{} identifiers interned", interned.len());
    util::print_counts(&names);

    if args.get_flag("dump") {
        util::dump(&names, args.get_flag("raw"), true);
    }

    Ok(())
}
