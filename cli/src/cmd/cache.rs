use std::fs;

use anyhow::Context;
use clap::ArgMatches;
use nametab_core::{GlobalNames, format};

use crate::util;

pub fn cache(args: &ArgMatches) -> anyhow::Result<()> {
    let source = util::read_source(args)?;
    let out = args.get_one::<String>("out").context("Missing output path")?;

    let mut names = GlobalNames::with_params(util::params_from_matches(args, 0));
    util::intern_source(&mut names, &source);

    let buffer = format::serialize(&names).context("Failed to encode name table")?;
    fs::write(out, &buffer).with_context(|| format!("Failed to write {out}"))?;

    println!("wrote {} bytes to {out}", buffer.len());
    util::print_counts(&names);
    Ok(())
}

pub fn load(args: &ArgMatches) -> anyhow::Result<()> {
    let path = args.get_one::<String>("cache").context("Missing cache path")?;
    let buffer = fs::read(path).with_context(|| format!("Failed to read {path}"))?;
    let names = format::deserialize(&buffer).with_context(|| format!("Failed to load {path}"))?;

    util::print_counts(&names);
    if args.get_flag("dump") {
        util::dump(&names, args.get_flag("raw"), false);
    }
    Ok(())
}
