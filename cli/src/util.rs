use std::fs;

use anyhow::Context;
use clap::ArgMatches;
use nametab_core::{GlobalNames, NameRef, NameTableParams};

/// Checks if `c` is a valid character for the start of an identifier
pub fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'@' || c == b'$' || !c.is_ascii()
}

/// Checks whether `c` can continue an identifier
pub fn is_identifier_part(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || !c.is_ascii()
}

pub fn is_constant_like(ident: &str) -> bool {
    ident.as_bytes().first().is_some_and(u8::is_ascii_uppercase)
}

/// Splits `source` into identifiers, keeping a trailing `?` or `!` as part of method names.
///
/// Non-ASCII bytes count as identifier characters, so every split happens at an ASCII byte
/// and never inside a UTF-8 sequence.
pub fn identifiers(source: &str) -> Vec<&str> {
    let bytes = source.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !is_identifier_start(bytes[i]) {
            i += 1;
            continue;
        }

        let start = i;
        i += 1;
        while i < bytes.len() && is_identifier_part(bytes[i]) {
            i += 1;
        }
        if i < bytes.len() && matches!(bytes[i], b'?' | b'!') {
            i += 1;
        }
        out.push(&source[start..i]);
    }

    out
}

pub fn read_source(args: &ArgMatches) -> anyhow::Result<String> {
    let path = args.get_one::<String>("file").context("Missing file")?;
    fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
}

pub fn params_from_matches(args: &ArgMatches, idents: usize) -> NameTableParams {
    NameTableParams::new()
        .set_utf8_capacity(idents)
        .set_well_known(!args.get_flag("bare"))
}

/// Interns every identifier of `source`; capitalized ones also get a constant name.
pub fn intern_source(names: &mut GlobalNames, source: &str) -> Vec<NameRef> {
    identifiers(source)
        .into_iter()
        .map(|ident| {
            let name = names.intern_utf8(ident);
            if is_constant_like(ident) {
                names.intern_constant(name);
            }
            name
        })
        .collect()
}

pub fn print_counts(names: &GlobalNames) {
    let counts = names.counts();
    println!(
        "utf8: {}, unique: {}, constant: {} ({} total)",
        counts.utf8,
        counts.unique,
        counts.constant,
        counts.total()
    );
}

pub fn dump(names: &GlobalNames, raw: bool, skip_well_known: bool) {
    for name in names.iter() {
        if skip_well_known && names.is_well_known(name) {
            continue;
        }
        if raw {
            println!("{:>12} {}", format!("{}#{}", name.kind(), name.index()), names.display_raw(name));
        } else {
            println!("{:>12} {}", format!("{}#{}", name.kind(), name.index()), names.display(name));
        }
    }
}
