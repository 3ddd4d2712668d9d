use std::backtrace::{Backtrace, BacktraceStatus};

use anyhow::bail;
use clap::{Arg, ArgAction, Command, value_parser};
use owo_colors::OwoColorize;

mod cmd;
mod util;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let file = Arg::new("file").required(true).help("Source file to scan for identifiers");
    let bare = Arg::new("bare")
        .long("bare")
        .action(ArgAction::SetTrue)
        .help("Start from an empty table instead of the well-known names");
    let dump = Arg::new("dump").long("dump").action(ArgAction::SetTrue);
    let raw = Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Dump names in their structural form");

    let app = Command::new("nametab")
        .about("Exercise the type checker's name table on source files")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("intern")
                .about("Intern every identifier of a file and report the table")
                .arg(file.clone())
                .arg(bare.clone())
                .arg(dump.clone())
                .arg(raw.clone()),
        )
        .subcommand(
            Command::new("fork")
                .about("Fork the table of a file and rename its identifiers on every fork in parallel")
                .arg(file.clone())
                .arg(bare.clone())
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .value_parser(value_parser!(usize))
                        .default_value("4"),
                )
                .arg(Arg::new("timing").short('t').long("timing").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("cache")
                .about("Write the name table of a file to a cache")
                .arg(file)
                .arg(Arg::new("out").required(true))
                .arg(bare),
        )
        .subcommand(
            Command::new("load")
                .about("Load a name table cache and report it")
                .arg(Arg::new("cache").required(true))
                .arg(dump)
                .arg(raw),
        );

    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}\n", "nametab has unexpectedly panicked! this is a bug!".red().bold());

        eprintln!("{info}");

        let backtrace = Backtrace::capture();
        match backtrace.status() {
            BacktraceStatus::Captured => {
                eprintln!("--- begin of backtrace ---");
                eprintln!("{backtrace}");
            }
            BacktraceStatus::Disabled => {
                eprintln!("set RUST_BACKTRACE=1 to print a backtrace");
            }
            BacktraceStatus::Unsupported => {
                eprintln!("backtraces are not supported on this platform");
            }
            _ => {
                eprintln!("backtraces are not available");
            }
        }
    }));

    let matches = app.get_matches();
    match matches.subcommand() {
        Some(("intern", args)) => cmd::intern(args),
        Some(("fork", args)) => cmd::fork(args),
        Some(("cache", args)) => cmd::cache(args),
        Some(("load", args)) => cmd::load(args),
        _ => bail!("Unimplemented command"),
    }
}
