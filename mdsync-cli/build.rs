use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of FORMAT_NAMES in src/main.rs
// Build scripts can't depend on the crate they build for
const AVAILABLE_FORMATS: &[&str] = &["markdown", "md", "html", "htm"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let format_arg = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .help(help)
            .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS))
            .ignore_case(true)
            .value_hint(ValueHint::Other)
    };

    let mut cmd = Command::new("mdsync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between markdown and HTML")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdsync.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log progress to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between markdown and HTML (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(format_arg(
                    "from",
                    "Source format (auto-detected from file extension if not specified)",
                ))
                .arg(format_arg("to", "Target format (defaults to the other format)"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mdsync", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mdsync", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mdsync", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
