// Command-line interface for mdsync
//
// The mdsync program converts documents between markdown (with fenced `:::` containers and
// heading attribute lists) and HTML. All conversion work happens in the mdsync-babel crate;
// this binary reads a file, picks the formats, runs the converter and writes the result.
//
// Converting:
//
// The source format is auto-detected from the file extension and can be overridden with
// --from. The target defaults to the other format, so `--to` is only needed for clarity.
// Usage:
//  mdsync <input> [--to <format>] [--from <format>] [--output <file>]          - Convert (default)
//  mdsync convert <input> [--to <format>] [--from <format>] [--output <file>]  - Same as above
//
// Extra Parameters:
//
// Configuration keys can be overridden with --extra-<parameter-name> <value>.
// Example:
//  mdsync page.md --extra-link-target-blank true

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use mdsync_babel::{ConvertOptions, Converter, DocumentFormat};
use mdsync_config::{Loader, MdsyncConfig, PROJECT_CONFIG_FILE};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn, Level};

/// Names accepted by --from and --to; build.rs mirrors this list for shell completions
const FORMAT_NAMES: &[&str] = &["markdown", "md", "html", "htm"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

/// One help line per format, e.g. `- html: HTML fragment (.html, .htm)`.
fn supported_formats_help() -> String {
    DocumentFormat::ALL
        .iter()
        .map(|format| {
            let format = format.format();
            let extensions: Vec<String> = format
                .file_extensions()
                .iter()
                .map(|extension| format!(".{extension}"))
                .collect();
            format!(
                "  - {}: {} ({})",
                format.name(),
                format.description(),
                extensions.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_parser(PossibleValuesParser::new(FORMAT_NAMES))
        .ignore_case(true)
        .value_hint(ValueHint::Other)
}

fn build_cli() -> Command {
    Command::new("mdsync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between markdown and HTML")
        .long_about(
            "mdsync converts documents between markdown and HTML.\n\n\
            Fenced `:::` containers become <div> elements and heading attribute lists\n\
            such as `# Title {#id .class}` become HTML attributes. The reverse\n\
            conversion restores both.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration keys.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mdsync page.md                              # Markdown to HTML (stdout)\n  \
            mdsync page.html -o page.md                 # HTML to markdown file\n  \
            mdsync notes.txt --from md --to html        # Explicit formats\n  \
            mdsync page.md --extra-link-target-blank    # Open outbound links in new tabs",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .long_about(format!(
                    "Convert a document between markdown and HTML.\n\n\
                    Supported formats:\n{}\n\n\
                    The source format is auto-detected from the file extension and the\n\
                    target defaults to the other format.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                    supported_formats_help()
                ))
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
                .arg(format_arg(
                    "to",
                    "Target format (defaults to the other format)",
                ))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let matches = parse_matches(&cleaned_args);
    init_logging(matches.get_flag("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    for key in extra_params.keys() {
        warn!("ignoring unknown parameter --extra-{key}");
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                eprintln!("Error: an input file is required");
                std::process::exit(1);
            };
            let (from, to) = resolve_formats(
                input,
                sub_matches.get_one::<String>("from").map(|s| s.as_str()),
                sub_matches.get_one::<String>("to").map(|s| s.as_str()),
            )
            .unwrap_or_else(|message| {
                eprintln!("Error: {message}");
                std::process::exit(1);
            });
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, from, to, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Parse the command line, treating a leading file argument as an implicit `convert`.
fn parse_matches(args: &[String]) -> ArgMatches {
    let cli = build_cli();
    match cli.clone().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => {
            let implicit_convert = args
                .get(1)
                .is_some_and(|first| !first.starts_with('-') && first != "convert" && first != "help");
            if !implicit_convert {
                err.exit();
            }

            let mut injected = vec![args[0].clone(), "convert".to_string()];
            injected.extend_from_slice(&args[1..]);
            match cli.try_get_matches_from(&injected) {
                Ok(matches) => matches,
                Err(err) => err.exit(),
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::INFO } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Pick source and target formats from the explicit flags and the input path.
fn resolve_formats(
    input: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(DocumentFormat, DocumentFormat), String> {
    let from = match from {
        Some(name) => {
            DocumentFormat::from_name(name).ok_or_else(|| format!("Unknown format '{name}'"))?
        }
        None => DocumentFormat::from_path(Path::new(input)).ok_or_else(|| {
            format!("Could not detect format from filename '{input}'. Please specify --from explicitly")
        })?,
    };
    let to = match to {
        Some(name) => {
            DocumentFormat::from_name(name).ok_or_else(|| format!("Unknown format '{name}'"))?
        }
        None => from.counterpart(),
    };
    info!(%from, %to, "resolved formats");
    Ok((from, to))
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: DocumentFormat,
    to: DocumentFormat,
    output: Option<&str>,
    config: &MdsyncConfig,
) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let converter = Converter::new(ConvertOptions::from(&config.convert.html));
    let converted = converter.convert(&source, from, to).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });
    let text = finish_output(converted, to, config);

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            info!(path, "wrote {to} output");
        }
        None => print!("{text}"),
    }
}

/// Apply output conventions that live outside the converter.
fn finish_output(mut text: String, to: DocumentFormat, config: &MdsyncConfig) -> String {
    if to == DocumentFormat::Markdown
        && config.convert.markdown.trailing_newline
        && !text.is_empty()
        && !text.ends_with('\n')
    {
        text.push('\n');
    }
    text
}

fn load_cli_config(explicit_path: Option<&str>) -> MdsyncConfig {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        info!(path, "loading configuration file");
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut MdsyncConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("link-target-blank") {
        config.convert.html.link_target_blank = parse_bool_arg("link-target-blank", &raw);
    }
    if let Some(raw) = extra_params.remove("trailing-newline") {
        config.convert.markdown.trailing_newline = parse_bool_arg("trailing-newline", &raw);
    }
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
