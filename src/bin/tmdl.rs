//! Command-line interface for tmdl
//! This binary inspects, formats and round-trip checks tmdl files.
//!
//! Usage:
//!   tmdl tokens `<path>`                                   - Dump the token stream of a file
//!   tmdl parse `<path>` [--kind `<kind>`] [--format `<fmt>`]   - Parse and print the tree
//!   tmdl format `<path>` [--kind `<kind>`] [--write]         - Print or write canonical text
//!   tmdl check `<path>`... [--kind `<kind>`]                 - Verify the round trip of each file
//!   tmdl list-formats                                      - List the output formats
//!
//! Every subcommand accepts `--config <file>` to layer a TOML file over the defaults.
//! `RUST_LOG` takes precedence over the configured log filter.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;
use tmdl::tmdl::config::{Loader, TmdlConfig};
use tmdl::tmdl::formats::{serialize_with, FormatRegistry};
use tmdl::tmdl::loader::{write_file, ModelFile};
use tmdl::tmdl::parsing::FileKind;
use tmdl::tmdl::pipeline::check_round_trip;
use tmdl::tmdl::token::format_token_stream;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("tmdl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and formatting tabular model definition files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in configuration"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a file")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print its tree")
                .arg(path_arg())
                .arg(kind_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats); defaults to inspect.default_format"),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Serialize a file in canonical form")
                .arg(path_arg())
                .arg(kind_arg())
                .arg(
                    Arg::new("write")
                        .long("write")
                        .short('w')
                        .action(ArgAction::SetTrue)
                        .help("Rewrite the file in place instead of printing"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Verify that each file survives a parse/serialize round trip")
                .arg(
                    Arg::new("path")
                        .help("Paths to the tmdl files")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                )
                .arg(kind_arg()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let config = load_config(matches.get_one::<String>("config"));
    init_logging(&config);

    let result = match matches.subcommand() {
        Some(("tokens", sub)) => handle_tokens_command(sub),
        Some(("parse", sub)) => handle_parse_command(sub, &config),
        Some(("format", sub)) => handle_format_command(sub, &config),
        Some(("check", sub)) => handle_check_command(sub, &config),
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            Ok(())
        }
        _ => unreachable!(),
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the tmdl file")
        .required(true)
        .index(1)
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .long("kind")
        .short('k')
        .help("File kind: database, model, table, relationships, expressions, culture, role. Inferred from the path when omitted")
}

fn load_config(path: Option<&String>) -> TmdlConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    })
}

fn init_logging(config: &TmdlConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_file(matches: &ArgMatches, path: &str) -> Result<ModelFile, String> {
    let loaded = match matches.get_one::<String>("kind") {
        Some(kind) => {
            let kind: FileKind = kind.parse()?;
            ModelFile::from_path_as(path, kind)
        }
        None => ModelFile::from_path(path),
    };
    loaded.map_err(|e| e.to_string())
}

fn required_path(matches: &ArgMatches) -> Result<&String, String> {
    matches
        .get_one::<String>("path")
        .ok_or_else(|| "missing path".to_string())
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> Result<(), String> {
    let path = required_path(matches)?;
    let source = tmdl::tmdl::loader::read_file(Path::new(path)).map_err(|e| e.to_string())?;
    let tokens = tmdl::tmdl::lexing::tokenize(&source);
    print!("{}", format_token_stream(&tokens));
    Ok(())
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches, config: &TmdlConfig) -> Result<(), String> {
    let file = load_file(matches, required_path(matches)?)?;
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or(config.inspect.default_format.as_str());

    let outcome = file.parse();
    if config.inspect.show_warnings {
        for warning in &outcome.warnings {
            eprintln!("warning: {}: {}", file.path.display(), warning);
        }
    }

    let registry = FormatRegistry::with_options(config.formatting.serialize_options());
    let output = registry
        .serialize(&outcome.file, format)
        .map_err(|e| e.to_string())?;
    print!("{}", output);
    Ok(())
}

/// Handle the format command
fn handle_format_command(matches: &ArgMatches, config: &TmdlConfig) -> Result<(), String> {
    let file = load_file(matches, required_path(matches)?)?;
    let outcome = file.parse();
    let text = serialize_with(&outcome.file, &config.formatting.serialize_options());

    if matches.get_flag("write") {
        if text == file.source {
            tracing::info!(path = %file.path.display(), "already canonical");
            return Ok(());
        }
        write_file(&file.path, &text).map_err(|e| e.to_string())?;
        println!("formatted {}", file.path.display());
    } else {
        print!("{}", text);
    }
    Ok(())
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches, config: &TmdlConfig) -> Result<(), String> {
    let paths: Vec<&String> = matches
        .get_many::<String>("path")
        .map(|values| values.collect())
        .unwrap_or_default();
    let options = config.formatting.serialize_options();
    let mut failures = 0;

    for path in paths {
        let file = match load_file(matches, path) {
            Ok(file) => file,
            Err(message) => {
                eprintln!("FAIL {}: {}", path, message);
                failures += 1;
                continue;
            }
        };
        match check_round_trip(&file.source, file.kind, &options, config.check.fail_on_warnings) {
            Ok(result) => {
                let note = if result.serialized == file.source {
                    ""
                } else {
                    " (not canonical)"
                };
                println!("ok   {} [{}]{}", path, file.kind, note);
            }
            Err(e) => {
                eprintln!("FAIL {}: {}", path, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} file(s) failed the round trip check", failures));
    }
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for (name, description) in registry.describe_formats() {
        println!("  {}", name);
        println!("    {}", description);
    }
}
