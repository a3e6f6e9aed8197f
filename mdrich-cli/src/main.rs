// Command-line interface for mdrich
//
// This binary converts documents between markdown and the attributed text model, exports
// selections, and inspects how a markdown file was imported.
//
// The core capabilities live in the mdrich-babel crate; this crate wires them to files, the
// layered configuration from mdrich-config, and logging.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  mdrich <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  mdrich convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  mdrich inspect <path> [<transform>]            - Show the imported model (defaults to "model-tag")
//  mdrich select <path> --start <N> --end <M>     - Export the markdown of a char range
//  mdrich --list-formats                          - List formats and transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/transform.
// Import settings (smart-punctuation, bullet, rule-glyph) are consumed as config overrides.
// Example:
//  mdrich notes.md --to markdown --extra-fence tilde --extra-range 0..120

use mdrich_cli::transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use mdrich_babel::formats::markdown::{parse_with_options, MarkdownFormat};
use mdrich_babel::{serialize_range, FormatRegistry, ImportReport, Imported};
use mdrich_config::{load_defaults, ConfigError, Loader, MdrichConfig};
use std::collections::HashMap;
use std::fs;

const LOCAL_CONFIG: &str = "mdrich.toml";

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

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

fn build_cli() -> Command {
    Command::new("mdrich")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Round-trip markdown through an attributed text model")
        .long_about(
            "mdrich converts markdown into an attributed text model (plain text plus style\n\
            ranges) and back, the way a rich text editor loads and saves markdown.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (markdown, json, tag, text)\n  \
            - inspect: View the imported model and the import report\n  \
            - select:  Export the markdown of a character range\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mdrich notes.md --to markdown              # Normalize markdown (stdout)\n  \
            mdrich notes.md --to json -o notes.json    # Save the model as json\n  \
            mdrich inspect notes.md segments           # Runs of constant style\n  \
            mdrich select notes.md --start 4 --end 9   # Markdown of a selection",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mdrich.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Raise the log level (repeatable)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the attributed text imported from a file")
                .long_about(
                    "View the attributed text model a file imports to.\n\n\
                    Transforms:\n  \
                    - model-tag:   Lines and styled runs as XML-like tags (default)\n  \
                    - model-json:  The json save format\n  \
                    - segments:    One row per run of constant style\n  \
                    - report:      Constructs imported best-effort\n\n\
                    Extra Parameters:\n  \
                    --extra-show-offsets  Annotate model-tag output with char offsets\n\n\
                    Examples:\n  \
                    mdrich inspect notes.md                        # Tag dump (default)\n  \
                    mdrich inspect notes.md report                 # What was lost\n  \
                    mdrich inspect notes.md --extra-show-offsets   # Tag dump with offsets",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the document")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'model-tag'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markdown: CommonMark (.md)\n  \
                    - json:     Attributed text save format (.json)\n  \
                    - tag:      XML-like run dump (output only)\n  \
                    - text:     Plain text, styles dropped (.txt)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    mdrich convert notes.md --to json -o notes.json   # Save the model\n  \
                    mdrich convert notes.json --to markdown           # Load it back\n  \
                    mdrich notes.md --to markdown --extra-fence tilde # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("select")
                .about("Export the markdown of a character range")
                .long_about(
                    "Export only the characters [start, end) of the imported document as\n\
                    markdown, the way a copy of an editor selection would.\n\n\
                    Offsets count characters of the model text (see 'inspect segments').\n\
                    Out-of-range offsets are clamped; reversed offsets are swapped.\n\n\
                    Examples:\n  \
                    mdrich select notes.md --start 0 --end 12",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the document")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help("First character of the selection")
                        .required(true)
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .help("Character after the selection")
                        .required(true)
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !["inspect", "convert", "select", "help"].contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let mut config = match load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()))
    {
        Ok(config) => {
            init_logging(&config, matches.get_count("verbose"));
            config
        }
        Err(err) => {
            let config = load_defaults().unwrap_or_else(|e| {
                eprintln!("Failed to load built-in configuration: {e}");
                std::process::exit(1);
            });
            init_logging(&config, matches.get_count("verbose"));
            log::warn!("Failed to load configuration ({err}); using built-in defaults");
            config
        }
    };
    apply_config_overrides(&mut config, &mut extra_params);
    if let Err(err) = config.validate() {
        eprintln!("Invalid settings: {err}");
        std::process::exit(1);
    }

    let registry = build_registry(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = required_arg(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            let from = resolve_from(&registry, path, sub_matches.get_one::<String>("from"));
            handle_inspect_command(&registry, path, &from, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            let to = required_arg(sub_matches, "to");
            let from = resolve_from(&registry, input, sub_matches.get_one::<String>("from"));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, &extra_params);
        }
        Some(("select", sub_matches)) => {
            let path = required_arg(sub_matches, "path");
            let start = sub_matches.get_one::<usize>("start").copied().unwrap_or(0);
            let end = sub_matches.get_one::<usize>("end").copied().unwrap_or(0);
            let from = resolve_from(&registry, path, sub_matches.get_one::<String>("from"));
            handle_select_command(&registry, path, &from, start..end, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required_arg<'a>(matches: &'a clap::ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or_else(|| {
            eprintln!("Error: missing required argument '{name}'");
            std::process::exit(1);
        })
}

fn init_logging(config: &MdrichConfig, verbosity: u8) {
    let level = config.logging.level.raised(verbosity);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();
}

fn build_registry(config: &MdrichConfig) -> FormatRegistry {
    FormatRegistry::with_markdown(MarkdownFormat::new(
        config.import_options(),
        config.export_options(),
    ))
}

/// Explicit --from wins, otherwise the input's extension decides.
fn resolve_from(registry: &FormatRegistry, input: &str, from_arg: Option<&String>) -> String {
    if let Some(f) = from_arg {
        return f.to_string();
    }
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Load a document, keeping the import report when it comes from markdown.
fn load_document(
    registry: &FormatRegistry,
    path: &str,
    from: &str,
    config: &MdrichConfig,
) -> Imported {
    let source = read_source(path);
    let result = if from == "markdown" {
        parse_with_options(&source, &config.import_options())
    } else {
        registry.parse(&source, from).map(|text| Imported {
            text,
            report: ImportReport::default(),
        })
    };
    let imported = result.unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    log::info!(
        "loaded '{path}' as {from}: {} chars, {} styles",
        imported.text.len(),
        imported.text.styles().len()
    );
    for degradation in &imported.report.degradations {
        log::warn!("{path}: {degradation}");
    }
    imported
}

/// Handle the inspect command
fn handle_inspect_command(
    registry: &FormatRegistry,
    path: &str,
    from: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &MdrichConfig,
) {
    let imported = load_document(registry, path, from, config);
    let params = build_inspect_params(config, extra_params);

    let output = transforms::execute_transform(&imported, transform, &params).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
) {
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let source = read_source(input);

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let result = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Handle the select command
fn handle_select_command(
    registry: &FormatRegistry,
    path: &str,
    from: &str,
    range: std::ops::Range<usize>,
    config: &MdrichConfig,
) {
    let imported = load_document(registry, path, from, config);
    print!(
        "{}",
        serialize_range(&imported.text, range, &config.export_options())
    );
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Conversion formats:");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let mut modes = Vec::new();
            if format.supports_parsing() {
                modes.push("read");
            }
            if format.supports_serialization() {
                modes.push("write");
            }
            println!(
                "  {name:<10} {:<44} [{}]",
                format.description(),
                modes.join("/")
            );
        }
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> Result<MdrichConfig, ConfigError> {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    loader.build()
}

/// Move import settings given as --extra-* into the config; the rest stay format options.
fn apply_config_overrides(config: &mut MdrichConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["smart", "smart-punctuation"]) {
        config.import.smart_punctuation = parse_bool_arg("smart-punctuation", &raw);
    }
    if let Some(raw) = extra_params.remove("bullet") {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(bullet @ ('*' | '-' | '+')), None) => config.import.bullet = bullet,
            _ => {
                eprintln!("Invalid bullet '{raw}' for --extra-bullet, expected one of * - +");
                std::process::exit(1);
            }
        }
    }
    if let Some(raw) = take_override(extra_params, &["rule-glyph", "glyph"]) {
        config.import.rule_glyph = raw;
    }
    if let Some(raw) = extra_params.remove("show-offsets") {
        config.inspect.show_offsets = parse_bool_arg("show-offsets", &raw);
    }
}

fn build_inspect_params(
    config: &MdrichConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    params.insert(
        "show-offsets".to_string(),
        config.inspect.show_offsets.to_string(),
    );

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
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
