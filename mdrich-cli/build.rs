use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["model-tag", "model-json", "segments", "report"];

fn file_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format")
        .value_hint(ValueHint::Other)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdrich")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Round-trip markdown through an attributed text model")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a mdrich.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Raise the log level")
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the attributed text imported from a file")
                .arg(file_arg("path", "Path to the document"))
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2),
                )
                .arg(from_arg()),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .arg(file_arg("input", "Input file path"))
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .value_parser(["markdown", "json", "tag", "text"]),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("select")
                .about("Export the markdown of a character range")
                .arg(file_arg("path", "Path to the document"))
                .arg(Arg::new("start").long("start").help("First character"))
                .arg(Arg::new("end").long("end").help("Character after the selection"))
                .arg(from_arg()),
        );

    generate_to(Bash, &mut cmd, "mdrich", &outdir)?;
    generate_to(Zsh, &mut cmd, "mdrich", &outdir)?;
    generate_to(Fish, &mut cmd, "mdrich", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
