use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the inspect views from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const INSPECT_VIEWS: &[&str] = &["tokens", "ast", "token-map"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("grammardoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A documentation generator for grammar files")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Render grammar files to HTML documentation")
                .arg(
                    Arg::new("files")
                        .help("Grammar files to render")
                        .required(true)
                        .num_args(1..)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("complete-html")
                        .long("complete-html")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect internal representations of grammar files")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_VIEWS)),
                ),
        )
        .subcommand(Command::new("generate-css").about("Output the default CSS"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "grammardoc", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "grammardoc", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "grammardoc", &outdir)?;

    Ok(())
}
