// Command-line interface for grammardoc
//
// This binary renders grammar files into HTML documentation.
//
// The main role of the grammardoc program is to interface with grammar
// content: parsing it, rendering the rule catalog to HTML and exposing the
// internal representations for debugging. The core capabilities live in the
// grammardoc-render crate; this crate is the shell around that library.
//
// Rendering:
//
// One or more grammar files are parsed up front; a syntax error in ANY of
// them aborts the whole batch before anything is rendered. Output goes to
// stdout by default, or to a file with -o.
// Usage:
//  grammardoc <files>... [-o <file>] [--complete-html]    - Render (default)
//  grammardoc render <files>... [options]                 - Same, explicit
//  grammardoc inspect <path> [tokens|ast|token-map]       - Dump internals as JSON
//  grammardoc generate-css                                - Print the baseline CSS
//
// Configuration:
//
// Defaults are embedded; a grammardoc.toml in the working directory (or the
// file named by --config) layers on top, and CLI flags win over everything.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use grammardoc_config::{GrammardocConfig, Loader};
use grammardoc_render::{
    collect::collect, render_body, render_document, tokens::build_token_map, HtmlOptions,
    HtmlTheme, RenderOptions,
};
use grammardoc_syntax::{parse_grammar, GrammarFile};
use std::fs;

const INSPECT_VIEWS: &[&str] = &["tokens", "ast", "token-map"];

fn build_cli() -> Command {
    Command::new("grammardoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A documentation generator for grammar files")
        .long_about(
            "grammardoc renders ANTLR4-style grammar files as cross-linked HTML.\n\n\
            Commands:\n  \
            - render: Produce HTML documentation (default command)\n  \
            - inspect: View internal representations (tokens, AST, token map)\n\n\
            Examples:\n  \
            grammardoc Expr.g4                         # Render fragments to stdout\n  \
            grammardoc Expr.g4 --complete-html -o doc.html\n  \
            grammardoc Lexer.g4 Parser.g4 --sort-lexical -o doc.html\n  \
            grammardoc inspect Expr.g4 token-map       # Show the simple-token map",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a grammardoc.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render grammar files to HTML documentation (default command)")
                .long_about(
                    "Render one or more grammar files to HTML.\n\n\
                    Files are logically concatenated: token rules from every file share\n\
                    one batch, so cross-file references link up. Output is a sequence of\n\
                    fragments by default; --complete-html wraps them in a standalone\n\
                    document with embedded CSS.\n\n\
                    Examples:\n  \
                    grammardoc render Expr.g4                        # Fragments to stdout\n  \
                    grammardoc render Expr.g4 --complete-html        # Full document\n  \
                    grammardoc render Expr.g4 --keep-simple-tokens   # Keep pure-literal rules\n  \
                    grammardoc render Expr.g4 --preserve-layout      # Keep comments/whitespace",
                )
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
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("complete-html")
                        .long("complete-html")
                        .help("Wrap the fragments in a complete HTML document")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("html-title")
                        .long("html-title")
                        .value_name("TITLE")
                        .help("Document title for --complete-html"),
                )
                .arg(
                    Arg::new("theme")
                        .long("theme")
                        .value_name("NAME")
                        .help("CSS theme for --complete-html (modern, slate)"),
                )
                .arg(
                    Arg::new("css")
                        .long("css")
                        .value_name("PATH")
                        .help("Custom CSS file appended after the embedded styles (repeatable)")
                        .action(ArgAction::Append)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("sort-lexical")
                        .long("sort-lexical")
                        .help("Sort rules by name instead of declaration order")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("keep-simple-tokens")
                        .long("keep-simple-tokens")
                        .help("Render pure-literal token rules instead of omitting them")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("preserve-layout")
                        .long("preserve-layout")
                        .help("Reproduce original whitespace and comments in rule bodies")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect internal representations of grammar files")
                .long_about(
                    "View the internal structure of a grammar file as JSON.\n\n\
                    Views:\n  \
                    - tokens:    The flat token stream, hidden tokens included\n  \
                    - ast:       The parsed grammar tree (default)\n  \
                    - token-map: The simple-token substitution map\n\n\
                    Examples:\n  \
                    grammardoc inspect Expr.g4             # AST as JSON\n  \
                    grammardoc inspect Expr.g4 tokens      # Token stream\n  \
                    grammardoc inspect Expr.g4 token-map   # Name → literal map",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the grammar file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("View to dump. Defaults to 'ast'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_VIEWS))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the default CSS used for HTML export")
                .long_about(
                    "Outputs the baseline CSS embedded by --complete-html.\n\n\
                    Use this as a starting point for custom styling: save it, edit it,\n\
                    then pass the result back via --css.\n\n\
                    Examples:\n  \
                    grammardoc generate-css                 # Print CSS to stdout\n  \
                    grammardoc generate-css > custom.css    # Save to file for editing",
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "render"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // If the first arg looks like a file rather than a subcommand,
            // retry with "render" injected
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "render"
                && args[1] != "inspect"
                && args[1] != "generate-css"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "render".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    match matches.subcommand() {
        Some(("render", sub_matches)) => {
            let config = load_cli_config(&matches, sub_matches);
            handle_render_command(sub_matches, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or("ast");
            handle_inspect_command(path, view);
        }
        Some(("generate-css", _)) => {
            print!("{}", grammardoc_render::html::BASELINE_CSS);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Layer the configuration sources: embedded defaults, then grammardoc.toml
/// (or the --config file), then the render flags.
fn load_cli_config(matches: &ArgMatches, sub_matches: &ArgMatches) -> GrammardocConfig {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("grammardoc.toml"),
    };

    let flag_overrides: &[(&str, &str)] = &[
        ("sort-lexical", "render.sort_lexical"),
        ("preserve-layout", "render.preserve_layout"),
        ("complete-html", "html.complete"),
    ];
    for (flag, key) in flag_overrides {
        if sub_matches.get_flag(flag) {
            loader = loader.set_override(*key, true).unwrap_or_else(|e| {
                eprintln!("Error applying --{flag}: {e}");
                std::process::exit(1);
            });
        }
    }
    if sub_matches.get_flag("keep-simple-tokens") {
        loader = loader
            .set_override("render.skip_simple_tokens", false)
            .unwrap_or_else(|e| {
                eprintln!("Error applying --keep-simple-tokens: {e}");
                std::process::exit(1);
            });
    }
    if let Some(title) = sub_matches.get_one::<String>("html-title") {
        loader = loader
            .set_override("html.title", title.as_str())
            .unwrap_or_else(|e| {
                eprintln!("Error applying --html-title: {e}");
                std::process::exit(1);
            });
    }
    if let Some(theme) = sub_matches.get_one::<String>("theme") {
        loader = loader
            .set_override("html.theme", theme.as_str())
            .unwrap_or_else(|e| {
                eprintln!("Error applying --theme: {e}");
                std::process::exit(1);
            });
    }

    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {e}");
        std::process::exit(1);
    })
}

/// Parse every input up front; a syntax error anywhere aborts the batch
/// before any rendering happens.
fn parse_batch(paths: &[&String]) -> Vec<GrammarFile> {
    let mut parsed = Vec::new();
    let mut failures = Vec::new();
    for path in paths {
        let source = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{path}': {e}");
            std::process::exit(1);
        });
        match parse_grammar(&source) {
            Ok(file) => parsed.push(file),
            Err(e) => failures.push(format!("{path}:{e}")),
        }
    }
    if !failures.is_empty() {
        eprintln!("Error: syntax error in grammar file(s):");
        for failure in &failures {
            eprintln!("  {failure}");
        }
        std::process::exit(1);
    }
    parsed
}

/// Handle the render command
fn handle_render_command(sub_matches: &ArgMatches, config: &GrammardocConfig) {
    let paths: Vec<&String> = sub_matches
        .get_many::<String>("files")
        .expect("files are required")
        .collect();
    let files = parse_batch(&paths);

    let options: RenderOptions = (&config.render).into();
    let html = if config.html.complete {
        let mut html_options = HtmlOptions::new(HtmlTheme::from_name(&config.html.theme))
            .with_title(config.html.title.clone());
        if let Some(css_paths) = sub_matches.get_many::<String>("css") {
            let mut custom = String::new();
            for path in css_paths {
                let css = fs::read_to_string(path).unwrap_or_else(|e| {
                    eprintln!("Error reading file '{path}': {e}");
                    std::process::exit(1);
                });
                custom.push_str(&css);
                custom.push('\n');
            }
            html_options = html_options.with_custom_css(custom);
        }
        render_document(&files, &options, &html_options)
    } else {
        render_body(&files, &options)
    }
    .unwrap_or_else(|e| {
        eprintln!("Rendering error: {e}");
        std::process::exit(1);
    });

    match sub_matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, html).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{html}"),
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, view: &str) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });
    let file = parse_grammar(&source).unwrap_or_else(|e| {
        eprintln!("Error: syntax error in grammar file(s):");
        eprintln!("  {path}:{e}");
        std::process::exit(1);
    });

    let json = match view {
        "tokens" => serde_json::to_string_pretty(file.tokens.tokens()),
        "token-map" => {
            let files = [file];
            let collected = collect(&files);
            serde_json::to_string_pretty(&build_token_map(&collected.lexer_rules))
        }
        _ => serde_json::to_string_pretty(&file),
    }
    .unwrap_or_else(|e| {
        eprintln!("Error serializing {view}: {e}");
        std::process::exit(1);
    });

    println!("{json}");
}
