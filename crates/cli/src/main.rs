use std::fs;

use anyhow::{Context, Result, bail};
use argmap::{Decoder, ParseOptions, Spec, Value, schema};
use tracing_subscriber::{EnvFilter, fmt};

const USAGE: &str = "\
argmap - dry-run a declarative argument grammar against a token list

Usage: argmap --spec <FILE> [OPTIONS] [--] <TOKENS>...

Options:
  -s, --spec <FILE>      JSON grammar document
  -p, --permissive       Keep unknown options as positional tokens
      --stop-at-positional
                         Stop option scanning at the first positional token
      --pretty           Pretty-print the JSON result
  -h, --help             Show this help
  -V, --version          Show version information

The grammar document is one JSON object mapping option keys to entries:
a decoder name (string, number, boolean, count), a one-element array of a
decoder name for repeatable options, or another option key for an alias.

Example:
  argmap --spec grammar.json -- -vv --output=out.txt in.txt
";

/// The binary's own argument grammar, parsed with the library itself.
fn cli_spec() -> Spec {
    Spec::new()
        .option("--spec", Decoder::string())
        .alias("-s", "--spec")
        .option("--permissive", Decoder::boolean())
        .alias("-p", "--permissive")
        .option("--stop-at-positional", Decoder::boolean())
        .option("--pretty", Decoder::boolean())
        .option("--help", Decoder::boolean())
        .alias("-h", "--help")
        .option("--version", Decoder::boolean())
        .alias("-V", "--version")
}

fn main() -> Result<()> {
    init_tracing();

    // Scanning stops at the first token that is not one of our own
    // options, so the grammar under test can be exercised without quoting.
    let args = argmap::parse_env_args(&cli_spec(), ParseOptions::new().stop_at_positional(true))
        .context("invalid arguments (see --help)")?;

    if args.is_present("--help") {
        print!("{USAGE}");
        return Ok(());
    }
    if args.is_present("--version") {
        println!("argmap {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(spec_path) = args.get("--spec").and_then(Value::as_str) else {
        bail!("missing required --spec <FILE> (see --help)");
    };

    tracing::debug!(spec = %spec_path, "loading grammar document");

    let text = fs::read_to_string(spec_path)
        .with_context(|| format!("failed to read spec file: {spec_path}"))?;
    let doc: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("spec file is not valid JSON: {spec_path}"))?;
    let spec = schema::from_json(&doc)
        .with_context(|| format!("invalid argument specification: {spec_path}"))?;

    let options = ParseOptions::new()
        .permissive(args.is_present("--permissive"))
        .stop_at_positional(args.is_present("--stop-at-positional"));

    let tokens = args.positional().to_vec();
    let result = argmap::parse_with(&spec, &tokens, options)?;

    let rendered = if args.is_present("--pretty") {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{rendered}");

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
