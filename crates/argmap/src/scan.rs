use std::borrow::Cow;

use tracing::trace;

use crate::error::ParseError;
use crate::matches::Matches;
use crate::spec::{Decoder, DecoderKind, Spec};
use crate::table::HandlerTable;
use crate::value::Value;

/// Scanner behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep unknown options as positional tokens instead of failing.
    pub permissive: bool,
    /// Stop option scanning at the first positional token; everything from
    /// there on lands in positional output verbatim.
    pub stop_at_positional: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permissive(mut self, yes: bool) -> Self {
        self.permissive = yes;
        self
    }

    pub fn stop_at_positional(mut self, yes: bool) -> Self {
        self.stop_at_positional = yes;
        self
    }
}

/// Parse `argv` against `spec` with default options.
pub fn parse(spec: &Spec, argv: &[String]) -> Result<Matches, ParseError> {
    parse_with(spec, argv, ParseOptions::default())
}

/// Parse `argv` against `spec`.
///
/// Builds the handler table, then scans the tokens left to right in a
/// single pass. The first error aborts the parse; no partial result is
/// returned.
pub fn parse_with(spec: &Spec, argv: &[String], options: ParseOptions) -> Result<Matches, ParseError> {
    let table = HandlerTable::build(spec)?;
    scan(&table, argv, options)
}

/// Parse the ambient process arguments (skipping the program name).
///
/// Thin adapter over [`parse_with`]; the argument list is snapshotted once
/// at call start.
pub fn parse_env_args(spec: &Spec, options: ParseOptions) -> Result<Matches, ParseError> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_with(spec, &argv, options)
}

fn scan(table: &HandlerTable<'_>, argv: &[String], options: ParseOptions) -> Result<Matches, ParseError> {
    let mut matches = Matches::default();

    let mut i = 0usize;
    while i < argv.len() {
        let whole = argv[i].as_str();

        // Once anything positional has accumulated, the remainder is
        // handed off verbatim, whatever it looks like.
        if options.stop_at_positional && matches.has_positional() {
            matches.extend_positional(&argv[i..]);
            break;
        }

        // Too short to be an option: bare `-` or empty string.
        if whole.chars().count() < 2 {
            matches.push_positional(whole);
            i += 1;
            continue;
        }

        if whole == "--" {
            matches.extend_positional(&argv[i + 1..]);
            break;
        }

        if !whole.starts_with('-') {
            matches.push_positional(whole);
            i += 1;
            continue;
        }

        // A long option (or a lone short option) is one unit; a longer
        // single-hyphen token is a combined cluster, one unit per
        // character, processed in place.
        let units: Vec<Cow<'_, str>> = if whole.starts_with("--") || whole.chars().count() == 2 {
            vec![Cow::Borrowed(whole)]
        } else {
            whole[1..].chars().map(|c| Cow::Owned(format!("-{c}"))).collect()
        };

        let last = units.len() - 1;
        for (j, unit) in units.iter().enumerate() {
            let unit = unit.as_ref();

            // Only long options split on the first `=`.
            let (written_name, inline) = if unit.starts_with("--") {
                match unit.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (unit, None),
                }
            } else {
                (unit, None)
            };

            let canonical = table.canonical(written_name);

            let Some(binding) = table.binding(canonical) else {
                if options.permissive {
                    matches.push_positional(unit);
                    continue;
                }
                return Err(ParseError::UnknownOption(written_name.to_string()));
            };

            // A value-consuming option can only claim the next token from
            // the end of a cluster.
            if !binding.decoder.is_flag_like() && j < last {
                return Err(ParseError::ClusterMissingArgument(written_name.to_string()));
            }

            let value = match binding.decoder.kind() {
                DecoderKind::Bool => Value::Bool(true),
                DecoderKind::Flag(run) => run(canonical, matches.get(canonical))?,
                DecoderKind::Value(run) => {
                    let raw = match inline {
                        Some(raw) => raw,
                        None => match argv.get(i + 1) {
                            Some(next) if eligible_value(next, binding.decoder) => {
                                i += 1;
                                next.as_str()
                            }
                            _ => {
                                return Err(ParseError::MissingArgument {
                                    option: written_name.to_string(),
                                    canonical: (written_name != canonical)
                                        .then(|| canonical.to_string()),
                                });
                            }
                        },
                    };
                    run(raw, canonical, matches.get(canonical))?
                }
            };

            matches.store(canonical, value, binding.repeated);
        }

        i += 1;
    }

    trace!(
        options = matches.option_count(),
        positional = matches.positional().len(),
        "scan complete"
    );

    Ok(matches)
}

/// Whether the following token may be consumed as an option value.
///
/// Anything option-shaped is refused, except a negative number offered to
/// a numeric decoder.
fn eligible_value(token: &str, decoder: &Decoder) -> bool {
    if !token.starts_with('-') || token == "-" {
        return true;
    }
    decoder.is_numeric() && numeric_shaped(token)
}

/// Optional leading `-`, then digits with at most one interior `.` that
/// must be followed by a digit.
fn numeric_shaped(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    let mut chars = digits.chars().peekable();
    let mut seen_dot = false;
    while let Some(c) = chars.next() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot && matches!(chars.peek(), Some('0'..='9')) => seen_dot = true,
            _ => return false,
        }
    }
    true
}
