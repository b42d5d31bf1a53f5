//! Spec-driven argument tokenizing and decoding.
//!
//! A [`Spec`] maps option keys to decoding rules: scalar options (last
//! occurrence wins), repeatable options (occurrences accumulate), and
//! aliases that resolve through chains to a canonical key. [`parse`] runs
//! a single left-to-right pass over the raw tokens, handling long options,
//! `--key=value`, POSIX-style combined short clusters (`-vvLo`), flag-like
//! decoders with access to the previous value (counters), negative-number
//! lookahead for numeric options, and the `--` terminator.
//!
//! The core is a pure function over `(spec, tokens, options)`; nothing is
//! cached or shared between calls. [`parse_env_args`] is the only
//! boundary adapter, snapshotting the process argument list once.
//!
//! ```
//! use argmap::{parse, Decoder, Spec, Value};
//!
//! let spec = Spec::new()
//!     .option("--output", Decoder::string())
//!     .alias("-o", "--output")
//!     .option("-v", Decoder::count());
//!
//! let argv: Vec<String> = ["-vv", "-o", "out.txt", "in.txt"]
//!     .iter()
//!     .map(|t| t.to_string())
//!     .collect();
//! let m = parse(&spec, &argv).unwrap();
//!
//! assert_eq!(m.get("--output"), Some(&Value::Str("out.txt".to_string())));
//! assert_eq!(m.get("-v"), Some(&Value::Int(2)));
//! assert_eq!(m.positional(), vec!["in.txt".to_string()]);
//! ```

mod error;
mod matches;
mod scan;
mod spec;
mod table;
mod value;

pub mod schema;

pub use error::{ErrorCode, ParseError};
pub use matches::Matches;
pub use scan::{ParseOptions, parse, parse_env_args, parse_with};
pub use spec::{DecodeFn, Decoder, FlagFn, Spec};
pub use value::Value;
