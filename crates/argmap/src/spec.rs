use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::value::Value;

/// Decode a raw token: `(raw, canonical_name, previous) -> value`.
///
/// `previous` is the value already stored under the canonical key, if any;
/// for repeatable options it is the accumulated list.
pub type DecodeFn =
    Arc<dyn Fn(&str, &str, Option<&Value>) -> Result<Value, ParseError> + Send + Sync>;

/// Decode a flag occurrence: `(canonical_name, previous) -> value`.
///
/// Flag decoders consume no token; the occurrence itself is the input.
pub type FlagFn = Arc<dyn Fn(&str, Option<&Value>) -> Result<Value, ParseError> + Send + Sync>;

#[derive(Clone)]
pub(crate) enum DecoderKind {
    /// Intrinsic boolean: never invoked, always yields literal `true`.
    Bool,
    /// Flag-like: invoked per occurrence, consumes no token.
    Flag(FlagFn),
    /// Value-consuming: decodes an inline `=` suffix or the next token.
    Value(DecodeFn),
}

/// A value-decoding rule for one option.
#[derive(Clone)]
pub struct Decoder {
    kind: DecoderKind,
    numeric: bool,
}

impl Decoder {
    /// Identity decoder: stores the raw token as [`Value::Str`].
    pub fn string() -> Self {
        Self::custom(|raw, _, _| Ok(Value::Str(raw.to_string())))
    }

    /// Numeric decoder: parses the raw token as `f64` into [`Value::Float`].
    ///
    /// Marked numeric, so a following token that looks like a negative
    /// number (`-5`, `-1.5`) is accepted as this option's value.
    pub fn number() -> Self {
        Self::custom(|raw, name, _| {
            raw.parse::<f64>()
                .map(Value::Float)
                .map_err(|_| ParseError::decode(format!("invalid number for option {name}: '{raw}'")))
        })
        .numeric()
    }

    /// Intrinsic boolean switch: yields literal `true`, consumes no token.
    pub fn boolean() -> Self {
        Self {
            kind: DecoderKind::Bool,
            numeric: false,
        }
    }

    /// Occurrence counter: yields `previous + 1`, starting at 1.
    pub fn count() -> Self {
        Self::flag(|_, previous| {
            let so_far = previous.and_then(Value::as_i64).unwrap_or(0);
            Ok(Value::Int(so_far + 1))
        })
    }

    /// A caller-supplied value decoder.
    pub fn custom<F>(decode: F) -> Self
    where
        F: Fn(&str, &str, Option<&Value>) -> Result<Value, ParseError> + Send + Sync + 'static,
    {
        Self {
            kind: DecoderKind::Value(Arc::new(decode)),
            numeric: false,
        }
    }

    /// A caller-supplied flag-like decoder: invoked per occurrence with the
    /// canonical name and previous value, never consuming a token.
    pub fn flag<F>(decode: F) -> Self
    where
        F: Fn(&str, Option<&Value>) -> Result<Value, ParseError> + Send + Sync + 'static,
    {
        Self {
            kind: DecoderKind::Flag(Arc::new(decode)),
            numeric: false,
        }
    }

    /// Mark the decoder numeric: a following negative-number token is then
    /// an eligible value instead of being read as another option.
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub(crate) fn kind(&self) -> &DecoderKind {
        &self.kind
    }

    /// Flag-like decoders never claim a following token.
    pub(crate) fn is_flag_like(&self) -> bool {
        matches!(self.kind, DecoderKind::Bool | DecoderKind::Flag(_))
    }

    pub(crate) fn is_numeric(&self) -> bool {
        self.numeric
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DecoderKind::Bool => "boolean",
            DecoderKind::Flag(_) => "flag",
            DecoderKind::Value(_) => "value",
        };
        f.debug_struct("Decoder")
            .field("kind", &kind)
            .field("numeric", &self.numeric)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Entry {
    /// Another key to resolve through.
    Alias(String),
    /// Scalar option: the last occurrence wins.
    Single(Decoder),
    /// Repeatable option: every occurrence appends.
    Repeated(Decoder),
}

/// An ordered mapping from option keys to decoding rules.
///
/// Keys are validated when a parse builds its handler table, not when they
/// are inserted, so a `Spec` can be assembled freely and reused across
/// parses.
#[derive(Debug, Clone, Default)]
pub struct Spec {
    entries: IndexMap<String, Entry>,
}

impl Spec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a scalar option; repeated occurrences overwrite.
    pub fn option(mut self, key: impl Into<String>, decoder: Decoder) -> Self {
        self.entries.insert(key.into(), Entry::Single(decoder));
        self
    }

    /// Declare a repeatable option; occurrences accumulate in order.
    pub fn repeated(mut self, key: impl Into<String>, decoder: Decoder) -> Self {
        self.entries.insert(key.into(), Entry::Repeated(decoder));
        self
    }

    /// Declare `key` as an alias for `target`. Targets may themselves be
    /// aliases; chains resolve at parse time.
    pub fn alias(mut self, key: impl Into<String>, target: impl Into<String>) -> Self {
        self.entries.insert(key.into(), Entry::Alias(target.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
