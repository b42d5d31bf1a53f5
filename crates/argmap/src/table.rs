use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::error::ParseError;
use crate::spec::{Decoder, Entry, Spec};

/// One validated option binding.
pub(crate) struct Binding<'s> {
    pub decoder: &'s Decoder,
    pub repeated: bool,
}

/// Lookup tables built from a [`Spec`] before scanning starts.
///
/// Built fresh per parse; alias chains are flattened here so the scan loop
/// resolves any spelling with a single lookup.
pub(crate) struct HandlerTable<'s> {
    bindings: HashMap<&'s str, Binding<'s>>,
    aliases: HashMap<&'s str, &'s str>,
}

impl fmt::Debug for HandlerTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .field("aliases", &self.aliases)
            .finish()
    }
}

impl<'s> HandlerTable<'s> {
    pub fn build(spec: &'s Spec) -> Result<Self, ParseError> {
        let mut bindings: HashMap<&str, Binding<'_>> = HashMap::new();
        let mut raw_aliases: HashMap<&str, &str> = HashMap::new();

        for (key, entry) in spec.entries() {
            if key.is_empty() {
                return Err(ParseError::EmptyKey);
            }
            if !key.starts_with('-') {
                return Err(ParseError::KeyWithoutHyphen(key.to_string()));
            }
            if key == "-" {
                return Err(ParseError::BareHyphenKey);
            }

            match entry {
                Entry::Alias(target) => {
                    raw_aliases.insert(key, target.as_str());
                }
                Entry::Single(decoder) | Entry::Repeated(decoder) => {
                    // Short keys must be combinable, so exactly one
                    // character after the hyphen. Alias keys are exempt.
                    if !key.starts_with("--") && key.chars().count() > 2 {
                        return Err(ParseError::ShortKeyTooLong(key.to_string()));
                    }
                    bindings.insert(
                        key,
                        Binding {
                            decoder,
                            repeated: matches!(entry, Entry::Repeated(_)),
                        },
                    );
                }
            }
        }

        // Flatten every alias chain to its terminal name. A chain longer
        // than the alias map must be revisiting a key.
        let mut aliases: HashMap<&str, &str> = HashMap::with_capacity(raw_aliases.len());
        for &start in raw_aliases.keys() {
            let mut name = start;
            let mut steps = 0usize;
            while let Some(&target) = raw_aliases.get(name) {
                steps += 1;
                if steps > raw_aliases.len() {
                    return Err(ParseError::AliasLoop(start.to_string()));
                }
                name = target;
            }
            aliases.insert(start, name);
        }

        trace!(
            options = bindings.len(),
            aliases = aliases.len(),
            "built handler table"
        );

        Ok(Self { bindings, aliases })
    }

    /// Resolve a user-typed name to its canonical spelling. Names that are
    /// not aliases resolve to themselves.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).copied().unwrap_or(name)
    }

    pub fn binding(&self, canonical: &str) -> Option<&Binding<'s>> {
        self.bindings.get(canonical)
    }
}
