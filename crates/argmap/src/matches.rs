use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::Value;

/// Parsed options and positional tokens.
///
/// Option values are stored under their canonical keys in encounter order;
/// repeatable options hold a [`Value::List`]. Positional tokens keep their
/// input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matches {
    values: IndexMap<String, Value>,
    positional: Vec<String>,
}

impl Matches {
    /// Get the decoded value stored under a canonical option key.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get all values of a repeatable option, in encounter order.
    pub fn get_all(&self, name: &str) -> Option<&[Value]> {
        self.values.get(name).and_then(Value::as_list)
    }

    /// Whether an option was encountered at least once.
    pub fn is_present(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Tokens not consumed as options or option values.
    pub fn positional(&self) -> &[String] {
        self.positional.as_slice()
    }

    /// Iterate over `(canonical key, value)` pairs in encounter order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Matches {
    pub(crate) fn push_positional(&mut self, token: impl Into<String>) {
        self.positional.push(token.into());
    }

    pub(crate) fn extend_positional<'a, I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        self.positional.extend(tokens.into_iter().cloned());
    }

    pub(crate) fn has_positional(&self) -> bool {
        !self.positional.is_empty()
    }

    pub(crate) fn option_count(&self) -> usize {
        self.values.len()
    }

    /// Store a decoded value: append for repeatable options, overwrite
    /// otherwise.
    pub(crate) fn store(&mut self, name: &str, value: Value, repeated: bool) {
        if repeated {
            match self.values.get_mut(name) {
                Some(Value::List(items)) => items.push(value),
                _ => {
                    self.values
                        .insert(name.to_string(), Value::List(vec![value]));
                }
            }
        } else {
            self.values.insert(name.to_string(), value);
        }
    }
}

/// Serializes to the flat result shape: positional tokens under `"_"`,
/// then one entry per canonical option key.
impl Serialize for Matches {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("_", &self.positional)?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_overwrites_scalars_and_appends_lists() {
        let mut m = Matches::default();
        m.store("--foo", Value::Str("a".to_string()), false);
        m.store("--foo", Value::Str("b".to_string()), false);
        assert_eq!(m.get("--foo"), Some(&Value::Str("b".to_string())));

        m.store("--tag", Value::Str("x".to_string()), true);
        m.store("--tag", Value::Str("y".to_string()), true);
        assert_eq!(
            m.get_all("--tag").unwrap(),
            &[Value::Str("x".to_string()), Value::Str("y".to_string())]
        );
    }

    #[test]
    fn serializes_flat_with_reserved_positional_key() {
        let mut m = Matches::default();
        m.push_positional("in.txt");
        m.store("--verbose", Value::Int(2), false);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"_":["in.txt"],"--verbose":2}"#);
    }
}
