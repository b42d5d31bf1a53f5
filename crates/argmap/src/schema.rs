//! Declarative argument specifications loaded from JSON documents.
//!
//! The document is a single object mapping option keys to entries:
//!
//! ```json
//! {
//!   "--format": "string",
//!   "-f": "--format",
//!   "--jobs": "number",
//!   "--tag": ["string"],
//!   "--verbose": "count",
//!   "--force": "boolean"
//! }
//! ```
//!
//! A string value starting with `-` declares an alias; any other string
//! names a built-in decoder (`string`, `number`, `boolean`/`bool`,
//! `count`); a one-element array of a decoder name declares the option
//! repeatable. Key shapes are validated later, when a parse builds its
//! handler table.

use crate::error::ParseError;
use crate::spec::{Decoder, Spec};

/// Build a [`Spec`] from a JSON document.
///
/// Fails with [`ParseError::SpecificationRequired`] when the document is
/// not an object (including `null`), and with [`ParseError::InvalidType`]
/// for an entry that is neither an alias, a decoder name, nor a
/// one-element array of one.
pub fn from_json(doc: &serde_json::Value) -> Result<Spec, ParseError> {
    let Some(entries) = doc.as_object() else {
        return Err(ParseError::SpecificationRequired);
    };

    let mut spec = Spec::new();
    for (key, entry) in entries {
        spec = match entry {
            serde_json::Value::String(target) if target.starts_with('-') => {
                spec.alias(key, target)
            }
            serde_json::Value::String(name) => spec.option(key, decoder_by_name(key, name)?),
            serde_json::Value::Array(items) => match items.as_slice() {
                [serde_json::Value::String(name)] => {
                    spec.repeated(key, decoder_by_name(key, name)?)
                }
                _ => return Err(ParseError::InvalidType(key.clone())),
            },
            _ => return Err(ParseError::InvalidType(key.clone())),
        };
    }

    Ok(spec)
}

fn decoder_by_name(key: &str, name: &str) -> Result<Decoder, ParseError> {
    match name {
        "string" => Ok(Decoder::string()),
        "number" => Ok(Decoder::number()),
        "boolean" | "bool" => Ok(Decoder::boolean()),
        "count" => Ok(Decoder::count()),
        _ => Err(ParseError::InvalidType(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::scan::{parse, parse_with, ParseOptions};
    use crate::value::Value;
    use serde_json::json;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn builds_the_same_spec_as_the_builder_api() {
        let doc = json!({
            "--format": "string",
            "-f": "--format",
            "--jobs": "number",
            "--tag": ["string"],
            "--verbose": "count",
            "--force": "boolean"
        });
        let spec = from_json(&doc).unwrap();
        let m = parse(
            &spec,
            &argv(&["-f", "json", "--tag", "a", "--tag", "b", "--verbose", "--jobs", "4", "in.txt"]),
        )
        .unwrap();
        assert_eq!(m.get("--format"), Some(&Value::Str("json".to_string())));
        assert_eq!(
            m.get_all("--tag").unwrap(),
            &[Value::Str("a".to_string()), Value::Str("b".to_string())]
        );
        assert_eq!(m.get("--verbose"), Some(&Value::Int(1)));
        assert_eq!(m.get("--jobs"), Some(&Value::Float(4.0)));
        assert_eq!(m.positional(), vec!["in.txt".to_string()]);
    }

    #[test]
    fn null_document_requires_a_specification() {
        assert_eq!(
            from_json(&serde_json::Value::Null).unwrap_err(),
            ParseError::SpecificationRequired
        );
        assert_eq!(
            from_json(&json!(["--foo"])).unwrap_err(),
            ParseError::SpecificationRequired
        );
    }

    #[test]
    fn rejects_unknown_decoder_names() {
        let err = from_json(&json!({"--foo": "decimal"})).unwrap_err();
        assert_eq!(err, ParseError::InvalidType("--foo".to_string()));
        assert_eq!(err.code(), ErrorCode::InvalidType);
    }

    #[test]
    fn rejects_malformed_array_entries() {
        assert_eq!(
            from_json(&json!({"--foo": []})).unwrap_err(),
            ParseError::InvalidType("--foo".to_string())
        );
        assert_eq!(
            from_json(&json!({"--foo": ["string", "number"]})).unwrap_err(),
            ParseError::InvalidType("--foo".to_string())
        );
        assert_eq!(
            from_json(&json!({"--foo": [1]})).unwrap_err(),
            ParseError::InvalidType("--foo".to_string())
        );
    }

    #[test]
    fn rejects_non_string_non_array_entries() {
        assert_eq!(
            from_json(&json!({"--foo": 10})).unwrap_err(),
            ParseError::InvalidType("--foo".to_string())
        );
        assert_eq!(
            from_json(&json!({"--foo": null})).unwrap_err(),
            ParseError::InvalidType("--foo".to_string())
        );
    }

    #[test]
    fn key_shape_problems_surface_at_parse_time() {
        let spec = from_json(&json!({"bar": "string"})).unwrap();
        let err = parse(&spec, &argv(&[])).unwrap_err();
        assert_eq!(err, ParseError::KeyWithoutHyphen("bar".to_string()));
    }

    #[test]
    fn declarative_specs_honor_parse_options() {
        let spec = from_json(&json!({"--known": "boolean"})).unwrap();
        let m = parse_with(
            &spec,
            &argv(&["--known", "--mystery"]),
            ParseOptions::new().permissive(true),
        )
        .unwrap();
        assert_eq!(m.get("--known"), Some(&Value::Bool(true)));
        assert_eq!(m.positional(), vec!["--mystery".to_string()]);
    }
}
