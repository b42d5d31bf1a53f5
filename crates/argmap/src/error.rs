use thiserror::Error;

/// Machine-readable classification of a [`ParseError`].
///
/// Variants of [`ParseError`] are fine-grained so messages can name the
/// offending key precisely; `ErrorCode` collapses them back into the
/// coarse kinds callers dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    SpecificationRequired,
    InvalidKey,
    InvalidType,
    UnknownOption,
    MissingArgument,
    Decode,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpecificationRequired => "SPECIFICATION_REQUIRED",
            Self::InvalidKey => "INVALID_KEY",
            Self::InvalidType => "INVALID_TYPE",
            Self::UnknownOption => "UNKNOWN_OPTION",
            Self::MissingArgument => "MISSING_ARGUMENT",
            Self::Decode => "DECODE",
        }
    }
}

/// Error raised while validating a specification or scanning tokens.
///
/// No partial result accompanies an error; the first failure aborts the
/// whole parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// No usable specification document was given (declarative path).
    #[error("argument specification is required")]
    SpecificationRequired,

    #[error("argument key cannot be an empty string")]
    EmptyKey,

    #[error("argument key must start with '-' but found: '{0}'")]
    KeyWithoutHyphen(String),

    #[error("argument key must have a name; singular '-' keys are not allowed: -")]
    BareHyphenKey,

    /// Short keys are reserved for POSIX-style combinable flags, one
    /// character after the hyphen.
    #[error("short argument keys (with a single hyphen) must have only one character: {0}")]
    ShortKeyTooLong(String),

    /// An alias chain revisits one of its own keys.
    #[error("argument key alias chain contains a cycle: {0}")]
    AliasLoop(String),

    /// A declarative entry is neither an alias, a known decoder name, nor
    /// a one-element array of one.
    #[error("type missing or not a valid decoder or array type: {0}")]
    InvalidType(String),

    #[error("unknown or unexpected option: {0}")]
    UnknownOption(String),

    /// A value-consuming option reached end of input or was followed by an
    /// option-shaped token. `option` is the name as the user typed it;
    /// `canonical` is set when that spelling was an alias.
    #[error("option requires argument: {option}{}", .canonical.as_deref().map(|c| format!(" (alias for {c})")).unwrap_or_default())]
    MissingArgument {
        option: String,
        canonical: Option<String>,
    },

    /// A value-consuming short option appeared before the end of a
    /// combined short-option cluster.
    #[error("option requires argument (but was followed by another short argument): {0}")]
    ClusterMissingArgument(String),

    /// Raised by a decoder; the message passes through unmodified.
    #[error("{0}")]
    Decode(String),
}

impl ParseError {
    /// Build a decoder failure with a caller-supplied message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SpecificationRequired => ErrorCode::SpecificationRequired,
            Self::EmptyKey
            | Self::KeyWithoutHyphen(_)
            | Self::BareHyphenKey
            | Self::ShortKeyTooLong(_)
            | Self::AliasLoop(_) => ErrorCode::InvalidKey,
            Self::InvalidType(_) => ErrorCode::InvalidType,
            Self::UnknownOption(_) => ErrorCode::UnknownOption,
            Self::MissingArgument { .. } | Self::ClusterMissingArgument(_) => {
                ErrorCode::MissingArgument
            }
            Self::Decode(_) => ErrorCode::Decode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_names_alias_target() {
        let err = ParseError::MissingArgument {
            option: "--foo".to_string(),
            canonical: Some("--realfoo".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "option requires argument: --foo (alias for --realfoo)"
        );

        let err = ParseError::MissingArgument {
            option: "--bar".to_string(),
            canonical: None,
        };
        assert_eq!(err.to_string(), "option requires argument: --bar");
    }

    #[test]
    fn codes_group_key_shape_errors() {
        assert_eq!(ParseError::EmptyKey.code(), ErrorCode::InvalidKey);
        assert_eq!(
            ParseError::BareHyphenKey.code().as_str(),
            "INVALID_KEY"
        );
        assert_eq!(
            ParseError::ShortKeyTooLong("-abc".to_string()).code(),
            ErrorCode::InvalidKey
        );
        assert_eq!(
            ParseError::UnknownOption("--nope".to_string()).code(),
            ErrorCode::UnknownOption
        );
    }
}
