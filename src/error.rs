use std::fmt;
use std::io;

pub(crate) type KoalaResult<T> = Result<T, Error>;

/// Errors that can occur when building a registry or highlighting with it.
///
/// Lexical problems in the highlighted text are never errors: they end up as
/// `invalid-string` or unclassified tokens.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred when reading a grammar or theme file
    Io(io::Error),

    /// JSON parsing failed when loading a grammar or a theme.
    Json(serde_json::Error),

    /// An invalid hex color was encountered.
    /// Can only happen when loading a theme.
    #[allow(missing_docs)]
    InvalidHexColor { value: String, reason: String },

    /// A rule pattern could not be compiled by the regex engine.
    #[allow(missing_docs)]
    InvalidPattern {
        state: String,
        pattern: String,
        reason: String,
    },

    /// A rule transitions to a state the grammar does not declare.
    #[allow(missing_docs)]
    UnknownState { state: String, target: String },

    /// A grammar has no `root` state to start from.
    MissingRootState(String),

    /// A language was not found in the registry.
    LanguageNotFound(String),

    /// A theme was not found in the registry.
    ThemeNotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON parsing error: {}", err),
            Error::InvalidHexColor { value, reason } => {
                write!(f, "invalid hex color '{}': {}", value, reason)
            }
            Error::InvalidPattern {
                state,
                pattern,
                reason,
            } => write!(
                f,
                "invalid pattern {:?} in state '{}': {}",
                pattern, state, reason
            ),
            Error::UnknownState { state, target } => {
                write!(f, "state '{}' transitions to unknown state '{}'", state, target)
            }
            Error::MissingRootState(name) => {
                write!(f, "grammar '{}' has no 'root' state", name)
            }
            Error::LanguageNotFound(name) => write!(f, "language '{}' not found", name),
            Error::ThemeNotFound(name) => write!(f, "theme '{}' not found", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::InvalidHexColor { .. }
            | Error::InvalidPattern { .. }
            | Error::UnknownState { .. }
            | Error::MissingRootState(_)
            | Error::LanguageNotFound(_)
            | Error::ThemeNotFound(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
