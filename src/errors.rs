//! Error handling for the mirror-kit crate.
use std::{error::Error as StdError, fmt};

/// Error type for the mirror-kit crate.
#[derive(Debug)]
pub struct MirrorKitError {
    /// Inner error.
    inner: Box<Inner>,
}

impl MirrorKitError {
    /// Create a new error.
    pub(crate) fn new(kind: MirrorKitErrorKind) -> Self {
        Self {
            inner: Box::new(Inner {
                kind,
                source: None,
                text: None,
            }),
        }
    }

    /// Create a new error of the given kind wrapping a source error.
    pub(crate) fn with_source<E>(kind: MirrorKitErrorKind, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        let mut err = Self::new(kind);
        err.inner.source = Some(source.into());
        err
    }

    /// Attach a detail message.
    pub(crate) fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.inner.text = Some(text.into());
        self
    }

    /// Kind of the error.
    pub fn kind(&self) -> &MirrorKitErrorKind {
        &self.inner.kind
    }

    /// Process exit code matching this error
    pub fn exit_code(&self) -> i32 {
        match self.inner.kind {
            MirrorKitErrorKind::Usage => 2,
            _ => 1,
        }
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the mirror-kit crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: MirrorKitErrorKind,

    /// Detail message
    text: Option<String>,

    /// Source error.
    source: Option<BoxError>,
}

/// Kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorKitErrorKind {
    /// Malformed URL or missing host.
    InvalidInput,

    /// Host is not the allowed one.
    UnsupportedHost,

    /// Fewer than two project path segments.
    PathTooShort,

    /// Key file is missing or not a regular file.
    FileNotFound,

    /// Key file can't be read.
    NotReadable,

    /// File doesn't contain a private key marker.
    NotAKeyFile,

    /// Every clipboard strategy failed.
    ClipboardUnavailable,

    /// Error writing to a standard stream.
    Io,

    /// Error related to the configuration file.
    Config,

    /// Wrong command line usage.
    Usage,
}

impl fmt::Display for MirrorKitErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MirrorKitErrorKind::InvalidInput => "Invalid URL",
            MirrorKitErrorKind::UnsupportedHost => "Unsupported host",
            MirrorKitErrorKind::PathTooShort => "Could not determine project path",
            MirrorKitErrorKind::FileNotFound => "Key file not found",
            MirrorKitErrorKind::NotReadable => "Error reading key",
            MirrorKitErrorKind::NotAKeyFile => "File does not look like a private key",
            MirrorKitErrorKind::ClipboardUnavailable => "Clipboard copy unavailable",
            MirrorKitErrorKind::Io => "I/O error",
            MirrorKitErrorKind::Config => "Configuration error",
            MirrorKitErrorKind::Usage => "Usage error",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for MirrorKitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.kind)?;
        if let Some(text) = &self.inner.text {
            write!(f, ": {text}")?;
        }
        if let Some(source) = &self.inner.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

impl StdError for MirrorKitError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<std::io::Error> for MirrorKitError {
    fn from(e: std::io::Error) -> Self {
        Self::with_source(MirrorKitErrorKind::Io, e)
    }
}

impl From<url::ParseError> for MirrorKitError {
    fn from(e: url::ParseError) -> Self {
        Self::with_source(MirrorKitErrorKind::InvalidInput, e)
    }
}

impl From<toml::de::Error> for MirrorKitError {
    fn from(e: toml::de::Error) -> Self {
        Self::with_source(MirrorKitErrorKind::Config, e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_includes_text_and_source() {
        let io = std::io::Error::other("pipe closed");
        let err = MirrorKitError::with_source(MirrorKitErrorKind::Io, io).with_text("stdout");
        assert_eq!(err.to_string(), "I/O error: stdout (pipe closed)");
        assert!(err.source().is_some());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(MirrorKitError::new(MirrorKitErrorKind::Usage).exit_code(), 2);
        assert_eq!(
            MirrorKitError::new(MirrorKitErrorKind::PathTooShort).exit_code(),
            1
        );
    }

    #[test]
    fn parse_error_is_invalid_input() {
        let err: MirrorKitError = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.kind(), &MirrorKitErrorKind::InvalidInput);
    }
}
