//! Error types for verdeploy-core

use std::borrow::Cow;
use std::fmt;

/// Result type alias for verdeploy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for verdeploy operations
#[derive(Debug)]
pub enum Error {
    /// Invalid configuration
    Config(String),

    /// GitHub event parsing error
    EventParse(String),

    /// Trigger event the action does not handle
    UnsupportedEvent(String),

    /// Subprocess exited with a non-zero status
    ProcessFailed {
        /// Program that was launched
        program: String,
        /// Exit code, `-1` when terminated by a signal
        code: i32,
        /// Pre-rendered message
        message: String,
    },

    /// Subprocess could not be launched or its pipes failed
    Spawn(String),

    /// Deploy command finished but produced no usable URL
    Deploy(String),

    /// I/O error
    Io(std::io::Error),

    /// Runtime error (Tokio, threading, etc.)
    Runtime(String),

    /// HTTP/API error
    Http(String),

    /// API rate limit exceeded
    RateLimitExceeded(String),

    /// Other errors
    Other(String),
}

impl Error {
    /// Build a [`Error::ProcessFailed`] for `program` exiting with `code`
    pub fn process_failed(program: &str, code: i32) -> Self {
        Error::ProcessFailed {
            program: program.to_string(),
            code,
            message: format!("The process '{}' failed with exit code {}", program, code),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::EventParse(msg) => write!(f, "Event parse error: {}", msg),
            Error::UnsupportedEvent(name) => write!(f, "Unsupported event: {}", name),
            Error::ProcessFailed { message, .. } => write!(f, "{}", message),
            Error::Spawn(msg) => write!(f, "Spawn error: {}", msg),
            Error::Deploy(msg) => write!(f, "Deploy error: {}", msg),
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            Error::Http(msg) => write!(f, "HTTP error: {}", msg),
            Error::RateLimitExceeded(msg) => write!(f, "Rate limit exceeded: {}", msg),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Fieldless error category for zero-cost pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// GitHub event parsing error
    EventParse,
    /// Unsupported trigger event
    UnsupportedEvent,
    /// Subprocess exited non-zero
    ProcessFailed,
    /// Subprocess could not be launched
    Spawn,
    /// Deploy produced no URL
    Deploy,
    /// I/O operation error
    Io,
    /// Runtime error
    Runtime,
    /// HTTP/API error
    Http,
    /// API rate limit exceeded
    RateLimitExceeded,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind. Zero allocation, returns a Copy enum.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::EventParse(_) => ErrorKind::EventParse,
            Error::UnsupportedEvent(_) => ErrorKind::UnsupportedEvent,
            Error::ProcessFailed { .. } => ErrorKind::ProcessFailed,
            Error::Spawn(_) => ErrorKind::Spawn,
            Error::Deploy(_) => ErrorKind::Deploy,
            Error::Io(_) => ErrorKind::Io,
            Error::Runtime(_) => ErrorKind::Runtime,
            Error::Http(_) => ErrorKind::Http,
            Error::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Error message without the category prefix of `Display`.
    ///
    /// This is the text reported to the Actions runner when the run fails.
    /// Borrowed for every variant except [`Error::Io`].
    pub fn message(&self) -> Cow<'_, str> {
        let msg: &str = match self {
            Error::Config(msg)
            | Error::EventParse(msg)
            | Error::UnsupportedEvent(msg)
            | Error::Spawn(msg)
            | Error::Deploy(msg)
            | Error::Runtime(msg)
            | Error::Http(msg)
            | Error::RateLimitExceeded(msg)
            | Error::Other(msg) => msg.as_str(),
            Error::ProcessFailed { message, .. } => message.as_str(),
            Error::Io(err) => return Cow::Owned(err.to_string()),
        };
        Cow::Borrowed(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_is_copy() {
        let err = Error::Config("test".to_string());
        let k = err.kind();
        let k2 = k;
        assert_eq!(k, k2);
    }

    #[test]
    fn test_error_kind_repr_u8() {
        assert_eq!(std::mem::size_of::<ErrorKind>(), 1);
    }

    #[test]
    fn test_process_failed_message() {
        let err = Error::process_failed("npx", 1);
        assert_eq!(err.message(), "The process 'npx' failed with exit code 1");
        assert_eq!(err.to_string(), err.message());
        assert_eq!(err.kind(), ErrorKind::ProcessFailed);
    }

    #[test]
    fn test_message_drops_category_prefix() {
        let err = Error::Http("GitHub API returned error: 404 Not Found".into());
        assert_eq!(err.to_string(), "HTTP error: GitHub API returned error: 404 Not Found");
        assert_eq!(err.message(), "GitHub API returned error: 404 Not Found");
    }

    #[test]
    fn test_io_message_carries_detail() {
        let err = Error::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "event.json: no such file",
        ));
        assert_eq!(err.message(), "event.json: no such file");
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_all_error_variants_have_kind() {
        let cases: Vec<(Error, ErrorKind)> = vec![
            (Error::Config("c".into()), ErrorKind::Config),
            (Error::EventParse("ep".into()), ErrorKind::EventParse),
            (
                Error::UnsupportedEvent("release".into()),
                ErrorKind::UnsupportedEvent,
            ),
            (Error::process_failed("npx", 2), ErrorKind::ProcessFailed),
            (Error::Spawn("s".into()), ErrorKind::Spawn),
            (Error::Deploy("d".into()), ErrorKind::Deploy),
            (Error::Io(std::io::Error::other("io")), ErrorKind::Io),
            (Error::Runtime("r".into()), ErrorKind::Runtime),
            (Error::Http("h".into()), ErrorKind::Http),
            (
                Error::RateLimitExceeded("rl".into()),
                ErrorKind::RateLimitExceeded,
            ),
            (Error::Other("o".into()), ErrorKind::Other),
        ];

        for (err, expected_kind) in cases {
            assert_eq!(err.kind(), expected_kind, "Mismatch for {:?}", err);
        }
    }

    #[test]
    fn test_error_messages_never_contain_token_patterns() {
        let token_patterns = ["ghp_", "gho_", "ghs_", "github_pat_", "Bearer "];
        let errors: Vec<Error> = vec![
            Error::Config("config error".into()),
            Error::Http("http error".into()),
            Error::process_failed("npx", 1),
            Error::RateLimitExceeded("rate limit exceeded".into()),
        ];

        for err in &errors {
            let display = format!("{}", err);
            let debug = format!("{:?}", err);
            for pattern in &token_patterns {
                assert!(!err.message().contains(pattern));
                assert!(!display.contains(pattern));
                assert!(!debug.contains(pattern));
            }
        }
    }
}
