//! Error types for Redfish model operations.
//!
//! Errors are split by where they originate: the transport collaborator,
//! the decoder, multi-item resolution and update reconciliation. Each
//! error maps to an [`ErrorCategory`] so callers can pick a policy
//! (retry, report, abort) without matching every variant.

use std::collections::BTreeMap;
use std::fmt;

/// Result type alias for Redfish model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of errors for caller-side policy.
///
/// This crate never retries on its own; the category only tells callers
/// what kind of failure they are looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network or HTTP status failure reported by the transport.
    Network,
    /// The wire document was not well-formed.
    Format,
    /// Some members of a collection failed while others succeeded.
    Partial,
    /// A retained snapshot could not be re-read (programming error or corruption).
    State,
    /// Invalid client configuration.
    Config,
}

impl ErrorCategory {
    /// Whether this error category is typically transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Management controller unreachable or request rejected",
            Self::Format => "Malformed resource document",
            Self::Partial => "Some collection members could not be loaded",
            Self::State => "Resource snapshot is unusable",
            Self::Config => "Invalid client configuration",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check the endpoint, credentials and network path to the BMC",
            Self::Format => "The firmware returned something other than a JSON object",
            Self::Partial => "The loaded members are usable; inspect the failed links",
            Self::State => "Fetch the resource again before updating it",
            Self::Config => "Check the endpoint URL and client settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while fetching, decoding or updating resources.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed to deliver a response or rejected a write.
    #[error("request for {uri} failed: {message}")]
    Transport {
        /// Resource the request was addressed to.
        uri: String,
        /// Transport-provided description.
        message: String,
        /// HTTP status code if available.
        status: Option<u16>,
    },

    /// The document is not valid JSON.
    #[error("malformed document at {uri}: {source}")]
    Decode {
        /// Resource the document came from (may be empty for raw decodes).
        uri: String,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The document is valid JSON but its top level is not an object.
    #[error("document at {uri} is not a JSON object")]
    NotAnObject {
        /// Resource the document came from (may be empty for raw decodes).
        uri: String,
    },

    /// One or more collection members failed to resolve.
    #[error(transparent)]
    PartialCollection(#[from] CollectionError),

    /// The snapshot retained for an update could not be decoded again.
    #[error("cannot reconcile {uri}: retained snapshot is unusable: {source}")]
    Reconcile {
        /// Resource being updated.
        uri: String,
        /// The decode failure.
        #[source]
        source: Box<Error>,
    },

    /// A patch payload could not be serialized.
    #[error("failed to encode patch payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Create a transport error.
    pub fn transport(
        uri: impl Into<String>,
        message: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        Self::Transport {
            uri: uri.into(),
            message: message.into(),
            status,
        }
    }

    /// Attach the request URI to a transport error that lacks one.
    #[must_use]
    pub fn at(self, uri: &str) -> Self {
        match self {
            Error::Transport {
                uri: existing,
                message,
                status,
            } if existing.is_empty() => Error::Transport {
                uri: uri.to_string(),
                message,
                status,
            },
            other => other,
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Transport { .. } => ErrorCategory::Network,
            Error::Decode { .. } | Error::NotAnObject { .. } | Error::Encode(_) => {
                ErrorCategory::Format
            }
            Error::PartialCollection(_) => ErrorCategory::Partial,
            Error::Reconcile { .. } => ErrorCategory::State,
            Error::Config(_) => ErrorCategory::Config,
        }
    }

    /// Whether this error is typically transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// HTTP status code, when the transport reported one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Per-link failures collected while resolving a set of members.
///
/// An empty set means every member resolved. A non-empty set is a
/// partial-success signal: the members that did resolve are still usable.
#[derive(Debug, Default)]
pub struct CollectionError {
    failures: BTreeMap<String, Error>,
}

impl CollectionError {
    /// Create an empty failure set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the failure of one member link.
    pub fn insert(&mut self, link: impl Into<String>, error: Error) {
        self.failures.insert(link.into(), error);
    }

    /// Whether no member failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failed members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Error recorded for a member link, if it failed.
    #[must_use]
    pub fn get(&self, link: &str) -> Option<&Error> {
        self.failures.get(link)
    }

    /// Iterate over `(link, error)` pairs, ordered by link.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.failures.iter().map(|(link, err)| (link.as_str(), err))
    }

    /// Failed member links, ordered.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.failures.keys().map(String::as_str)
    }
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} collection member(s) failed", self.failures.len())?;
        for (link, err) in &self.failures {
            write!(f, "\n  {link}: {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CollectionError {}

impl IntoIterator for CollectionError {
    type Item = (String, Error);
    type IntoIter = std::collections::btree_map::IntoIter<String, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Transport {
                uri: String::new(),
                message: format!("HTTP {code}"),
                status: Some(code),
            },
            other => Self::Transport {
                uri: String::new(),
                message: other.to_string(),
                status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> Error {
        let source = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        Error::Decode {
            uri: "/redfish/v1/x".to_string(),
            source,
        }
    }

    #[test]
    fn test_error_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(!ErrorCategory::Format.is_retryable());
        assert!(!ErrorCategory::Partial.is_retryable());
        assert!(!ErrorCategory::State.is_retryable());
        assert!(!ErrorCategory::Config.is_retryable());
    }

    #[test]
    fn test_error_category_text() {
        assert!(!ErrorCategory::Network.description().is_empty());
        assert!(!ErrorCategory::State.advice().is_empty());
        assert!(format!("{}", ErrorCategory::Partial).contains("collection"));
    }

    #[test]
    fn test_transport_error_category() {
        let err = Error::transport("/redfish/v1/Systems/1", "HTTP 503", Some(503));
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("/redfish/v1/Systems/1"));
    }

    #[test]
    fn test_at_fills_missing_uri() {
        let err = Error::transport("", "HTTP 401", Some(401)).at("/redfish/v1");
        assert!(err.to_string().starts_with("request for /redfish/v1 failed"));

        let err = Error::transport("/kept", "HTTP 401", Some(401)).at("/other");
        assert!(err.to_string().contains("/kept"));
    }

    #[test]
    fn test_decode_error_category() {
        let err = decode_error();
        assert_eq!(err.category(), ErrorCategory::Format);
        assert!(!err.is_retryable());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_reconcile_error_wraps_source() {
        let err = Error::Reconcile {
            uri: "/redfish/v1/d/1".to_string(),
            source: Box::new(decode_error()),
        };
        assert_eq!(err.category(), ErrorCategory::State);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_collection_error_accumulates() {
        let mut failures = CollectionError::new();
        assert!(failures.is_empty());

        failures.insert("/b", Error::transport("/b", "HTTP 404", Some(404)));
        failures.insert("/a", decode_error());

        assert!(!failures.is_empty());
        assert_eq!(failures.len(), 2);
        assert!(failures.get("/b").is_some());
        assert!(failures.get("/c").is_none());
        assert_eq!(failures.links().collect::<Vec<_>>(), vec!["/a", "/b"]);

        let display = failures.to_string();
        assert!(display.starts_with("2 collection member(s) failed"));
        assert!(display.contains("/b: request for /b failed: HTTP 404"));
    }

    #[test]
    fn test_partial_collection_conversion() {
        let mut failures = CollectionError::new();
        failures.insert("/x", Error::transport("/x", "timeout", None));
        let err: Error = failures.into();
        assert_eq!(err.category(), ErrorCategory::Partial);
    }
}
