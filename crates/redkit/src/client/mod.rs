//! Transport collaborator.
//!
//! Everything in this crate talks to the management controller through the
//! [`Client`] trait. [`http::HttpClient`] is the real implementation;
//! [`MockClient`] serves documents from memory for tests.
//!
//! # Testing
//!
//! ```
//! use redkit::client::{Client, MockClient};
//!
//! let mock = MockClient::new();
//! mock.add_document("/redfish/v1/Systems/1", r#"{"Name": "node-1"}"#);
//! mock.add_failure("/redfish/v1/Systems/2", 503);
//!
//! assert!(mock.get("/redfish/v1/Systems/1").is_ok());
//! assert!(mock.get("/redfish/v1/Systems/2").is_err());
//! ```

pub mod http;

pub use http::{ClientConfig, HttpClient};

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Access to the resource graph.
///
/// Implementations own connection handling, authentication and any retry
/// policy; callers here only see the final outcome.
pub trait Client: Send + Sync {
    /// Fetch the complete current document at `uri`.
    fn get(&self, uri: &str) -> Result<Vec<u8>>;

    /// Apply `payload` to `uri` as a partial update.
    fn patch(&self, uri: &str, payload: &[u8]) -> Result<()>;
}

impl<C: Client + ?Sized> Client for &C {
    fn get(&self, uri: &str) -> Result<Vec<u8>> {
        (**self).get(uri)
    }

    fn patch(&self, uri: &str, payload: &[u8]) -> Result<()> {
        (**self).patch(uri, payload)
    }
}

impl<C: Client + ?Sized> Client for Box<C> {
    fn get(&self, uri: &str) -> Result<Vec<u8>> {
        (**self).get(uri)
    }

    fn patch(&self, uri: &str, payload: &[u8]) -> Result<()> {
        (**self).patch(uri, payload)
    }
}

#[derive(Debug, Clone)]
enum Response {
    Document(Vec<u8>),
    Status(u16),
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, Response>,
    gets: HashMap<String, usize>,
    patches: Vec<(String, Vec<u8>)>,
    rejected_patches: HashMap<String, u16>,
}

/// In-memory client for tests.
///
/// Unknown URIs answer with HTTP 404. Clones share state, so a test can keep
/// one handle for assertions while the code under test uses another.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    state: Arc<Mutex<MockState>>,
}

impl MockClient {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the state from the others.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Serve `body` at `uri`.
    pub fn add_document(&self, uri: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.state()
            .responses
            .insert(uri.into(), Response::Document(body.into()));
    }

    /// Serve a JSON value at `uri`.
    pub fn add_json(&self, uri: impl Into<String>, body: &serde_json::Value) {
        self.add_document(uri, body.to_string());
    }

    /// Answer `uri` with an HTTP error status.
    pub fn add_failure(&self, uri: impl Into<String>, status: u16) {
        self.state()
            .responses
            .insert(uri.into(), Response::Status(status));
    }

    /// Reject writes to `uri` with an HTTP error status.
    pub fn reject_patch(&self, uri: impl Into<String>, status: u16) {
        self.state().rejected_patches.insert(uri.into(), status);
    }

    /// Number of GETs issued for `uri`.
    #[must_use]
    pub fn get_count(&self, uri: &str) -> usize {
        self.state().gets.get(uri).copied().unwrap_or(0)
    }

    /// Accepted patches, in the order they were issued.
    #[must_use]
    pub fn patches(&self) -> Vec<(String, Vec<u8>)> {
        self.state().patches.clone()
    }
}

impl Client for MockClient {
    fn get(&self, uri: &str) -> Result<Vec<u8>> {
        let mut state = self.state();
        *state.gets.entry(uri.to_string()).or_default() += 1;
        match state.responses.get(uri) {
            Some(Response::Document(body)) => Ok(body.clone()),
            Some(Response::Status(code)) => {
                Err(Error::transport(uri, format!("HTTP {code}"), Some(*code)))
            }
            None => Err(Error::transport(uri, "HTTP 404", Some(404))),
        }
    }

    fn patch(&self, uri: &str, payload: &[u8]) -> Result<()> {
        let mut state = self.state();
        if let Some(code) = state.rejected_patches.get(uri) {
            return Err(Error::transport(uri, format!("HTTP {code}"), Some(*code)));
        }
        state.patches.push((uri.to_string(), payload.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_serves_documents() {
        let mock = MockClient::new();
        mock.add_document("/a", "{}");
        assert_eq!(mock.get("/a").unwrap(), b"{}");
        assert_eq!(mock.get_count("/a"), 1);
        assert_eq!(mock.get_count("/b"), 0);
    }

    #[test]
    fn test_mock_unknown_uri_is_404() {
        let mock = MockClient::new();
        let err = mock.get("/missing").unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(mock.get_count("/missing"), 1);
    }

    #[test]
    fn test_mock_failure_status() {
        let mock = MockClient::new();
        mock.add_failure("/a", 500);
        let err = mock.get("/a").unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_mock_records_patches() {
        let mock = MockClient::new();
        mock.patch("/a", b"{\"x\":1}").unwrap();
        mock.reject_patch("/b", 405);
        assert!(mock.patch("/b", b"{}").is_err());

        let patches = mock.patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].0, "/a");
    }

    #[test]
    fn test_clones_share_state() {
        let mock = MockClient::new();
        let handle = mock.clone();
        handle.add_document("/shared", "{}");
        assert!(mock.get("/shared").is_ok());
        assert_eq!(handle.get_count("/shared"), 1);
    }

    #[test]
    fn test_client_through_reference_and_box() {
        let mock = MockClient::new();
        mock.add_document("/a", "{}");
        let by_ref: &dyn Client = &mock;
        assert!(by_ref.get("/a").is_ok());
        let boxed: Box<dyn Client> = Box::new(mock.clone());
        assert!(boxed.get("/a").is_ok());
    }
}
