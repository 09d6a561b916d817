//! On-demand association and collection resolution.
//!
//! Nothing here caches: every call goes back to the [`Client`]. Single
//! resources propagate their failure directly; multi-item resolution
//! collects per-link failures in a [`Partial`] and keeps going.

use crate::client::Client;
use crate::error::{CollectionError, Result};
use crate::record::{LinkRef, Links, Record, Relation};
use crate::resources::Collection;
use crate::schema::{Resource, decode_at};
use rayon::prelude::*;
use std::collections::HashSet;

/// Fetch and decode one resource.
pub fn get<R: Resource>(client: &dyn Client, uri: &str) -> Result<Record<R>> {
    log::debug!("Fetching {} at {}", R::KIND, uri);
    let bytes = client.get(uri)?;
    decode_at(uri, &bytes)
}

/// Resolve a singular association from an association table.
///
/// An absent link is not an error: it yields `Ok(None)`. For plural
/// relations the first stored link is used.
pub fn resolve<R: Resource>(
    client: &dyn Client,
    links: &Links,
    relation: Relation,
) -> Result<Option<Record<R>>> {
    match links.get(relation).and_then(LinkRef::first) {
        Some(uri) => get(client, uri).map(Some),
        None => {
            log::trace!("No {relation} link, nothing to resolve");
            Ok(None)
        }
    }
}

/// Successes and failures of a multi-item resolution.
///
/// `items` keeps the order of the member links; `failures` is keyed by the
/// links that could not be loaded.
#[derive(Debug)]
pub struct Partial<R> {
    /// Resolved records, in member order.
    pub items: Vec<Record<R>>,
    /// Links that failed, with their errors.
    pub failures: CollectionError,
}

impl<R> Default for Partial<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            failures: CollectionError::new(),
        }
    }
}

impl<R> Partial<R> {
    /// Whether every member resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of resolved records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the resolved records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record<R>> {
        self.items.iter()
    }

    /// Split into records and failures.
    pub fn into_parts(self) -> (Vec<Record<R>>, CollectionError) {
        (self.items, self.failures)
    }

    /// Treat any failure as fatal.
    pub fn into_result(self) -> Result<Vec<Record<R>>> {
        if self.failures.is_empty() {
            Ok(self.items)
        } else {
            Err(self.failures.into())
        }
    }
}

impl<R> IntoIterator for Partial<R> {
    type Item = Record<R>;
    type IntoIter = std::vec::IntoIter<Record<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Partial<R> {
    type Item = &'a Record<R>;
    type IntoIter = std::slice::Iter<'a, Record<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Resolve every resource of a collection document.
///
/// An empty `link` means "no collection" and yields an empty result. A
/// failure to load the collection document itself is returned as an error;
/// failures of individual members end up in [`Partial::failures`].
pub fn fetch_collection<R: Resource>(client: &dyn Client, link: &str) -> Result<Partial<R>> {
    if link.is_empty() {
        return Ok(Partial::default());
    }
    let members = collection_members(client, link)?;
    log::debug!("{} lists {} {} member(s)", link, members.len(), R::KIND);
    Ok(resolve_members(client, &members))
}

/// Member links of a collection, following `Members@odata.nextLink` pages.
pub fn collection_members(client: &dyn Client, link: &str) -> Result<Vec<String>> {
    let mut members = Vec::new();
    let mut seen = HashSet::new();
    let mut next = Some(link.to_string());

    while let Some(page) = next.take() {
        if !seen.insert(page.clone()) {
            log::warn!("Collection {link} pages back to {page}, stopping");
            break;
        }
        let collection = get::<Collection>(client, &page)?;
        if let Some(refs) = collection.links().get(Relation::Members) {
            members.extend(refs.uris().iter().cloned());
        }
        next = Some(collection.fields.next_link).filter(|l| !l.is_empty());
    }

    Ok(members)
}

/// Fetch and decode every link independently.
///
/// Links are resolved in parallel; the result keeps link order and one
/// failure never stops the others.
pub fn resolve_members<R: Resource>(client: &dyn Client, links: &[String]) -> Partial<R> {
    let outcomes: Vec<(&String, Result<Record<R>>)> = links
        .par_iter()
        .map(|link| (link, get::<R>(client, link)))
        .collect();

    let mut partial = Partial::default();
    for (link, outcome) in outcomes {
        match outcome {
            Ok(record) => partial.items.push(record),
            Err(err) => {
                log::warn!("Failed to load {} {}: {}", R::KIND, link, err);
                partial.failures.insert(link.clone(), err);
            }
        }
    }
    partial
}

impl<R> Record<R> {
    /// Resolve a singular association of this record.
    pub fn resolve<T: Resource>(
        &self,
        client: &dyn Client,
        relation: Relation,
    ) -> Result<Option<Record<T>>> {
        resolve(client, self.links(), relation)
    }

    /// Resolve an association that points at a collection document.
    pub fn resolve_collection<T: Resource>(
        &self,
        client: &dyn Client,
        relation: Relation,
    ) -> Result<Partial<T>> {
        let link = self
            .links()
            .get(relation)
            .and_then(LinkRef::first)
            .unwrap_or_default();
        fetch_collection(client, link)
    }

    /// Resolve every link stored under a plural association.
    pub fn resolve_all<T: Resource>(&self, client: &dyn Client, relation: Relation) -> Partial<T> {
        let links = self.links().get(relation).map(LinkRef::uris).unwrap_or_default();
        resolve_members(client, links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockClient;
    use crate::error::Error;
    use crate::resources::{DiskDrive, PhysicalDrive};
    use serde_json::json;

    fn drive(mock: &MockClient, uri: &str, serial: &str) {
        mock.add_json(
            uri,
            &json!({"@odata.id": uri, "SerialNumber": serial, "CapacityMiB": 100}),
        );
    }

    fn collection(mock: &MockClient, uri: &str, members: &[&str]) {
        let members: Vec<_> = members.iter().map(|m| json!({"@odata.id": m})).collect();
        mock.add_json(
            uri,
            &json!({"Members@odata.count": members.len(), "Members": members}),
        );
    }

    #[test]
    fn test_get_uses_requested_uri_when_document_has_none() {
        let mock = MockClient::new();
        mock.add_document("/d/1", r#"{"SerialNumber": "S1"}"#);
        let record = get::<DiskDrive>(&mock, "/d/1").unwrap();
        assert_eq!(record.uri(), "/d/1");
        assert_eq!(record.fields.serial_number, "S1");
    }

    #[test]
    fn test_get_propagates_decode_failure() {
        let mock = MockClient::new();
        mock.add_document("/d/1", "<html>login</html>");
        let err = get::<DiskDrive>(&mock, "/d/1").unwrap_err();
        assert!(matches!(err, Error::Decode { ref uri, .. } if uri == "/d/1"));
    }

    #[test]
    fn test_collection_partial_failure_keeps_order() {
        let mock = MockClient::new();
        collection(&mock, "/c", &["/a", "/b", "/c/3"]);
        drive(&mock, "/a", "A");
        mock.add_failure("/b", 500);
        drive(&mock, "/c/3", "C");

        let partial = fetch_collection::<DiskDrive>(&mock, "/c").unwrap();
        let serials: Vec<_> = partial.iter().map(|d| d.fields.serial_number.as_str()).collect();
        assert_eq!(serials, vec!["A", "C"]);
        assert!(!partial.is_complete());
        assert_eq!(partial.failures.len(), 1);
        assert_eq!(partial.failures.get("/b").and_then(Error::status), Some(500));
    }

    #[test]
    fn test_collection_complete_has_empty_failures() {
        let mock = MockClient::new();
        collection(&mock, "/c", &["/a", "/b"]);
        drive(&mock, "/a", "A");
        drive(&mock, "/b", "B");

        let partial = fetch_collection::<DiskDrive>(&mock, "/c").unwrap();
        assert!(partial.is_complete());
        assert_eq!(partial.into_result().unwrap().len(), 2);
    }

    #[test]
    fn test_collection_failures_into_result() {
        let mock = MockClient::new();
        collection(&mock, "/c", &["/a", "/missing"]);
        drive(&mock, "/a", "A");

        let partial = fetch_collection::<DiskDrive>(&mock, "/c").unwrap();
        let err = partial.into_result().unwrap_err();
        assert!(matches!(err, Error::PartialCollection(ref f) if f.len() == 1));
    }

    #[test]
    fn test_empty_collection_link_is_not_an_error() {
        let mock = MockClient::new();
        let partial = fetch_collection::<DiskDrive>(&mock, "").unwrap();
        assert!(partial.is_empty());
        assert!(partial.is_complete());
    }

    #[test]
    fn test_collection_document_failure_is_fatal() {
        let mock = MockClient::new();
        mock.add_failure("/c", 401);
        let err = fetch_collection::<DiskDrive>(&mock, "/c").unwrap_err();
        assert_eq!(err.status(), Some(401));

        mock.add_document("/bad", "not json");
        assert!(fetch_collection::<DiskDrive>(&mock, "/bad").is_err());
    }

    #[test]
    fn test_collection_member_decode_failure_is_isolated() {
        let mock = MockClient::new();
        collection(&mock, "/c", &["/a", "/b"]);
        mock.add_document("/a", "[]");
        drive(&mock, "/b", "B");

        let partial = fetch_collection::<DiskDrive>(&mock, "/c").unwrap();
        assert_eq!(partial.len(), 1);
        assert!(matches!(
            partial.failures.get("/a"),
            Some(Error::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_collection_follows_next_link() {
        let mock = MockClient::new();
        mock.add_json(
            "/c",
            &json!({"Members": [{"@odata.id": "/a"}], "Members@odata.nextLink": "/c?page=2"}),
        );
        mock.add_json("/c?page=2", &json!({"Members": [{"@odata.id": "/b"}]}));

        let members = collection_members(&mock, "/c").unwrap();
        assert_eq!(members, vec!["/a".to_string(), "/b".to_string()]);
    }

    #[test]
    fn test_collection_next_link_cycle_stops() {
        let mock = MockClient::new();
        mock.add_json(
            "/c",
            &json!({"Members": [{"@odata.id": "/a"}], "Members@odata.nextLink": "/c"}),
        );
        let members = collection_members(&mock, "/c").unwrap();
        assert_eq!(members, vec!["/a".to_string()]);
        assert_eq!(mock.get_count("/c"), 1);
    }

    #[test]
    fn test_resolve_absent_link_is_none() {
        let mock = MockClient::new();
        let links = Links::default();
        let resolved = resolve::<PhysicalDrive>(&mock, &links, Relation::DataDrives).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn test_resolve_is_not_memoized() {
        let mock = MockClient::new();
        let mut links = Links::default();
        links.insert(Relation::DataDrives, LinkRef::One("/pd".to_string()));
        mock.add_json("/pd", &json!({"Members@odata.count": 0}));

        resolve::<PhysicalDrive>(&mock, &links, Relation::DataDrives).unwrap();
        resolve::<PhysicalDrive>(&mock, &links, Relation::DataDrives).unwrap();
        assert_eq!(mock.get_count("/pd"), 2);
    }

    #[test]
    fn test_resolve_failure_propagates() {
        let mock = MockClient::new();
        let mut links = Links::default();
        links.insert(Relation::DataDrives, LinkRef::One("/pd".to_string()));
        mock.add_failure("/pd", 503);

        let err = resolve::<PhysicalDrive>(&mock, &links, Relation::DataDrives).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_resolve_members_empty() {
        let mock = MockClient::new();
        let partial = resolve_members::<DiskDrive>(&mock, &[]);
        assert!(partial.is_empty());
        assert!(partial.is_complete());
    }
}
