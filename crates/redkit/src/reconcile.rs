//! Minimal-diff updates for writable resources.
//!
//! A writable resource lists, at compile time, the fields the service
//! accepts writes for and how to read each one back as a wire value. An
//! update re-decodes the snapshot the record came from, compares those
//! fields only, and sends just the ones that changed.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::{Resource, decode_at};
use serde_json::{Map, Value};

/// One writable field: its wire key and how to read it from the record.
pub struct WritableField<R> {
    /// Key the service expects in a PATCH body.
    pub wire_key: &'static str,
    /// Current value as it would be sent.
    pub read: fn(&R) -> Value,
}

/// A resource that accepts partial updates.
pub trait Writable: Resource {
    /// Fields the service accepts writes for.
    const WRITABLE: &'static [WritableField<Self>];
}

/// Body of a partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(Map<String, Value>);

impl Patch {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of changed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Changed value for a wire key.
    #[must_use]
    pub fn get(&self, wire_key: &str) -> Option<&Value> {
        self.0.get(wire_key)
    }

    /// Changed wire keys, in descriptor order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The patch as a JSON object.
    #[must_use]
    pub fn as_json(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Serialized body.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.0).map_err(Error::Encode)
    }
}

/// Compute the patch that turns `snapshot` into `current`.
///
/// Only fields in [`Writable::WRITABLE`] are compared. A snapshot that no
/// longer decodes is an [`Error::Reconcile`].
pub fn reconcile<R: Writable>(uri: &str, snapshot: &[u8], current: &R) -> Result<Patch> {
    let original = decode_at::<R>(uri, snapshot).map_err(|err| Error::Reconcile {
        uri: uri.to_string(),
        source: Box::new(err),
    })?;

    let mut patch = Map::new();
    for field in R::WRITABLE {
        let before = (field.read)(&original.fields);
        let after = (field.read)(current);
        if before != after {
            patch.insert(field.wire_key.to_string(), after);
        }
    }
    Ok(Patch(patch))
}

impl<R: Writable> Record<R> {
    /// Patch between the retained snapshot and the current fields.
    pub fn changes(&self) -> Result<Patch> {
        reconcile(self.uri(), self.snapshot().as_bytes(), &self.fields)
    }

    /// Send changed writable fields to the service.
    ///
    /// Returns the patch that was sent; nothing is sent when it is empty.
    /// The snapshot is kept as-is, so fetch the resource again to pick up
    /// the service's view after a write.
    pub fn update(&self, client: &dyn Client) -> Result<Patch> {
        let patch = self.changes()?;
        if patch.is_empty() {
            log::debug!("No changes to {} {}, skipping update", R::KIND, self.uri());
            return Ok(patch);
        }

        log::info!(
            "Updating {} {} ({})",
            R::KIND,
            self.uri(),
            patch.keys().collect::<Vec<_>>().join(", ")
        );
        client.patch(self.uri(), &patch.to_bytes()?)?;
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockClient;
    use crate::resources::DiskDrive;
    use crate::resolve::get;
    use crate::schema::decode;
    use serde_json::json;

    const DRIVE: &str = r#"{
        "@odata.id": "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/DiskDrives/0",
        "WriteCacheEnabled": false,
        "IndicatorLED": "Off",
        "SerialNumber": "S1",
        "CapacityMiB": 100
    }"#;

    #[test]
    fn test_patch_contains_only_changed_field() {
        let mut drive = decode::<DiskDrive>(DRIVE.as_bytes()).unwrap();
        drive.fields.write_cache_enabled = true;

        let patch = drive.changes().unwrap();
        assert_eq!(patch.as_json(), json!({"WriteCacheEnabled": true}));
    }

    #[test]
    fn test_unchanged_record_has_empty_patch() {
        let drive = decode::<DiskDrive>(DRIVE.as_bytes()).unwrap();
        let patch = drive.changes().unwrap();
        assert!(patch.is_empty());
        assert_eq!(patch.to_bytes().unwrap(), b"{}");
    }

    #[test]
    fn test_read_only_changes_are_ignored() {
        let mut drive = decode::<DiskDrive>(DRIVE.as_bytes()).unwrap();
        drive.fields.serial_number = "tampered".to_string();
        drive.fields.capacity_bytes = 1;
        assert!(drive.changes().unwrap().is_empty());
    }

    #[test]
    fn test_multiple_changes_follow_descriptor_order() {
        let mut drive = decode::<DiskDrive>(DRIVE.as_bytes()).unwrap();
        drive.fields.write_cache_enabled = true;
        drive.fields.indicator_led = "Lit".to_string();
        drive.fields.asset_tag = "rack-7".to_string();

        let patch = drive.changes().unwrap();
        assert_eq!(
            patch.keys().collect::<Vec<_>>(),
            vec!["AssetTag", "IndicatorLED", "WriteCacheEnabled"]
        );
        assert_eq!(patch.get("IndicatorLED"), Some(&json!("Lit")));
    }

    #[test]
    fn test_corrupt_snapshot_is_reconcile_error() {
        let drive = decode::<DiskDrive>(DRIVE.as_bytes()).unwrap();
        let err = reconcile("/d", b"{truncated", &drive.fields).unwrap_err();
        assert!(matches!(err, Error::Reconcile { .. }));
    }

    #[test]
    fn test_never_fetched_record_cannot_update() {
        let drive = crate::record::Record {
            identity: Default::default(),
            fields: DiskDrive::default(),
            links: Default::default(),
            snapshot: Default::default(),
        };
        let mock = MockClient::new();
        let err = drive.update(&mock).unwrap_err();
        assert!(matches!(err, Error::Reconcile { .. }));
        assert!(mock.patches().is_empty());
    }

    #[test]
    fn test_update_sends_patch_to_resource_uri() {
        let mock = MockClient::new();
        let uri = "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0/DiskDrives/0";
        mock.add_document(uri, DRIVE);

        let mut drive = get::<DiskDrive>(&mock, uri).unwrap();
        drive.fields.write_cache_enabled = true;
        drive.update(&mock).unwrap();

        let patches = mock.patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].0, uri);
        let body: Value = serde_json::from_slice(&patches[0].1).unwrap();
        assert_eq!(body, json!({"WriteCacheEnabled": true}));
    }

    #[test]
    fn test_update_skips_empty_patch() {
        let mock = MockClient::new();
        let drive = decode::<DiskDrive>(DRIVE.as_bytes()).unwrap();
        let patch = drive.update(&mock).unwrap();
        assert!(patch.is_empty());
        assert!(mock.patches().is_empty());
    }

    #[test]
    fn test_update_rejected_by_service() {
        let mock = MockClient::new();
        let mut drive = decode::<DiskDrive>(DRIVE.as_bytes()).unwrap();
        mock.reject_patch(drive.uri(), 400);
        drive.fields.write_cache_enabled = true;

        let err = drive.update(&mock).unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_snapshot_unchanged_after_update() {
        let mock = MockClient::new();
        let mut drive = decode::<DiskDrive>(DRIVE.as_bytes()).unwrap();
        drive.fields.write_cache_enabled = true;
        drive.update(&mock).unwrap();

        assert_eq!(drive.snapshot().as_bytes(), DRIVE.as_bytes());
        assert!(!drive.changes().unwrap().is_empty());
    }
}
