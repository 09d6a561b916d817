//! Array controller.

use crate::client::Client;
use crate::error::Result;
use crate::record::{Record, Relation, Status};
use crate::resolve::Partial;
use crate::resources::{DiskDrive, LogicalDrive, PhysicalDrive};
use crate::schema::{FieldRule, LinkRule, LinkSource, Resource, Source, int, structured, text};
use serde::Serialize;

/// Array controller fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArrayController {
    /// Slot or embedded location.
    pub location: String,
    /// Controller manufacturer.
    pub manufacturer: String,
    /// Controller model.
    pub model: String,
    /// Manufacturer serial number.
    pub serial_number: String,
    /// Active firmware version.
    pub firmware_version: String,
    /// Share of the cache used for reads.
    pub read_cache_percent: i64,
    /// Health and state.
    pub status: Status,
}

impl Resource for ArrayController {
    const KIND: &'static str = "array controller";

    const FIELDS: &'static [FieldRule<Self>] = &[
        FieldRule {
            name: "location",
            sources: &[Source::at("/Location")],
            apply: |c, v| c.location = text(v),
        },
        FieldRule {
            name: "manufacturer",
            sources: &[Source::at("/Manufacturer")],
            apply: |c, v| c.manufacturer = text(v),
        },
        FieldRule {
            name: "model",
            sources: &[Source::at("/Model")],
            apply: |c, v| c.model = text(v),
        },
        FieldRule {
            name: "serial_number",
            sources: &[Source::at("/SerialNumber")],
            apply: |c, v| c.serial_number = text(v),
        },
        FieldRule {
            name: "firmware_version",
            sources: &[Source::at("/FirmwareVersion/Current/VersionString")],
            apply: |c, v| c.firmware_version = text(v),
        },
        FieldRule {
            name: "read_cache_percent",
            sources: &[Source::at("/ReadCachePercent")],
            apply: |c, v| c.read_cache_percent = int(v),
        },
        FieldRule {
            name: "status",
            sources: &[Source::at("/Status")],
            apply: |c, v| c.status = structured(v),
        },
    ];

    const LINKS: &'static [LinkRule] = &[
        LinkRule {
            relation: Relation::PhysicalDrives,
            sources: &[LinkSource::Field("/Links/PhysicalDrives")],
        },
        LinkRule {
            relation: Relation::LogicalDrives,
            sources: &[LinkSource::Field("/Links/LogicalDrives")],
        },
        LinkRule {
            relation: Relation::StorageEnclosures,
            sources: &[LinkSource::Field("/Links/StorageEnclosures")],
        },
        LinkRule {
            relation: Relation::UnconfiguredDrives,
            sources: &[LinkSource::Field("/Links/UnconfiguredDrives")],
        },
    ];
}

impl Record<ArrayController> {
    /// Set of every drive attached to the controller.
    pub fn physical_drive(&self, client: &dyn Client) -> Result<Option<Record<PhysicalDrive>>> {
        self.resolve(client, Relation::PhysicalDrives)
    }

    /// Set of volumes configured on the controller.
    pub fn logical_drive(&self, client: &dyn Client) -> Result<Option<Record<LogicalDrive>>> {
        self.resolve(client, Relation::LogicalDrives)
    }

    /// Drives not assigned to any array.
    pub fn unconfigured_drives(&self, client: &dyn Client) -> Result<Partial<DiskDrive>> {
        self.resolve_collection(client, Relation::UnconfiguredDrives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockClient;
    use crate::resolve::get;
    use crate::schema::decode;
    use serde_json::json;

    const URI: &str = "/redfish/v1/Systems/1/SmartStorage/ArrayControllers/0";

    fn controller() -> serde_json::Value {
        json!({
            "@odata.id": URI,
            "Id": "0",
            "Location": "Slot 0",
            "Manufacturer": "HPE",
            "Model": "HPE Smart Array P408i-a SR Gen10",
            "SerialNumber": "PEYHB0ARHBY0YN",
            "ReadCachePercent": 10,
            "FirmwareVersion": {"Current": {"VersionString": "1.98"}},
            "Status": {"Health": "OK", "State": "Enabled"},
            "Links": {
                "PhysicalDrives": {"@odata.id": format!("{URI}/DiskDrives")},
                "LogicalDrives": {"@odata.id": format!("{URI}/LogicalDrives")},
                "UnconfiguredDrives": {"@odata.id": format!("{URI}/UnconfiguredDrives")}
            }
        })
    }

    #[test]
    fn test_controller_fields() {
        let record = decode::<ArrayController>(controller().to_string().as_bytes()).unwrap();
        assert_eq!(record.fields.location, "Slot 0");
        assert_eq!(record.fields.read_cache_percent, 10);
        assert_eq!(record.fields.firmware_version, "1.98");
        assert_eq!(record.identity().id, "0");
        assert!(record.has_link(Relation::PhysicalDrives));
        assert!(!record.has_link(Relation::StorageEnclosures));
    }

    #[test]
    fn test_controller_to_drive_set() {
        let mock = MockClient::new();
        mock.add_json(URI, &controller());
        mock.add_json(
            &format!("{URI}/DiskDrives"),
            &json!({
                "Members@odata.count": 2,
                "Members": [{"@odata.id": "/d/0"}, {"@odata.id": "/d/1"}]
            }),
        );

        let record = get::<ArrayController>(&mock, URI).unwrap();
        let set = record.physical_drive(&mock).unwrap().unwrap();
        assert_eq!(set.fields.drives_count, 2);
        assert_eq!(mock.get_count("/d/0"), 0);
    }

    #[test]
    fn test_controller_logical_drive_failure() {
        let mock = MockClient::new();
        mock.add_json(URI, &controller());
        mock.add_failure(&format!("{URI}/LogicalDrives"), 500);

        let record = get::<ArrayController>(&mock, URI).unwrap();
        let err = record.logical_drive(&mock).unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_controller_unconfigured_drives() {
        let mock = MockClient::new();
        mock.add_json(URI, &controller());
        mock.add_json(
            &format!("{URI}/UnconfiguredDrives"),
            &json!({"Members": [{"@odata.id": "/spare"}]}),
        );
        mock.add_json("/spare", &json!({"SerialNumber": "SPARE1"}));

        let record = get::<ArrayController>(&mock, URI).unwrap();
        let spares = record.unconfigured_drives(&mock).unwrap();
        assert_eq!(spares.len(), 1);
        assert_eq!(spares.items[0].fields.serial_number, "SPARE1");
    }

    #[test]
    fn test_controller_without_links() {
        let mock = MockClient::new();
        let record = decode::<ArrayController>(b"{}").unwrap();
        assert!(record.physical_drive(&mock).unwrap().is_none());
        assert!(record.logical_drive(&mock).unwrap().is_none());
        assert!(record.unconfigured_drives(&mock).unwrap().is_empty());
    }
}
