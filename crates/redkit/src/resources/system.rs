//! Computer system, as far as the vendor storage extension is concerned.
//!
//! The smart storage subsystem is not part of the standard system schema.
//! It is linked from the vendor block, which older firmware publishes
//! under `Oem/Hp` and newer firmware under `Oem/Hpe`.

use crate::client::Client;
use crate::error::Result;
use crate::record::{Record, Relation, Status};
use crate::resources::SmartStorage;
use crate::schema::{FieldRule, LinkRule, LinkSource, Resource, Source, structured, text};
use serde::Serialize;

/// Computer system fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComputerSystem {
    /// Free-form description.
    pub description: String,
    /// System manufacturer.
    pub manufacturer: String,
    /// System model.
    pub model: String,
    /// Chassis serial number.
    pub serial_number: String,
    /// Host name reported by the OS agent, if any.
    pub host_name: String,
    /// Power state (`On`, `Off`, ...).
    pub power_state: String,
    /// Health and state.
    pub status: Status,
}

macro_rules! oem_link {
    ($relation:expr, $key:literal) => {
        LinkRule {
            relation: $relation,
            sources: &[
                LinkSource::Field(concat!("/Oem/Hpe/Links/", $key)),
                LinkSource::Field(concat!("/Oem/Hp/Links/", $key)),
            ],
        }
    };
}

impl Resource for ComputerSystem {
    const KIND: &'static str = "computer system";

    const FIELDS: &'static [FieldRule<Self>] = &[
        FieldRule {
            name: "description",
            sources: &[Source::at("/Description")],
            apply: |s, v| s.description = text(v),
        },
        FieldRule {
            name: "manufacturer",
            sources: &[Source::at("/Manufacturer")],
            apply: |s, v| s.manufacturer = text(v),
        },
        FieldRule {
            name: "model",
            sources: &[Source::at("/Model")],
            apply: |s, v| s.model = text(v),
        },
        FieldRule {
            name: "serial_number",
            sources: &[Source::at("/SerialNumber")],
            apply: |s, v| s.serial_number = text(v),
        },
        FieldRule {
            name: "host_name",
            sources: &[Source::at("/HostName")],
            apply: |s, v| s.host_name = text(v),
        },
        FieldRule {
            name: "power_state",
            sources: &[Source::at("/PowerState")],
            apply: |s, v| s.power_state = text(v),
        },
        FieldRule {
            name: "status",
            sources: &[Source::at("/Status")],
            apply: |s, v| s.status = structured(v),
        },
    ];

    const LINKS: &'static [LinkRule] = &[
        oem_link!(Relation::SmartStorage, "SmartStorage"),
        oem_link!(Relation::PciDevices, "PCIDevices"),
        oem_link!(Relation::PciSlots, "PCISlots"),
        oem_link!(Relation::NetworkAdapters, "NetworkAdapter"),
        oem_link!(Relation::UsbPorts, "USBPorts"),
        oem_link!(Relation::UsbDevices, "USBDevices"),
        oem_link!(Relation::EthernetInterfaces, "EthernetInterfaces"),
        oem_link!(Relation::Memory, "Memory"),
    ];
}

impl Record<ComputerSystem> {
    /// Smart storage subsystem of this system, if the vendor block links one.
    pub fn smart_storage(&self, client: &dyn Client) -> Result<Option<Record<SmartStorage>>> {
        self.resolve(client, Relation::SmartStorage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockClient;
    use crate::schema::decode;
    use serde_json::json;

    #[test]
    fn test_system_hpe_links() {
        let doc = json!({
            "@odata.id": "/redfish/v1/Systems/1",
            "Manufacturer": "HPE",
            "Model": "ProLiant DL380 Gen10",
            "Status": {"Health": "OK", "State": "Enabled"},
            "Oem": {"Hpe": {"Links": {
                "SmartStorage": {"@odata.id": "/redfish/v1/Systems/1/SmartStorage"},
                "PCIDevices": {"@odata.id": "/redfish/v1/Systems/1/PCIDevices"}
            }}}
        });
        let system = decode::<ComputerSystem>(doc.to_string().as_bytes()).unwrap();
        assert_eq!(system.fields.model, "ProLiant DL380 Gen10");
        assert!(system.fields.status.is_ok());
        assert!(system.has_link(Relation::SmartStorage));
        assert!(system.has_link(Relation::PciDevices));
        assert!(!system.has_link(Relation::Memory));
    }

    #[test]
    fn test_system_legacy_hp_vendor_key() {
        let doc = json!({
            "Oem": {"Hp": {"Links": {"SmartStorage": {"@odata.id": "/legacy/SmartStorage"}}}}
        });
        let system = decode::<ComputerSystem>(doc.to_string().as_bytes()).unwrap();
        assert!(system.has_link(Relation::SmartStorage));
    }

    #[test]
    fn test_system_hpe_preferred_over_hp() {
        let mock = MockClient::new();
        mock.add_json("/new/SmartStorage", &json!({"Description": "new"}));
        mock.add_json("/old/SmartStorage", &json!({"Description": "old"}));
        let doc = json!({"Oem": {
            "Hp": {"Links": {"SmartStorage": {"@odata.id": "/old/SmartStorage"}}},
            "Hpe": {"Links": {"SmartStorage": {"@odata.id": "/new/SmartStorage"}}}
        }});
        let system = decode::<ComputerSystem>(doc.to_string().as_bytes()).unwrap();

        let storage = system.smart_storage(&mock).unwrap().unwrap();
        assert_eq!(storage.fields.description, "new");
        assert_eq!(mock.get_count("/old/SmartStorage"), 0);
    }

    #[test]
    fn test_system_without_vendor_block() {
        let mock = MockClient::new();
        let system = decode::<ComputerSystem>(br#"{"Model": "generic"}"#).unwrap();
        assert!(system.smart_storage(&mock).unwrap().is_none());
        assert_eq!(system.relations().count(), 0);
    }
}
