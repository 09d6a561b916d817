//! Smart storage subsystem.

use crate::client::Client;
use crate::error::Result;
use crate::record::{Record, Relation, Status};
use crate::resolve::Partial;
use crate::resources::ArrayController;
use crate::schema::{FieldRule, LinkRule, LinkSource, Resource, Source, structured, text};
use serde::Serialize;

/// Smart storage subsystem fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SmartStorage {
    /// Free-form description.
    pub description: String,
    /// Health and state.
    pub status: Status,
}

impl Resource for SmartStorage {
    const KIND: &'static str = "smart storage";

    const FIELDS: &'static [FieldRule<Self>] = &[
        FieldRule {
            name: "description",
            sources: &[Source::at("/Description")],
            apply: |s, v| s.description = text(v),
        },
        FieldRule {
            name: "status",
            sources: &[Source::at("/Status")],
            apply: |s, v| s.status = structured(v),
        },
    ];

    // Some firmware omits `Links` and lists the controller collection as the
    // first member instead.
    const LINKS: &'static [LinkRule] = &[
        LinkRule {
            relation: Relation::ArrayControllers,
            sources: &[
                LinkSource::Field("/Links/ArrayControllers"),
                LinkSource::FirstMember("/Members"),
                LinkSource::FirstMember("/members"),
            ],
        },
        LinkRule {
            relation: Relation::HostBusAdapters,
            sources: &[LinkSource::Field("/Links/HostBusAdapters")],
        },
    ];
}

impl Record<SmartStorage> {
    /// Array controllers of this subsystem.
    pub fn array_controllers(&self, client: &dyn Client) -> Result<Partial<ArrayController>> {
        self.resolve_collection(client, Relation::ArrayControllers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockClient;
    use crate::schema::decode;
    use serde_json::json;

    const BASE: &str = "/redfish/v1/Systems/1/SmartStorage";

    #[test]
    fn test_links_block_wins_over_members() {
        let doc = json!({
            "Links": {"ArrayControllers": {"@odata.id": "/primary/ArrayControllers"}},
            "Members": [{"@odata.id": "/fallback/ArrayControllers"}]
        });
        let mock = MockClient::new();
        mock.add_json("/primary/ArrayControllers", &json!({"Members": []}));

        let storage = decode::<SmartStorage>(doc.to_string().as_bytes()).unwrap();
        let controllers = storage.array_controllers(&mock).unwrap();
        assert!(controllers.is_empty());
        assert_eq!(mock.get_count("/primary/ArrayControllers"), 1);
        assert_eq!(mock.get_count("/fallback/ArrayControllers"), 0);
    }

    #[test]
    fn test_members_used_when_links_absent() {
        let doc = json!({
            "Members": [{"@odata.id": "/fallback/ArrayControllers"}, {"@odata.id": "/ignored"}]
        });
        let mock = MockClient::new();
        mock.add_json("/fallback/ArrayControllers", &json!({"Members": []}));

        let storage = decode::<SmartStorage>(doc.to_string().as_bytes()).unwrap();
        assert_eq!(storage.link_count(Relation::ArrayControllers), 1);
        storage.array_controllers(&mock).unwrap();
        assert_eq!(mock.get_count("/fallback/ArrayControllers"), 1);
        assert_eq!(mock.get_count("/ignored"), 0);
    }

    #[test]
    fn test_array_controllers_resolved() {
        let mock = MockClient::new();
        let collection = format!("{BASE}/ArrayControllers");
        let controller = format!("{BASE}/ArrayControllers/0");
        mock.add_json(
            BASE,
            &json!({
                "@odata.id": BASE,
                "Description": "HPE Smart Storage",
                "Status": {"Health": "OK", "HealthRollup": "Warning"},
                "Links": {"ArrayControllers": {"@odata.id": collection}}
            }),
        );
        mock.add_json(&collection, &json!({"Members": [{"@odata.id": controller}]}));
        mock.add_json(&controller, &json!({"Model": "Smart Array P408i-a SR Gen10"}));

        let storage = crate::resolve::get::<SmartStorage>(&mock, BASE).unwrap();
        assert_eq!(storage.fields.status.health_rollup, "Warning");

        let controllers = storage.array_controllers(&mock).unwrap();
        assert!(controllers.is_complete());
        assert_eq!(controllers.items[0].fields.model, "Smart Array P408i-a SR Gen10");
    }

    #[test]
    fn test_no_controller_link_is_empty() {
        let mock = MockClient::new();
        let storage = decode::<SmartStorage>(br#"{"Description": "bare"}"#).unwrap();
        let controllers = storage.array_controllers(&mock).unwrap();
        assert!(controllers.is_empty());
        assert!(controllers.is_complete());
    }
}
