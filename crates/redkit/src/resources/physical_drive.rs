//! Set of physical drives attached to a controller or backing a volume.

use crate::client::Client;
use crate::record::{Record, Relation};
use crate::resolve::Partial;
use crate::resources::DiskDrive;
use crate::schema::{FieldRule, LinkRule, LinkSource, Resource, Source, uint};
use serde::Serialize;

/// Drive set fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhysicalDrive {
    /// Number of drives the service reports.
    pub drives_count: u64,
}

impl Resource for PhysicalDrive {
    const KIND: &'static str = "drive set";

    const FIELDS: &'static [FieldRule<Self>] = &[FieldRule {
        name: "drives_count",
        sources: &[Source::at("/Members@odata.count")],
        apply: |p, v| p.drives_count = uint(v),
    }];

    const LINKS: &'static [LinkRule] = &[LinkRule {
        relation: Relation::Members,
        sources: &[LinkSource::Members("/Members"), LinkSource::Members("/members")],
    }];
}

impl Record<PhysicalDrive> {
    /// Every member drive. Members that fail to load end up in the failures.
    pub fn drives(&self, client: &dyn Client) -> Partial<DiskDrive> {
        self.resolve_all(client, Relation::Members)
    }
}
