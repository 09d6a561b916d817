//! Set of volumes configured on a controller.

use crate::client::Client;
use crate::record::{Record, Relation};
use crate::resolve::Partial;
use crate::resources::Logical;
use crate::schema::{FieldRule, LinkRule, LinkSource, Resource, Source, uint};
use serde::Serialize;

/// Volume set fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogicalDrive {
    /// Number of volumes the service reports.
    pub volume_count: u64,
}

impl Resource for LogicalDrive {
    const KIND: &'static str = "volume set";

    const FIELDS: &'static [FieldRule<Self>] = &[FieldRule {
        name: "volume_count",
        sources: &[Source::at("/Members@odata.count")],
        apply: |l, v| l.volume_count = uint(v),
    }];

    const LINKS: &'static [LinkRule] = &[LinkRule {
        relation: Relation::Members,
        sources: &[LinkSource::Members("/Members"), LinkSource::Members("/members")],
    }];
}

impl Record<LogicalDrive> {
    /// Every volume in the set.
    pub fn volumes(&self, client: &dyn Client) -> Partial<Logical> {
        self.resolve_all(client, Relation::Members)
    }
}
