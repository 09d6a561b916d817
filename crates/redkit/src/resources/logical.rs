//! Logical volume.
//!
//! The backing drive set is only fetched on request. Its drive count is
//! available through [`Record::<Logical>::data_drive`] rather than being
//! filled in while decoding.

use crate::client::Client;
use crate::error::Result;
use crate::record::{MediaType, Record, Relation, Status};
use crate::resolve::Partial;
use crate::resources::{DiskDrive, PhysicalDrive};
use crate::schema::{
    FieldRule, LinkRule, LinkSource, Resource, Source, Unit, structured, text, uint,
};
use serde::Serialize;

/// Logical volume fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Logical {
    /// Free-form description.
    pub description: String,
    /// Usable capacity in bytes.
    pub capacity_bytes: u64,
    /// Media of the member drives.
    pub media_type: MediaType,
    /// Block size in bytes.
    pub block_size_bytes: u64,
    /// Stripe size in bytes.
    pub stripe_size_bytes: u64,
    /// RAID level as reported (`0`, `1`, `5`, `10ADM`, ...).
    pub raid: String,
    /// Health and state.
    pub status: Status,
}

impl Resource for Logical {
    const KIND: &'static str = "logical volume";

    const FIELDS: &'static [FieldRule<Self>] = &[
        FieldRule {
            name: "description",
            sources: &[Source::at("/Description")],
            apply: |l, v| l.description = text(v),
        },
        FieldRule {
            name: "capacity_bytes",
            sources: &[
                Source::scaled("/CapacityMiB", Unit::MebibytesToBytes),
                Source::at("/CapacityBytes"),
            ],
            apply: |l, v| l.capacity_bytes = uint(v),
        },
        FieldRule {
            name: "media_type",
            sources: &[Source::at("/MediaType")],
            apply: |l, v| l.media_type = MediaType::from_wire(&text(v)),
        },
        FieldRule {
            name: "block_size_bytes",
            sources: &[Source::at("/BlockSizeBytes")],
            apply: |l, v| l.block_size_bytes = uint(v),
        },
        FieldRule {
            name: "stripe_size_bytes",
            sources: &[Source::at("/StripeSizeBytes")],
            apply: |l, v| l.stripe_size_bytes = uint(v),
        },
        FieldRule {
            name: "raid",
            sources: &[Source::at("/Raid")],
            apply: |l, v| l.raid = text(v),
        },
        FieldRule {
            name: "status",
            sources: &[Source::at("/Status")],
            apply: |l, v| l.status = structured(v),
        },
    ];

    const LINKS: &'static [LinkRule] = &[LinkRule {
        relation: Relation::DataDrives,
        sources: &[LinkSource::Field("/Links/DataDrives")],
    }];
}

impl Record<Logical> {
    /// Drive set backing the volume.
    pub fn data_drive(&self, client: &dyn Client) -> Result<Option<Record<PhysicalDrive>>> {
        self.resolve(client, Relation::DataDrives)
    }

    /// Drives backing the volume.
    ///
    /// Failing to load the drive set is an error; failing to load a single
    /// drive is recorded in the returned failures.
    pub fn drives(&self, client: &dyn Client) -> Result<Partial<DiskDrive>> {
        Ok(self
            .data_drive(client)?
            .map(|set| set.drives(client))
            .unwrap_or_default())
    }
}
