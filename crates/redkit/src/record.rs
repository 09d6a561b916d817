//! Canonical records.
//!
//! A [`Record`] is the decoded, unit-normalized form of one wire resource:
//! its identity, its statically typed fields, its association table and the
//! verbatim bytes it was decoded from.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Resource locator plus the schema tags reported by the service.
///
/// The odata strings are kept for diagnostics only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// URI of the resource.
    #[serde(rename = "@odata.id")]
    pub uri: String,
    /// Service-assigned identifier.
    #[serde(rename = "Id")]
    pub id: String,
    /// Display name.
    #[serde(rename = "Name")]
    pub name: String,
    /// `@odata.context` as reported by the service.
    #[serde(rename = "@odata.context")]
    pub odata_context: String,
    /// `@odata.type` as reported by the service.
    #[serde(rename = "@odata.type")]
    pub odata_type: String,
}

/// Health and state block shared by most resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Status {
    /// Health of this resource alone.
    #[serde(deserialize_with = "loose_text")]
    pub health: String,
    /// Worst health of this resource and everything below it.
    #[serde(deserialize_with = "loose_text")]
    pub health_rollup: String,
    /// Enabled, Absent, StandbyOffline, ...
    #[serde(deserialize_with = "loose_text")]
    pub state: String,
}

impl Status {
    /// Whether the service reports the resource as healthy.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.health.eq_ignore_ascii_case("ok")
    }
}

/// Drive media.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    /// Rotating disk.
    #[serde(rename = "HDD")]
    Hdd,
    /// Solid state drive.
    #[serde(rename = "SSD")]
    Ssd,
    /// Shingled magnetic recording drive.
    #[serde(rename = "SMR")]
    Smr,
    /// Not reported or not recognized.
    #[default]
    Unknown,
}

impl MediaType {
    /// Parse the wire spelling; anything unrecognized is `Unknown`.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "HDD" => Self::Hdd,
            "SSD" => Self::Ssd,
            "SMR" => Self::Smr,
            _ => Self::Unknown,
        }
    }

    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hdd => "HDD",
            Self::Ssd => "SSD",
            Self::Smr => "SMR",
            Self::Unknown => "",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// One property/value pair of a metric report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MetricValue {
    /// URI of the property the value was sampled from.
    #[serde(deserialize_with = "loose_text")]
    pub metric_property: String,
    /// Sampled value, as reported.
    #[serde(deserialize_with = "loose_text")]
    pub metric_value: String,
}

// `null` and non-string members read as empty instead of failing the whole block.
fn loose_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Value::deserialize(deserializer).map(|value| crate::schema::text(&value))
}

/// Named association from one resource to others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    /// Smart storage -> array controller collection.
    ArrayControllers,
    /// Smart storage -> host bus adapter collection.
    HostBusAdapters,
    /// Array controller -> physical drive set.
    PhysicalDrives,
    /// Array controller -> logical drive set.
    LogicalDrives,
    /// Array controller -> storage enclosure collection.
    StorageEnclosures,
    /// Array controller -> drives not assigned to any array.
    UnconfiguredDrives,
    /// Collection or set -> its member resources.
    Members,
    /// Logical volume -> the physical drive set backing it.
    DataDrives,
    /// Metric report -> its definition.
    MetricReportDefinition,
    /// Telemetry service -> log service.
    LogService,
    /// Telemetry service -> metric definitions.
    MetricDefinitions,
    /// Telemetry service -> metric report definitions.
    MetricReportDefinitions,
    /// Telemetry service -> metric reports.
    MetricReports,
    /// Computer system -> vendor smart storage subsystem.
    SmartStorage,
    /// Computer system -> PCI devices.
    PciDevices,
    /// Computer system -> PCI slots.
    PciSlots,
    /// Computer system -> network adapters.
    NetworkAdapters,
    /// Computer system -> USB ports.
    UsbPorts,
    /// Computer system -> USB devices.
    UsbDevices,
    /// Computer system -> ethernet interfaces.
    EthernetInterfaces,
    /// Computer system -> memory.
    Memory,
}

impl Relation {
    /// Every relation, in declaration order.
    pub const ALL: &'static [Relation] = &[
        Relation::ArrayControllers,
        Relation::HostBusAdapters,
        Relation::PhysicalDrives,
        Relation::LogicalDrives,
        Relation::StorageEnclosures,
        Relation::UnconfiguredDrives,
        Relation::Members,
        Relation::DataDrives,
        Relation::MetricReportDefinition,
        Relation::LogService,
        Relation::MetricDefinitions,
        Relation::MetricReportDefinitions,
        Relation::MetricReports,
        Relation::SmartStorage,
        Relation::PciDevices,
        Relation::PciSlots,
        Relation::NetworkAdapters,
        Relation::UsbPorts,
        Relation::UsbDevices,
        Relation::EthernetInterfaces,
        Relation::Memory,
    ];

    /// Wire name of the relation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArrayControllers => "ArrayControllers",
            Self::HostBusAdapters => "HostBusAdapters",
            Self::PhysicalDrives => "PhysicalDrives",
            Self::LogicalDrives => "LogicalDrives",
            Self::StorageEnclosures => "StorageEnclosures",
            Self::UnconfiguredDrives => "UnconfiguredDrives",
            Self::Members => "Members",
            Self::DataDrives => "DataDrives",
            Self::MetricReportDefinition => "MetricReportDefinition",
            Self::LogService => "LogService",
            Self::MetricDefinitions => "MetricDefinitions",
            Self::MetricReportDefinitions => "MetricReportDefinitions",
            Self::MetricReports => "MetricReports",
            Self::SmartStorage => "SmartStorage",
            Self::PciDevices => "PCIDevices",
            Self::PciSlots => "PCISlots",
            Self::NetworkAdapters => "NetworkAdapter",
            Self::UsbPorts => "USBPorts",
            Self::UsbDevices => "USBDevices",
            Self::EthernetInterfaces => "EthernetInterfaces",
            Self::Memory => "Memory",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Relation::ALL
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown relation: {s}"))
    }
}

/// Literal link value(s) stored for one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRef {
    /// A singular relation.
    One(String),
    /// A plural relation, in document order.
    Many(Vec<String>),
}

impl LinkRef {
    /// All stored URIs, in order.
    #[must_use]
    pub fn uris(&self) -> &[String] {
        match self {
            Self::One(uri) => std::slice::from_ref(uri),
            Self::Many(uris) => uris,
        }
    }

    /// The first stored URI.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.uris().first().map(String::as_str)
    }
}

/// Association table of a record: relation name to stored link(s).
///
/// Only non-empty references are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(BTreeMap<Relation, LinkRef>);

impl Links {
    pub(crate) fn insert(&mut self, relation: Relation, link: LinkRef) {
        let empty = match &link {
            LinkRef::One(uri) => uri.is_empty(),
            LinkRef::Many(uris) => uris.is_empty(),
        };
        if !empty {
            self.0.insert(relation, link);
        }
    }

    /// Stored reference for a relation.
    #[must_use]
    pub fn get(&self, relation: Relation) -> Option<&LinkRef> {
        self.0.get(&relation)
    }

    /// Whether a relation has a stored reference.
    #[must_use]
    pub fn contains(&self, relation: Relation) -> bool {
        self.0.contains_key(&relation)
    }

    /// Relations present in the table.
    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.0.keys().copied()
    }

    /// Number of stored relations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Verbatim bytes of the last successful decode.
///
/// Cloning shares the bytes; there is no way to modify them in place.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Snapshot(Arc<[u8]>);

impl Snapshot {
    pub(crate) fn new(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }

    /// The retained bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether anything was retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Snapshot({} bytes)", self.0.len())
    }
}

/// Decoded form of one wire resource.
///
/// `fields` is public and may be mutated freely; associations are only
/// reachable through the resolving accessors.
#[derive(Debug, Clone)]
pub struct Record<R> {
    pub(crate) identity: Identity,
    /// Canonical domain attributes.
    pub fields: R,
    pub(crate) links: Links,
    pub(crate) snapshot: Snapshot,
}

impl<R> Record<R> {
    /// Identity of the resource.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// URI of the resource.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.identity.uri
    }

    /// Whether an association is present, without resolving it.
    #[must_use]
    pub fn has_link(&self, relation: Relation) -> bool {
        self.links.contains(relation)
    }

    /// Number of link references stored for a relation.
    #[must_use]
    pub fn link_count(&self, relation: Relation) -> usize {
        self.links.get(relation).map_or(0, |l| l.uris().len())
    }

    /// Relations this record carries.
    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.links.relations()
    }

    /// Bytes the record was decoded from.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub(crate) fn links(&self) -> &Links {
        &self.links
    }
}

impl<R> std::ops::Deref for Record<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.fields
    }
}

impl<R> std::ops::DerefMut for Record<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.fields
    }
}
