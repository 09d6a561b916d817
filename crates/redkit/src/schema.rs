//! Table-driven decoding of wire documents into canonical records.
//!
//! Every resource type declares two tables:
//!
//! - [`FieldRule`]s: canonical field ← ordered list of wire locations, each
//!   with a unit transform;
//! - [`LinkRule`]s: relation ← ordered list of places a link may live.
//!
//! One generic [`decode`] walks those tables. The first location that is
//! present and non-empty wins; when none is, the field keeps its zero value.
//! Only input that is not a JSON object is an error.
//!
//! # Example
//!
//! ```
//! use redkit::resources::DiskDrive;
//! use redkit::schema::decode;
//!
//! let drive = decode::<DiskDrive>(br#"{"CapacityMiB": 100, "Model": "MM1000"}"#).unwrap();
//! assert_eq!(drive.fields.capacity_bytes, 100_000_000);
//! assert_eq!(drive.fields.model, "MM1000");
//! ```

use crate::error::{Error, Result};
use crate::record::{Identity, LinkRef, Links, Record, Relation, Snapshot};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Multiplier the API uses between its "MiB" fields and bytes.
///
/// The service reports decimal megabytes under the MiB name; the canonical
/// byte count follows the service.
pub const MIB_SCALE: u64 = 1_000_000;

/// A resource type with a decoding table.
pub trait Resource: Default + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Human-readable kind, used in log lines.
    const KIND: &'static str;

    /// Field mapping table.
    const FIELDS: &'static [FieldRule<Self>];

    /// Association table.
    const LINKS: &'static [LinkRule] = &[];
}

/// Unit transform applied to a wire value before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Stored as-is.
    Identity,
    /// Wire MiB count to canonical bytes (× [`MIB_SCALE`]).
    MebibytesToBytes,
}

impl Unit {
    fn apply(self, value: &Value) -> Cow<'_, Value> {
        match self {
            Unit::Identity => Cow::Borrowed(value),
            Unit::MebibytesToBytes => Cow::Owned(Value::from(mebibytes_to_bytes(value))),
        }
    }
}

// Whole counts stay exact; fractional ones are scaled, then rounded.
fn mebibytes_to_bytes(value: &Value) -> u64 {
    match value.as_u64() {
        Some(mib) => mib.saturating_mul(MIB_SCALE),
        None => {
            let bytes = (float(value) * MIB_SCALE as f64).round();
            if bytes > 0.0 { bytes as u64 } else { 0 }
        }
    }
}

/// One wire location of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    /// JSON pointer into the document.
    pub path: &'static str,
    /// Transform applied to the value found there.
    pub unit: Unit,
}

impl Source {
    /// Location stored without conversion.
    #[must_use]
    pub const fn at(path: &'static str) -> Self {
        Self {
            path,
            unit: Unit::Identity,
        }
    }

    /// Location whose value is converted with `unit`.
    #[must_use]
    pub const fn scaled(path: &'static str, unit: Unit) -> Self {
        Self { path, unit }
    }
}

/// Mapping of one canonical field.
pub struct FieldRule<R> {
    /// Canonical field name.
    pub name: &'static str,
    /// Wire locations in priority order.
    pub sources: &'static [Source],
    /// Stores the chosen value into the record.
    pub apply: fn(&mut R, &Value),
}

impl<R> fmt::Debug for FieldRule<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("name", &self.name)
            .field("sources", &self.sources)
            .finish_non_exhaustive()
    }
}

/// Where a link reference may be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    /// A single link: either a bare string or an object with `@odata.id`.
    Field(&'static str),
    /// The first entry of a member array.
    FirstMember(&'static str),
    /// Every entry of a member array.
    Members(&'static str),
}

/// Mapping of one association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRule {
    /// Relation the link is stored under.
    pub relation: Relation,
    /// Wire locations in priority order.
    pub sources: &'static [LinkSource],
}

/// Decode a wire document into a record.
///
/// The identity URI is taken from `@odata.id`.
pub fn decode<R: Resource>(bytes: &[u8]) -> Result<Record<R>> {
    decode_at("", bytes)
}

/// Decode a document fetched from `uri`.
///
/// `uri` is used for error messages and as the identity when the document
/// carries no `@odata.id`.
pub(crate) fn decode_at<R: Resource>(uri: &str, bytes: &[u8]) -> Result<Record<R>> {
    let doc: Value = serde_json::from_slice(bytes).map_err(|source| Error::Decode {
        uri: uri.to_string(),
        source,
    })?;
    if !doc.is_object() {
        return Err(Error::NotAnObject {
            uri: uri.to_string(),
        });
    }

    let mut identity = Identity {
        uri: doc.pointer("/@odata.id").map(text).unwrap_or_default(),
        id: doc.pointer("/Id").map(text).unwrap_or_default(),
        name: doc.pointer("/Name").map(text).unwrap_or_default(),
        odata_context: doc.pointer("/@odata.context").map(text).unwrap_or_default(),
        odata_type: doc.pointer("/@odata.type").map(text).unwrap_or_default(),
    };
    if identity.uri.is_empty() {
        identity.uri = uri.to_string();
    }

    let mut fields = R::default();
    for rule in R::FIELDS {
        if let Some(value) = first_present(&doc, rule.sources) {
            (rule.apply)(&mut fields, &value);
        }
    }

    let mut links = Links::default();
    for rule in R::LINKS {
        if let Some(link) = first_link(&doc, rule.sources) {
            links.insert(rule.relation, link);
        }
    }

    Ok(Record {
        identity,
        fields,
        links,
        snapshot: Snapshot::new(bytes),
    })
}

fn first_present<'a>(doc: &'a Value, sources: &[Source]) -> Option<Cow<'a, Value>> {
    sources.iter().find_map(|source| {
        doc.pointer(source.path)
            .filter(|v| !is_empty(v))
            .map(|v| source.unit.apply(v))
            .filter(|v| !is_empty(v))
    })
}

fn first_link(doc: &Value, sources: &[LinkSource]) -> Option<LinkRef> {
    sources.iter().find_map(|source| match *source {
        LinkSource::Field(path) => doc
            .pointer(path)
            .and_then(link_uri)
            .map(LinkRef::One),
        LinkSource::FirstMember(path) => member_uris(doc.pointer(path))
            .into_iter()
            .next()
            .map(LinkRef::One),
        LinkSource::Members(path) => {
            let uris = member_uris(doc.pointer(path));
            (!uris.is_empty()).then_some(LinkRef::Many(uris))
        }
    })
}

fn link_uri(value: &Value) -> Option<String> {
    let uri = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("@odata.id").and_then(Value::as_str)?,
        _ => return None,
    };
    (!uri.is_empty()).then(|| uri.to_string())
}

fn member_uris(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(link_uri).collect())
        .unwrap_or_default()
}

/// Whether a wire value counts as absent for fallback purposes.
///
/// Booleans are never empty: `false` is a real answer.
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(_) => false,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

// =============================================================================
// Value coercions used by the field tables. Mismatched types become zero.
// =============================================================================

/// String value, or empty.
#[must_use]
pub fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Non-negative integer value, or zero.
#[must_use]
pub fn uint(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Signed integer value, or zero.
#[must_use]
pub fn int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Floating point value, or zero.
#[must_use]
pub fn float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Boolean value, or `false`.
#[must_use]
pub fn flag(value: &Value) -> bool {
    value.as_bool().unwrap_or(false)
}

/// Structured value, or its default when the shape does not match.
#[must_use]
pub fn structured<T: DeserializeOwned + Default>(value: &Value) -> T {
    serde_json::from_value(value.clone()).unwrap_or_default()
}
