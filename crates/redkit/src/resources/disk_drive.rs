//! Disk drive, the only resource here that accepts writes.

use crate::record::{MediaType, Status};
use crate::reconcile::{Writable, WritableField};
use crate::schema::{FieldRule, Resource, Source, Unit, flag, float, int, structured, text, uint};
use serde::Serialize;
use serde_json::Value;

/// Disk drive fields.
///
/// Capacity is always in bytes. Vendor firmware reports it as `CapacityMiB`
/// and the canonical value is derived from that alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiskDrive {
    /// Free-form description.
    pub description: String,
    /// Bay or box location.
    pub location: String,
    /// Drive manufacturer.
    pub manufacturer: String,
    /// Drive model.
    pub model: String,
    /// Manufacturer serial number.
    pub serial_number: String,
    /// Manufacturer part number.
    pub part_number: String,
    /// Firmware revision.
    pub revision: String,
    /// Media kind.
    pub media_type: MediaType,
    /// Bus protocol (SAS, SATA, NVMe).
    pub protocol: String,
    /// Raw capacity in bytes.
    pub capacity_bytes: u64,
    /// Capacity in GB as reported.
    pub capacity_gb: u64,
    /// Number of logical blocks.
    pub capacity_logical_blocks: u64,
    /// Smallest addressable unit in bytes.
    pub block_size_bytes: u64,
    /// Fastest supported bus speed.
    pub capable_speed_gbs: f64,
    /// Current bus speed.
    pub negotiated_speed_gbs: f64,
    /// Interface speed in Mbps.
    pub interface_speed_mbps: f64,
    /// Spindle speed; zero for solid state media.
    pub rotation_speed_rpm: f64,
    /// Remaining media life, in percent.
    pub predicted_media_life_left_percent: f64,
    /// Hours the drive has been powered on.
    pub power_on_hours: f64,
    /// Whether the drive predicts its own failure.
    pub failure_predicted: bool,
    /// Whether the drive is reachable over more than one path.
    pub multipath: bool,
    /// Uncorrected read errors.
    pub uncorrected_read_errors: u64,
    /// Uncorrected write errors.
    pub uncorrected_write_errors: u64,
    /// Current temperature.
    pub current_temperature_celsius: i64,
    /// Highest temperature recorded.
    pub maximum_temperature_celsius: i64,
    /// Health and state.
    pub status: Status,

    /// User-assigned asset tag. Writable.
    pub asset_tag: String,
    /// Hot spare replacement behaviour. Writable.
    pub hotspare_replacement_mode: String,
    /// Locator LED (`Lit`, `Blinking`, `Off`). Writable.
    pub indicator_led: String,
    /// Drive status indicator. Writable.
    pub status_indicator: String,
    /// Drive write cache. Writable.
    pub write_cache_enabled: bool,
}

impl Resource for DiskDrive {
    const KIND: &'static str = "disk drive";

    const FIELDS: &'static [FieldRule<Self>] = &[
        FieldRule {
            name: "description",
            sources: &[Source::at("/Description")],
            apply: |d, v| d.description = text(v),
        },
        FieldRule {
            name: "location",
            sources: &[Source::at("/Location")],
            apply: |d, v| d.location = text(v),
        },
        FieldRule {
            name: "manufacturer",
            sources: &[Source::at("/Manufacturer")],
            apply: |d, v| d.manufacturer = text(v),
        },
        FieldRule {
            name: "model",
            sources: &[Source::at("/Model")],
            apply: |d, v| d.model = text(v),
        },
        FieldRule {
            name: "serial_number",
            sources: &[Source::at("/SerialNumber")],
            apply: |d, v| d.serial_number = text(v),
        },
        FieldRule {
            name: "part_number",
            sources: &[Source::at("/PartNumber")],
            apply: |d, v| d.part_number = text(v),
        },
        FieldRule {
            name: "revision",
            sources: &[
                Source::at("/FirmwareVersion/Current/VersionString"),
                Source::at("/Revision"),
            ],
            apply: |d, v| d.revision = text(v),
        },
        FieldRule {
            name: "media_type",
            sources: &[Source::at("/MediaType")],
            apply: |d, v| d.media_type = MediaType::from_wire(&text(v)),
        },
        FieldRule {
            name: "protocol",
            sources: &[Source::at("/InterfaceType"), Source::at("/Protocol")],
            apply: |d, v| d.protocol = text(v),
        },
        FieldRule {
            name: "capacity_bytes",
            sources: &[Source::scaled("/CapacityMiB", Unit::MebibytesToBytes)],
            apply: |d, v| d.capacity_bytes = uint(v),
        },
        FieldRule {
            name: "capacity_gb",
            sources: &[Source::at("/CapacityGB")],
            apply: |d, v| d.capacity_gb = uint(v),
        },
        FieldRule {
            name: "capacity_logical_blocks",
            sources: &[Source::at("/CapacityLogicalBlocks")],
            apply: |d, v| d.capacity_logical_blocks = uint(v),
        },
        FieldRule {
            name: "block_size_bytes",
            sources: &[Source::at("/BlockSizeBytes")],
            apply: |d, v| d.block_size_bytes = uint(v),
        },
        FieldRule {
            name: "capable_speed_gbs",
            sources: &[Source::at("/CapableSpeedGbs")],
            apply: |d, v| d.capable_speed_gbs = float(v),
        },
        FieldRule {
            name: "negotiated_speed_gbs",
            sources: &[Source::at("/NegotiatedSpeedGbs")],
            apply: |d, v| d.negotiated_speed_gbs = float(v),
        },
        FieldRule {
            name: "interface_speed_mbps",
            sources: &[Source::at("/InterfaceSpeedMbps")],
            apply: |d, v| d.interface_speed_mbps = float(v),
        },
        FieldRule {
            name: "rotation_speed_rpm",
            sources: &[Source::at("/RotationalSpeedRpm"), Source::at("/RotationSpeedRPM")],
            apply: |d, v| d.rotation_speed_rpm = float(v),
        },
        FieldRule {
            name: "predicted_media_life_left_percent",
            sources: &[
                Source::at("/SSDEnduranceUtilizationPercentage"),
                Source::at("/PredictedMediaLifeLeftPercent"),
            ],
            apply: |d, v| d.predicted_media_life_left_percent = float(v),
        },
        FieldRule {
            name: "power_on_hours",
            sources: &[Source::at("/PowerOnHours")],
            apply: |d, v| d.power_on_hours = float(v),
        },
        FieldRule {
            name: "failure_predicted",
            sources: &[Source::at("/FailurePredicted")],
            apply: |d, v| d.failure_predicted = flag(v),
        },
        FieldRule {
            name: "multipath",
            sources: &[Source::at("/Multipath")],
            apply: |d, v| d.multipath = flag(v),
        },
        FieldRule {
            name: "uncorrected_read_errors",
            sources: &[Source::at("/UncorrectedReadErrors")],
            apply: |d, v| d.uncorrected_read_errors = uint(v),
        },
        FieldRule {
            name: "uncorrected_write_errors",
            sources: &[Source::at("/UncorrectedWriteErrors")],
            apply: |d, v| d.uncorrected_write_errors = uint(v),
        },
        FieldRule {
            name: "current_temperature_celsius",
            sources: &[Source::at("/CurrentTemperatureCelsius")],
            apply: |d, v| d.current_temperature_celsius = int(v),
        },
        FieldRule {
            name: "maximum_temperature_celsius",
            sources: &[Source::at("/MaximumTemperatureCelsius")],
            apply: |d, v| d.maximum_temperature_celsius = int(v),
        },
        FieldRule {
            name: "status",
            sources: &[Source::at("/Status")],
            apply: |d, v| d.status = structured(v),
        },
        FieldRule {
            name: "asset_tag",
            sources: &[Source::at("/AssetTag")],
            apply: |d, v| d.asset_tag = text(v),
        },
        FieldRule {
            name: "hotspare_replacement_mode",
            sources: &[Source::at("/HotspareReplacementMode")],
            apply: |d, v| d.hotspare_replacement_mode = text(v),
        },
        FieldRule {
            name: "indicator_led",
            sources: &[Source::at("/IndicatorLED")],
            apply: |d, v| d.indicator_led = text(v),
        },
        FieldRule {
            name: "status_indicator",
            sources: &[Source::at("/StatusIndicator")],
            apply: |d, v| d.status_indicator = text(v),
        },
        FieldRule {
            name: "write_cache_enabled",
            sources: &[Source::at("/WriteCacheEnabled")],
            apply: |d, v| d.write_cache_enabled = flag(v),
        },
    ];
}

impl Writable for DiskDrive {
    const WRITABLE: &'static [WritableField<Self>] = &[
        WritableField {
            wire_key: "AssetTag",
            read: |d| Value::from(d.asset_tag.as_str()),
        },
        WritableField {
            wire_key: "HotspareReplacementMode",
            read: |d| Value::from(d.hotspare_replacement_mode.as_str()),
        },
        WritableField {
            wire_key: "IndicatorLED",
            read: |d| Value::from(d.indicator_led.as_str()),
        },
        WritableField {
            wire_key: "StatusIndicator",
            read: |d| Value::from(d.status_indicator.as_str()),
        },
        WritableField {
            wire_key: "WriteCacheEnabled",
            read: |d| Value::Bool(d.write_cache_enabled),
        },
    ];
}
