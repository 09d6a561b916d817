//! Sensor readings with flattened thresholds.

use crate::record::Status;
use crate::schema::{FieldRule, Resource, Source, float, structured, text};
use serde::Serialize;

/// Sensor fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sensor {
    /// Current reading.
    pub reading: f64,
    /// Upper end of the measurable range.
    pub reading_range_max: f64,
    /// Lower end of the measurable range.
    pub reading_range_min: f64,
    /// What is measured (`Temperature`, `Power`, ...).
    pub reading_type: String,
    /// Unit of `reading`.
    pub reading_units: String,
    /// Upper caution threshold.
    pub threshold_upper_caution: f64,
    /// Upper critical threshold.
    pub threshold_upper_critical: f64,
    /// Upper fatal threshold.
    pub threshold_upper_fatal: f64,
    /// Lower caution threshold.
    pub threshold_lower_caution: f64,
    /// Lower critical threshold.
    pub threshold_lower_critical: f64,
    /// Lower fatal threshold.
    pub threshold_lower_fatal: f64,
    /// Health and state.
    pub status: Status,
}

impl Resource for Sensor {
    const KIND: &'static str = "sensor";

    const FIELDS: &'static [FieldRule<Self>] = &[
        FieldRule {
            name: "reading",
            sources: &[Source::at("/Reading")],
            apply: |s, v| s.reading = float(v),
        },
        FieldRule {
            name: "reading_range_max",
            sources: &[Source::at("/ReadingRangeMax")],
            apply: |s, v| s.reading_range_max = float(v),
        },
        FieldRule {
            name: "reading_range_min",
            sources: &[Source::at("/ReadingRangeMin")],
            apply: |s, v| s.reading_range_min = float(v),
        },
        FieldRule {
            name: "reading_type",
            sources: &[Source::at("/ReadingType")],
            apply: |s, v| s.reading_type = text(v),
        },
        FieldRule {
            name: "reading_units",
            sources: &[Source::at("/ReadingUnits")],
            apply: |s, v| s.reading_units = text(v),
        },
        FieldRule {
            name: "threshold_upper_caution",
            sources: &[Source::at("/Thresholds/UpperCaution/Reading")],
            apply: |s, v| s.threshold_upper_caution = float(v),
        },
        FieldRule {
            name: "threshold_upper_critical",
            sources: &[Source::at("/Thresholds/UpperCritical/Reading")],
            apply: |s, v| s.threshold_upper_critical = float(v),
        },
        FieldRule {
            name: "threshold_upper_fatal",
            sources: &[Source::at("/Thresholds/UpperFatal/Reading")],
            apply: |s, v| s.threshold_upper_fatal = float(v),
        },
        FieldRule {
            name: "threshold_lower_caution",
            sources: &[Source::at("/Thresholds/LowerCaution/Reading")],
            apply: |s, v| s.threshold_lower_caution = float(v),
        },
        FieldRule {
            name: "threshold_lower_critical",
            sources: &[Source::at("/Thresholds/LowerCritical/Reading")],
            apply: |s, v| s.threshold_lower_critical = float(v),
        },
        FieldRule {
            name: "threshold_lower_fatal",
            sources: &[Source::at("/Thresholds/LowerFatal/Reading")],
            apply: |s, v| s.threshold_lower_fatal = float(v),
        },
        FieldRule {
            name: "status",
            sources: &[Source::at("/Status")],
            apply: |s, v| s.status = structured(v),
        },
    ];
}
