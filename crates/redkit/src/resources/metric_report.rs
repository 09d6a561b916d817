//! Telemetry metric report.

use crate::record::{MetricValue, Relation};
use crate::schema::{FieldRule, LinkRule, LinkSource, Resource, Source, structured};
use serde::Serialize;

/// Metric report fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricReport {
    /// Sampled values.
    pub metric_values: Vec<MetricValue>,
}

impl Resource for MetricReport {
    const KIND: &'static str = "metric report";

    const FIELDS: &'static [FieldRule<Self>] = &[FieldRule {
        name: "metric_values",
        sources: &[Source::at("/MetricValues")],
        apply: |m, v| {
            m.metric_values = v
                .as_array()
                .map(|entries| entries.iter().map(structured).collect())
                .unwrap_or_default();
        },
    }];

    const LINKS: &'static [LinkRule] = &[LinkRule {
        relation: Relation::MetricReportDefinition,
        sources: &[LinkSource::Field("/MetricReportDefinition")],
    }];
}
