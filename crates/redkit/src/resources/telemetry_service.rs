//! Telemetry service root.

use crate::client::Client;
use crate::error::Result;
use crate::record::{Record, Relation, Status};
use crate::resolve::Partial;
use crate::resources::MetricReport;
use crate::schema::{FieldRule, LinkRule, LinkSource, Resource, Source, flag, structured, text};
use serde::Serialize;

/// Telemetry service fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TelemetryService {
    /// Free-form description.
    pub description: String,
    /// Whether the service is collecting.
    pub service_enabled: bool,
    /// Health and state.
    pub status: Status,
    /// Target of the submit-test-report action.
    pub submit_test_metric_report_target: String,
}

impl Resource for TelemetryService {
    const KIND: &'static str = "telemetry service";

    const FIELDS: &'static [FieldRule<Self>] = &[
        FieldRule {
            name: "description",
            sources: &[Source::at("/Description")],
            apply: |t, v| t.description = text(v),
        },
        FieldRule {
            name: "service_enabled",
            sources: &[Source::at("/ServiceEnabled")],
            apply: |t, v| t.service_enabled = flag(v),
        },
        FieldRule {
            name: "status",
            sources: &[Source::at("/Status")],
            apply: |t, v| t.status = structured(v),
        },
        FieldRule {
            name: "submit_test_metric_report_target",
            sources: &[
                Source::at("/Actions/#TelemetryService.SubmitTestMetricReport/target"),
                Source::at("/Actions/#TelemetryService.SubmitTestMetricReport/Target"),
            ],
            apply: |t, v| t.submit_test_metric_report_target = text(v),
        },
    ];

    const LINKS: &'static [LinkRule] = &[
        LinkRule {
            relation: Relation::LogService,
            sources: &[LinkSource::Field("/LogService")],
        },
        LinkRule {
            relation: Relation::MetricDefinitions,
            sources: &[LinkSource::Field("/MetricDefinitions")],
        },
        LinkRule {
            relation: Relation::MetricReportDefinitions,
            sources: &[LinkSource::Field("/MetricReportDefinitions")],
        },
        LinkRule {
            relation: Relation::MetricReports,
            sources: &[LinkSource::Field("/MetricReports")],
        },
    ];
}

impl Record<TelemetryService> {
    /// Every metric report the service publishes.
    pub fn metric_reports(&self, client: &dyn Client) -> Result<Partial<MetricReport>> {
        self.resolve_collection(client, Relation::MetricReports)
    }
}
