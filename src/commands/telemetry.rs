//! Telemetry service overview

use anyhow::{Context, Result};
use redkit::resources::TelemetryService;
use redkit::{Client, Relation};

use super::{Describe, report_failures};
use crate::ui;

/// Print the telemetry service and every metric report it publishes
pub fn run(client: &dyn Client, uri: &str) -> Result<()> {
    let service = redkit::get::<TelemetryService>(client, uri)
        .with_context(|| format!("Failed to fetch telemetry service {uri}"))?;

    ui::header("Telemetry");
    ui::dim(&service.describe());
    if !service.description.is_empty() {
        ui::kv("Description", &service.description);
    }
    if !service.submit_test_metric_report_target.is_empty() {
        ui::kv("Test report action", &service.submit_test_metric_report_target);
    }
    for relation in [
        Relation::MetricDefinitions,
        Relation::MetricReportDefinitions,
        Relation::LogService,
    ] {
        let present = if service.has_link(relation) { "yes" } else { "no" };
        ui::kv(relation.as_str(), present);
    }

    let reports = service
        .metric_reports(client)
        .context("Failed to load metric reports")?;

    ui::section(&format!("Metric Reports ({})", reports.len()));
    for report in &reports {
        ui::item(0, &report.describe());
        for value in &report.metric_values {
            ui::item(1, &format!("{} = {}", value.metric_property, value.metric_value));
        }
    }
    report_failures(&reports.failures);

    Ok(())
}
