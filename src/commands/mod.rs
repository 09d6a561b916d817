pub mod drive;
pub mod get;
pub mod storage;
pub mod telemetry;

use redkit::Record;
use redkit::resources::{
    ArrayController, ComputerSystem, DiskDrive, Logical, LogicalDrive, MetricReport,
    PhysicalDrive, Sensor, SmartStorage, TelemetryService,
};

use crate::ui;

/// One-line summary of a record for listings
pub trait Describe {
    fn describe(&self) -> String;
}

fn label<R>(record: &Record<R>) -> &str {
    let identity = record.identity();
    if !identity.name.is_empty() {
        &identity.name
    } else if !identity.id.is_empty() {
        &identity.id
    } else {
        record.uri()
    }
}

impl Describe for Record<ComputerSystem> {
    fn describe(&self) -> String {
        format!(
            "{} {} {} [{}]",
            label(self),
            self.manufacturer,
            self.model,
            ui::health(&self.status.health)
        )
    }
}

impl Describe for Record<SmartStorage> {
    fn describe(&self) -> String {
        format!(
            "{} [{}]",
            label(self),
            ui::health(&self.status.health_rollup)
        )
    }
}

impl Describe for Record<ArrayController> {
    fn describe(&self) -> String {
        format!(
            "{} ({}) s/n {} [{}]",
            self.model,
            self.location,
            self.serial_number,
            ui::health(&self.status.health)
        )
    }
}

impl Describe for Record<PhysicalDrive> {
    fn describe(&self) -> String {
        format!("{} drive(s)", self.drives_count)
    }
}

impl Describe for Record<DiskDrive> {
    fn describe(&self) -> String {
        format!(
            "{} {} {} {} s/n {} [{}]",
            self.location,
            ui::format_size(self.capacity_bytes),
            self.media_type,
            self.model,
            self.serial_number,
            ui::health(&self.status.health)
        )
    }
}

impl Describe for Record<LogicalDrive> {
    fn describe(&self) -> String {
        format!("{} volume(s)", self.volume_count)
    }
}

impl Describe for Record<Logical> {
    fn describe(&self) -> String {
        format!(
            "{} RAID {} {} [{}]",
            label(self),
            self.raid,
            ui::format_size(self.capacity_bytes),
            ui::health(&self.status.health)
        )
    }
}

impl Describe for Record<Sensor> {
    fn describe(&self) -> String {
        format!(
            "{} {} {} (critical above {})",
            label(self),
            self.reading,
            self.reading_units,
            self.threshold_upper_critical
        )
    }
}

impl Describe for Record<MetricReport> {
    fn describe(&self) -> String {
        format!("{} ({} value(s))", label(self), self.metric_values.len())
    }
}

impl Describe for Record<TelemetryService> {
    fn describe(&self) -> String {
        let state = if self.service_enabled { "enabled" } else { "disabled" };
        format!("{} {} [{}]", label(self), state, ui::health(&self.status.health))
    }
}

/// Report members that failed to load
pub fn report_failures(failures: &redkit::CollectionError) {
    for (link, err) in failures.iter() {
        ui::warn(&format!("{link}: {err}"));
        ui::dim(err.category().advice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redkit::decode;

    #[test]
    fn test_label_falls_back_to_uri() {
        let named = decode::<Logical>(br#"{"Name": "data", "Id": "1"}"#).unwrap();
        assert_eq!(label(&named), "data");

        let with_id = decode::<Logical>(br#"{"Id": "1"}"#).unwrap();
        assert_eq!(label(&with_id), "1");

        let bare = decode::<Logical>(br#"{"@odata.id": "/v/1"}"#).unwrap();
        assert_eq!(label(&bare), "/v/1");
    }

    #[test]
    fn test_describe_drive() {
        colored::control::set_override(false);
        let drive = decode::<DiskDrive>(
            br#"{"Location": "1I:1:1", "CapacityMiB": 300000, "MediaType": "HDD",
                 "Model": "EG0300FCSPH", "SerialNumber": "S1", "Status": {"Health": "OK"}}"#,
        )
        .unwrap();
        assert_eq!(drive.describe(), "1I:1:1 300.0 GB HDD EG0300FCSPH s/n S1 [OK]");
    }
}
