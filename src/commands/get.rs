//! Generic `get` and `list` commands

use anyhow::{Context, Result};
use redkit::resources::{
    ArrayController, ComputerSystem, DiskDrive, Logical, LogicalDrive, MetricReport,
    PhysicalDrive, Sensor, SmartStorage, TelemetryService,
};
use redkit::{Client, Record, Resource};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{Describe, report_failures};
use crate::cli::Kind;
use crate::ui;

/// Calls `$body` with `$ty` bound to the resource type of `$kind`
macro_rules! with_kind {
    ($kind:expr, $ty:ident => $body:expr) => {
        match $kind {
            Kind::System => {
                type $ty = ComputerSystem;
                $body
            }
            Kind::SmartStorage => {
                type $ty = SmartStorage;
                $body
            }
            Kind::ArrayController => {
                type $ty = ArrayController;
                $body
            }
            Kind::PhysicalDrive => {
                type $ty = PhysicalDrive;
                $body
            }
            Kind::DiskDrive => {
                type $ty = DiskDrive;
                $body
            }
            Kind::LogicalDrive => {
                type $ty = LogicalDrive;
                $body
            }
            Kind::Logical => {
                type $ty = Logical;
                $body
            }
            Kind::Sensor => {
                type $ty = Sensor;
                $body
            }
            Kind::MetricReport => {
                type $ty = MetricReport;
                $body
            }
            Kind::TelemetryService => {
                type $ty = TelemetryService;
                $body
            }
        }
    };
}

/// Fetch one resource and print it as JSON
pub fn get(client: &dyn Client, kind: Kind, uri: &str) -> Result<()> {
    let value = with_kind!(kind, T => fetch_json::<T>(client, uri))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Fetch every member of a collection and print them
///
/// Members that fail are reported and skipped; only a collection document
/// that cannot be loaded makes the command fail.
pub fn list(client: &dyn Client, kind: Kind, uri: &str, json: bool) -> Result<()> {
    with_kind!(kind, T => list_as::<T>(client, uri, json))
}

fn fetch_json<R: Resource + Serialize>(client: &dyn Client, uri: &str) -> Result<Value> {
    let record = redkit::get::<R>(client, uri).with_context(|| format!("Failed to fetch {uri}"))?;
    to_json(&record)
}

fn list_as<R>(client: &dyn Client, uri: &str, json: bool) -> Result<()>
where
    R: Resource + Serialize,
    Record<R>: Describe,
{
    let partial = redkit::fetch_collection::<R>(client, uri)
        .with_context(|| format!("Failed to load collection {uri}"))?;

    if json {
        let items = partial.iter().map(to_json).collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        ui::header(&format!("{} ({})", uri, partial.len()));
        for record in &partial {
            ui::item(0, &record.describe());
        }
    }

    if !partial.is_complete() {
        ui::warn(&format!("{} member(s) could not be loaded", partial.failures.len()));
        report_failures(&partial.failures);
    }
    Ok(())
}

/// Identity, fields and link names of a record as one JSON object
pub fn to_json<R: Serialize>(record: &Record<R>) -> Result<Value> {
    let mut out = Map::new();
    out.insert("identity".to_string(), serde_json::to_value(record.identity())?);
    out.insert("fields".to_string(), serde_json::to_value(&record.fields)?);
    out.insert(
        "links".to_string(),
        record.relations().map(|r| Value::from(r.as_str())).collect(),
    );
    Ok(Value::Object(out))
}
