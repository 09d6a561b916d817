//! Resource types of the smart storage and telemetry trees.
//!
//! Each type is a plain field struct with a [`Resource`](crate::schema::Resource)
//! table; associations are reached through methods on `Record<T>`.
//!
//! ```text
//! ComputerSystem
//! └── SmartStorage
//!     └── ArrayController
//!         ├── PhysicalDrive ── DiskDrive
//!         └── LogicalDrive ─── Logical ── PhysicalDrive ── DiskDrive
//! TelemetryService ── MetricReport
//! ```

mod array_controller;
mod collection;
mod disk_drive;
mod logical;
mod logical_drive;
mod metric_report;
mod physical_drive;
mod sensor;
mod smart_storage;
mod system;
mod telemetry_service;

pub use array_controller::ArrayController;
pub use collection::Collection;
pub use disk_drive::DiskDrive;
pub use logical::Logical;
pub use logical_drive::LogicalDrive;
pub use metric_report::MetricReport;
pub use physical_drive::PhysicalDrive;
pub use sensor::Sensor;
pub use smart_storage::SmartStorage;
pub use system::ComputerSystem;
pub use telemetry_service::TelemetryService;
