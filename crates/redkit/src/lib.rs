//! # redkit
//!
//! Typed model layer for Redfish smart storage, sensor and telemetry
//! resources.
//!
//! This crate provides:
//! - Canonical records decoded from wire documents through static tables
//!   (unit normalization, vendor fallbacks, nested flattening)
//! - Lazy association resolution: nothing is fetched until asked for
//! - Collection fetching that keeps going when single members fail
//! - Minimal-diff updates for writable resources
//!
//! ## Example
//!
//! ```no_run
//! use redkit::client::{ClientConfig, HttpClient};
//! use redkit::resources::ComputerSystem;
//!
//! let config = ClientConfig::new("https://ilo.example.com").credentials("admin", "secret");
//! let client = HttpClient::new(config).expect("valid endpoint");
//!
//! let system = redkit::get::<ComputerSystem>(&client, "/redfish/v1/Systems/1").unwrap();
//! if let Some(storage) = system.smart_storage(&client).unwrap() {
//!     for controller in storage.array_controllers(&client).unwrap() {
//!         println!("{} ({})", controller.model, controller.serial_number);
//!     }
//! }
//! ```
//!
//! ## Updating a drive
//!
//! ```no_run
//! use redkit::client::MockClient;
//! use redkit::resources::DiskDrive;
//!
//! let client = MockClient::new();
//! let mut drive = redkit::get::<DiskDrive>(&client, "/redfish/v1/.../DiskDrives/0").unwrap();
//! drive.write_cache_enabled = true;
//! let sent = drive.update(&client).unwrap();
//! assert_eq!(sent.keys().collect::<Vec<_>>(), vec!["WriteCacheEnabled"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod reconcile;
pub mod record;
pub mod resolve;
pub mod resources;
pub mod schema;

pub use client::Client;
pub use error::{CollectionError, Error, ErrorCategory, Result};
pub use reconcile::{Patch, Writable};
pub use record::{Identity, MediaType, Record, Relation, Status};
pub use resolve::{Partial, fetch_collection, get};
pub use schema::{Resource, decode};
