//! Smart storage tree walk
//!
//! system → smart storage → array controllers → drives and volumes.
//! Everything is collected first, then printed, so a slow controller never
//! leaves a half-drawn tree.

use anyhow::{Context, Result};
use redkit::resources::{ArrayController, ComputerSystem, DiskDrive, Logical};
use redkit::{Client, CollectionError, Record};

use super::{Describe, report_failures};
use crate::ui;

/// Everything found under one system
pub struct StorageTree {
    pub system: Record<ComputerSystem>,
    pub controllers: Vec<ControllerTree>,
    pub failures: CollectionError,
}

/// One controller with its drives and volumes
pub struct ControllerTree {
    pub controller: Record<ArrayController>,
    pub drives: Vec<Record<DiskDrive>>,
    pub volumes: Vec<VolumeTree>,
    pub failures: CollectionError,
}

/// One volume with the drives backing it
pub struct VolumeTree {
    pub volume: Record<Logical>,
    pub drives: Vec<Record<DiskDrive>>,
}

/// Walk and print the storage tree of a system
pub fn run(client: &dyn Client, system_uri: &str) -> Result<()> {
    let tree = collect(client, system_uri)?;
    render(&tree);
    Ok(())
}

/// Walk the storage tree of a system
///
/// The system and its smart storage must load; anything below that is
/// best effort and ends up in the failure sets.
pub fn collect(client: &dyn Client, system_uri: &str) -> Result<StorageTree> {
    let system = redkit::get::<ComputerSystem>(client, system_uri)
        .with_context(|| format!("Failed to fetch system {system_uri}"))?;

    let mut tree = StorageTree {
        system,
        controllers: Vec::new(),
        failures: CollectionError::new(),
    };

    let Some(storage) = tree
        .system
        .smart_storage(client)
        .context("Failed to fetch smart storage")?
    else {
        log::info!("{system_uri} links no smart storage");
        return Ok(tree);
    };

    let (controllers, failures) = storage
        .array_controllers(client)
        .context("Failed to load array controllers")?
        .into_parts();
    tree.failures = failures;

    tree.controllers = controllers
        .into_iter()
        .map(|controller| collect_controller(client, controller))
        .collect();

    Ok(tree)
}

fn collect_controller(client: &dyn Client, controller: Record<ArrayController>) -> ControllerTree {
    let mut node = ControllerTree {
        controller,
        drives: Vec::new(),
        volumes: Vec::new(),
        failures: CollectionError::new(),
    };
    let uri = node.controller.uri().to_string();

    match node.controller.physical_drive(client) {
        Ok(Some(set)) => {
            let (drives, failures) = set.drives(client).into_parts();
            node.drives = drives;
            merge(&mut node.failures, failures);
        }
        Ok(None) => {}
        Err(err) => node.failures.insert(format!("{uri} (physical drives)"), err),
    }

    match node.controller.logical_drive(client) {
        Ok(Some(set)) => {
            let (volumes, failures) = set.volumes(client).into_parts();
            merge(&mut node.failures, failures);
            for volume in volumes {
                match volume.drives(client) {
                    Ok(partial) => {
                        let (drives, failures) = partial.into_parts();
                        merge(&mut node.failures, failures);
                        node.volumes.push(VolumeTree { volume, drives });
                    }
                    Err(err) => {
                        node.failures.insert(format!("{} (data drives)", volume.uri()), err);
                        node.volumes.push(VolumeTree {
                            volume,
                            drives: Vec::new(),
                        });
                    }
                }
            }
        }
        Ok(None) => {}
        Err(err) => node.failures.insert(format!("{uri} (logical drives)"), err),
    }

    node
}

fn merge(into: &mut CollectionError, from: CollectionError) {
    for (link, err) in from {
        into.insert(link, err);
    }
}

fn render(tree: &StorageTree) {
    ui::header(&format!("Storage: {}", tree.system.describe()));

    if tree.controllers.is_empty() && tree.failures.is_empty() {
        ui::info("No array controllers found");
    }

    for node in &tree.controllers {
        ui::section(&node.controller.describe());
        if !node.controller.firmware_version.is_empty() {
            ui::kv("Firmware", &node.controller.firmware_version);
        }

        ui::kv("Drives", &node.drives.len().to_string());
        for drive in &node.drives {
            ui::item(1, &drive.describe());
        }

        ui::kv("Volumes", &node.volumes.len().to_string());
        for volume in &node.volumes {
            ui::item(1, &volume.volume.describe());
            for drive in &volume.drives {
                ui::item(2, &format!("{} {}", drive.location, drive.serial_number));
            }
        }

        report_failures(&node.failures);
    }

    report_failures(&tree.failures);
}
