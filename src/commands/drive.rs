//! Disk drive settings

use anyhow::{Context, Result};
use redkit::resources::DiskDrive;
use redkit::{Client, Record};

use super::Describe;
use crate::cli::DriveArgs;
use crate::ui;

/// Apply the requested settings to a drive and send the changes
pub fn run(client: &dyn Client, args: &DriveArgs) -> Result<()> {
    let mut drive = redkit::get::<DiskDrive>(client, &args.uri)
        .with_context(|| format!("Failed to fetch drive {}", args.uri))?;

    ui::header(&format!("Drive {}", drive.uri()));
    ui::dim(&drive.describe());

    apply(&mut drive, args);

    let patch = drive.changes().context("Failed to compute drive changes")?;
    if patch.is_empty() {
        ui::info("Nothing to change");
        return Ok(());
    }

    for key in patch.keys() {
        let value = patch.get(key).map(ToString::to_string).unwrap_or_default();
        ui::kv(key, &value);
    }

    if args.dry_run {
        ui::info("Dry run, patch not sent");
        return Ok(());
    }

    drive
        .update(client)
        .with_context(|| format!("Failed to update drive {}", drive.uri()))?;
    ui::success(&format!("Updated {} setting(s)", patch.len()));
    Ok(())
}

fn apply(drive: &mut Record<DiskDrive>, args: &DriveArgs) {
    if let Some(toggle) = args.write_cache {
        drive.write_cache_enabled = toggle.enabled();
    }
    if let Some(led) = &args.indicator_led {
        drive.indicator_led.clone_from(led);
    }
    if let Some(tag) = &args.asset_tag {
        drive.asset_tag.clone_from(tag);
    }
    if let Some(mode) = &args.hotspare_replacement_mode {
        drive.hotspare_replacement_mode.clone_from(mode);
    }
    if let Some(indicator) = &args.status_indicator {
        drive.status_indicator.clone_from(indicator);
    }
}
