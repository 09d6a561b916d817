use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "rfstore")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Inspect and tune Redfish smart storage, sensors and telemetry", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings; each falls back to config.toml when not given
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Base URL of the management controller
    #[arg(long, env = "RFSTORE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Basic auth user
    #[arg(short = 'u', long, env = "RFSTORE_USERNAME", global = true)]
    pub username: Option<String>,

    /// Basic auth password
    #[arg(long, env = "RFSTORE_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Number of parallel member fetches
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch one resource and print its fields as JSON
    Get {
        /// Resource kind
        #[arg(value_enum)]
        kind: Kind,

        /// Resource URI
        uri: String,
    },

    /// Fetch every member of a collection
    List {
        /// Member kind
        #[arg(value_enum)]
        kind: Kind,

        /// Collection URI
        uri: String,

        /// Print members as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Walk a system's smart storage tree
    Storage {
        /// System URI
        #[arg(default_value = "/redfish/v1/Systems/1")]
        system: String,
    },

    /// Change writable settings of a disk drive
    Drive(DriveArgs),

    /// Show the telemetry service and its metric reports
    Telemetry {
        /// Telemetry service URI
        #[arg(default_value = "/redfish/v1/TelemetryService")]
        uri: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Drive
// ============================================================================

#[derive(Args)]
pub struct DriveArgs {
    /// Disk drive URI
    pub uri: String,

    /// Enable or disable the drive write cache
    #[arg(long, value_enum)]
    pub write_cache: Option<Toggle>,

    /// Locator LED state (Lit, Blinking, Off)
    #[arg(long)]
    pub indicator_led: Option<String>,

    /// Asset tag
    #[arg(long)]
    pub asset_tag: Option<String>,

    /// Hot spare replacement mode
    #[arg(long)]
    pub hotspare_replacement_mode: Option<String>,

    /// Status indicator
    #[arg(long)]
    pub status_indicator: Option<String>,

    /// Show the patch without sending it
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Self::On
    }
}

// ============================================================================
// Resource Kinds
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    System,
    SmartStorage,
    ArrayController,
    PhysicalDrive,
    DiskDrive,
    LogicalDrive,
    Logical,
    Sensor,
    MetricReport,
    TelemetryService,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_drive() {
        let cli = Cli::parse_from([
            "rfstore",
            "--endpoint",
            "https://bmc",
            "drive",
            "/d/0",
            "--write-cache",
            "on",
            "--dry-run",
        ]);
        assert_eq!(cli.connection.endpoint.as_deref(), Some("https://bmc"));
        match cli.command {
            Command::Drive(args) => {
                assert_eq!(args.write_cache, Some(Toggle::On));
                assert!(args.dry_run);
                assert!(args.indicator_led.is_none());
            }
            _ => panic!("expected drive command"),
        }
    }

    #[test]
    fn test_parse_list_kind() {
        let cli = Cli::parse_from(["rfstore", "list", "disk-drive", "/c", "-j", "2"]);
        assert_eq!(cli.connection.jobs, Some(2));
        assert!(matches!(
            cli.command,
            Command::List { kind: Kind::DiskDrive, json: false, .. }
        ));
    }
}
