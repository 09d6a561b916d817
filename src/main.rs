mod cli;
mod commands;
mod config;
mod paths;
mod ui;

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, ConnectionArgs};
use config::Config;
use redkit::client::HttpClient;
use std::io;

/// Global context for the application
pub struct Context {
    pub config: Config,
    pub connection: ConnectionArgs,
}

impl Context {
    /// HTTP client for the configured endpoint
    pub fn client(&self) -> Result<HttpClient> {
        let settings = self.config.client_config(&self.connection)?;
        log::debug!("Connecting to {}", settings.endpoint);
        HttpClient::new(settings).context("Invalid connection settings")
    }

    /// Run `f` on a thread pool sized by `jobs`
    pub fn in_pool<T: Send>(&self, f: impl FnOnce() -> Result<T> + Send) -> Result<T> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs(&self.connection))
            .build()
            .context("Failed to create fetch thread pool")?;
        pool.install(f)
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli) {
        ui::error(&format!("{err:#}"));
        if let Some(redkit_err) = err.downcast_ref::<redkit::Error>() {
            ui::dim(redkit_err.category().advice());
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Command::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "rfstore", &mut io::stdout());
        return Ok(());
    }

    let ctx = Context {
        config: Config::load()?,
        connection: cli.connection,
    };
    let client = ctx.client()?;

    ctx.in_pool(|| match &cli.command {
        Command::Get { kind, uri } => commands::get::get(&client, *kind, uri),
        Command::List { kind, uri, json } => commands::get::list(&client, *kind, uri, *json),
        Command::Storage { system } => commands::storage::run(&client, system),
        Command::Drive(args) => commands::drive::run(&client, args),
        Command::Telemetry { uri } => commands::telemetry::run(&client, uri),
        Command::Completions { .. } => Ok(()),
    })
}
