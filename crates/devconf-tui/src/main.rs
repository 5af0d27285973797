//! `devconf`: terminal configuration dialogs for emulated devices.
//!
//! Opens the settings dialog of one device instance, reading current
//! values from the TOML device store and writing them back only when the
//! dialog is confirmed. `--list` prints the built-in catalog and `--dump`
//! prints the values a dialog would start from.
//!
//! Logs go to a file so they never corrupt the dialog.

mod catalog;
mod commands;
mod form_view;
mod presenter;
mod theme;
mod tui;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use devconf_config::FileStore;
use devconf_core::{DeviceContext, DeviceHandle, SessionOutcome, configure_device};

use crate::presenter::TerminalPresenter;

/// Configure emulated devices from the terminal.
#[derive(Parser, Debug)]
#[command(name = "devconf", version, about)]
struct Cli {
    /// Internal name of the device to configure (see --list)
    #[arg(required_unless_present = "list")]
    device: Option<String>,

    /// Device instance; 0 for devices that can only be attached once
    #[arg(short, long, default_value_t = 0)]
    instance: u32,

    /// Device store (defaults to devices.toml in the config directory)
    #[arg(short, long, env = "DEVCONF_STORE")]
    store: Option<PathBuf>,

    /// Log file (defaults to devconf.log in the cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// List the built-in devices and exit
    #[arg(long, conflicts_with = "dump")]
    list: bool,

    /// Print the device's current values instead of opening the dialog
    #[arg(long)]
    dump: bool,
}

/// File-only tracing. The returned guard must live until exit so buffered
/// lines are flushed.
fn setup_tracing(verbose: u8, log_file: &Path) -> Result<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "devconf={level},devconf_core={level},devconf_config={level}"
        ))
    });

    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = log_file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("devconf.log");

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .wrap_err_with(|| format!("cannot open log file {}", log_file.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;

    let settings = devconf_config::load_settings()
        .wrap_err("cannot load settings")?;
    let log_file = cli.log_file.clone().unwrap_or_else(|| settings.log_file());
    let _log_guard = setup_tracing(cli.verbose, &log_file)?;

    if cli.list {
        print!("{}", commands::list_devices(settings.show_bus));
        return Ok(());
    }

    let name = cli.device.as_deref().unwrap_or_default();
    let device = catalog::find(name)
        .ok_or_else(|| eyre!("unknown device '{name}' (run with --list to see the catalog)"))?;

    let store_path = cli.store.clone().unwrap_or_else(|| settings.store_path());
    let mut store = FileStore::open(&store_path)
        .wrap_err_with(|| format!("cannot open device store {}", store_path.display()))?;

    if cli.dump {
        print!("{}", commands::dump_device(device, cli.instance, &store));
        return Ok(());
    }

    if !device.has_config() {
        println!("{} has no configurable settings.", device.name);
        return Ok(());
    }

    let handle = DeviceHandle::new(device, cli.instance);
    let ctx = DeviceContext::derive(handle, &store);
    info!(
        device = device.internal_name,
        context = %ctx,
        store = %store_path.display(),
        "opening dialog"
    );

    let outcome = configure_device(handle, &mut store, &mut TerminalPresenter::new())?;
    match outcome {
        SessionOutcome::Accepted { writes } if store.is_dirty() => {
            store.save()?;
            println!(
                "Saved {writes} settings for {ctx} to {}.",
                store.path().display()
            );
        }
        SessionOutcome::Accepted { .. } => println!("Nothing changed; {ctx} left as is."),
        SessionOutcome::Cancelled => println!("Cancelled; nothing saved."),
    }

    Ok(())
}
