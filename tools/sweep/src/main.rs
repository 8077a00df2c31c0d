//! netbox-sweep - delete VLAN groups left behind by test runs.
//!
//! Reads the same `NETBOX_*` environment as the provider.

use anyhow::{Context, Result};
use clap::Parser;
use netbox_provider::{logging, sweeper, Provider, ProviderConfig};
use tracing::info;

/// Delete test-created VLAN groups by name prefix.
#[derive(Debug, Parser)]
#[command(name = "netbox-sweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Name prefix of the groups to delete.
    #[arg(long, env = "NETBOX_SWEEP_PREFIX", default_value = sweeper::TEST_PREFIX)]
    prefix: String,

    /// List matching groups without deleting them.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ProviderConfig::from_env()?;
    logging::init_logging(&config.log_level)?;

    let provider = Provider::configure(&config)?;
    info!(prefix = %cli.prefix, dry_run = cli.dry_run, "Sweeping VLAN groups");

    if cli.dry_run {
        let groups = sweeper::find_vlan_groups(provider.api(), &cli.prefix)
            .await
            .context("failed to list VLAN groups")?;
        for group in &groups {
            println!("{}\t{}", group.id, group.name.as_deref().unwrap_or("-"));
        }
        println!("{} VLAN group(s) would be deleted", groups.len());
        return Ok(());
    }

    let deleted = sweeper::sweep_vlan_groups(provider.api(), &cli.prefix)
        .await
        .context("failed to sweep VLAN groups")?;
    println!("Deleted {deleted} VLAN group(s)");

    Ok(())
}
