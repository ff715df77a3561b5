//! `propcache-seed`: fills the record store with synthetic listings.

use anyhow::{Context, Result};
use clap::Parser;
use propcache_config::ConfigLoader;
use propcache_server::{di, startup};
use tracing::error;

/// Seed the database with random Property rows.
#[derive(Debug, Parser)]
#[command(name = "propcache-seed", version, about)]
struct Args {
    /// Number of listings to create.
    #[arg(long, default_value_t = 20)]
    count: u64,

    /// Delete every existing listing first.
    #[arg(long)]
    flush: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Seeding failed: {:#}", e);
        eprintln!("Seeding failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = ConfigLoader::from_default_location()
        .context("Failed to load configuration")?
        .get()
        .await;
    startup::init_logging(&config.observability);

    let module = di::build_module(&config)
        .await
        .context("Failed to connect backends")?;
    let report = module
        .seeder()
        .seed(args.count, args.flush)
        .await
        .context("Failed to seed listings")?;

    if let Some(flushed) = report.flushed {
        println!("Flushed {} existing Property rows.", flushed);
    }
    println!("Seeded {} Property rows.", report.created);

    module.shutdown().await;
    Ok(())
}
