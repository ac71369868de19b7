use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use intown_core::{query_shops, Catalog, Coordinate};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "intown-cli")]
#[command(about = "Intown Local command line interface")]
struct Cli {
    /// YAML catalog to use instead of the built-in one.
    #[arg(long, global = true, env = "INTOWN_CATALOG_PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations.
    Migrate,
    /// Print catalog shops nearest-first from a location.
    Shops {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long)]
        category: Option<String>,
    },
    /// Print subscription plans.
    Plans,
    /// Print shop categories.
    Categories,
    /// Print the resolved configuration (database URL redacted).
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Migrate) => run_migrate().await?,
        Some(Commands::Shops { lat, lng, category }) => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            println!("{}", render_shops(&catalog, lat, lng, category.as_deref())?);
        }
        Some(Commands::Plans) => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            println!("{}", to_json(catalog.plans())?);
        }
        Some(Commands::Categories) => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            println!("{}", to_json(catalog.categories())?);
        }
        Some(Commands::Config) => {
            let config = intown_core::load_app_config()?;
            println!("{config:#?}");
        }
        None => println!("intown-cli ready; see --help"),
    }

    Ok(())
}

async fn run_migrate() -> anyhow::Result<()> {
    let config = intown_core::load_app_config()?;
    let pool_config = intown_db::PoolConfig::from_app_config(&config);
    let pool = intown_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = intown_db::run_migrations(&pool).await?;
    println!("applied {applied} migration(s)");
    pool.close().await;
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    Ok(Catalog::load_or_builtin(path)?)
}

fn render_shops(
    catalog: &Catalog,
    lat: f64,
    lng: f64,
    category: Option<&str>,
) -> anyhow::Result<String> {
    anyhow::ensure!(
        lat.is_finite() && lng.is_finite(),
        "latitude and longitude must be finite numbers"
    );
    let category = category.filter(|c| !c.is_empty());
    to_json(&query_shops(catalog, Coordinate::new(lat, lng), category))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
