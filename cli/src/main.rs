//! Dimension CLI - browse, buy and upload 3D assets
//!
//! # Commands
//!
//! ```bash
//! dimension browse --category vehicles --sort price-low
//! dimension show 65f0c2
//! dimension buy 65f0c2 --buyer 0x…
//! dimension upload --model car.glb --thumbnail car.png --name "Car" \
//!     --description "Low poly" --category vehicles --price 0.05 --creator 0x…
//! dimension link --category nature     # shareable catalog URL
//! ```
//!
//! Settings come from the environment (or a `.env` file):
//! `DIMENSION_API_BASE`, `DIMENSION_MEDIA_ORIGIN`, `DIMENSION_TX_DELAY_MS`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

use dimension_cli::{browse, buy, listing, show, upload, CliError, MarketClient, UploadArgs};
use dimension_core::config::{DEFAULT_REMOTE_API_BASE, ENV_API_BASE};
use dimension_core::{pricing, wallet, Asset, CatalogQuery, Category, MarketConfig, Route, SortOrder};

#[derive(Parser)]
#[command(name = "dimension")]
#[command(about = "Browse, buy and upload 3D assets on Dimension Market", long_about = None)]
struct Cli {
    /// Catalog API base URL (overrides DIMENSION_API_BASE)
    #[arg(long, global = true)]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog assets
    Browse {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one asset
    Show {
        /// Asset identifier
        id: String,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Buy an asset (simulated transaction)
    Buy {
        /// Asset identifier
        id: String,

        /// Buyer wallet address
        #[arg(long)]
        buyer: String,

        /// Skip the simulated confirmation delay
        #[arg(long)]
        no_delay: bool,
    },

    /// Publish a new asset
    Upload {
        /// 3D model (.glb, .gltf, .obj; max 50 MB)
        #[arg(long)]
        model: PathBuf,

        /// Thumbnail (.png, .jpg, .jpeg, .webp; max 5 MB)
        #[arg(long)]
        thumbnail: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        /// characters, vehicles, architecture, nature, props, abstract
        #[arg(long)]
        category: Category,

        /// Price in ETH
        #[arg(long)]
        price: String,

        /// Creator wallet address
        #[arg(long)]
        creator: String,
    },

    /// Print a shareable catalog link
    Link {
        #[command(flatten)]
        filter: FilterArgs,

        /// Site origin the link points to
        #[arg(long, env = "DIMENSION_SITE_ORIGIN", default_value = "http://localhost:3000")]
        site: String,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Category filter ("all" for every category)
    #[arg(short, long, default_value = "all")]
    category: String,

    /// newest, popular, price-low, price-high
    #[arg(short, long, default_value = "newest")]
    sort: SortOrder,

    /// Free-text search
    #[arg(long, default_value = "")]
    search: String,
}

impl FilterArgs {
    fn query(&self) -> Result<CatalogQuery, CliError> {
        let category = match self.category.trim() {
            "" | "all" => None,
            other => Some(other.parse::<Category>().map_err(CliError::Config)?),
        };
        Ok(CatalogQuery::new()
            .with_category(category)
            .with_sort(self.sort)
            .with_search(self.search.clone()))
    }
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(api_override: Option<String>) -> MarketConfig {
    let config = MarketConfig::from_lookup(|key| std::env::var(key).ok());
    match api_override {
        Some(api) => config.with_api_base(api),
        None if std::env::var(ENV_API_BASE).is_err() => config.with_api_base(DEFAULT_REMOTE_API_BASE),
        None => config,
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.api);

    match cli.command {
        Commands::Link { filter, site } => {
            println!("{}", Route::Catalog(filter.query()?).share_url(&site));
            Ok(())
        }
        Commands::Browse { filter, json } => {
            let client = MarketClient::new(config)?;
            cmd_browse(&client, &filter.query()?, json).await
        }
        Commands::Show { id, json } => {
            let client = MarketClient::new(config)?;
            cmd_show(&client, &id, json).await
        }
        Commands::Buy { id, buyer, no_delay } => {
            let client = MarketClient::new(config)?;
            cmd_buy(&client, &id, &buyer, no_delay).await
        }
        Commands::Upload {
            model,
            thumbnail,
            name,
            description,
            category,
            price,
            creator,
        } => {
            let client = MarketClient::new(config)?;
            let args = UploadArgs {
                model,
                thumbnail,
                name,
                description,
                category,
                price,
                creator,
            };
            cmd_upload(&client, &args).await
        }
    }
}

async fn cmd_browse(client: &MarketClient, query: &CatalogQuery, json: bool) -> Result<(), CliError> {
    eprintln!("🔎 {}", client.config().api_url(&query.api_path()));

    let assets = listing(browse(client, query).await)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assets)?);
        return Ok(());
    }
    if assets.is_empty() {
        eprintln!("📭 No assets found");
        eprintln!("   Try adjusting your search or filters.");
        return Ok(());
    }
    eprintln!("📦 {} assets\n", assets.len());
    for asset in &assets {
        print_card(asset);
    }
    Ok(())
}

fn print_card(asset: &Asset) {
    println!("  🧊 {} ({})", asset.name, asset.id);
    println!(
        "     {} • {} ETH {} • {} views • {} sold",
        asset.category.label(),
        asset.price,
        pricing::usd_card(&asset.price).unwrap_or_default(),
        asset.views,
        asset.purchases
    );
    println!();
}

async fn cmd_show(client: &MarketClient, id: &str, json: bool) -> Result<(), CliError> {
    let asset = show(client, id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&asset)?);
        return Ok(());
    }

    let config = client.config();
    println!("🧊 {} [{}]", asset.name, asset.category.label());
    println!("   by {} ({})", asset.creator_name(), wallet::short_address(&asset.creator_address));
    println!("   {} views • {} sold", asset.views, asset.purchases);
    println!(
        "   Price: {} ETH {}",
        asset.price,
        pricing::usd_hint(&asset.price).unwrap_or_default()
    );
    if !asset.description.is_empty() {
        println!("\n{}\n", asset.description);
    }
    if let Some(url) = &asset.model_url {
        println!("   Model:     {}", config.media_url(url));
    }
    if let Some(url) = &asset.thumbnail_url {
        println!("   Thumbnail: {}", config.media_url(url));
    }
    Ok(())
}

async fn cmd_buy(client: &MarketClient, id: &str, buyer: &str, no_delay: bool) -> Result<(), CliError> {
    eprintln!("🛒 Purchasing {}...", id);
    if !no_delay {
        eprintln!("⏳ Waiting for simulated confirmation...");
    }
    let record = buy(client, id, buyer, no_delay).await?;
    eprintln!("✅ Purchase recorded");
    println!("{}", record.tx_hash);
    Ok(())
}

async fn cmd_upload(client: &MarketClient, args: &UploadArgs) -> Result<(), CliError> {
    eprintln!("📤 Uploading {}...", args.name);
    let route = upload(client, args).await?;
    eprintln!("✅ Published!");
    println!("{}", route.path());
    Ok(())
}
