use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use serde_json::json;

use poe_pricecheck::data::{load_language, TradeDataLoader};
use poe_pricecheck::{
    initialize_pattern_store, Config, Item, ItemParser, PatternStore, PricecheckError, Result,
    TradeFilterService, TradeQueryBuilder,
};

const DEFAULT_DATA_DIR: &str = "trade-data";

#[derive(Parser)]
#[command(
    name = "poe-pricecheck",
    version,
    about = "Parse copied item text and derive trade filters"
)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse item text into a structured item
    Parse {
        /// File with the copied item text, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Show the trade filters offered for an item
    Filters { file: Option<PathBuf> },
    /// Build the trade search request for an item's default filters
    Query { file: Option<PathBuf> },
    /// Download the items and stats tables from the trade API
    UpdateData,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config;

    let output = match cli.command {
        Commands::UpdateData => return update_data(&config).await,
        Commands::Parse { file } => {
            let (_, item) = load_item(&config, file.as_ref()).await?;
            serde_json::to_value(&item)?
        }
        Commands::Filters { file } => {
            let (store, item) = load_item(&config, file.as_ref()).await?;
            let service = TradeFilterService::new(store.language());
            json!({
                "modifier_filters": service.get_modifier_filters(&item),
                "pseudo_modifier_filters": service.get_pseudo_modifier_filters(&item),
                "property_filters": service.get_property_filters(&item),
            })
        }
        Commands::Query { file } => {
            let (store, item) = load_item(&config, file.as_ref()).await?;
            let service = TradeFilterService::new(store.language());
            let request = TradeQueryBuilder::new(config.status).build(
                &item,
                &service.get_modifier_filters(&item),
                &service.get_pseudo_modifier_filters(&item),
                &service.get_property_filters(&item),
            );
            let base_url = &store.language().trade_base_url;
            json!({
                "url": format!("{}api/trade/search/{}", base_url, config.league),
                "body": request,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn load_item(config: &Config, file: Option<&PathBuf>) -> Result<(PatternStore, Item)> {
    let store = initialize_pattern_store(config).await?;
    let text = read_input(file)?;
    let item = ItemParser::new(&store).try_parse_item(&text)?;
    Ok((store, item))
}

async fn update_data(config: &Config) -> Result<()> {
    let dir = config
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
        .join(&config.language);
    let language = load_language(&dir, &config.language).await?;

    let mut loader = TradeDataLoader::new();
    loader.update_from_api(&language.trade_base_url).await?;
    loader.save_to_dir(&dir).await?;

    info!("Saved trade data to {}", dir.display());
    println!("{}", serde_json::to_string_pretty(&loader.get_cache_stats())?);
    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    if text.trim().is_empty() {
        return Err(PricecheckError::MalformedInput("no item text on input".to_string()));
    }
    Ok(text)
}
