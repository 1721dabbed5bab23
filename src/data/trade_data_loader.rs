use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, SystemTime};
use reqwest::Client;
use log::{info, warn};

use super::embedded;
use super::pattern_store::PatternStore;
use crate::config::Config;
use crate::errors::{PricecheckError, Result};
use crate::models::Category;

const ITEMS_FILE: &str = "items.json";
const STATS_FILE: &str = "stats.json";
const LANGUAGE_FILE: &str = "language.json";

/// `/api/trade/data/items` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemsData {
    pub result: Vec<ItemGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemGroup {
    pub id: String,
    pub label: String,
    pub entries: Vec<ItemEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEntry {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: String,
    pub text: Option<String>,
    #[serde(default)]
    pub flags: ItemFlags,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemFlags {
    #[serde(default)]
    pub unique: bool,
}

/// `/api/trade/data/stats` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsData {
    pub result: Vec<StatGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatGroup {
    pub id: String,
    pub label: String,
    pub entries: Vec<StatEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub stat_type: String,
}

/// How a pseudo stat is assembled from regular stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PseudoDefinitionData {
    pub id: String,
    pub sources: Vec<PseudoSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PseudoSource {
    /// Stat id without category prefix, e.g. "stat_3372524247".
    pub hash: String,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Keeps the raw item and stat tables a `PatternStore` is built from.
pub struct TradeDataLoader {
    client: Client,
    items: ItemsData,
    stats: StatsData,
    last_update: Option<SystemTime>,
}

impl TradeDataLoader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            items: ItemsData::default(),
            stats: StatsData::default(),
            last_update: None,
        }
    }

    pub fn with_tables(items: ItemsData, stats: StatsData) -> Self {
        Self {
            client: Client::new(),
            items,
            stats,
            last_update: Some(SystemTime::now()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.result.is_empty() || self.stats.result.is_empty()
    }

    // Load cached tables from a language data directory
    pub async fn load_from_dir(&mut self, dir: &Path) -> Result<()> {
        let items_path = dir.join(ITEMS_FILE);
        let content = tokio::fs::read_to_string(&items_path).await?;
        self.items = serde_json::from_str(&content)?;

        let content = tokio::fs::read_to_string(dir.join(STATS_FILE)).await?;
        self.stats = serde_json::from_str(&content)?;

        self.last_update = tokio::fs::metadata(&items_path).await?.modified().ok();
        info!("Loaded trade data from {}", dir.display());
        Ok(())
    }

    pub async fn save_to_dir(&self, dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(dir.join(ITEMS_FILE), serde_json::to_string_pretty(&self.items)?).await?;
        tokio::fs::write(dir.join(STATS_FILE), serde_json::to_string_pretty(&self.stats)?).await?;
        Ok(())
    }

    // Refresh both tables from the trade API of the given realm
    pub async fn update_from_api(&mut self, base_url: &str) -> Result<()> {
        let base_url = base_url.trim_end_matches('/');
        let items: ItemsData = self.fetch(&format!("{}/api/trade/data/items", base_url)).await?;
        let stats: StatsData = self.fetch(&format!("{}/api/trade/data/stats", base_url)).await?;
        self.items = items;
        self.stats = stats;
        self.last_update = Some(SystemTime::now());

        info!(
            "Fetched {} item groups and {} stat groups from {}",
            self.items.result.len(),
            self.stats.result.len(),
            base_url
        );
        Ok(())
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client
            .get(url)
            .header("User-Agent", concat!("poe-pricecheck/", env!("CARGO_PKG_VERSION")))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(PricecheckError::ApiError(format!(
                "{} returned {}: {}",
                url, status, message
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }

    // Check if the cache needs updating (e.g., if it's older than 24 hours)
    pub fn needs_update(&self, update_interval: Duration) -> bool {
        match self.last_update {
            Some(time) => time.elapsed().unwrap_or_default() > update_interval,
            None => true,
        }
    }

    pub fn into_store(self, language: super::GameLanguage) -> Result<PatternStore> {
        let pseudo = embedded::pseudo_definitions()?;
        PatternStore::build(language, &self.items, &self.stats, &pseudo)
    }

    // Get statistics about the current tables
    pub fn get_cache_stats(&self) -> serde_json::Value {
        let mut category_counts = HashMap::new();
        for group in &self.items.result {
            let category = format!("{:?}", determine_category(&group.id));
            *category_counts.entry(category).or_insert(0) += group.entries.len();
        }

        let stat_counts: HashMap<_, _> = self.stats.result.iter()
            .map(|group| (group.id.clone(), group.entries.len()))
            .collect();

        serde_json::json!({
            "item_groups": self.items.result.len(),
            "categories": category_counts,
            "stats": stat_counts,
            "last_update": self.last_update.map(|t| format!("{:?}", t)),
        })
    }
}

impl Default for TradeDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

// Map trade item group ids to our Category enum
pub fn determine_category(group_id: &str) -> Category {
    match group_id.to_lowercase().as_str() {
        "accessory" | "accessories" => Category::Accessory,
        "armour" | "armor" => Category::Armour,
        "card" | "cards" => Category::DivinationCard,
        "currency" => Category::Currency,
        "flask" | "flasks" => Category::Flask,
        "gem" | "gems" => Category::Gem,
        "jewel" => Category::Jewel,
        "map" | "maps" => Category::Map,
        "weapon" | "weapons" => Category::Weapon,
        "leaguestone" => Category::Leaguestone,
        "monster" => Category::ItemisedMonster,
        "heistequipment" => Category::HeistEquipment,
        "heistmission" => Category::Contract,
        "sanctum" => Category::Sanctum,
        "logbook" => Category::Logbook,
        _ => Category::Unknown,
    }
}

/// Language tables from `dir/language.json`, or the embedded ones when the file is missing.
pub async fn load_language(dir: &Path, code: &str) -> Result<super::GameLanguage> {
    match tokio::fs::read_to_string(dir.join(LANGUAGE_FILE)).await {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) => {
            warn!("No language file in {}: {}", dir.display(), e);
            embedded::language(code)
        }
    }
}

/// Build the pattern store for the configured language.
///
/// Uses the cached tables under `data_dir/<language>` when they are fresh,
/// refreshes them from the trade API when stale, and falls back to the
/// embedded English tables when neither is available.
pub async fn initialize_pattern_store(config: &Config) -> Result<PatternStore> {
    let Some(data_dir) = &config.data_dir else {
        return PatternStore::embedded_for(&config.language);
    };

    let dir = data_dir.join(&config.language);
    let language = load_language(&dir, &config.language).await?;
    let mut loader = TradeDataLoader::new();

    if let Err(e) = loader.load_from_dir(&dir).await {
        warn!("Could not load cached trade data: {}", e);
    }

    if loader.needs_update(config.refresh_interval()) {
        match loader.update_from_api(&language.trade_base_url).await {
            Ok(()) => loader.save_to_dir(&dir).await?,
            Err(e) if loader.is_empty() => {
                warn!("Trade data refresh failed, using embedded tables: {}", e);
                return PatternStore::embedded_for(&config.language);
            }
            Err(e) => warn!("Trade data refresh failed, keeping cached tables: {}", e),
        }
    }

    loader.into_store(language)
}
