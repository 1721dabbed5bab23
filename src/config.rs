use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::trade::TradeStatus;

/// Runtime settings, read from command line flags or `POE_PRICECHECK_*` variables.
#[derive(Debug, Clone, PartialEq, Args, Serialize, Deserialize)]
pub struct Config {
    /// Game client language of the copied item text
    #[arg(long, env = "POE_PRICECHECK_LANGUAGE", default_value = "en")]
    pub language: String,

    /// Directory holding cached trade data, one subdirectory per language
    #[arg(long, env = "POE_PRICECHECK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// League to search in
    #[arg(long, env = "POE_PRICECHECK_LEAGUE", default_value = "Standard")]
    pub league: String,

    /// Seller status for trade searches
    #[arg(long, value_enum, default_value_t = TradeStatus::Online)]
    pub status: TradeStatus,

    /// Hours before cached trade data is refreshed
    #[arg(long, default_value_t = 24)]
    pub refresh_hours: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            data_dir: None,
            league: "Standard".to_string(),
            status: TradeStatus::Online,
            refresh_hours: 24,
        }
    }
}

impl Config {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_hours * 60 * 60)
    }
}
