//! English tables compiled into the binary, used when no data directory is configured.

use super::game_language::GameLanguage;
use super::trade_data_loader::{ItemsData, PseudoDefinitionData, StatsData};
use crate::errors::{PricecheckError, Result};

const LANGUAGE_EN: &str = include_str!("../../data/en/language.json");
const ITEMS_EN: &str = include_str!("../../data/en/items.json");
const STATS_EN: &str = include_str!("../../data/en/stats.json");
const PSEUDO: &str = include_str!("../../data/pseudo.json");

fn select(code: &str, english: &'static str) -> Result<&'static str> {
    match code {
        "en" => Ok(english),
        other => Err(PricecheckError::UnsupportedLanguage(other.to_string())),
    }
}

pub fn language(code: &str) -> Result<GameLanguage> {
    Ok(serde_json::from_str(select(code, LANGUAGE_EN)?)?)
}

pub fn items(code: &str) -> Result<ItemsData> {
    Ok(serde_json::from_str(select(code, ITEMS_EN)?)?)
}

pub fn stats(code: &str) -> Result<StatsData> {
    Ok(serde_json::from_str(select(code, STATS_EN)?)?)
}

pub fn pseudo_definitions() -> Result<Vec<PseudoDefinitionData>> {
    Ok(serde_json::from_str(PSEUDO)?)
}
