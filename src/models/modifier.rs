use serde::{Deserialize, Serialize};

/// Where a modifier line came from on the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierCategory {
    Explicit,
    Implicit,
    Crafted,
    Fractured,
    Enchant,
    Scourge,
    Crucible,
    Sanctum,
    Pseudo,
}

impl ModifierCategory {
    /// Maps the group id used by the trade stats table.
    pub fn from_trade_id(id: &str) -> Option<Self> {
        match id {
            "explicit" => Some(ModifierCategory::Explicit),
            "implicit" => Some(ModifierCategory::Implicit),
            "crafted" => Some(ModifierCategory::Crafted),
            "fractured" => Some(ModifierCategory::Fractured),
            "enchant" => Some(ModifierCategory::Enchant),
            "scourge" => Some(ModifierCategory::Scourge),
            "crucible" => Some(ModifierCategory::Crucible),
            "sanctum" => Some(ModifierCategory::Sanctum),
            "pseudo" => Some(ModifierCategory::Pseudo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierLine {
    /// Line as printed, without its origin suffix.
    pub text: String,
    pub category: ModifierCategory,
    pub values: Vec<f64>,
    /// Trade stat id of the matched pattern, e.g. "explicit.stat_3299347043".
    pub stat_id: String,
    /// Pattern text with `#` placeholders, e.g. "+# to maximum Life".
    pub pattern: String,
}

impl ModifierLine {
    /// Stat id without its category prefix, shared by every origin of the same stat.
    pub fn stat_hash(&self) -> &str {
        stat_hash(&self.stat_id)
    }

    /// Single number the line contributes to aggregates; multi-value lines use their mean.
    pub fn aggregate_value(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }
}

pub fn stat_hash(stat_id: &str) -> &str {
    stat_id.split_once('.').map_or(stat_id, |(_, hash)| hash)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PseudoModifier {
    /// Trade stat id, e.g. "pseudo.pseudo_total_elemental_resistance".
    pub stat_id: String,
    pub text: String,
    pub value: f64,
    /// Indices into `Item::modifier_lines`.
    pub contributors: Vec<usize>,
}
