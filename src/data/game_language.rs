//! Localized vocabulary for one game client language.
//!
//! Keys in the JSON files match the field names in PascalCase, so
//! `description_armour` is read from `"DescriptionArmour"`. Every label is
//! optional: a missing label means the property is neither parsed nor offered
//! as a trade filter.

use serde::{Deserialize, Serialize};

use crate::models::{Category, ModifierCategory, Rarity};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemClassDefinition {
    /// Class text as printed after "Item Class:".
    pub text: String,
    pub category: Category,
    /// Trade search category id, e.g. "armour.chest".
    pub trade_category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameLanguage {
    pub language_code: String,
    pub name: String,
    pub trade_base_url: String,
    pub separator: String,

    pub header_item_class: Option<String>,
    pub header_rarity: Option<String>,

    pub rarity_normal: Option<String>,
    pub rarity_magic: Option<String>,
    pub rarity_rare: Option<String>,
    pub rarity_unique: Option<String>,
    pub rarity_currency: Option<String>,
    pub rarity_gem: Option<String>,
    pub rarity_divination_card: Option<String>,

    pub description_quality: Option<String>,
    pub description_armour: Option<String>,
    pub description_evasion: Option<String>,
    pub description_energy_shield: Option<String>,
    pub description_chance_to_block: Option<String>,
    pub description_physical_damage: Option<String>,
    pub description_elemental_damage: Option<String>,
    pub description_critical_strike_chance: Option<String>,
    pub description_attacks_per_second: Option<String>,
    pub description_item_quantity: Option<String>,
    pub description_item_rarity: Option<String>,
    pub description_monster_pack_size: Option<String>,
    pub description_map_tier: Option<String>,
    pub description_area_level: Option<String>,
    pub description_level: Option<String>,
    pub description_item_level: Option<String>,
    pub description_stack_size: Option<String>,
    pub description_requirements: Option<String>,
    pub description_corrupted: Option<String>,
    pub description_unidentified: Option<String>,

    pub affix_superior: Option<String>,
    pub affix_blighted: Option<String>,
    pub affix_blight_ravaged: Option<String>,

    pub influence_crusader: Option<String>,
    pub influence_elder: Option<String>,
    pub influence_hunter: Option<String>,
    pub influence_redeemer: Option<String>,
    pub influence_shaper: Option<String>,
    pub influence_warlord: Option<String>,

    pub modifier_implicit: Option<String>,
    pub modifier_crafted: Option<String>,
    pub modifier_fractured: Option<String>,
    pub modifier_enchant: Option<String>,
    pub modifier_scourge: Option<String>,
    pub modifier_crucible: Option<String>,

    #[serde(default)]
    pub item_classes: Vec<ItemClassDefinition>,
}

impl GameLanguage {
    pub fn rarity_from_text(&self, text: &str) -> Rarity {
        let text = text.trim();
        let candidates = [
            (&self.rarity_normal, Rarity::Normal),
            (&self.rarity_magic, Rarity::Magic),
            (&self.rarity_rare, Rarity::Rare),
            (&self.rarity_unique, Rarity::Unique),
            (&self.rarity_currency, Rarity::Currency),
            (&self.rarity_gem, Rarity::Gem),
            (&self.rarity_divination_card, Rarity::DivinationCard),
        ];

        candidates
            .into_iter()
            .find(|(label, _)| label.as_deref() == Some(text))
            .map_or(Rarity::Unknown, |(_, rarity)| rarity)
    }

    /// Origin suffixes such as "(implicit)", paired with their category.
    pub fn modifier_suffixes(&self) -> Vec<(&str, ModifierCategory)> {
        [
            (&self.modifier_implicit, ModifierCategory::Implicit),
            (&self.modifier_crafted, ModifierCategory::Crafted),
            (&self.modifier_fractured, ModifierCategory::Fractured),
            (&self.modifier_enchant, ModifierCategory::Enchant),
            (&self.modifier_scourge, ModifierCategory::Scourge),
            (&self.modifier_crucible, ModifierCategory::Crucible),
        ]
        .into_iter()
        .filter_map(|(label, category)| label.as_deref().map(|label| (label, category)))
        .collect()
    }

    /// Labels whose `Label: value` lines make a block a property block.
    pub fn property_labels(&self) -> Vec<&str> {
        [
            &self.description_quality,
            &self.description_armour,
            &self.description_evasion,
            &self.description_energy_shield,
            &self.description_chance_to_block,
            &self.description_physical_damage,
            &self.description_elemental_damage,
            &self.description_critical_strike_chance,
            &self.description_attacks_per_second,
            &self.description_item_quantity,
            &self.description_item_rarity,
            &self.description_monster_pack_size,
            &self.description_map_tier,
            &self.description_area_level,
            &self.description_level,
            &self.description_item_level,
            &self.description_stack_size,
        ]
        .into_iter()
        .filter_map(|label| label.as_deref())
        .collect()
    }
}

/// Value of a `Label: value` line, tolerating locales that pad the colon.
pub fn labeled_value<'a>(line: &'a str, label: Option<&str>) -> Option<&'a str> {
    let rest = line.strip_prefix(label?)?;
    let rest = rest.trim_start().strip_prefix(':')?;
    Some(rest.trim())
}
