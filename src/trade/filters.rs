use serde::Serialize;

use crate::models::{DamageRange, ModifierLine, PseudoModifier};

/// Every property a trade search can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyFilterType {
    ArmourArmour,
    ArmourEvasion,
    ArmourEnergyShield,
    ArmourBlock,

    WeaponPhysicalDps,
    WeaponElementalDps,
    WeaponDps,
    WeaponPhysicalDamage,
    WeaponElementalDamage,
    WeaponAttacksPerSecond,
    WeaponCriticalStrikeChance,

    MapItemQuantity,
    MapItemRarity,
    MapMonsterPackSize,
    MapBlighted,
    MapBlightRavaged,
    MapTier,
    MapAreaLevel,

    MiscQuality,
    MiscGemLevel,
    MiscItemLevel,
    MiscCorrupted,
    MiscCrusader,
    MiscElder,
    MiscHunter,
    MiscRedeemer,
    MiscShaper,
    MiscWarlord,
}

impl PropertyFilterType {
    /// Filter key used by the trade search API. Total elemental damage has none.
    pub fn trade_key(&self) -> Option<&'static str> {
        let key = match self {
            PropertyFilterType::ArmourArmour => "ar",
            PropertyFilterType::ArmourEvasion => "ev",
            PropertyFilterType::ArmourEnergyShield => "es",
            PropertyFilterType::ArmourBlock => "block",
            PropertyFilterType::WeaponPhysicalDps => "pdps",
            PropertyFilterType::WeaponElementalDps => "edps",
            PropertyFilterType::WeaponDps => "dps",
            PropertyFilterType::WeaponPhysicalDamage => "damage",
            PropertyFilterType::WeaponElementalDamage => return None,
            PropertyFilterType::WeaponAttacksPerSecond => "aps",
            PropertyFilterType::WeaponCriticalStrikeChance => "crit",
            PropertyFilterType::MapItemQuantity => "map_iiq",
            PropertyFilterType::MapItemRarity => "map_iir",
            PropertyFilterType::MapMonsterPackSize => "map_packsize",
            PropertyFilterType::MapBlighted => "map_blighted",
            PropertyFilterType::MapBlightRavaged => "map_uberblighted",
            PropertyFilterType::MapTier => "map_tier",
            PropertyFilterType::MapAreaLevel => "area_level",
            PropertyFilterType::MiscQuality => "quality",
            PropertyFilterType::MiscGemLevel => "gem_level",
            PropertyFilterType::MiscItemLevel => "ilvl",
            PropertyFilterType::MiscCorrupted => "corrupted",
            PropertyFilterType::MiscCrusader => "crusader_item",
            PropertyFilterType::MiscElder => "elder_item",
            PropertyFilterType::MiscHunter => "hunter_item",
            PropertyFilterType::MiscRedeemer => "redeemer_item",
            PropertyFilterType::MiscShaper => "shaper_item",
            PropertyFilterType::MiscWarlord => "warlord_item",
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Boolean(bool),
    Range(DamageRange),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyFilter {
    pub filter_type: PropertyFilterType,
    pub text: String,
    pub value: FilterValue,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub delta: f64,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyFilters {
    pub base_type_filter_applied: bool,
    pub class_filter_applied: bool,
    pub rarity_filter_applied: bool,
    pub weapon: Vec<PropertyFilter>,
    pub armour: Vec<PropertyFilter>,
    pub map: Vec<PropertyFilter>,
    pub misc: Vec<PropertyFilter>,
}

impl Default for PropertyFilters {
    fn default() -> Self {
        Self {
            base_type_filter_applied: true,
            class_filter_applied: false,
            rarity_filter_applied: false,
            weapon: Vec::new(),
            armour: Vec::new(),
            map: Vec::new(),
            misc: Vec::new(),
        }
    }
}

impl PropertyFilters {
    pub fn is_empty(&self) -> bool {
        self.weapon.is_empty()
            && self.armour.is_empty()
            && self.map.is_empty()
            && self.misc.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyFilter> {
        self.weapon
            .iter()
            .chain(&self.armour)
            .chain(&self.map)
            .chain(&self.misc)
    }
}

/// Selection state for one modifier line. Disabled until the user picks it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifierFilter<'a> {
    pub line: &'a ModifierLine,
    pub enabled: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl<'a> ModifierFilter<'a> {
    pub fn new(line: &'a ModifierLine) -> Self {
        Self {
            line,
            enabled: false,
            min: line.aggregate_value(),
            max: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PseudoModifierFilter<'a> {
    pub pseudo: &'a PseudoModifier,
    pub enabled: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl<'a> PseudoModifierFilter<'a> {
    pub fn new(pseudo: &'a PseudoModifier) -> Self {
        Self {
            pseudo,
            enabled: false,
            min: Some(pseudo.value),
            max: None,
        }
    }
}

/// Display labels that do not come from the game client.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResources {
    pub physical_dps: Option<String>,
    pub elemental_dps: Option<String>,
    pub damage_per_second: Option<String>,
}

impl Default for FilterResources {
    fn default() -> Self {
        Self {
            physical_dps: Some("Physical DPS".to_string()),
            elemental_dps: Some("Elemental DPS".to_string()),
            damage_per_second: Some("Total DPS".to_string()),
        }
    }
}
