use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::segmenter::{BlockRole, ParsingItem};
use crate::data::game_language::labeled_value;
use crate::data::PatternStore;
use crate::models::{DamageRange, Influences, ItemMetadata, ItemProperties, Rarity};

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?\d+(?:[.,]\d+)?").expect("valid number pattern"));
static DAMAGE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*[-–]\s*(\d+(?:[.,]\d+)?)").expect("valid range pattern")
});

fn to_f64(text: &str) -> Option<f64> {
    text.replace(',', ".").parse().ok()
}

/// First number in a property value, ignoring signs and units around it.
pub fn parse_number(value: &str) -> Option<f64> {
    NUMBER.find(value).and_then(|m| to_f64(m.as_str()))
}

pub fn parse_count(value: &str) -> Option<u32> {
    parse_number(value)
        .filter(|number| *number >= 0.0)
        .map(|number| number.round() as u32)
}

pub fn parse_ranges(value: &str) -> Vec<DamageRange> {
    DAMAGE_RANGE
        .captures_iter(value)
        .filter_map(|captures| {
            let min = to_f64(captures.get(1)?.as_str())?;
            let max = to_f64(captures.get(2)?.as_str())?;
            Some(DamageRange::new(min, max))
        })
        .collect()
}

pub struct PropertyExtractor<'a> {
    store: &'a PatternStore,
}

impl<'a> PropertyExtractor<'a> {
    pub fn new(store: &'a PatternStore) -> Self {
        Self { store }
    }

    /// Properties of the item, plus `Label: value` lines nothing recognised.
    pub fn extract(
        &self,
        parsing: &ParsingItem,
        metadata: &ItemMetadata,
    ) -> (ItemProperties, Vec<String>) {
        let language = self.store.language();
        let mut properties = ItemProperties::default();
        let mut unparsed = Vec::new();

        for block in parsing.blocks_with_role(BlockRole::Properties) {
            for line in &block.lines {
                if !self.parse_line(&mut properties, line, metadata) && line.contains(':') {
                    debug!("Unrecognized property line: {}", line);
                    unparsed.push(line.clone());
                }
            }
        }

        let type_line = parsing.header.type_line.as_str();
        let type_line = language
            .affix_superior
            .as_deref()
            .and_then(|superior| type_line.strip_prefix(superior))
            .map_or(type_line, str::trim_start);
        let has_affix = |affix: &Option<String>| {
            affix.as_deref().is_some_and(|affix| type_line.starts_with(affix))
        };
        properties.blight_ravaged = has_affix(&language.affix_blight_ravaged);
        properties.blighted = !properties.blight_ravaged && has_affix(&language.affix_blighted);

        properties.corrupted = parsing
            .body()
            .flat_map(|block| block.lines.iter())
            .any(|line| language.description_corrupted.as_deref() == Some(line.as_str()));

        properties.compute_dps();
        (properties, unparsed)
    }

    pub fn influences(&self, parsing: &ParsingItem) -> Influences {
        let language = self.store.language();
        let footer: Vec<&str> = parsing
            .blocks_with_role(BlockRole::Flavor)
            .flat_map(|block| block.lines.iter().map(String::as_str))
            .collect();
        let has = |label: &Option<String>| {
            label.as_deref().is_some_and(|label| footer.contains(&label))
        };

        Influences {
            crusader: has(&language.influence_crusader),
            elder: has(&language.influence_elder),
            hunter: has(&language.influence_hunter),
            redeemer: has(&language.influence_redeemer),
            shaper: has(&language.influence_shaper),
            warlord: has(&language.influence_warlord),
        }
    }

    fn parse_line(
        &self,
        properties: &mut ItemProperties,
        line: &str,
        metadata: &ItemMetadata,
    ) -> bool {
        let language = self.store.language();
        let value = |label: &Option<String>| labeled_value(line, label.as_deref());

        if let Some(v) = value(&language.description_quality) {
            properties.quality = parse_count(v);
        } else if let Some(v) = value(&language.description_armour) {
            properties.armor = parse_count(v);
        } else if let Some(v) = value(&language.description_evasion) {
            properties.evasion = parse_count(v);
        } else if let Some(v) = value(&language.description_energy_shield) {
            properties.energy_shield = parse_count(v);
        } else if let Some(v) = value(&language.description_chance_to_block) {
            properties.chance_to_block = parse_count(v);
        } else if let Some(v) = value(&language.description_physical_damage) {
            properties.physical_damage = parse_ranges(v).into_iter().next();
        } else if let Some(v) = value(&language.description_elemental_damage) {
            properties.elemental_damages = parse_ranges(v);
        } else if let Some(v) = value(&language.description_critical_strike_chance) {
            properties.critical_strike_chance = parse_number(v);
        } else if let Some(v) = value(&language.description_attacks_per_second) {
            properties.attacks_per_second = parse_number(v);
        } else if let Some(v) = value(&language.description_item_quantity) {
            properties.item_quantity = parse_count(v);
        } else if let Some(v) = value(&language.description_item_rarity) {
            properties.item_rarity = parse_count(v);
        } else if let Some(v) = value(&language.description_monster_pack_size) {
            properties.monster_pack_size = parse_count(v);
        } else if let Some(v) = value(&language.description_map_tier) {
            properties.map_tier = parse_count(v);
        } else if let Some(v) = value(&language.description_area_level) {
            properties.area_level = parse_count(v);
        } else if let Some(v) = value(&language.description_item_level) {
            properties.item_level = parse_count(v);
        } else if let Some(v) = value(&language.description_level) {
            // Outside the requirements block only gems print a bare level
            if metadata.rarity == Rarity::Gem {
                properties.gem_level = parse_count(v);
            }
        } else {
            return value(&language.description_stack_size).is_some();
        }
        true
    }
}
