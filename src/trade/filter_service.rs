//! Derives the trade filter collections offered for a parsed item.
//!
//! Every function here is total: an item with nothing filterable yields empty
//! collections, never an error.

use log::debug;

use super::filters::{
    FilterResources, FilterValue, ModifierFilter, PropertyFilter, PropertyFilterType,
    PropertyFilters, PseudoModifierFilter,
};
use crate::data::GameLanguage;
use crate::models::{DamageRange, Item, Rarity};

const DEFAULT_DELTA: f64 = 1.0;
const ATTACKS_PER_SECOND_DELTA: f64 = 0.1;
const ITEM_LEVEL_THRESHOLD: u32 = 80;

pub struct TradeFilterService<'a> {
    language: Option<&'a GameLanguage>,
    resources: FilterResources,
}

impl<'a> TradeFilterService<'a> {
    pub fn new(language: &'a GameLanguage) -> Self {
        Self {
            language: Some(language),
            resources: FilterResources::default(),
        }
    }

    /// A service without game labels; only filters labelled by `resources` can appear.
    pub fn without_language(resources: FilterResources) -> Self {
        Self {
            language: None,
            resources,
        }
    }

    pub fn get_modifier_filters<'i>(&self, item: &'i Item) -> Vec<ModifierFilter<'i>> {
        if !item.metadata.category.has_modifier_filters() {
            return Vec::new();
        }

        item.modifier_lines.iter().map(ModifierFilter::new).collect()
    }

    pub fn get_pseudo_modifier_filters<'i>(&self, item: &'i Item) -> Vec<PseudoModifierFilter<'i>> {
        if !item.metadata.category.has_pseudo_filters() {
            return Vec::new();
        }

        item.pseudo_modifiers.iter().map(PseudoModifierFilter::new).collect()
    }

    pub fn get_property_filters(&self, item: &Item) -> PropertyFilters {
        let mut filters = PropertyFilters::default();
        if !item.metadata.category.has_property_filters() {
            return filters;
        }

        let properties = &item.properties;
        let influences = &item.influences;
        let rarity = item.metadata.rarity;
        let label = |select: fn(&GameLanguage) -> &Option<String>| {
            self.language.and_then(|language| select(language).clone())
        };
        let count = |value: Option<u32>| value.map(f64::from);

        let item_level_enabled = properties.item_level.unwrap_or(0) >= ITEM_LEVEL_THRESHOLD
            && properties.map_tier.unwrap_or(0) == 0
            && rarity != Rarity::Unique;

        filters.armour = [
            numeric(
                PropertyFilterType::ArmourArmour,
                label(|l| &l.description_armour),
                count(properties.armor),
            ),
            numeric(
                PropertyFilterType::ArmourEvasion,
                label(|l| &l.description_evasion),
                count(properties.evasion),
            ),
            numeric(
                PropertyFilterType::ArmourEnergyShield,
                label(|l| &l.description_energy_shield),
                count(properties.energy_shield),
            ),
            numeric(
                PropertyFilterType::ArmourBlock,
                label(|l| &l.description_chance_to_block),
                count(properties.chance_to_block),
            ),
        ]
        .into_iter()
        .flatten()
        .collect();

        filters.weapon = [
            numeric(
                PropertyFilterType::WeaponPhysicalDps,
                self.resources.physical_dps.clone(),
                properties.physical_dps,
            ),
            numeric(
                PropertyFilterType::WeaponElementalDps,
                self.resources.elemental_dps.clone(),
                properties.elemental_dps,
            ),
            numeric(
                PropertyFilterType::WeaponDps,
                self.resources.damage_per_second.clone(),
                properties.damage_per_second,
            ),
            damage_range(
                PropertyFilterType::WeaponPhysicalDamage,
                label(|l| &l.description_physical_damage),
                properties.physical_damage.unwrap_or_default(),
            ),
            damage_range(
                PropertyFilterType::WeaponElementalDamage,
                label(|l| &l.description_elemental_damage),
                properties.total_elemental_damage(),
            ),
            numeric(
                PropertyFilterType::WeaponAttacksPerSecond,
                label(|l| &l.description_attacks_per_second),
                properties.attacks_per_second,
            )
            .map(|filter| PropertyFilter {
                delta: ATTACKS_PER_SECOND_DELTA,
                ..filter
            }),
            numeric(
                PropertyFilterType::WeaponCriticalStrikeChance,
                label(|l| &l.description_critical_strike_chance),
                properties.critical_strike_chance,
            ),
        ]
        .into_iter()
        .flatten()
        .collect();

        filters.map = [
            numeric(
                PropertyFilterType::MapItemQuantity,
                label(|l| &l.description_item_quantity),
                count(properties.item_quantity),
            ),
            numeric(
                PropertyFilterType::MapItemRarity,
                label(|l| &l.description_item_rarity),
                count(properties.item_rarity),
            ),
            numeric(
                PropertyFilterType::MapMonsterPackSize,
                label(|l| &l.description_monster_pack_size),
                count(properties.monster_pack_size),
            ),
            boolean(
                PropertyFilterType::MapBlighted,
                label(|l| &l.affix_blighted),
                properties.blighted,
            ),
            boolean(
                PropertyFilterType::MapBlightRavaged,
                label(|l| &l.affix_blight_ravaged),
                properties.blight_ravaged,
            ),
            numeric(
                PropertyFilterType::MapTier,
                label(|l| &l.description_map_tier),
                count(properties.map_tier),
            )
            .map(|filter| PropertyFilter {
                enabled: true,
                ..filter
            }),
            numeric(
                PropertyFilterType::MapAreaLevel,
                label(|l| &l.description_area_level),
                count(properties.area_level),
            )
            .map(|filter| PropertyFilter {
                enabled: true,
                ..filter
            }),
        ]
        .into_iter()
        .flatten()
        .collect();

        filters.misc = [
            numeric(
                PropertyFilterType::MiscQuality,
                label(|l| &l.description_quality),
                count(properties.quality),
            )
            .map(|filter| PropertyFilter {
                enabled: rarity == Rarity::Gem,
                ..filter
            }),
            numeric(
                PropertyFilterType::MiscGemLevel,
                label(|l| &l.description_level),
                count(properties.gem_level),
            )
            .map(|filter| PropertyFilter {
                enabled: true,
                ..filter
            }),
            numeric(
                PropertyFilterType::MiscItemLevel,
                label(|l| &l.description_item_level),
                count(properties.item_level),
            )
            .map(|filter| PropertyFilter {
                enabled: item_level_enabled,
                ..filter
            }),
            boolean(
                PropertyFilterType::MiscCorrupted,
                label(|l| &l.description_corrupted),
                properties.corrupted,
            ),
            boolean(
                PropertyFilterType::MiscCrusader,
                label(|l| &l.influence_crusader),
                influences.crusader,
            ),
            boolean(
                PropertyFilterType::MiscElder,
                label(|l| &l.influence_elder),
                influences.elder,
            ),
            boolean(
                PropertyFilterType::MiscHunter,
                label(|l| &l.influence_hunter),
                influences.hunter,
            ),
            boolean(
                PropertyFilterType::MiscRedeemer,
                label(|l| &l.influence_redeemer),
                influences.redeemer,
            ),
            boolean(
                PropertyFilterType::MiscShaper,
                label(|l| &l.influence_shaper),
                influences.shaper,
            ),
            boolean(
                PropertyFilterType::MiscWarlord,
                label(|l| &l.influence_warlord),
                influences.warlord,
            ),
        ]
        .into_iter()
        .flatten()
        .collect();

        filters
    }
}

/// Numeric filter, disabled with delta 1, present only for a positive value and a label.
fn numeric(
    filter_type: PropertyFilterType,
    text: Option<String>,
    value: Option<f64>,
) -> Option<PropertyFilter> {
    let value = value.filter(|value| *value > 0.0)?;
    let text = labelled(filter_type, text)?;

    Some(PropertyFilter {
        filter_type,
        text,
        value: FilterValue::Number(value),
        min: Some(value),
        max: None,
        delta: DEFAULT_DELTA,
        enabled: false,
    })
}

/// Flag filter, only for set flags, always enabled.
fn boolean(
    filter_type: PropertyFilterType,
    text: Option<String>,
    value: bool,
) -> Option<PropertyFilter> {
    if !value {
        return None;
    }
    let text = labelled(filter_type, text)?;

    Some(PropertyFilter {
        filter_type,
        text,
        value: FilterValue::Boolean(true),
        min: None,
        max: None,
        delta: DEFAULT_DELTA,
        enabled: true,
    })
}

fn damage_range(
    filter_type: PropertyFilterType,
    text: Option<String>,
    range: DamageRange,
) -> Option<PropertyFilter> {
    if !range.has_value() {
        return None;
    }
    let text = labelled(filter_type, text)?;

    Some(PropertyFilter {
        filter_type,
        text,
        value: FilterValue::Range(range),
        min: Some(range.min),
        max: Some(range.max),
        delta: DEFAULT_DELTA,
        enabled: false,
    })
}

fn labelled(filter_type: PropertyFilterType, text: Option<String>) -> Option<String> {
    if text.is_none() {
        debug!("No label for {:?}, filter suppressed", filter_type);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{embedded, PatternStore};
    use crate::models::{
        Category, ItemMetadata, ItemProperties, ModifierCategory, ModifierLine, PseudoModifier,
    };
    use crate::parser::ItemParser;

    fn item(category: Category, rarity: Rarity, properties: ItemProperties) -> Item {
        let metadata = ItemMetadata::new(category, "Test Base".to_string(), rarity);
        let mut item = Item::new(metadata, String::new());
        item.properties = properties;
        item.modifier_lines.push(ModifierLine {
            text: "+90 to maximum Life".to_string(),
            category: ModifierCategory::Explicit,
            values: vec![90.0],
            stat_id: "explicit.stat_3299347043".to_string(),
            pattern: "+# to maximum Life".to_string(),
        });
        item.pseudo_modifiers.push(PseudoModifier {
            stat_id: "pseudo.pseudo_total_life".to_string(),
            text: "+# total maximum Life".to_string(),
            value: 90.0,
            contributors: vec![0],
        });
        item
    }

    fn find(filters: &PropertyFilters, filter_type: PropertyFilterType) -> Option<&PropertyFilter> {
        filters.iter().find(|filter| filter.filter_type == filter_type)
    }

    fn everything() -> ItemProperties {
        ItemProperties {
            armor: Some(100),
            quality: Some(20),
            item_level: Some(85),
            corrupted: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_modifier_filter_exclusions() {
        let language = embedded::language("en").unwrap();
        let service = TradeFilterService::new(&language);

        for category in [
            Category::DivinationCard,
            Category::Gem,
            Category::ItemisedMonster,
            Category::Leaguestone,
            Category::Unknown,
        ] {
            let item = item(category, Rarity::Rare, everything());
            assert!(service.get_modifier_filters(&item).is_empty());
            assert!(service.get_pseudo_modifier_filters(&item).is_empty());
        }

        let currency = item(Category::Currency, Rarity::Currency, everything());
        assert_eq!(service.get_modifier_filters(&currency).len(), 1);
        assert!(service.get_pseudo_modifier_filters(&currency).is_empty());

        let armour = item(Category::Armour, Rarity::Rare, everything());
        let modifiers = service.get_modifier_filters(&armour);
        assert_eq!(modifiers.len(), 1);
        assert_eq!(modifiers[0].line.stat_id, "explicit.stat_3299347043");
        assert_eq!(service.get_pseudo_modifier_filters(&armour).len(), 1);
    }

    #[test]
    fn test_property_filter_exclusions() {
        let language = embedded::language("en").unwrap();
        let service = TradeFilterService::new(&language);

        for category in [
            Category::DivinationCard,
            Category::Currency,
            Category::ItemisedMonster,
            Category::Leaguestone,
            Category::Unknown,
        ] {
            let filters = service.get_property_filters(&item(category, Rarity::Rare, everything()));
            assert!(filters.is_empty());
            assert!(filters.base_type_filter_applied);
        }

        let gem = service.get_property_filters(&item(Category::Gem, Rarity::Gem, everything()));
        assert!(!gem.is_empty());
    }

    #[test]
    fn test_numeric_filters_require_positive_value() {
        let language = embedded::language("en").unwrap();
        let service = TradeFilterService::new(&language);
        let properties = ItemProperties {
            armor: Some(450),
            evasion: Some(0),
            chance_to_block: Some(0),
            ..Default::default()
        };

        let filters =
            service.get_property_filters(&item(Category::Armour, Rarity::Rare, properties));

        assert_eq!(filters.armour.len(), 1);
        let armour = &filters.armour[0];
        assert_eq!(armour.filter_type, PropertyFilterType::ArmourArmour);
        assert_eq!(armour.text, "Armour");
        assert_eq!(armour.value, FilterValue::Number(450.0));
        assert_eq!(armour.delta, 1.0);
        assert!(!armour.enabled);
        assert!(filters.weapon.is_empty() && filters.map.is_empty() && filters.misc.is_empty());
    }

    #[test]
    fn test_missing_label_suppresses_filter() {
        let mut language = embedded::language("en").unwrap();
        language.description_armour = None;
        let service = TradeFilterService::new(&language);
        let properties = ItemProperties {
            armor: Some(450),
            evasion: Some(300),
            ..Default::default()
        };

        let filters =
            service.get_property_filters(&item(Category::Armour, Rarity::Rare, properties));
        let types: Vec<_> = filters.armour.iter().map(|f| f.filter_type).collect();
        assert_eq!(types, vec![PropertyFilterType::ArmourEvasion]);

        let resources = FilterResources {
            physical_dps: None,
            ..FilterResources::default()
        };
        let service = TradeFilterService::without_language(resources);
        let properties = ItemProperties {
            physical_dps: Some(225.0),
            damage_per_second: Some(225.0),
            attacks_per_second: Some(1.5),
            ..Default::default()
        };
        let filters =
            service.get_property_filters(&item(Category::Weapon, Rarity::Rare, properties));
        let types: Vec<_> = filters.weapon.iter().map(|f| f.filter_type).collect();
        assert_eq!(types, vec![PropertyFilterType::WeaponDps]);
    }

    #[test]
    fn test_map_tier_and_area_level_always_enabled() {
        let language = embedded::language("en").unwrap();
        let service = TradeFilterService::new(&language);
        let properties = ItemProperties {
            map_tier: Some(14),
            area_level: Some(81),
            item_quantity: Some(80),
            blighted: true,
            item_level: Some(83),
            ..Default::default()
        };

        for rarity in [Rarity::Normal, Rarity::Rare, Rarity::Unique] {
            let filters =
                service.get_property_filters(&item(Category::Map, rarity, properties.clone()));
            assert!(find(&filters, PropertyFilterType::MapTier).unwrap().enabled);
            assert!(find(&filters, PropertyFilterType::MapAreaLevel).unwrap().enabled);
            assert!(!find(&filters, PropertyFilterType::MapItemQuantity).unwrap().enabled);
            assert!(find(&filters, PropertyFilterType::MapBlighted).unwrap().enabled);
            assert!(!find(&filters, PropertyFilterType::MiscItemLevel).unwrap().enabled);
        }
    }

    #[test]
    fn test_item_level_gating() {
        let language = embedded::language("en").unwrap();
        let service = TradeFilterService::new(&language);
        let base = ItemProperties {
            item_level: Some(85),
            ..Default::default()
        };
        let item_level = |rarity: Rarity, properties: ItemProperties| {
            let filters = service.get_property_filters(&item(Category::Armour, rarity, properties));
            find(&filters, PropertyFilterType::MiscItemLevel).unwrap().enabled
        };

        assert!(item_level(Rarity::Rare, base.clone()));
        assert!(!item_level(Rarity::Unique, base.clone()));
        assert!(!item_level(Rarity::Rare, ItemProperties { map_tier: Some(5), ..base.clone() }));
        assert!(!item_level(Rarity::Rare, ItemProperties { item_level: Some(79), ..base }));
    }

    #[test]
    fn test_quality_enabled_only_for_gems() {
        let language = embedded::language("en").unwrap();
        let service = TradeFilterService::new(&language);
        let properties = ItemProperties {
            quality: Some(20),
            gem_level: Some(20),
            ..Default::default()
        };

        let gem =
            service.get_property_filters(&item(Category::Gem, Rarity::Gem, properties.clone()));
        assert!(find(&gem, PropertyFilterType::MiscQuality).unwrap().enabled);
        assert!(find(&gem, PropertyFilterType::MiscGemLevel).unwrap().enabled);

        let armour =
            service.get_property_filters(&item(Category::Armour, Rarity::Rare, properties));
        assert!(!find(&armour, PropertyFilterType::MiscQuality).unwrap().enabled);
    }

    #[test]
    fn test_weapon_damage_filters() {
        let language = embedded::language("en").unwrap();
        let service = TradeFilterService::new(&language);
        let mut properties = ItemProperties {
            physical_damage: Some(DamageRange::new(100.0, 200.0)),
            elemental_damages: vec![DamageRange::new(10.0, 20.0), DamageRange::new(5.0, 15.0)],
            attacks_per_second: Some(1.5),
            critical_strike_chance: Some(5.0),
            ..Default::default()
        };
        properties.compute_dps();

        let filters =
            service.get_property_filters(&item(Category::Weapon, Rarity::Rare, properties));

        let elemental = find(&filters, PropertyFilterType::WeaponElementalDamage).unwrap();
        assert_eq!(elemental.min, Some(15.0));
        assert_eq!(elemental.max, Some(35.0));
        assert!(!elemental.enabled);

        let aps = find(&filters, PropertyFilterType::WeaponAttacksPerSecond).unwrap();
        assert_eq!(aps.delta, 0.1);

        let dps = find(&filters, PropertyFilterType::WeaponDps).unwrap();
        assert_eq!(dps.text, "Total DPS");
        assert!(filters.weapon.iter().all(|filter| !filter.enabled));
        assert_eq!(filters.weapon.len(), 7);
    }

    #[test]
    fn test_empty_elemental_damage_is_skipped() {
        let language = embedded::language("en").unwrap();
        let service = TradeFilterService::new(&language);
        let properties = ItemProperties {
            elemental_damages: vec![DamageRange::default()],
            ..Default::default()
        };

        let filters =
            service.get_property_filters(&item(Category::Weapon, Rarity::Rare, properties));
        assert!(filters.weapon.is_empty());
    }

    #[test]
    fn test_boolean_filters_only_when_true() {
        let language = embedded::language("en").unwrap();
        let service = TradeFilterService::new(&language);
        let mut armour = item(Category::Armour, Rarity::Rare, ItemProperties::default());
        armour.influences.shaper = true;

        let filters = service.get_property_filters(&armour);
        let types: Vec<_> = filters.misc.iter().map(|f| f.filter_type).collect();
        assert_eq!(types, vec![PropertyFilterType::MiscShaper]);
        assert!(filters.misc[0].enabled);
        assert_eq!(filters.misc[0].text, "Shaper Item");
    }

    #[test]
    fn test_parsed_currency_has_no_filters() {
        let store = PatternStore::embedded().unwrap();
        let item = ItemParser::new(&store)
            .parse_item(
                "Item Class: Stackable Currency\nRarity: Currency\nSplinter of Tul\n\
                 --------\nStack Size: 37/100\n",
            )
            .unwrap();

        assert_eq!(item.metadata.category, Category::Currency);
        assert_eq!(item.metadata.rarity, Rarity::Currency);
        assert_eq!(item.metadata.base_type, "Splinter of Tul");
        assert!(item.modifier_lines.is_empty());

        let service = TradeFilterService::new(store.language());
        assert!(service.get_modifier_filters(&item).is_empty());
        assert!(service.get_pseudo_modifier_filters(&item).is_empty());
        assert!(service.get_property_filters(&item).is_empty());
    }

    #[test]
    fn test_parsed_rare_armour_has_one_armour_filter() {
        let store = PatternStore::embedded().unwrap();
        let item = ItemParser::new(&store)
            .parse_item(
                "Item Class: Body Armours\nRarity: Rare\nDoom Shell\nAstral Plate\n\
                 --------\nArmour: 450\n--------\nRequirements:\nLevel: 62\n",
            )
            .unwrap();

        let filters = TradeFilterService::new(store.language()).get_property_filters(&item);
        assert_eq!(filters.armour.len(), 1);
        assert_eq!(filters.armour[0].filter_type, PropertyFilterType::ArmourArmour);
        assert!(!filters.armour[0].enabled);
        assert_eq!(filters.armour[0].delta, 1.0);
    }
}
