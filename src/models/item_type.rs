use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Unknown,
    Accessory,
    Armour,
    Contract,
    Currency,
    DivinationCard,
    Flask,
    Gem,
    HeistEquipment,
    ItemisedMonster,
    Jewel,
    Leaguestone,
    Logbook,
    Map,
    Sanctum,
    Weapon,
}

impl Category {
    /// Whether affix-based trade searches make sense for this category.
    pub fn has_modifier_filters(&self) -> bool {
        match self {
            Category::DivinationCard
            | Category::Gem
            | Category::ItemisedMonster
            | Category::Leaguestone
            | Category::Unknown => false,
            Category::Accessory
            | Category::Armour
            | Category::Contract
            | Category::Currency
            | Category::Flask
            | Category::HeistEquipment
            | Category::Jewel
            | Category::Logbook
            | Category::Map
            | Category::Sanctum
            | Category::Weapon => true,
        }
    }

    /// Currency pseudo stats are never filterable, on top of the modifier exclusions.
    pub fn has_pseudo_filters(&self) -> bool {
        match self {
            Category::Currency => false,
            other => other.has_modifier_filters(),
        }
    }

    pub fn has_property_filters(&self) -> bool {
        match self {
            Category::DivinationCard
            | Category::Currency
            | Category::ItemisedMonster
            | Category::Leaguestone
            | Category::Unknown => false,
            Category::Accessory
            | Category::Armour
            | Category::Contract
            | Category::Flask
            | Category::Gem
            | Category::HeistEquipment
            | Category::Jewel
            | Category::Logbook
            | Category::Map
            | Category::Sanctum
            | Category::Weapon => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Unknown,
    Normal,
    Magic,
    Rare,
    Unique,
    Currency,
    Gem,
    DivinationCard,
}

impl Rarity {
    /// Rare and unique items print their name above the base type in the header.
    pub fn has_name_line(&self) -> bool {
        matches!(self, Rarity::Rare | Rarity::Unique)
    }

    /// Option value the trade search uses for this rarity.
    pub fn trade_option(&self) -> Option<&'static str> {
        match self {
            Rarity::Normal => Some("normal"),
            Rarity::Magic => Some("magic"),
            Rarity::Rare => Some("rare"),
            Rarity::Unique => Some("unique"),
            Rarity::Unknown | Rarity::Currency | Rarity::Gem | Rarity::DivinationCard => None,
        }
    }
}

/// Raw header facts kept next to the resolved metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemHeader {
    /// Verbatim "Item Class" value, e.g. "Stackable Currency".
    pub item_class: Option<String>,
    /// Trade category id for the class, e.g. "currency" or "armour.chest".
    pub item_category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub category: Category,
    pub rarity: Rarity,
    pub base_type: String,
    pub name: Option<String>,
}

impl ItemMetadata {
    pub fn new(category: Category, base_type: String, rarity: Rarity) -> Self {
        Self {
            category,
            rarity,
            base_type,
            name: None,
        }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }
}
