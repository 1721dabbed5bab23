use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: f64,
    pub max: f64,
}

impl DamageRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn has_value(&self) -> bool {
        self.min != 0.0 || self.max != 0.0
    }

    pub fn average(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl Add for DamageRange {
    type Output = DamageRange;

    fn add(self, other: DamageRange) -> DamageRange {
        DamageRange {
            min: self.min + other.min,
            max: self.max + other.max,
        }
    }
}

impl Sum for DamageRange {
    fn sum<I: Iterator<Item = DamageRange>>(iter: I) -> Self {
        iter.fold(DamageRange::default(), |total, range| total + range)
    }
}

impl<'a> Sum<&'a DamageRange> for DamageRange {
    fn sum<I: Iterator<Item = &'a DamageRange>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Numeric and boolean properties read from the item text.
///
/// `None` means the item text did not mention the property. Chance to Block is
/// the one value the game prints as an explicit `0%`, which stays `Some(0)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemProperties {
    pub armor: Option<u32>,
    pub evasion: Option<u32>,
    pub energy_shield: Option<u32>,
    pub chance_to_block: Option<u32>,

    pub physical_damage: Option<DamageRange>,
    pub elemental_damages: Vec<DamageRange>,
    pub physical_dps: Option<f64>,
    pub elemental_dps: Option<f64>,
    pub damage_per_second: Option<f64>,
    pub attacks_per_second: Option<f64>,
    pub critical_strike_chance: Option<f64>,

    pub item_quantity: Option<u32>,
    pub item_rarity: Option<u32>,
    pub monster_pack_size: Option<u32>,
    pub blighted: bool,
    pub blight_ravaged: bool,
    pub map_tier: Option<u32>,
    pub area_level: Option<u32>,

    pub quality: Option<u32>,
    pub gem_level: Option<u32>,
    pub item_level: Option<u32>,
    pub corrupted: bool,
}

impl ItemProperties {
    pub fn total_elemental_damage(&self) -> DamageRange {
        self.elemental_damages.iter().sum()
    }

    /// Fill in the per-second figures from the damage ranges and attack speed.
    pub fn compute_dps(&mut self) {
        let Some(aps) = self.attacks_per_second else {
            return;
        };

        let physical = self
            .physical_damage
            .filter(DamageRange::has_value)
            .map(|range| round_hundredths(range.average() * aps));

        let elemental_total: f64 = self.elemental_damages.iter().map(DamageRange::average).sum();
        let elemental = (elemental_total > 0.0).then(|| round_hundredths(elemental_total * aps));

        self.physical_dps = physical;
        self.elemental_dps = elemental;
        self.damage_per_second = match (physical, elemental) {
            (None, None) => None,
            (p, e) => Some(round_hundredths(p.unwrap_or(0.0) + e.unwrap_or(0.0))),
        };
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Influences {
    pub crusader: bool,
    pub elder: bool,
    pub hunter: bool,
    pub redeemer: bool,
    pub shaper: bool,
    pub warlord: bool,
}
