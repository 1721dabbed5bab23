use std::collections::HashMap;
use log::debug;

use crate::data::PatternStore;
use crate::models::{Category, ModifierLine, PseudoModifier};

#[derive(Debug, Default)]
struct PseudoTotal {
    value: f64,
    contributors: Vec<usize>,
}

/// Sums modifier lines into the pseudo stats defined by the pattern store.
pub struct PseudoModifierAggregator<'a> {
    store: &'a PatternStore,
}

impl<'a> PseudoModifierAggregator<'a> {
    pub fn new(store: &'a PatternStore) -> Self {
        Self { store }
    }

    /// One `PseudoModifier` per pseudo stat with at least one contributing line,
    /// in the order the definitions are listed.
    pub fn aggregate(&self, category: Category, lines: &[ModifierLine]) -> Vec<PseudoModifier> {
        if !category.has_pseudo_filters() {
            return Vec::new();
        }

        let definitions = self.store.pseudo_definitions();
        let mut totals: HashMap<&str, PseudoTotal> = HashMap::new();

        for (index, line) in lines.iter().enumerate() {
            let Some(value) = line.aggregate_value() else {
                continue;
            };

            for definition in definitions {
                if let Some(multiplier) = definition.sources.get(line.stat_hash()) {
                    let total = totals
                        .entry(definition.stat_id.as_str())
                        .or_insert_with(PseudoTotal::default);
                    total.value += value * multiplier;
                    total.contributors.push(index);
                }
            }
        }

        definitions
            .iter()
            .filter_map(|definition| {
                let total = totals.remove(definition.stat_id.as_str())?;
                debug!("{} = {} from {:?}", definition.stat_id, total.value, total.contributors);
                Some(PseudoModifier {
                    stat_id: definition.stat_id.clone(),
                    text: definition.text.clone(),
                    value: total.value,
                    contributors: total.contributors,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModifierCategory;

    fn line(stat_id: &str, category: ModifierCategory, values: Vec<f64>) -> ModifierLine {
        ModifierLine {
            text: String::new(),
            category,
            values,
            stat_id: stat_id.to_string(),
            pattern: String::new(),
        }
    }

    fn find<'p>(pseudo: &'p [PseudoModifier], stat_id: &str) -> Option<&'p PseudoModifier> {
        pseudo.iter().find(|p| p.stat_id == stat_id)
    }

    #[test]
    fn test_resistances_combine_across_origins() {
        let store = PatternStore::embedded().unwrap();
        let lines = vec![
            line("implicit.stat_2901986750", ModifierCategory::Implicit, vec![12.0]),
            line("explicit.stat_3372524247", ModifierCategory::Explicit, vec![40.0]),
            line("crafted.stat_4220027924", ModifierCategory::Crafted, vec![15.0]),
        ];

        let pseudo = PseudoModifierAggregator::new(&store).aggregate(Category::Armour, &lines);

        let elemental = find(&pseudo, "pseudo.pseudo_total_elemental_resistance").unwrap();
        assert_eq!(elemental.value, 12.0 * 3.0 + 40.0 + 15.0);
        assert_eq!(elemental.contributors, vec![0, 1, 2]);

        let fire = find(&pseudo, "pseudo.pseudo_total_fire_resistance").unwrap();
        assert_eq!(fire.value, 52.0);
        assert_eq!(fire.contributors, vec![0, 1]);

        assert!(find(&pseudo, "pseudo.pseudo_total_chaos_resistance").is_none());
    }

    #[test]
    fn test_multipliers_and_definition_order() {
        let store = PatternStore::embedded().unwrap();
        let lines = vec![
            line("explicit.stat_4080418644", ModifierCategory::Explicit, vec![30.0]),
            line("explicit.stat_3299347043", ModifierCategory::Explicit, vec![90.0]),
        ];

        let pseudo = PseudoModifierAggregator::new(&store).aggregate(Category::Accessory, &lines);
        let ids: Vec<_> = pseudo.iter().map(|p| p.stat_id.as_str()).collect();
        assert_eq!(ids, vec!["pseudo.pseudo_total_life", "pseudo.pseudo_total_strength"]);
        assert_eq!(pseudo[0].value, 105.0);
        assert_eq!(pseudo[1].value, 30.0);
    }

    #[test]
    fn test_excluded_categories_produce_nothing() {
        let store = PatternStore::embedded().unwrap();
        let lines = vec![line("explicit.stat_3299347043", ModifierCategory::Explicit, vec![90.0])];
        let aggregator = PseudoModifierAggregator::new(&store);

        for category in [
            Category::Currency,
            Category::DivinationCard,
            Category::Gem,
            Category::ItemisedMonster,
            Category::Leaguestone,
            Category::Unknown,
        ] {
            assert!(aggregator.aggregate(category, &lines).is_empty());
        }
    }

    #[test]
    fn test_lines_without_values_are_skipped() {
        let store = PatternStore::embedded().unwrap();
        let lines = vec![line("explicit.stat_3299347043", ModifierCategory::Explicit, vec![])];
        let aggregator = PseudoModifierAggregator::new(&store);
        assert!(aggregator.aggregate(Category::Armour, &lines).is_empty());
    }
}
