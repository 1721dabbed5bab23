//! Compiled, read-only lookup tables shared by every parse call.
//!
//! A `PatternStore` is built once at startup and then only borrowed. It holds
//! no interior mutability, so a single instance can serve concurrent parses.

use std::collections::HashMap;
use log::{debug, info};
use regex::Regex;

use super::embedded;
use super::game_language::{GameLanguage, ItemClassDefinition};
use super::trade_data_loader::{determine_category, ItemsData, PseudoDefinitionData, StatsData};
use crate::errors::Result;
use crate::models::{Category, ModifierCategory};

const NUMBER_CAPTURE: &str = r"([-+]?\d+(?:[.,]\d+)?)";
const LOCAL_SUFFIX: &str = " (Local)";

#[derive(Debug, Clone)]
pub struct ModifierPattern {
    pub stat_id: String,
    pub category: ModifierCategory,
    /// Trade text, e.g. "+#% to Fire Resistance".
    pub text: String,
    /// Text as it appears on items: trade text without the "(Local)" marker.
    pub item_text: String,
    regex: Regex,
    specificity: usize,
}

impl ModifierPattern {
    pub fn compile(stat_id: &str, category: ModifierCategory, text: &str) -> Result<Self> {
        let item_text = text.strip_suffix(LOCAL_SUFFIX).unwrap_or(text);
        // A literal "+" before a placeholder is part of the number: rolls can be negative
        let segments: Vec<&str> = item_text.split('#').collect();
        let last = segments.len() - 1;
        let body = segments
            .iter()
            .enumerate()
            .map(|(index, segment)| match segment.strip_suffix('+') {
                Some(prefix) if index < last => regex::escape(prefix),
                _ => regex::escape(segment),
            })
            .collect::<Vec<_>>()
            .join(NUMBER_CAPTURE);

        Ok(Self {
            stat_id: stat_id.to_string(),
            category,
            text: text.to_string(),
            item_text: item_text.to_string(),
            regex: Regex::new(&format!("^{}$", body))?,
            specificity: item_text.chars().filter(|c| *c != '#').count(),
        })
    }

    /// Numeric values captured from the line, or `None` if the line does not match.
    pub fn captures(&self, line: &str) -> Option<Vec<f64>> {
        let captures = self.regex.captures(line)?;
        Some(
            captures
                .iter()
                .skip(1)
                .flatten()
                .filter_map(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseType {
    pub name: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniqueItem {
    pub name: String,
    pub base_type: String,
    pub category: Category,
}

#[derive(Debug, Clone)]
pub struct PseudoDefinition {
    pub stat_id: String,
    pub text: String,
    /// Stat hash to multiplier.
    pub sources: HashMap<String, f64>,
}

#[derive(Debug)]
pub struct PatternStore {
    language: GameLanguage,
    item_classes: HashMap<String, ItemClassDefinition>,
    // Longest names first so contained-name lookups prefer the most specific base
    base_types: Vec<BaseType>,
    base_index: HashMap<String, usize>,
    uniques: HashMap<String, UniqueItem>,
    // Most specific first
    modifiers: Vec<ModifierPattern>,
    modifiers_by_text: HashMap<String, Vec<usize>>,
    pseudo: Vec<PseudoDefinition>,
}

impl PatternStore {
    pub fn build(
        language: GameLanguage,
        items: &ItemsData,
        stats: &StatsData,
        pseudo: &[PseudoDefinitionData],
    ) -> Result<Self> {
        let item_classes = language
            .item_classes
            .iter()
            .map(|class| (class.text.clone(), class.clone()))
            .collect();

        let mut base_types = Vec::new();
        let mut uniques = HashMap::new();
        for group in &items.result {
            let category = determine_category(&group.id);
            for entry in &group.entries {
                match (&entry.name, entry.flags.unique) {
                    (Some(name), true) => {
                        uniques.insert(name.clone(), UniqueItem {
                            name: name.clone(),
                            base_type: entry.item_type.clone(),
                            category,
                        });
                    }
                    _ => base_types.push(BaseType {
                        name: entry.item_type.clone(),
                        category,
                    }),
                }
            }
        }
        base_types.sort_by(|a, b| {
            b.name.len().cmp(&a.name.len()).then_with(|| a.name.cmp(&b.name))
        });
        base_types.dedup_by(|a, b| a.name == b.name);
        let base_index = base_types
            .iter()
            .enumerate()
            .map(|(index, base)| (base.name.clone(), index))
            .collect();

        let mut modifiers = Vec::new();
        let mut pseudo_texts = HashMap::new();
        for group in &stats.result {
            let Some(category) = ModifierCategory::from_trade_id(&group.id) else {
                debug!("Skipping stat group {}", group.id);
                continue;
            };

            for entry in &group.entries {
                if category == ModifierCategory::Pseudo {
                    pseudo_texts.insert(entry.id.as_str(), entry.text.as_str());
                } else {
                    modifiers.push(ModifierPattern::compile(&entry.id, category, &entry.text)?);
                }
            }
        }
        // Stable sort keeps table order between equally specific patterns
        modifiers.sort_by(|a, b| b.specificity.cmp(&a.specificity));

        let mut modifiers_by_text: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, pattern) in modifiers.iter().enumerate() {
            modifiers_by_text.entry(pattern.item_text.clone()).or_default().push(index);
        }

        let pseudo = pseudo
            .iter()
            .filter_map(|definition| {
                let Some(text) = pseudo_texts.get(definition.id.as_str()) else {
                    debug!("No localized text for pseudo stat {}", definition.id);
                    return None;
                };
                Some(PseudoDefinition {
                    stat_id: definition.id.clone(),
                    text: text.to_string(),
                    sources: definition
                        .sources
                        .iter()
                        .map(|source| (source.hash.clone(), source.multiplier))
                        .collect(),
                })
            })
            .collect::<Vec<_>>();

        info!(
            "Pattern store ready for {}: {} classes, {} bases, {} uniques, \
             {} modifier patterns, {} pseudo stats",
            language.language_code,
            language.item_classes.len(),
            base_types.len(),
            uniques.len(),
            modifiers.len(),
            pseudo.len()
        );

        Ok(Self {
            language,
            item_classes,
            base_types,
            base_index,
            uniques,
            modifiers,
            modifiers_by_text,
            pseudo,
        })
    }

    /// English store built from the tables compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::embedded_for("en")
    }

    pub fn embedded_for(code: &str) -> Result<Self> {
        Self::build(
            embedded::language(code)?,
            &embedded::items(code)?,
            &embedded::stats(code)?,
            &embedded::pseudo_definitions()?,
        )
    }

    pub fn language(&self) -> &GameLanguage {
        &self.language
    }

    pub fn item_class(&self, text: &str) -> Option<&ItemClassDefinition> {
        self.item_classes.get(text.trim())
    }

    pub fn unique(&self, name: &str) -> Option<&UniqueItem> {
        self.uniques.get(name)
    }

    pub fn base_type(&self, name: &str) -> Option<&BaseType> {
        self.base_index.get(name).map(|index| &self.base_types[*index])
    }

    /// Longest known base type contained in `text`, e.g. the base of a magic item name.
    pub fn find_base_type_in(&self, text: &str) -> Option<&BaseType> {
        self.base_types.iter().find(|base| text.contains(base.name.as_str()))
    }

    /// Match a modifier line against the pattern table.
    ///
    /// The most specific matching text wins. Among stats sharing that text, the one
    /// whose category equals `origin` is preferred, otherwise the first in table order.
    pub fn match_modifier(
        &self,
        text: &str,
        origin: ModifierCategory,
    ) -> Option<(&ModifierPattern, Vec<f64>)> {
        let (matched, values) = self
            .modifiers
            .iter()
            .find_map(|pattern| pattern.captures(text).map(|values| (pattern, values)))?;

        let pattern = self
            .modifiers_by_text
            .get(&matched.item_text)
            .and_then(|indices| {
                indices
                    .iter()
                    .map(|index| &self.modifiers[*index])
                    .find(|pattern| pattern.category == origin)
            })
            .unwrap_or(matched);

        Some((pattern, values))
    }

    pub fn is_modifier_text(&self, text: &str) -> bool {
        self.modifiers.iter().any(|pattern| pattern.captures(text).is_some())
    }

    pub fn pseudo_definitions(&self) -> &[PseudoDefinition] {
        &self.pseudo
    }
}
