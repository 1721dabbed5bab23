use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::segmenter::{BlockRole, ParsingItem};
use crate::data::{GameLanguage, PatternStore};
use crate::models::{ModifierCategory, ModifierLine};

// Roll ranges printed by the advanced item copy, e.g. "+40(36-41)% to Fire Resistance"
static ROLL_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([-+]?\d+(?:\.\d+)?-[-+]?\d+(?:\.\d+)?\)").expect("valid roll range pattern")
});

/// Split an origin suffix such as "(implicit)" off a modifier line.
pub fn split_origin<'l>(
    language: &GameLanguage,
    line: &'l str,
) -> (&'l str, Option<ModifierCategory>) {
    for (suffix, category) in language.modifier_suffixes() {
        if let Some(text) = line.strip_suffix(suffix) {
            return (text.trim_end(), Some(category));
        }
    }
    (line, None)
}

/// Origin set by a label line: an advanced-copy `{ ... }` header or a bare word like "Enchant".
pub fn origin_label(language: &GameLanguage, line: &str) -> Option<ModifierCategory> {
    let words: Vec<(String, ModifierCategory)> = language
        .modifier_suffixes()
        .into_iter()
        .map(|(suffix, category)| {
            let word = suffix.trim_matches(|c| c == '(' || c == ')').to_lowercase();
            (word, category)
        })
        .collect();

    if let Some(inner) = line.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
        let inner = inner.to_lowercase();
        let category = words
            .iter()
            .find(|(word, _)| inner.contains(word.as_str()))
            .map_or(ModifierCategory::Explicit, |(_, category)| *category);
        return Some(category);
    }

    let line = line.trim().to_lowercase();
    words
        .into_iter()
        .find(|(word, _)| *word == line)
        .map(|(_, category)| category)
}

pub struct ModifierExtractor<'a> {
    store: &'a PatternStore,
}

impl<'a> ModifierExtractor<'a> {
    pub fn new(store: &'a PatternStore) -> Self {
        Self { store }
    }

    /// Parsed modifier lines in item order, plus the lines no pattern recognised.
    pub fn extract(&self, parsing: &ParsingItem) -> (Vec<ModifierLine>, Vec<String>) {
        let language = self.store.language();
        let mut modifier_lines = Vec::new();
        let mut unparsed = Vec::new();

        for block in parsing.blocks_with_role(BlockRole::Modifiers) {
            // A label line changes the origin of every following line in the block
            let mut block_origin = ModifierCategory::Explicit;

            for line in &block.lines {
                if let Some(origin) = origin_label(language, line) {
                    block_origin = origin;
                    continue;
                }

                let (text, suffix_origin) = split_origin(language, line);
                let text = ROLL_RANGE.replace_all(text, "");
                let origin = suffix_origin.unwrap_or(block_origin);

                match self.store.match_modifier(&text, origin) {
                    Some((pattern, values)) => modifier_lines.push(ModifierLine {
                        text: text.into_owned(),
                        category: origin,
                        values,
                        stat_id: pattern.stat_id.clone(),
                        pattern: pattern.text.clone(),
                    }),
                    None => {
                        debug!("Unrecognized modifier line: {}", line);
                        unparsed.push(line.clone());
                    }
                }
            }
        }

        (modifier_lines, unparsed)
    }
}
