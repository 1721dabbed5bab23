use serde::Serialize;

use super::modifiers::{origin_label, split_origin};
use crate::data::game_language::labeled_value;
use crate::data::PatternStore;
use crate::errors::{PricecheckError, Result};

/// Structural role of one separator-delimited block of item text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockRole {
    Header,
    Requirements,
    Properties,
    Modifiers,
    Flavor,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsingBlock {
    pub lines: Vec<String>,
    pub role: BlockRole,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsingHeader {
    pub item_class: Option<String>,
    pub rarity: Option<String>,
    /// First name line of rare and unique items.
    pub name: Option<String>,
    pub type_line: String,
}

/// Item text split into classified blocks. The first block is always the header.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsingItem {
    pub text: String,
    pub header: ParsingHeader,
    pub blocks: Vec<ParsingBlock>,
}

impl ParsingItem {
    /// Every block after the header.
    pub fn body(&self) -> impl Iterator<Item = &ParsingBlock> {
        self.blocks.iter().skip(1)
    }

    pub fn blocks_with_role(&self, role: BlockRole) -> impl Iterator<Item = &ParsingBlock> {
        self.body().filter(move |block| block.role == role)
    }
}

pub struct Segmenter<'a> {
    store: &'a PatternStore,
}

impl<'a> Segmenter<'a> {
    pub fn new(store: &'a PatternStore) -> Self {
        Self { store }
    }

    pub fn segment(&self, text: &str) -> Result<ParsingItem> {
        let mut raw_blocks = self.split_blocks(text);

        // Clipboard text normally ends with a newline after the last block
        if raw_blocks.last().is_some_and(|block| block.is_empty()) {
            raw_blocks.pop();
        }

        let mut raw_blocks = raw_blocks.into_iter();
        let header_lines = raw_blocks
            .next()
            .filter(|lines| !lines.is_empty())
            .ok_or_else(|| PricecheckError::MalformedInput("item text is empty".to_string()))?;
        let header = self.parse_header(&header_lines)?;

        let mut blocks = vec![ParsingBlock {
            lines: header_lines,
            role: BlockRole::Header,
        }];
        blocks.extend(raw_blocks.map(|lines| {
            let role = self.classify(&lines);
            ParsingBlock { lines, role }
        }));

        Ok(ParsingItem {
            text: text.to_string(),
            header,
            blocks,
        })
    }

    fn split_blocks(&self, text: &str) -> Vec<Vec<String>> {
        let separator = self.store.language().separator.as_str();
        let mut blocks = vec![Vec::new()];

        for line in text.lines().map(str::trim) {
            if line == separator {
                blocks.push(Vec::new());
            } else if !line.is_empty() {
                if let Some(block) = blocks.last_mut() {
                    block.push(line.to_string());
                }
            }
        }

        blocks
    }

    fn parse_header(&self, lines: &[String]) -> Result<ParsingHeader> {
        let language = self.store.language();
        let mut header = ParsingHeader::default();
        let mut names = Vec::new();

        for line in lines {
            if let Some(value) = labeled_value(line, language.header_item_class.as_deref()) {
                header.item_class = Some(value.to_string());
            } else if let Some(value) = labeled_value(line, language.header_rarity.as_deref()) {
                header.rarity = Some(value.to_string());
            } else {
                names.push(line.as_str());
            }
        }

        if header.rarity.is_none() {
            return Err(PricecheckError::MalformedInput("header has no rarity line".to_string()));
        }

        match names.as_slice() {
            [] => Err(PricecheckError::MalformedInput("header has no item name".to_string())),
            [type_line] => {
                header.type_line = type_line.to_string();
                Ok(header)
            }
            [name, type_line, ..] => {
                header.name = Some(name.to_string());
                header.type_line = type_line.to_string();
                Ok(header)
            }
        }
    }

    fn classify(&self, lines: &[String]) -> BlockRole {
        let language = self.store.language();

        let Some(first) = lines.first() else {
            return BlockRole::Unknown;
        };

        if labeled_value(first, language.description_requirements.as_deref()).is_some() {
            return BlockRole::Requirements;
        }

        let labels = language.property_labels();
        if lines
            .iter()
            .any(|line| labels.iter().any(|label| labeled_value(line, Some(label)).is_some()))
        {
            return BlockRole::Properties;
        }

        let is_modifier_block = lines.iter().any(|line| {
            if origin_label(language, line).is_some() {
                return true;
            }
            let (text, origin) = split_origin(language, line);
            origin.is_some() || self.store.is_modifier_text(text)
        });
        if is_modifier_block {
            return BlockRole::Modifiers;
        }

        BlockRole::Flavor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RARE_ARMOUR: &str = "Item Class: Body Armours
Rarity: Rare
Doom Shell
Astral Plate
--------
Armour: 450
--------
Requirements:
Level: 62
Str: 180
--------
Item Level: 86
--------
+12% to all Elemental Resistances (implicit)
--------
+90 to maximum Life
+40% to Fire Resistance
--------
Corrupted
";

    #[test]
    fn test_segment_blocks_and_roles() {
        let store = PatternStore::embedded().unwrap();
        let parsing = Segmenter::new(&store).segment(RARE_ARMOUR).unwrap();

        let roles: Vec<_> = parsing.blocks.iter().map(|b| b.role).collect();
        assert_eq!(roles, vec![
            BlockRole::Header,
            BlockRole::Properties,
            BlockRole::Requirements,
            BlockRole::Properties,
            BlockRole::Modifiers,
            BlockRole::Modifiers,
            BlockRole::Flavor,
        ]);

        assert_eq!(parsing.header.item_class.as_deref(), Some("Body Armours"));
        assert_eq!(parsing.header.rarity.as_deref(), Some("Rare"));
        assert_eq!(parsing.header.name.as_deref(), Some("Doom Shell"));
        assert_eq!(parsing.header.type_line, "Astral Plate");
    }

    #[test]
    fn test_empty_middle_block_is_kept() {
        let store = PatternStore::embedded().unwrap();
        let text = "Item Class: Stackable Currency\r\nRarity: Currency\r\nChaos Orb\r\n\
                    --------\r\n--------\r\nStack Size: 1/10\r\n";
        let parsing = Segmenter::new(&store).segment(text).unwrap();

        assert_eq!(parsing.blocks.len(), 3);
        assert_eq!(parsing.blocks[1].role, BlockRole::Unknown);
        assert!(parsing.blocks[1].lines.is_empty());
        assert_eq!(parsing.blocks[2].role, BlockRole::Properties);
    }

    #[test]
    fn test_trailing_separator_is_discarded() {
        let store = PatternStore::embedded().unwrap();
        let text = "Rarity: Currency\nChaos Orb\n--------\nStack Size: 1/10\n--------\n";
        let parsing = Segmenter::new(&store).segment(text).unwrap();
        assert_eq!(parsing.blocks.len(), 2);
    }

    #[test]
    fn test_malformed_input() {
        let store = PatternStore::embedded().unwrap();
        let segmenter = Segmenter::new(&store);

        assert!(matches!(segmenter.segment(""), Err(PricecheckError::MalformedInput(_))));
        assert!(matches!(segmenter.segment("   \n\n"), Err(PricecheckError::MalformedInput(_))));
        assert!(matches!(
            segmenter.segment("Item Class: Stackable Currency\nChaos Orb"),
            Err(PricecheckError::MalformedInput(_))
        ));
        assert!(matches!(
            segmenter.segment("Rarity: Currency\n--------\nStack Size: 1/10"),
            Err(PricecheckError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_flavor_text_is_not_modifiers() {
        let store = PatternStore::embedded().unwrap();
        let text = "Rarity: Currency
Chaos Orb
--------
Reforges a rare item with new random modifiers
--------
Right click this item then left click a rare item to apply it.
";
        let parsing = Segmenter::new(&store).segment(text).unwrap();
        assert_eq!(parsing.blocks_with_role(BlockRole::Flavor).count(), 2);
        assert_eq!(parsing.blocks_with_role(BlockRole::Modifiers).count(), 0);
    }
}
