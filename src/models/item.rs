use serde::{Deserialize, Serialize};
use super::item_type::{ItemHeader, ItemMetadata, Rarity};
use super::modifier::{ModifierLine, PseudoModifier};
use super::properties::{Influences, ItemProperties};

/// A fully parsed item. Built once per clipboard capture and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub metadata: ItemMetadata,
    pub header: ItemHeader,
    pub properties: ItemProperties,
    pub influences: Influences,
    pub modifier_lines: Vec<ModifierLine>,
    pub pseudo_modifiers: Vec<PseudoModifier>,
    /// Lines that looked like properties or modifiers but matched no pattern.
    pub unparsed_lines: Vec<String>,
    pub text: String,
}

impl Item {
    pub fn new(metadata: ItemMetadata, text: String) -> Self {
        Self {
            metadata,
            header: ItemHeader::default(),
            properties: ItemProperties::default(),
            influences: Influences::default(),
            modifier_lines: Vec::new(),
            pseudo_modifiers: Vec::new(),
            unparsed_lines: Vec::new(),
            text,
        }
    }

    pub fn is_unique(&self) -> bool {
        self.metadata.rarity == Rarity::Unique
    }

    pub fn pseudo_contributors(&self, pseudo: &PseudoModifier) -> Vec<&ModifierLine> {
        pseudo
            .contributors
            .iter()
            .filter_map(|index| self.modifier_lines.get(*index))
            .collect()
    }
}
