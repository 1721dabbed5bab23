//! Clipboard text to [`Item`].
//!
//! Parsing runs in stages over a shared, read-only [`PatternStore`]: the
//! [`Segmenter`] splits and classifies blocks, [`ItemMetadataParser`] resolves
//! category, rarity and type, and the property and modifier extractors fill in
//! the rest. Pseudo stats are summed last.

pub mod metadata;
pub mod modifiers;
pub mod properties;
pub mod segmenter;

use log::{debug, warn};

use crate::analyzer::PseudoModifierAggregator;
use crate::data::PatternStore;
use crate::errors::Result;
use crate::models::Item;

pub use metadata::ItemMetadataParser;
pub use modifiers::ModifierExtractor;
pub use properties::PropertyExtractor;
pub use segmenter::{BlockRole, ParsingBlock, ParsingHeader, ParsingItem, Segmenter};

pub struct ItemParser<'a> {
    store: &'a PatternStore,
}

impl<'a> ItemParser<'a> {
    pub fn new(store: &'a PatternStore) -> Self {
        Self { store }
    }

    /// Parse item text, failing only when the header cannot be isolated.
    pub fn try_parse_item(&self, text: &str) -> Result<Item> {
        let parsing = Segmenter::new(self.store).segment(text)?;

        let metadata_parser = ItemMetadataParser::new(self.store);
        let metadata = metadata_parser.identify(&parsing);
        debug!(
            "Identified {:?} {:?} item: {}",
            metadata.rarity, metadata.category, metadata.base_type
        );

        let property_extractor = PropertyExtractor::new(self.store);
        let (properties, mut unparsed_lines) = property_extractor.extract(&parsing, &metadata);
        let influences = property_extractor.influences(&parsing);

        let (modifier_lines, unparsed_modifiers) =
            ModifierExtractor::new(self.store).extract(&parsing);
        unparsed_lines.extend(unparsed_modifiers);

        let pseudo_modifiers =
            PseudoModifierAggregator::new(self.store).aggregate(metadata.category, &modifier_lines);

        let mut item = Item::new(metadata, parsing.text.clone());
        item.header = metadata_parser.header(&parsing);
        item.properties = properties;
        item.influences = influences;
        item.modifier_lines = modifier_lines;
        item.pseudo_modifiers = pseudo_modifiers;
        item.unparsed_lines = unparsed_lines;
        Ok(item)
    }

    /// Parse item text, logging and returning `None` for malformed input.
    pub fn parse_item(&self, text: &str) -> Option<Item> {
        match self.try_parse_item(text) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Could not parse item: {}", e);
                None
            }
        }
    }
}
