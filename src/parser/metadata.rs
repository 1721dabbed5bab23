use log::{debug, warn};

use super::segmenter::ParsingItem;
use crate::data::PatternStore;
use crate::models::{Category, ItemHeader, ItemMetadata, Rarity};

/// Resolves category, rarity, base type and name from header text.
pub struct ItemMetadataParser<'a> {
    store: &'a PatternStore,
}

impl<'a> ItemMetadataParser<'a> {
    pub fn new(store: &'a PatternStore) -> Self {
        Self { store }
    }

    pub fn identify(&self, parsing: &ParsingItem) -> ItemMetadata {
        let header = &parsing.header;
        let category = self.category(header.item_class.as_deref());
        let rarity = header
            .rarity
            .as_deref()
            .map_or(Rarity::Unknown, |text| self.store.language().rarity_from_text(text));

        let name = header.name.as_deref().filter(|_| rarity.has_name_line());
        self.resolve(category, rarity, name, &header.type_line)
    }

    /// Identify an item from a bare name and its item class text.
    ///
    /// Without a rarity line the rarity is inferred: known uniques are Unique,
    /// currency, gems and cards get their own rarity, anything else is Normal.
    pub fn identify_names(&self, name: &str, item_class: &str) -> ItemMetadata {
        let category = self.category(Some(item_class));

        let rarity = if self.store.unique(name).is_some() {
            Rarity::Unique
        } else {
            match category {
                Category::Currency => Rarity::Currency,
                Category::Gem => Rarity::Gem,
                Category::DivinationCard => Rarity::DivinationCard,
                _ => Rarity::Normal,
            }
        };

        let unique_name = (rarity == Rarity::Unique).then_some(name);
        self.resolve(category, rarity, unique_name, name)
    }

    pub fn header(&self, parsing: &ParsingItem) -> ItemHeader {
        let item_class = parsing.header.item_class.clone();
        let item_category = item_class
            .as_deref()
            .and_then(|class| self.store.item_class(class))
            .and_then(|class| class.trade_category.clone());

        ItemHeader {
            item_class,
            item_category,
        }
    }

    fn category(&self, item_class: Option<&str>) -> Category {
        let Some(item_class) = item_class else {
            warn!("Item has no item class line");
            return Category::Unknown;
        };

        match self.store.item_class(item_class) {
            Some(class) => class.category,
            None => {
                warn!("Unknown item class: {}", item_class);
                Category::Unknown
            }
        }
    }

    fn resolve(
        &self,
        category: Category,
        rarity: Rarity,
        name: Option<&str>,
        type_line: &str,
    ) -> ItemMetadata {
        if let Some(unique) = name.and_then(|name| self.store.unique(name)) {
            return ItemMetadata::new(category, unique.base_type.clone(), rarity)
                .with_name(unique.name.clone());
        }

        let base_type = self.resolve_base_type(type_line);
        let metadata = ItemMetadata::new(category, base_type, rarity);
        match name {
            Some(name) => metadata.with_name(name.to_string()),
            None => metadata,
        }
    }

    fn resolve_base_type(&self, type_line: &str) -> String {
        let stripped = self.strip_affixes(type_line);

        if let Some(base) = self.store.base_type(stripped) {
            return base.name.clone();
        }

        // Magic items wrap the base in a prefix and suffix
        if let Some(base) = self.store.find_base_type_in(stripped) {
            return base.name.clone();
        }

        debug!("No base type matches {}", type_line);
        type_line.to_string()
    }

    fn strip_affixes<'t>(&self, type_line: &'t str) -> &'t str {
        let language = self.store.language();
        [
            &language.affix_superior,
            &language.affix_blight_ravaged,
            &language.affix_blighted,
        ]
        .into_iter()
        .filter_map(|affix| affix.as_deref())
        .fold(type_line, |text, affix| {
            text.strip_prefix(affix).map_or(text, str::trim_start)
        })
    }
}
