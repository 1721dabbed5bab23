//! Trade search request bodies built from the selected filters.
//!
//! Only enabled filters are sent. Property filters are grouped under the same
//! filter groups the trade site uses (`armour_filters`, `weapon_filters`, ...).

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::filters::{
    FilterValue, ModifierFilter, PropertyFilter, PropertyFilters, PseudoModifierFilter,
};
use crate::models::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    #[default]
    Online,
    OnlineLeague,
    Any,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Online => "online",
            TradeStatus::OnlineLeague => "onlineleague",
            TradeStatus::Any => "any",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub query: TradeQuery,
    pub sort: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct TradeQuery {
    pub status: OptionFilter,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub stats: Vec<StatFilter>,
    pub filters: QueryFilters,
}

#[derive(Debug, Default, Serialize)]
pub struct QueryFilters {
    #[serde(skip_serializing_if = "FilterGroup::is_empty")]
    pub type_filters: FilterGroup,
    #[serde(skip_serializing_if = "FilterGroup::is_empty")]
    pub armour_filters: FilterGroup,
    #[serde(skip_serializing_if = "FilterGroup::is_empty")]
    pub weapon_filters: FilterGroup,
    #[serde(skip_serializing_if = "FilterGroup::is_empty")]
    pub map_filters: FilterGroup,
    #[serde(skip_serializing_if = "FilterGroup::is_empty")]
    pub misc_filters: FilterGroup,
}

#[derive(Debug, Default, Serialize)]
pub struct FilterGroup {
    pub filters: BTreeMap<&'static str, FilterOption>,
}

impl FilterGroup {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterOption {
    Choice(OptionFilter),
    Range(StatValue),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionFilter {
    pub option: String,
}

impl OptionFilter {
    pub fn new(option: impl Into<String>) -> Self {
        Self { option: option.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct StatFilter {
    pub r#type: String,
    pub filters: Vec<StatFilterValue>,
    pub disabled: bool,
}

#[derive(Debug, Serialize)]
pub struct StatFilterValue {
    pub id: String,
    pub value: Option<StatValue>,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

pub struct TradeQueryBuilder {
    status: TradeStatus,
}

impl TradeQueryBuilder {
    pub fn new(status: TradeStatus) -> Self {
        Self { status }
    }

    pub fn build(
        &self,
        item: &Item,
        modifier_filters: &[ModifierFilter<'_>],
        pseudo_filters: &[PseudoModifierFilter<'_>],
        property_filters: &PropertyFilters,
    ) -> SearchRequest {
        let metadata = &item.metadata;

        let mut filters = QueryFilters::default();
        if property_filters.class_filter_applied {
            if let Some(category) = &item.header.item_category {
                filters
                    .type_filters
                    .filters
                    .insert("category", FilterOption::Choice(OptionFilter::new(category.as_str())));
            }
        }
        if property_filters.rarity_filter_applied {
            if let Some(rarity) = metadata.rarity.trade_option() {
                filters
                    .type_filters
                    .filters
                    .insert("rarity", FilterOption::Choice(OptionFilter::new(rarity)));
            }
        }

        Self::add_properties(&mut filters.armour_filters, &property_filters.armour);
        Self::add_properties(&mut filters.weapon_filters, &property_filters.weapon);
        Self::add_properties(&mut filters.map_filters, &property_filters.map);
        Self::add_properties(&mut filters.misc_filters, &property_filters.misc);

        let stat_values: Vec<StatFilterValue> = modifier_filters
            .iter()
            .filter(|filter| filter.enabled)
            .map(|filter| Self::stat_value(&filter.line.stat_id, filter.min, filter.max))
            .chain(
                pseudo_filters
                    .iter()
                    .filter(|filter| filter.enabled)
                    .map(|filter| Self::stat_value(&filter.pseudo.stat_id, filter.min, filter.max)),
            )
            .collect();

        let base_type = property_filters
            .base_type_filter_applied
            .then(|| metadata.base_type.clone());

        SearchRequest {
            query: TradeQuery {
                status: OptionFilter::new(self.status.as_str()),
                base_type,
                name: item.is_unique().then(|| metadata.name.clone()).flatten(),
                stats: vec![StatFilter {
                    r#type: "and".to_string(),
                    filters: stat_values,
                    disabled: false,
                }],
                filters,
            },
            sort: BTreeMap::from([("price".to_string(), "asc".to_string())]),
        }
    }

    fn stat_value(id: &str, min: Option<f64>, max: Option<f64>) -> StatFilterValue {
        let value = (min.is_some() || max.is_some()).then_some(StatValue { min, max });
        StatFilterValue {
            id: id.to_string(),
            value,
            disabled: false,
        }
    }

    fn add_properties(group: &mut FilterGroup, properties: &[PropertyFilter]) {
        for property in properties.iter().filter(|property| property.enabled) {
            let Some(key) = property.filter_type.trade_key() else {
                continue;
            };

            let option = match property.value {
                FilterValue::Boolean(value) => {
                    FilterOption::Choice(OptionFilter::new(value.to_string()))
                }
                FilterValue::Number(_) | FilterValue::Range(_) => FilterOption::Range(StatValue {
                    min: property.min,
                    max: property.max,
                }),
            };
            group.filters.insert(key, option);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PatternStore;
    use crate::parser::ItemParser;
    use crate::trade::TradeFilterService;

    const KAOMS_HEART: &str = "Item Class: Body Armours
Rarity: Unique
Kaom's Heart
Glorious Plate
--------
Armour: 800
--------
Item Level: 86
--------
+500 to maximum Life
+40% to Fire Resistance
--------
Corrupted
";

    #[test]
    fn test_trade_status_as_str() {
        assert_eq!(TradeStatus::Online.as_str(), "online");
        assert_eq!(TradeStatus::OnlineLeague.as_str(), "onlineleague");
        assert_eq!(TradeStatus::default(), TradeStatus::Online);
    }

    #[test]
    fn test_build_default_selection() {
        let store = PatternStore::embedded().unwrap();
        let item = ItemParser::new(&store).parse_item(KAOMS_HEART).unwrap();
        let service = TradeFilterService::new(store.language());

        let modifiers = service.get_modifier_filters(&item);
        let pseudo = service.get_pseudo_modifier_filters(&item);
        let properties = service.get_property_filters(&item);

        let builder = TradeQueryBuilder::new(TradeStatus::Online);
        let request = builder.build(&item, &modifiers, &pseudo, &properties);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["query"]["status"]["option"], "online");
        assert_eq!(json["query"]["type"], "Glorious Plate");
        assert_eq!(json["query"]["name"], "Kaom's Heart");
        assert_eq!(json["query"]["stats"][0]["type"], "and");
        assert_eq!(json["query"]["stats"][0]["filters"].as_array().unwrap().len(), 0);
        let misc = &json["query"]["filters"]["misc_filters"]["filters"];
        assert_eq!(misc["corrupted"]["option"], "true");
        assert!(json["query"]["filters"].get("armour_filters").is_none());
        assert!(json["query"]["filters"].get("type_filters").is_none());
        assert_eq!(json["sort"]["price"], "asc");
    }

    #[test]
    fn test_build_with_selected_filters() {
        let store = PatternStore::embedded().unwrap();
        let item = ItemParser::new(&store).parse_item(KAOMS_HEART).unwrap();
        let service = TradeFilterService::new(store.language());

        let mut modifiers = service.get_modifier_filters(&item);
        modifiers[0].enabled = true;
        let mut pseudo = service.get_pseudo_modifier_filters(&item);
        for filter in pseudo.iter_mut() {
            filter.enabled = filter.pseudo.stat_id == "pseudo.pseudo_total_fire_resistance";
        }
        let mut properties = service.get_property_filters(&item);
        properties.armour[0].enabled = true;
        properties.base_type_filter_applied = false;
        properties.class_filter_applied = true;
        properties.rarity_filter_applied = true;

        let request =
            TradeQueryBuilder::new(TradeStatus::Any).build(&item, &modifiers, &pseudo, &properties);
        let json = serde_json::to_value(&request).unwrap();
        let query = &json["query"];

        assert_eq!(query["status"]["option"], "any");
        assert!(query.get("type").is_none());

        let stats = query["stats"][0]["filters"].as_array().unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0]["id"], "explicit.stat_3299347043");
        assert_eq!(stats[0]["value"]["min"], 500.0);
        assert_eq!(stats[1]["id"], "pseudo.pseudo_total_fire_resistance");
        assert_eq!(stats[1]["value"]["min"], 40.0);

        let type_filters = &query["filters"]["type_filters"]["filters"];
        assert_eq!(type_filters["category"]["option"], "armour.chest");
        assert_eq!(type_filters["rarity"]["option"], "unique");
        assert_eq!(query["filters"]["armour_filters"]["filters"]["ar"]["min"], 800.0);
        assert!(query["filters"]["armour_filters"]["filters"]["ar"].get("max").is_none());
    }
}
