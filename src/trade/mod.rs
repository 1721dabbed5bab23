pub mod filter_service;
pub mod filters;
pub mod query;

pub use filter_service::TradeFilterService;
pub use filters::{
    FilterResources,
    FilterValue,
    ModifierFilter,
    PropertyFilter,
    PropertyFilterType,
    PropertyFilters,
    PseudoModifierFilter,
};
pub use query::{SearchRequest, TradeQueryBuilder, TradeStatus};
