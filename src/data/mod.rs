pub mod embedded;
pub mod game_language;
pub mod pattern_store;
pub mod trade_data_loader;

pub use game_language::{GameLanguage, ItemClassDefinition};

pub use pattern_store::{
    BaseType,
    ModifierPattern,
    PatternStore,
    PseudoDefinition,
    UniqueItem,
};

pub use trade_data_loader::{
    initialize_pattern_store,
    load_language,
    TradeDataLoader,
};
