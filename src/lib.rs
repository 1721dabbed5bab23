pub mod analyzer;
pub mod config;
pub mod data;
pub mod errors;
pub mod models;
pub mod parser;
pub mod trade;

pub use config::Config;
pub use data::{initialize_pattern_store, PatternStore};
pub use errors::{PricecheckError, Result};
pub use models::Item;
pub use parser::ItemParser;
pub use trade::{TradeFilterService, TradeQueryBuilder};
