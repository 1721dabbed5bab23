pub mod item;
pub mod item_type;
pub mod modifier;
pub mod properties;

pub use item::Item;

pub use item_type::{
    Category,
    ItemHeader,
    ItemMetadata,
    Rarity,
};

pub use modifier::{
    ModifierCategory,
    ModifierLine,
    PseudoModifier,
};

pub use properties::{
    DamageRange,
    Influences,
    ItemProperties,
};
