mod pseudo;

pub use pseudo::PseudoModifierAggregator;
