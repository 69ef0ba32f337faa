//! ModifierSource - Trait and implementations for modifier providers

mod carried;
mod cyberware;
mod worn_armor;

pub use carried::CarriedItemSource;
pub use cyberware::CyberwareSource;
pub use worn_armor::WornArmorSource;

use crate::derive::ModifierAccumulator;
use crate::model::{Item, ItemData};

/// Trait for anything that contributes modifiers to a character derivation
pub trait ModifierSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// Suggested priorities:
    /// - Carried gear: -100
    /// - Worn armor: 0
    /// - Cyberware: 100
    ///
    /// Armor layers fold in application order, so worn armor must come
    /// before cyber-armor.
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's modifiers to the accumulator
    fn apply(&self, acc: &mut ModifierAccumulator);
}

/// One source per equipped item; unequipped items contribute nothing
pub fn item_sources(items: &[Item]) -> Vec<Box<dyn ModifierSource + '_>> {
    items
        .iter()
        .filter(|item| item.equipped)
        .map(|item| -> Box<dyn ModifierSource + '_> {
            match &item.data {
                ItemData::Armor(armor) => Box::new(WornArmorSource::new(item, armor)),
                ItemData::Cyberware(cw) => Box::new(CyberwareSource::new(item, cw)),
                _ => Box::new(CarriedItemSource::new(item)),
            }
        })
        .collect()
}
