//! WornArmorSource - Stopping power and encumbrance from worn armor

use crate::derive::ModifierAccumulator;
use crate::model::{ArmorData, Item};
use crate::source::ModifierSource;

/// An equipped armor item
pub struct WornArmorSource<'a> {
    item: &'a Item,
    armor: &'a ArmorData,
}

impl<'a> WornArmorSource<'a> {
    pub fn new(item: &'a Item, armor: &'a ArmorData) -> Self {
        WornArmorSource { item, armor }
    }
}

impl ModifierSource for WornArmorSource<'_> {
    fn id(&self) -> &str {
        self.item.id.as_str()
    }

    fn priority(&self) -> i32 {
        0
    }

    fn apply(&self, acc: &mut ModifierAccumulator) {
        acc.add_carry_weight(self.item.weight);
        acc.add_encumbrance(self.armor.encumbrance);

        for (zone, sp) in &self.armor.coverage {
            acc.layer_sp(zone, *sp);
        }
    }
}
