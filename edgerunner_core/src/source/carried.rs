//! CarriedItemSource - Weight of equipped gear with no other effect

use crate::derive::ModifierAccumulator;
use crate::model::Item;
use crate::source::ModifierSource;

pub struct CarriedItemSource<'a> {
    item: &'a Item,
}

impl<'a> CarriedItemSource<'a> {
    pub fn new(item: &'a Item) -> Self {
        CarriedItemSource { item }
    }
}

impl ModifierSource for CarriedItemSource<'_> {
    fn id(&self) -> &str {
        self.item.id.as_str()
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn apply(&self, acc: &mut ModifierAccumulator) {
        acc.add_carry_weight(self.item.weight);
    }
}
