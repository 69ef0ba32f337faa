//! CyberwareSource - Modifiers from installed cyberware

use crate::derive::ModifierAccumulator;
use crate::model::{CyberwareData, Item};
use crate::source::ModifierSource;
use crate::types::CyberKind;

/// An equipped cyberware record
///
/// Every installed piece costs humanity. Characteristic kinds add stat and
/// check bonuses; Armor kinds add stopping power, encumbrance and stat
/// penalties.
pub struct CyberwareSource<'a> {
    item: &'a Item,
    cyberware: &'a CyberwareData,
}

impl<'a> CyberwareSource<'a> {
    pub fn new(item: &'a Item, cyberware: &'a CyberwareData) -> Self {
        CyberwareSource { item, cyberware }
    }
}

impl ModifierSource for CyberwareSource<'_> {
    fn id(&self) -> &str {
        self.item.id.as_str()
    }

    fn priority(&self) -> i32 {
        100 // Cyber-armor layers over worn armor
    }

    fn apply(&self, acc: &mut ModifierAccumulator) {
        let work = &self.cyberware.work_type;

        acc.add_carry_weight(self.item.weight);
        acc.add_humanity_loss(self.cyberware.humanity_loss);

        if self.cyberware.has(CyberKind::Characteristic) {
            for (stat, bonus) in &work.stat_bonus {
                acc.add_cyber_mod(*stat, *bonus);
            }
            for (check, bonus) in &work.check_bonus {
                acc.add_check_bonus(*check, *bonus);
            }
        }

        if self.cyberware.has(CyberKind::Armor) {
            for (zone, sp) in &work.armor_locations {
                if *sp > 0 {
                    acc.layer_sp(zone, *sp);
                }
            }
            acc.add_encumbrance(work.encumbrance);
            for (stat, penalty) in &work.armor_penalties {
                acc.add_armor_penalty(*stat, *penalty);
            }
        }
    }
}
