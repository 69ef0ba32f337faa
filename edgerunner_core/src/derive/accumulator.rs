//! ModifierAccumulator - Collects modifiers before applying them to a Character

use crate::config::RulesConfig;
use crate::defense::stack_layers;
use crate::model::Character;
use crate::types::{CheckKey, StatKey};
use std::collections::BTreeMap;

/// Accumulates modifiers from every source
///
/// This is used during derivation to collect all contributions before
/// writing the character's derived fields in the fixed pipeline order.
#[derive(Debug, Clone, Default)]
pub struct ModifierAccumulator {
    // === Stats ===
    /// Characteristic cyberware bonuses per stat
    pub cyber_mods: BTreeMap<StatKey, i32>,
    /// Cyber-armor penalty magnitudes per stat
    pub armor_penalties: BTreeMap<StatKey, i32>,

    // === Armor ===
    /// SP layers per zone, in application order
    pub sp_layers: BTreeMap<String, Vec<i32>>,
    /// Worn armor plus cyber-armor encumbrance
    pub encumbrance: i32,

    // === Checks ===
    pub initiative_bonus: i32,
    pub save_stun_bonus: i32,

    // === Resources ===
    pub humanity_loss: i32,
    pub carry_weight: f64,
}

impl ModifierAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_cyber_mod(&mut self, stat: StatKey, value: i32) {
        let entry = self.cyber_mods.entry(stat).or_insert(0);
        *entry = entry.saturating_add(value);
    }

    /// Record a penalty magnitude; it is subtracted when applied
    pub fn add_armor_penalty(&mut self, stat: StatKey, magnitude: i32) {
        let entry = self.armor_penalties.entry(stat).or_insert(0);
        *entry = entry.saturating_add(magnitude);
    }

    pub fn layer_sp(&mut self, zone: &str, sp: i32) {
        self.sp_layers.entry(zone.to_string()).or_default().push(sp);
    }

    pub fn add_encumbrance(&mut self, value: i32) {
        self.encumbrance = self.encumbrance.saturating_add(value);
    }

    pub fn add_check_bonus(&mut self, check: CheckKey, value: i32) {
        match check {
            CheckKey::Initiative => {
                self.initiative_bonus = self.initiative_bonus.saturating_add(value)
            }
            CheckKey::SaveStun => self.save_stun_bonus = self.save_stun_bonus.saturating_add(value),
        }
    }

    pub fn add_humanity_loss(&mut self, value: i32) {
        self.humanity_loss = self.humanity_loss.saturating_add(value);
    }

    pub fn add_carry_weight(&mut self, weight: f64) {
        self.carry_weight += weight;
    }

    pub fn cyber_mod(&self, stat: StatKey) -> i32 {
        self.cyber_mods.get(&stat).copied().unwrap_or(0)
    }

    pub fn armor_penalty(&self, stat: StatKey) -> i32 {
        self.armor_penalties.get(&stat).copied().unwrap_or(0)
    }

    /// Write accumulated modifiers onto the character
    ///
    /// Per stat: `base + tempMod`, then `cyberMod` (empathy records it but
    /// does not add it), then reflex's encumbrance `armorMod`, then
    /// `armorImplantMod`. Wound scaling and humanity run afterwards.
    pub fn apply_to(&self, character: &mut Character, rules: &RulesConfig) {
        for key in StatKey::all() {
            let cyber_mod = self.cyber_mod(*key);
            let stat = character.stats.get_mut(*key);
            stat.total = stat.base.saturating_add(stat.temp_mod);

            stat.cyber_mod = cyber_mod;
            if *key != StatKey::Empathy {
                stat.total = stat.total.saturating_add(cyber_mod);
            }

            stat.armor_mod = 0;
            stat.armor_implant_mod = 0;
            stat.wound_mod = 0;
        }

        let reflex = &mut character.stats.reflex;
        reflex.armor_mod = self.encumbrance.saturating_neg();
        reflex.total = reflex.total.saturating_add(reflex.armor_mod);

        for key in StatKey::all() {
            let penalty = self.armor_penalty(*key);
            let stat = character.stats.get_mut(*key);
            stat.armor_implant_mod = penalty.saturating_neg();
            stat.total = stat.total.saturating_add(stat.armor_implant_mod);
        }

        for (zone, location) in character.hit_locations.iter_mut() {
            location.stopping_power = self
                .sp_layers
                .get(zone)
                .map(|layers| stack_layers(layers, &rules.armor))
                .unwrap_or(0);
        }

        character.carry_weight = self.carry_weight;
        character.derived.armor_encumbrance = self.encumbrance;
        character.derived.initiative_implant_mod = self.initiative_bonus;
        character.derived.save_stun_implant_mod = self.save_stun_bonus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stats;

    fn character() -> Character {
        let mut character = Character::new("c-1", "Test");
        character.stats = Stats::uniform(6);
        character
    }

    #[test]
    fn test_empty_accumulator_totals_base_plus_temp() {
        let mut character = character();
        character.stats.cool.temp_mod = 2;
        ModifierAccumulator::new().apply_to(&mut character, &RulesConfig::default());

        assert_eq!(character.stats.cool.total, 8);
        assert_eq!(character.stats.reflex.total, 6);
        assert_eq!(character.stats.reflex.armor_mod, 0);
    }

    #[test]
    fn test_empathy_cyber_mod_recorded_not_added() {
        let mut character = character();
        let mut acc = ModifierAccumulator::new();
        acc.add_cyber_mod(StatKey::Empathy, 2);
        acc.add_cyber_mod(StatKey::Body, 2);
        acc.apply_to(&mut character, &RulesConfig::default());

        assert_eq!(character.stats.empathy.cyber_mod, 2);
        assert_eq!(character.stats.empathy.total, 6);
        assert_eq!(character.stats.body.cyber_mod, 2);
        assert_eq!(character.stats.body.total, 8);
    }

    #[test]
    fn test_encumbrance_hits_reflex_once() {
        let mut character = character();
        let mut acc = ModifierAccumulator::new();
        acc.add_encumbrance(1);
        acc.add_encumbrance(2);
        acc.apply_to(&mut character, &RulesConfig::default());

        assert_eq!(character.stats.reflex.armor_mod, -3);
        assert_eq!(character.stats.reflex.total, 3);
        assert_eq!(character.stats.intelligence.armor_mod, 0);
        assert_eq!(character.derived.armor_encumbrance, 3);
    }

    #[test]
    fn test_armor_penalties_are_negated() {
        let mut character = character();
        let mut acc = ModifierAccumulator::new();
        acc.add_armor_penalty(StatKey::Attractiveness, 2);
        acc.apply_to(&mut character, &RulesConfig::default());

        assert_eq!(character.stats.attractiveness.armor_implant_mod, -2);
        assert_eq!(character.stats.attractiveness.total, 4);
    }

    #[test]
    fn test_unknown_zones_ignored_and_bare_zones_reset() {
        let mut character = character();
        character.hit_locations.get_mut("Head").unwrap().stopping_power = 99;
        let mut acc = ModifierAccumulator::new();
        acc.layer_sp("Torso", 20);
        acc.layer_sp("Torso", 20);
        acc.layer_sp("Tail", 12);
        acc.apply_to(&mut character, &RulesConfig::default());

        assert_eq!(character.hit_locations["Torso"].stopping_power, 25);
        assert_eq!(character.hit_locations["Head"].stopping_power, 0);
        assert!(!character.hit_locations.contains_key("Tail"));
    }
}
