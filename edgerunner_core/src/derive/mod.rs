//! Derivation pipeline - Recomputes every derived field of a character

mod accumulator;
mod computed;

pub use accumulator::ModifierAccumulator;
pub use computed::{body_stats, body_type_modifier, hit_location_lookup, movement};

use crate::config::{default_rules, RulesConfig};
use crate::defense::{
    apply_wound_scaling, calculate_humanity, death_threshold, stun_threshold, wound_state_with,
    WoundTier,
};
use crate::model::Character;
use crate::source::{item_sources, ModifierSource};
use tracing::{debug, trace};

/// Recompute every derived field with the shipped rules
pub fn derive_character(character: &mut Character) {
    derive_with_rules(character, &default_rules());
}

/// Recompute every derived field with the given rules
pub fn derive_with_rules(character: &mut Character, rules: &RulesConfig) {
    derive_with_sources(character, &[], rules);
}

/// Recompute every derived field, folding extra sources in with the item sources
///
/// Extra sources are sorted together with the item sources by priority.
/// Running this twice on the same snapshot gives the same result.
pub fn derive_with_sources(
    character: &mut Character,
    extra: &[Box<dyn ModifierSource>],
    rules: &RulesConfig,
) {
    let acc = {
        let owned = item_sources(&character.items);
        let mut sources: Vec<&dyn ModifierSource> = owned.iter().map(|s| s.as_ref()).collect();
        sources.extend(extra.iter().map(|s| s.as_ref() as &dyn ModifierSource));
        accumulate(&sources)
    };

    acc.apply_to(character, rules);

    let state = wound_state_with(character.damage, rules.wounds.damage_per_state);
    apply_wound_scaling(&mut character.stats, state);

    let (humanity, empathy_total) = calculate_humanity(
        &character.stats.empathy,
        acc.humanity_loss,
        rules.humanity.points_per_empathy,
    );
    character.humanity = humanity;
    character.stats.empathy.total = empathy_total;

    let body_total = character.stats.body.total;
    let stun = stun_threshold(body_total, state);
    let derived = &mut character.derived;
    derived.wound_state = state;
    derived.wound_tier = WoundTier::from_state(state);
    derived.stun_threshold = stun;
    derived.death_threshold = death_threshold(stun);
    derived.movement = movement(character.stats.movement.total, &rules.body);
    derived.body = body_stats(body_total, &rules.body);
    derived.hit_location_lookup = hit_location_lookup(&character.hit_locations);

    debug!(
        character = %character.id,
        wound_state = state,
        humanity = character.humanity.total,
        encumbrance = acc.encumbrance,
        "derived character"
    );
}

/// Apply sources in priority order; ties keep their given order
pub fn accumulate(sources: &[&dyn ModifierSource]) -> ModifierAccumulator {
    let mut sorted: Vec<&dyn ModifierSource> = sources.to_vec();
    sorted.sort_by_key(|s| s.priority());

    let mut acc = ModifierAccumulator::new();
    for source in sorted {
        trace!(source = source.id(), priority = source.priority(), "applying modifier source");
        source.apply(&mut acc);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArmorData, CyberwareData, Item, Stats, WorkType};
    use crate::types::{CheckKey, CyberKind, StatKey};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn kinds(list: &[CyberKind]) -> crate::types::KindSet {
        list.iter().copied().collect()
    }

    fn base_character() -> Character {
        let mut character = Character::new("c-1", "Johnny");
        character.stats = Stats::uniform(6);
        character
    }

    fn vest(id: &str, sp: i32, encumbrance: i32) -> Item {
        Item::armor(
            id,
            "Vest",
            ArmorData {
                coverage: BTreeMap::from([("Torso".to_string(), sp)]),
                encumbrance,
            },
        )
        .with_equipped(true)
    }

    fn subdermal(sp: i32, encumbrance: i32) -> Item {
        Item::cyberware(
            "cw-armor",
            "Subdermal Armor",
            CyberwareData {
                humanity_loss: 6,
                work_type: WorkType {
                    kinds: kinds(&[CyberKind::Armor]),
                    armor_locations: BTreeMap::from([("Torso".to_string(), sp)]),
                    armor_penalties: BTreeMap::from([(StatKey::Attractiveness, 1)]),
                    encumbrance,
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .with_equipped(true)
    }

    fn graft(stat: StatKey, bonus: i32, loss: i32) -> Item {
        Item::cyberware(
            format!("cw-{}", stat),
            "Graft",
            CyberwareData {
                humanity_loss: loss,
                work_type: WorkType {
                    kinds: kinds(&[CyberKind::Characteristic]),
                    stat_bonus: BTreeMap::from([(stat, bonus)]),
                    check_bonus: BTreeMap::from([(CheckKey::SaveStun, 1)]),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .with_equipped(true)
    }

    #[test]
    fn test_uninjured_unarmored_character() {
        let mut character = base_character();
        character.derive();

        for key in StatKey::all() {
            assert_eq!(character.stats.total(*key), 6, "{}", key);
        }
        assert_eq!(character.humanity.base, 60);
        assert_eq!(character.humanity.total, 60);
        assert_eq!(character.derived.wound_state, 0);
        assert_eq!(character.derived.stun_threshold, 7);
        assert_eq!(character.derived.death_threshold, 10);
        assert_eq!(character.derived.movement.run, 18);
        assert_eq!(character.derived.body.modifier, 2);
        assert_eq!(character.derived.hit_location_lookup.len(), 10);
    }

    #[test]
    fn test_worn_armor_then_cyber_armor_layering() {
        let mut character = base_character();
        // worn: 0 + 18 = 18, 18 vs 14 -> diff 4 -> 23; cyber 10 vs 23 -> diff 13 -> 26
        character.items = vec![vest("a-1", 18, 1), vest("a-2", 14, 1), subdermal(10, 1)];
        character.derive();

        assert_eq!(character.hit_locations["Torso"].stopping_power, 26);
        assert_eq!(character.hit_locations["Head"].stopping_power, 0);
        assert_eq!(character.stats.reflex.armor_mod, -3);
        assert_eq!(character.stats.reflex.total, 3);
        assert_eq!(character.stats.attractiveness.armor_implant_mod, -1);
        assert_eq!(character.stats.attractiveness.total, 5);
        assert_eq!(character.humanity.loss, 6);
    }

    #[test]
    fn test_cyber_armor_layers_after_worn_armor_regardless_of_item_order() {
        let mut character = base_character();
        character.items = vec![subdermal(10, 0), vest("a-1", 18, 0), vest("a-2", 14, 0)];
        character.derive();
        assert_eq!(character.hit_locations["Torso"].stopping_power, 26);
    }

    #[test]
    fn test_unequipped_items_contribute_nothing() {
        let mut character = base_character();
        character.items = vec![
            vest("a-1", 18, 2).with_equipped(false),
            graft(StatKey::Reflex, 2, 5).with_equipped(false).with_weight(3.0),
        ];
        character.derive();

        assert_eq!(character.stats.reflex.total, 6);
        assert_eq!(character.hit_locations["Torso"].stopping_power, 0);
        assert_eq!(character.humanity.loss, 0);
        assert!((character.carry_weight - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_characteristic_bonuses_and_checks() {
        let mut character = base_character();
        character.items = vec![
            graft(StatKey::Body, 2, 3).with_weight(1.0),
            graft(StatKey::Empathy, 1, 3).with_weight(0.5),
        ];
        character.derive();

        assert_eq!(character.stats.body.cyber_mod, 2);
        assert_eq!(character.stats.body.total, 8);
        assert_eq!(character.derived.body.lift, 320);
        assert_eq!(character.derived.save_stun_implant_mod, 2);
        assert_eq!(character.derived.initiative_implant_mod, 0);
        assert!((character.carry_weight - 1.5).abs() < f64::EPSILON);

        // empathy: pre-loss 7, loss 6 -> floor(6/10) = 0
        assert_eq!(character.stats.empathy.cyber_mod, 1);
        assert_eq!(character.humanity.base, 70);
        assert_eq!(character.humanity.total, 64);
        assert_eq!(character.stats.empathy.total, 7);
    }

    #[test]
    fn test_heavy_humanity_loss() {
        let mut character = base_character();
        character.items = vec![graft(StatKey::Luck, 0, 65)];
        character.derive();

        assert_eq!(character.humanity.base, 60);
        assert_eq!(character.humanity.loss, 65);
        assert_eq!(character.humanity.total, 0);
        assert_eq!(character.stats.empathy.total, 0);
    }

    #[test]
    fn test_mortal_wounds_scale_after_all_modifiers() {
        let mut character = base_character();
        character.damage = 13; // wound state 4
        character.items = vec![graft(StatKey::Reflex, 2, 0), vest("a-1", 10, 1)];
        character.derive();

        // ref: 6 + 2 - 1 = 7 -> ceil(7/3) = 3
        assert_eq!(character.stats.reflex.total, 3);
        assert_eq!(character.stats.reflex.wound_mod, -4);
        assert_eq!(character.stats.intelligence.total, 2);
        assert_eq!(character.stats.cool.total, 2);
        assert_eq!(character.stats.technique.total, 6);
        assert_eq!(character.derived.wound_tier, WoundTier::Mortal(0));
        assert_eq!(character.derived.stun_threshold, 3);
        assert_eq!(character.derived.death_threshold, 6);
    }

    #[test]
    fn test_healing_clears_wound_mods() {
        let mut character = base_character();
        character.damage = 9;
        character.derive();
        assert_eq!(character.stats.reflex.wound_mod, -3);

        character.damage = 0;
        character.derive();
        assert_eq!(character.stats.reflex.wound_mod, 0);
        assert_eq!(character.stats.reflex.total, 6);
    }

    #[test]
    fn test_custom_rules_change_wound_width() {
        let mut character = base_character();
        character.damage = 5;
        let mut rules = RulesConfig::default();
        rules.wounds.damage_per_state = 5;
        derive_with_rules(&mut character, &rules);
        assert_eq!(character.derived.wound_state, 1);
    }

    struct DrugSource;

    impl ModifierSource for DrugSource {
        fn id(&self) -> &str {
            "synthcoke"
        }

        fn priority(&self) -> i32 {
            200
        }

        fn apply(&self, acc: &mut ModifierAccumulator) {
            acc.add_cyber_mod(StatKey::Reflex, 1);
            acc.add_check_bonus(CheckKey::Initiative, 2);
        }
    }

    #[test]
    fn test_extra_sources_fold_in() {
        let mut character = base_character();
        let extra: Vec<Box<dyn ModifierSource>> = vec![Box::new(DrugSource)];
        derive_with_sources(&mut character, &extra, &RulesConfig::default());

        assert_eq!(character.stats.reflex.total, 7);
        assert_eq!(character.derived.initiative_implant_mod, 2);
    }

    #[test]
    fn test_extreme_inputs_saturate() {
        let mut character =
            Character::from_json(r#"{"id":"c","stats":{"emp":{"base":"99999999999"}}}"#).unwrap();
        character.derive();
        assert_eq!(character.stats.empathy.base, i32::MAX);
        assert_eq!(character.humanity.base, i32::MAX);
        assert_eq!(character.humanity.total, i32::MAX);

        let mut character = base_character();
        character.stats.reflex.base = i32::MAX;
        character.stats.reflex.temp_mod = 1;
        character.stats.body.base = i32::MAX;
        character.items = vec![vest("a-1", i32::MAX, 0), vest("a-2", i32::MAX, 0)];
        character.derive();
        assert_eq!(character.stats.reflex.total, i32::MAX);
        assert_eq!(character.hit_locations["Torso"].stopping_power, i32::MAX);
        assert_eq!(character.derived.body.carry, i32::MAX);
    }

    proptest! {
        #[test]
        fn prop_derivation_is_idempotent(
            base in 1i32..11,
            temp in -3i32..4,
            damage in 0u32..45,
            sp in 0i32..30,
            bonus in -2i32..4,
            loss in 0i32..80,
        ) {
            let mut character = base_character();
            character.stats = Stats::uniform(base);
            character.stats.reflex.temp_mod = temp;
            character.damage = damage;
            character.items = vec![vest("a-1", sp, 1), graft(StatKey::Cool, bonus, loss)];

            character.derive();
            let first = character.clone();
            character.derive();
            prop_assert_eq!(first, character);
        }

        #[test]
        fn prop_death_threshold_three_above_stun(damage in 0u32..60, body in 1i32..15) {
            let mut character = base_character();
            character.stats.body.base = body;
            character.damage = damage;
            character.derive();
            prop_assert_eq!(
                character.derived.death_threshold,
                character.derived.stun_threshold + 3
            );
        }
    }
}
