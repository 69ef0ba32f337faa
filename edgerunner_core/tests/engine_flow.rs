//! Snapshot in, derive, sync chips, commit, derive again

use edgerunner_core::cyberware::{attach_module, check_placement, sync_chips};
use edgerunner_core::prelude::*;
use edgerunner_core::skills::skill_check_modifier;
use edgerunner_core::{StoreError, WoundTier};

const SOLO: &str = include_str!("fixtures/solo.json");

fn load() -> Character {
    Character::from_json(SOLO).expect("fixture parses")
}

fn skill<'a>(character: &'a Character, id: &str) -> &'a SkillData {
    character
        .item(&id.into())
        .and_then(Item::as_skill)
        .expect("skill exists")
}

#[test]
fn test_snapshot_derives() {
    let mut character = load();
    assert_eq!(character.damage, 6);
    character.derive();

    // ref: 8 - encumbrance 1, then serious wound -2
    assert_eq!(character.stats.reflex.armor_mod, -1);
    assert_eq!(character.stats.reflex.wound_mod, -2);
    assert_eq!(character.stats.reflex.total, 5);
    assert_eq!(character.stats.intelligence.total, 7);
    assert_eq!(character.stats.cool.total, 8);
    assert_eq!(character.stats.attractiveness.total, 5);
    assert_eq!(character.stats.body.total, 10);

    assert_eq!(character.hit_locations["Torso"].stopping_power, 26);
    assert_eq!(character.hit_locations["rArm"].stopping_power, 14);
    assert_eq!(character.hit_locations["lArm"].stopping_power, 14);
    assert_eq!(character.hit_locations["Head"].stopping_power, 0);
    assert!(!character.hit_locations.contains_key("Tail"));

    assert_eq!(character.humanity.base, 60);
    assert_eq!(character.humanity.loss, 20);
    assert_eq!(character.humanity.total, 40);
    assert_eq!(character.stats.empathy.total, 4);

    let derived = &character.derived;
    assert_eq!(derived.wound_state, 2);
    assert_eq!(derived.wound_tier, WoundTier::Serious);
    assert_eq!(derived.stun_threshold, 9);
    assert_eq!(derived.death_threshold, 12);
    assert_eq!(derived.body.modifier, 4);
    assert_eq!(derived.body.carry, 100);
    assert_eq!(derived.movement.run, 18);
    assert_eq!(derived.movement.leap, 4);
    assert_eq!(derived.save_stun_implant_mod, 1);
    assert_eq!(derived.hit_location_lookup.len(), 10);
    assert_eq!(derived.hit_location_lookup[&6], "lArm");
    assert!((character.carry_weight - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_chip_sync_commits_and_rederives() {
    let mut character = load();
    character.derive();

    let batch = sync_chips(&character.items);
    // stealth level and flag, handgun flag; handgun keeps its stale chip level
    assert_eq!(batch.len(), 3);
    apply_batch(&mut character.items, &batch).unwrap();
    assert!(sync_chips(&character.items).is_empty());

    let stealth = skill(&character, "skill-stealth");
    assert!(stealth.is_chipped);
    assert_eq!(stealth.chip_level, 5);
    assert_eq!(stealth.level, 2);

    let handgun = skill(&character, "skill-handgun");
    assert!(!handgun.is_chipped);
    assert_eq!(handgun.chip_level, 6);

    let before = character.clone();
    character.derive();
    assert_eq!(character.stats, before.stats);

    assert_eq!(skill_check_modifier(&character, &"skill-stealth".into()), Some(10));
    assert_eq!(skill_check_modifier(&character, &"skill-handgun".into()), Some(9));
}

#[test]
fn test_slots_and_module_placement() {
    let mut character = load();
    let arm: ItemId = "cw-cyberarm".into();

    assert_eq!(
        compute_slot_usage(&arm, &character.items),
        SlotUsage { used: 2, total: 4, left: 2 }
    );

    let (updates, report) = attach_module(&"cw-grapple".into(), &arm, &character.items);
    assert_eq!(
        report,
        PlacementReport::Fits {
            usage: SlotUsage { used: 3, total: 4, left: 1 }
        }
    );
    apply_batch(&mut character.items, &updates).unwrap();

    // unequipped modules take no slots
    assert_eq!(compute_slot_usage(&arm, &character.items).used, 2);

    let equip = [ItemUpdate::Equipped {
        item_id: "cw-grapple".into(),
        equipped: true,
    }];
    apply_batch(&mut character.items, &equip).unwrap();
    assert_eq!(
        compute_slot_usage(&arm, &character.items),
        SlotUsage { used: 3, total: 4, left: 1 }
    );

    character.derive();
    assert_eq!(character.humanity.loss, 23);

    let report = check_placement(&"cw-popup-gun".into(), &"cw-subdermal".into(), &character.items);
    assert_eq!(report, PlacementReport::ParentNotImplant);
}

#[test]
fn test_bad_batch_leaves_snapshot_untouched() {
    let mut character = load();
    let before = character.items.clone();
    let batch = vec![
        ItemUpdate::SkillChipped {
            skill_id: "skill-stealth".into(),
            is_chipped: true,
        },
        ItemUpdate::SkillLevel {
            skill_id: "weapon-pistol".into(),
            level: 3,
        },
    ];

    let err = apply_batch(&mut character.items, &batch).unwrap_err();
    assert_eq!(
        err,
        StoreError::WrongItemType {
            id: "weapon-pistol".into(),
            expected: "skill",
        }
    );
    assert_eq!(character.items, before);
}

#[test]
fn test_derived_snapshot_survives_json() {
    let mut character = load();
    character.derive();

    let json = character.to_json_pretty().unwrap();
    let reloaded = Character::from_json(&json).unwrap();
    assert_eq!(reloaded, character);
}
