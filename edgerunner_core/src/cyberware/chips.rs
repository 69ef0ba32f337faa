//! Chip synchronization between skill records and skill chips
//!
//! Only cyberware with the Chip kind and `chipActive` set counts. The
//! `equipped` flag plays no part here.

use crate::model::{cyberware, find_item, skills, Item};
use crate::store::ItemUpdate;
use crate::types::{CyberKind, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// New `chipLevel` for one skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipLevelUpdate {
    pub skill_id: ItemId,
    pub new_chip_level: i32,
}

/// New `isChipped` flag for one skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipFlagUpdate {
    pub skill_id: ItemId,
    pub new_is_chipped: bool,
}

impl From<ChipLevelUpdate> for ItemUpdate {
    fn from(update: ChipLevelUpdate) -> Self {
        ItemUpdate::SkillChipLevel {
            skill_id: update.skill_id,
            chip_level: update.new_chip_level,
        }
    }
}

impl From<ChipFlagUpdate> for ItemUpdate {
    fn from(update: ChipFlagUpdate) -> Self {
        ItemUpdate::SkillChipped {
            skill_id: update.skill_id,
            is_chipped: update.new_is_chipped,
        }
    }
}

/// Skill names granted by active chips, with the highest level per name
fn active_chip_levels(items: &[Item]) -> BTreeMap<&str, i32> {
    let mut best: BTreeMap<&str, i32> = BTreeMap::new();
    for (_, cw) in cyberware(items).filter(|(_, cw)| cw.is_active_chip()) {
        for (name, level) in &cw.work_type.chip_skills {
            let entry = best.entry(name.as_str()).or_insert(0);
            *entry = (*entry).max(*level);
        }
    }
    best
}

/// Chip records of kind Chip that name `skill_name`, active or not
fn chips_for<'a>(skill_name: &'a str, items: &'a [Item]) -> impl Iterator<Item = (&'a Item, i32)> {
    cyberware(items)
        .filter(|(_, cw)| cw.has(CyberKind::Chip))
        .filter_map(move |(item, cw)| {
            cw.work_type
                .chip_skills
                .get(skill_name)
                .map(|level| (item, *level))
        })
}

/// Recompute `chipLevel` for every skill an active chip names
///
/// A named skill takes the highest level any active chip grants it, floored
/// at zero. Skills no active chip names keep their stored `chipLevel`. Only
/// skills whose value changes get an update.
pub fn sync_chip_levels(items: &[Item]) -> Vec<ChipLevelUpdate> {
    let best = active_chip_levels(items);
    skills(items)
        .filter_map(|(item, skill)| {
            let level = (*best.get(item.name.as_str())?).max(0);
            (level != skill.chip_level).then(|| ChipLevelUpdate {
                skill_id: item.id.clone(),
                new_chip_level: level,
            })
        })
        .collect()
}

/// Recompute every skill's `isChipped` flag from the active chips
///
/// A skill is chipped while at least one active chip names it.
pub fn sync_chip_active_flags(items: &[Item]) -> Vec<ChipFlagUpdate> {
    let best = active_chip_levels(items);
    skills(items)
        .filter_map(|(item, skill)| {
            let chipped = best.contains_key(item.name.as_str());
            (chipped != skill.is_chipped).then(|| ChipFlagUpdate {
                skill_id: item.id.clone(),
                new_is_chipped: chipped,
            })
        })
        .collect()
}

/// Both sync passes as one batch, levels before flags
pub fn sync_chips(items: &[Item]) -> Vec<ItemUpdate> {
    let levels = sync_chip_levels(items);
    let flags = sync_chip_active_flags(items);
    debug!(levels = levels.len(), flags = flags.len(), "chip sync");

    levels
        .into_iter()
        .map(ItemUpdate::from)
        .chain(flags.into_iter().map(ItemUpdate::from))
        .collect()
}

/// Edit the level shown for a skill
///
/// A chipped skill writes its `chipLevel` and the level on every chip naming
/// it; an unchipped skill writes its trained `level`.
pub fn edit_skill_level(skill_id: &ItemId, value: i32, items: &[Item]) -> Vec<ItemUpdate> {
    let Some(item) = find_item(items, skill_id) else {
        return Vec::new();
    };
    let Some(skill) = item.as_skill() else {
        return Vec::new();
    };

    if !skill.is_chipped {
        return vec![ItemUpdate::SkillLevel {
            skill_id: skill_id.clone(),
            level: value,
        }];
    }

    let mut updates = vec![ItemUpdate::SkillChipLevel {
        skill_id: skill_id.clone(),
        chip_level: value,
    }];
    updates.extend(chips_for(&item.name, items).map(|(chip, _)| ItemUpdate::ChipSkillLevel {
        chip_id: chip.id.clone(),
        skill_name: item.name.clone(),
        level: value,
    }));
    updates
}

/// Toggle every chip naming a skill and the skill's chipped flag together
///
/// When chips exist the skill's `chipLevel` follows the highest of them,
/// floored at zero. Without chips the stored `chipLevel` is left alone.
pub fn toggle_skill_chip(skill_id: &ItemId, checked: bool, items: &[Item]) -> Vec<ItemUpdate> {
    let Some(item) = find_item(items, skill_id) else {
        return Vec::new();
    };
    let Some(skill) = item.as_skill() else {
        return Vec::new();
    };

    let chips: Vec<(&Item, i32)> = chips_for(&item.name, items).collect();
    let mut updates: Vec<ItemUpdate> = chips
        .iter()
        .map(|(chip, _)| ItemUpdate::ChipActive {
            chip_id: chip.id.clone(),
            active: checked,
        })
        .collect();
    updates.push(ItemUpdate::SkillChipped {
        skill_id: skill_id.clone(),
        is_chipped: checked,
    });

    if let Some(level) = chips.iter().map(|(_, level)| (*level).max(0)).max() {
        if level != skill.chip_level {
            updates.push(ItemUpdate::SkillChipLevel {
                skill_id: skill_id.clone(),
                chip_level: level,
            });
        }
    }

    debug!(skill = %skill_id, checked, chips = chips.len(), "chip toggle");
    updates
}

/// Pull a chip: unequipped and inactive
pub fn eject_chip(chip_id: &ItemId) -> Vec<ItemUpdate> {
    set_chip(chip_id, false)
}

/// Slot a chip: equipped and active
pub fn insert_chip(chip_id: &ItemId) -> Vec<ItemUpdate> {
    set_chip(chip_id, true)
}

fn set_chip(chip_id: &ItemId, on: bool) -> Vec<ItemUpdate> {
    vec![
        ItemUpdate::Equipped {
            item_id: chip_id.clone(),
            equipped: on,
        },
        ItemUpdate::ChipActive {
            chip_id: chip_id.clone(),
            active: on,
        },
    ]
}
