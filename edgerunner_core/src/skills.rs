//! Skill list queries for the sheet collaborator

use crate::model::{cyberware, find_item, skills, Character, Item};
use crate::types::{CyberKind, ItemId};
use serde::{Deserialize, Serialize};

/// Skill whose rolls pick up the combat sense bonus
pub const AWARENESS_SKILL: &str = "Awareness/Notice";
/// Skill whose trained level is the combat sense bonus
pub const COMBAT_SENSE_SKILL: &str = "Combat Sense";

/// How a skill list is ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillSortOrder {
    /// Alphabetical by skill name
    #[default]
    Name,
    /// Grouped by governing stat key, then by name
    Stat,
}

/// Skill ids in display order
pub fn sorted_skill_ids(items: &[Item], order: SkillSortOrder) -> Vec<ItemId> {
    let mut list: Vec<(&Item, &str)> = skills(items)
        .map(|(item, skill)| (item, skill.stat.as_str()))
        .collect();

    match order {
        SkillSortOrder::Name => list.sort_by(|a, b| a.0.name.cmp(&b.0.name)),
        SkillSortOrder::Stat => {
            list.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.name.cmp(&b.0.name)))
        }
    }

    list.into_iter().map(|(item, _)| item.id.clone()).collect()
}

/// Roll bonus granted to a skill by equipped Characteristic cyberware
pub fn characteristic_skill_bonus(skill_name: &str, items: &[Item]) -> i32 {
    cyberware(items)
        .filter(|(item, cw)| item.equipped && cw.has(CyberKind::Characteristic))
        .filter_map(|(_, cw)| cw.work_type.skill_bonus.get(skill_name))
        .fold(0i32, |total, bonus| total.saturating_add(*bonus))
}

/// Combat sense bonus for a roll of `skill_name`
///
/// Only Awareness/Notice rolls get it: the trained level of the first
/// Combat Sense skill, or 0 without one.
pub fn combat_sense_bonus(skill_name: &str, items: &[Item]) -> i32 {
    if !skill_name.eq_ignore_ascii_case(AWARENESS_SKILL) {
        return 0;
    }
    skills(items)
        .find(|(item, _)| item.name.eq_ignore_ascii_case(COMBAT_SENSE_SKILL))
        .map(|(_, skill)| skill.level)
        .unwrap_or(0)
}

/// Modifier added to a skill roll: effective level, governing stat total,
/// cyberware skill bonus and combat sense
///
/// Reads stat totals as they stand, so derive the character first. A skill
/// whose stat key is unknown contributes no stat. Returns `None` when the id
/// is not a skill.
pub fn skill_check_modifier(character: &Character, skill_id: &ItemId) -> Option<i32> {
    let item = find_item(&character.items, skill_id)?;
    let skill = item.as_skill()?;

    let stat = skill
        .stat_key()
        .map(|key| character.stats.total(key))
        .unwrap_or(0);

    let modifier = skill
        .effective_level()
        .saturating_add(stat)
        .saturating_add(characteristic_skill_bonus(&item.name, &character.items))
        .saturating_add(combat_sense_bonus(&item.name, &character.items));
    Some(modifier)
}
