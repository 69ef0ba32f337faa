//! Pending item writes and an in-memory batch applier
//!
//! Engine passes never mutate items directly. They return `ItemUpdate`
//! batches; the collaborator commits each batch as one unit.

use crate::model::Item;
use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error applying an update batch; nothing in the batch was applied
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("No item with id '{0}'")]
    UnknownItem(ItemId),
    #[error("Item '{id}' is not a {expected}")]
    WrongItemType { id: ItemId, expected: &'static str },
}

/// One field write on one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ItemUpdate {
    SkillLevel { skill_id: ItemId, level: i32 },
    SkillChipLevel { skill_id: ItemId, chip_level: i32 },
    SkillChipped { skill_id: ItemId, is_chipped: bool },
    ChipActive { chip_id: ItemId, active: bool },
    ChipSkillLevel { chip_id: ItemId, skill_name: String, level: i32 },
    Equipped { item_id: ItemId, equipped: bool },
    ModuleParent { module_id: ItemId, parent_id: Option<ItemId> },
}

impl ItemUpdate {
    /// The item this update writes to
    pub fn target(&self) -> &ItemId {
        match self {
            ItemUpdate::SkillLevel { skill_id, .. }
            | ItemUpdate::SkillChipLevel { skill_id, .. }
            | ItemUpdate::SkillChipped { skill_id, .. } => skill_id,
            ItemUpdate::ChipActive { chip_id, .. } | ItemUpdate::ChipSkillLevel { chip_id, .. } => {
                chip_id
            }
            ItemUpdate::Equipped { item_id, .. } => item_id,
            ItemUpdate::ModuleParent { module_id, .. } => module_id,
        }
    }

    /// Item type the target must have, if any
    fn expected_type(&self) -> Option<&'static str> {
        match self {
            ItemUpdate::SkillLevel { .. }
            | ItemUpdate::SkillChipLevel { .. }
            | ItemUpdate::SkillChipped { .. } => Some("skill"),
            ItemUpdate::ChipActive { .. }
            | ItemUpdate::ChipSkillLevel { .. }
            | ItemUpdate::ModuleParent { .. } => Some("cyberware"),
            ItemUpdate::Equipped { .. } => None,
        }
    }

    fn apply(&self, item: &mut Item) {
        match self {
            ItemUpdate::SkillLevel { level, .. } => {
                if let Some(skill) = item.as_skill_mut() {
                    skill.level = *level;
                }
            }
            ItemUpdate::SkillChipLevel { chip_level, .. } => {
                if let Some(skill) = item.as_skill_mut() {
                    skill.chip_level = *chip_level;
                }
            }
            ItemUpdate::SkillChipped { is_chipped, .. } => {
                if let Some(skill) = item.as_skill_mut() {
                    skill.is_chipped = *is_chipped;
                }
            }
            ItemUpdate::ChipActive { active, .. } => {
                if let Some(cw) = item.as_cyberware_mut() {
                    cw.work_type.chip_active = *active;
                }
            }
            ItemUpdate::ChipSkillLevel {
                skill_name, level, ..
            } => {
                if let Some(cw) = item.as_cyberware_mut() {
                    cw.work_type.chip_skills.insert(skill_name.clone(), *level);
                }
            }
            ItemUpdate::Equipped { equipped, .. } => item.equipped = *equipped,
            ItemUpdate::ModuleParent { parent_id, .. } => {
                if let Some(cw) = item.as_cyberware_mut() {
                    cw.module_info.parent_id = parent_id.clone();
                }
            }
        }
    }
}

/// Apply a batch of updates as one unit
///
/// Every target is checked first. If any update names a missing item or an
/// item of the wrong type, nothing is written and the first problem is
/// returned. Updates apply in batch order.
pub fn apply_batch(items: &mut [Item], batch: &[ItemUpdate]) -> Result<(), StoreError> {
    let mut positions = Vec::with_capacity(batch.len());
    for update in batch {
        let id = update.target();
        let index = items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| StoreError::UnknownItem(id.clone()))?;
        if let Some(expected) = update.expected_type() {
            if items[index].type_name() != expected {
                return Err(StoreError::WrongItemType {
                    id: id.clone(),
                    expected,
                });
            }
        }
        positions.push(index);
    }

    for (update, index) in batch.iter().zip(positions) {
        update.apply(&mut items[index]);
    }
    Ok(())
}
