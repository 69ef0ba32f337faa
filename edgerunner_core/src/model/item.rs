//! Item records owned by a character

use super::lenient;
use crate::types::{CheckKey, CyberKind, ItemId, KindSet, StatKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An item owned by a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Mount/wear toggle. Chips ignore it and gate on `chipActive` instead.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub equipped: bool,
    #[serde(default, deserialize_with = "lenient::float")]
    pub weight: f64,
    #[serde(flatten)]
    pub data: ItemData,
}

/// Type-specific payload, tagged by `type` with the body under `system`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "system", rename_all = "snake_case")]
pub enum ItemData {
    Skill(SkillData),
    Armor(ArmorData),
    Cyberware(CyberwareData),
    /// Consumed by other subsystems; carried through untouched
    Weapon(Value),
    Program(Value),
    Misc(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillData {
    /// Trained level; set by the user, never by the engine
    #[serde(default, deserialize_with = "lenient::int")]
    pub level: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub chip_level: i32,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_chipped: bool,
    /// Governing stat key, e.g. "ref"
    #[serde(default, deserialize_with = "lenient::text")]
    pub stat: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub ask_mods: bool,
}

impl SkillData {
    /// Level used for checks: the chip level while chipped, otherwise the trained level
    pub fn effective_level(&self) -> i32 {
        if self.is_chipped {
            self.chip_level
        } else {
            self.level
        }
    }

    pub fn stat_key(&self) -> Option<StatKey> {
        self.stat.parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorData {
    /// Zone -> stopping power
    #[serde(default, deserialize_with = "lenient::coverage")]
    pub coverage: BTreeMap<String, i32>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub encumbrance: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyberwareData {
    #[serde(default, deserialize_with = "lenient::int")]
    pub humanity_loss: i32,
    /// Free-form body type, e.g. "CYBERARM"; matched against module parent rules
    #[serde(default, deserialize_with = "lenient::text")]
    pub cyberware_type: String,
    #[serde(default)]
    pub work_type: WorkType,
    #[serde(default)]
    pub module_info: ModuleInfo,
}

impl CyberwareData {
    pub fn has(&self, kind: CyberKind) -> bool {
        self.work_type.kinds.has(kind)
    }

    /// A chip counts only while it is slotted active
    pub fn is_active_chip(&self) -> bool {
        self.has(CyberKind::Chip) && self.work_type.chip_active
    }
}

/// What a cyberware record does, per capability kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkType {
    #[serde(default)]
    pub kinds: KindSet,
    /// Characteristic: stat bonuses
    #[serde(default, deserialize_with = "lenient::int_map")]
    pub stat_bonus: BTreeMap<StatKey, i32>,
    /// Characteristic: roll bonuses keyed by skill name
    #[serde(default, deserialize_with = "lenient::int_map")]
    pub skill_bonus: BTreeMap<String, i32>,
    /// Characteristic: check roll bonuses
    #[serde(default, deserialize_with = "lenient::int_map")]
    pub check_bonus: BTreeMap<CheckKey, i32>,
    /// Armor: zone -> stopping power
    #[serde(default, deserialize_with = "lenient::int_map")]
    pub armor_locations: BTreeMap<String, i32>,
    /// Armor: stat -> penalty magnitude (subtracted)
    #[serde(default, deserialize_with = "lenient::int_map")]
    pub armor_penalties: BTreeMap<StatKey, i32>,
    /// Armor: encumbrance added to the reflex penalty
    #[serde(default, deserialize_with = "lenient::int")]
    pub encumbrance: i32,
    /// Chip: skill name -> granted level
    #[serde(default, deserialize_with = "lenient::int_map")]
    pub chip_skills: BTreeMap<String, i32>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub chip_active: bool,
}

/// Slot bookkeeping between implants and the modules mounted in them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_module: bool,
    #[serde(default, deserialize_with = "lenient::reference")]
    pub parent_id: Option<ItemId>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub slots_taken: i32,
    /// Capacity offered when this record is an Implant
    #[serde(default, deserialize_with = "lenient::int")]
    pub options_available: i32,
    /// `cyberwareType` values this module may mount into; empty allows any
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub allowed_parent_types: Vec<String>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, data: ItemData) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            equipped: false,
            weight: 0.0,
            data,
        }
    }

    pub fn skill(id: impl Into<ItemId>, name: impl Into<String>, data: SkillData) -> Self {
        Item::new(id, name, ItemData::Skill(data))
    }

    pub fn armor(id: impl Into<ItemId>, name: impl Into<String>, data: ArmorData) -> Self {
        Item::new(id, name, ItemData::Armor(data))
    }

    pub fn cyberware(id: impl Into<ItemId>, name: impl Into<String>, data: CyberwareData) -> Self {
        Item::new(id, name, ItemData::Cyberware(data))
    }

    pub fn with_equipped(mut self, equipped: bool) -> Self {
        self.equipped = equipped;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Wire name of the item type
    pub fn type_name(&self) -> &'static str {
        match self.data {
            ItemData::Skill(_) => "skill",
            ItemData::Armor(_) => "armor",
            ItemData::Cyberware(_) => "cyberware",
            ItemData::Weapon(_) => "weapon",
            ItemData::Program(_) => "program",
            ItemData::Misc(_) => "misc",
        }
    }

    pub fn as_skill(&self) -> Option<&SkillData> {
        match &self.data {
            ItemData::Skill(skill) => Some(skill),
            _ => None,
        }
    }

    pub fn as_skill_mut(&mut self) -> Option<&mut SkillData> {
        match &mut self.data {
            ItemData::Skill(skill) => Some(skill),
            _ => None,
        }
    }

    pub fn as_armor(&self) -> Option<&ArmorData> {
        match &self.data {
            ItemData::Armor(armor) => Some(armor),
            _ => None,
        }
    }

    pub fn as_cyberware(&self) -> Option<&CyberwareData> {
        match &self.data {
            ItemData::Cyberware(cw) => Some(cw),
            _ => None,
        }
    }

    pub fn as_cyberware_mut(&mut self) -> Option<&mut CyberwareData> {
        match &mut self.data {
            ItemData::Cyberware(cw) => Some(cw),
            _ => None,
        }
    }
}

/// Find an item by id
pub fn find_item<'a>(items: &'a [Item], id: &ItemId) -> Option<&'a Item> {
    items.iter().find(|item| &item.id == id)
}

/// All skill records paired with their data
pub fn skills(items: &[Item]) -> impl Iterator<Item = (&Item, &SkillData)> {
    items
        .iter()
        .filter_map(|item| item.as_skill().map(|skill| (item, skill)))
}

/// All cyberware records paired with their data
pub fn cyberware(items: &[Item]) -> impl Iterator<Item = (&Item, &CyberwareData)> {
    items
        .iter()
        .filter_map(|item| item.as_cyberware().map(|cw| (item, cw)))
}
