//! Slot allocation between implants and their modules
//!
//! Capacity is reported, never enforced. Usage is re-scanned from the item
//! list on every query; there is no stored counter to drift.

use crate::model::{cyberware, find_item, CyberwareData, Item};
use crate::store::ItemUpdate;
use crate::types::{CyberKind, ItemId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Slot usage of one implant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotUsage {
    pub used: i32,
    pub total: i32,
    /// `max(0, total - used)`
    pub left: i32,
}

impl SlotUsage {
    pub fn new(used: i32, total: i32) -> Self {
        SlotUsage {
            used,
            total,
            left: total.saturating_sub(used).max(0),
        }
    }

    /// More slots taken than the implant provides
    pub fn over_allocated(&self) -> bool {
        self.used > self.total
    }
}

/// Outcome of checking where a module would mount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementReport {
    /// The module fits; `usage` is the parent's usage with the module mounted
    Fits { usage: SlotUsage },
    ModuleMissing,
    /// The record is not flagged as a module
    NotAModule,
    ParentMissing,
    /// A module cannot be its own parent
    SelfReference,
    /// The parent is not an Implant and offers no slots
    ParentNotImplant,
    /// The parent is itself a module; modules nest one level only
    ParentIsModule,
    /// The module hosts modules of its own and cannot become one
    ModuleHostsModules,
    ParentTypeNotAllowed { parent_type: String, allowed: Vec<String> },
    /// Mounting would take more slots than the parent provides
    CapacityExceeded { usage: SlotUsage },
}

impl PlacementReport {
    pub fn fits(&self) -> bool {
        matches!(self, PlacementReport::Fits { .. })
    }
}

fn equipped_module_on<'a>(item: &'a Item, implant_id: &ItemId) -> Option<&'a CyberwareData> {
    let cw = item.as_cyberware()?;
    let info = &cw.module_info;
    (item.equipped && info.is_module && info.parent_id.as_ref() == Some(implant_id)).then_some(cw)
}

/// Slot usage of `implant_id`, counting equipped modules that point at it
///
/// An id that does not resolve to a cyberware record reports all zeros.
pub fn compute_slot_usage(implant_id: &ItemId, items: &[Item]) -> SlotUsage {
    let Some(implant) = find_item(items, implant_id).and_then(Item::as_cyberware) else {
        return SlotUsage::default();
    };

    let used = items
        .iter()
        .filter_map(|item| equipped_module_on(item, implant_id))
        .fold(0i32, |used, cw| used.saturating_add(cw.module_info.slots_taken));

    SlotUsage::new(used, implant.module_info.options_available)
}

/// Every module record pointing at `implant_id`, equipped or not
pub fn modules_of<'a>(implant_id: &'a ItemId, items: &'a [Item]) -> impl Iterator<Item = &'a Item> {
    cyberware(items)
        .filter(move |(_, cw)| {
            cw.module_info.is_module && cw.module_info.parent_id.as_ref() == Some(implant_id)
        })
        .map(|(item, _)| item)
}

/// Modules whose parent id resolves to no record
pub fn orphaned_modules(items: &[Item]) -> Vec<&Item> {
    cyberware(items)
        .filter(|(_, cw)| cw.module_info.is_module)
        .filter(|(_, cw)| {
            cw.module_info
                .parent_id
                .as_ref()
                .is_some_and(|parent| find_item(items, parent).is_none())
        })
        .map(|(item, _)| item)
        .collect()
}

/// Check whether `module_id` could mount into `parent_id`
pub fn check_placement(module_id: &ItemId, parent_id: &ItemId, items: &[Item]) -> PlacementReport {
    let Some(module) = find_item(items, module_id).and_then(Item::as_cyberware) else {
        return PlacementReport::ModuleMissing;
    };
    if !module.module_info.is_module {
        return PlacementReport::NotAModule;
    }
    if module_id == parent_id {
        return PlacementReport::SelfReference;
    }
    let Some(parent) = find_item(items, parent_id).and_then(Item::as_cyberware) else {
        return PlacementReport::ParentMissing;
    };
    if parent.module_info.is_module {
        return PlacementReport::ParentIsModule;
    }
    if !parent.has(CyberKind::Implant) {
        return PlacementReport::ParentNotImplant;
    }
    if modules_of(module_id, items).next().is_some() {
        return PlacementReport::ModuleHostsModules;
    }

    let allowed = &module.module_info.allowed_parent_types;
    if !allowed.is_empty()
        && !allowed
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&parent.cyberware_type))
    {
        return PlacementReport::ParentTypeNotAllowed {
            parent_type: parent.cyberware_type.clone(),
            allowed: allowed.clone(),
        };
    }

    let others = items
        .iter()
        .filter(|item| &item.id != module_id)
        .filter_map(|item| equipped_module_on(item, parent_id))
        .fold(0i32, |used, cw| used.saturating_add(cw.module_info.slots_taken));
    let usage = SlotUsage::new(
        others.saturating_add(module.module_info.slots_taken),
        parent.module_info.options_available,
    );

    if usage.over_allocated() {
        PlacementReport::CapacityExceeded { usage }
    } else {
        PlacementReport::Fits { usage }
    }
}

/// Point a module at a new parent
///
/// The write is always produced; the report tells the collaborator whether
/// the placement is sound. The previous parent needs no bookkeeping since
/// usage is re-scanned.
pub fn attach_module(
    module_id: &ItemId,
    parent_id: &ItemId,
    items: &[Item],
) -> (Vec<ItemUpdate>, PlacementReport) {
    let report = check_placement(module_id, parent_id, items);
    if report.fits() {
        debug!(module = %module_id, parent = %parent_id, "module attached");
    } else {
        warn!(module = %module_id, parent = %parent_id, ?report, "module placement reported a problem");
    }

    let updates = vec![ItemUpdate::ModuleParent {
        module_id: module_id.clone(),
        parent_id: Some(parent_id.clone()),
    }];
    (updates, report)
}

/// Clear a module's parent
pub fn detach_module(module_id: &ItemId) -> Vec<ItemUpdate> {
    vec![ItemUpdate::ModuleParent {
        module_id: module_id.clone(),
        parent_id: None,
    }]
}
