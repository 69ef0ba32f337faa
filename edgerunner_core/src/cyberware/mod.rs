//! Cyberware bookkeeping that writes back to items
//!
//! - `slots`: implant capacity and module placement
//! - `chips`: skill chip synchronization

mod chips;
mod slots;

pub use chips::{
    edit_skill_level, eject_chip, insert_chip, sync_chip_active_flags, sync_chip_levels,
    sync_chips, toggle_skill_chip, ChipFlagUpdate, ChipLevelUpdate,
};
pub use slots::{
    attach_module, check_placement, compute_slot_usage, detach_module, modules_of,
    orphaned_modules, PlacementReport, SlotUsage,
};
