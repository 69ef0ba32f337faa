//! edgerunner_core - Character derivation engine for cyberpunk tabletop characters
//!
//! This library provides:
//! - Derivation: stat totals, armor SP, wounds and humanity from base values
//!   plus equipped gear and cyberware
//! - Slot allocation: implant capacity and module placement reports
//! - Chip synchronization: chipped skill levels kept consistent with chips
//! - Store: atomic application of the item writes the engine returns

pub mod config;
pub mod cyberware;
pub mod defense;
pub mod derive;
pub mod model;
pub mod prelude;
pub mod skills;
pub mod source;
pub mod store;
pub mod types;

// Re-export core types for convenience
pub use config::{default_rules, RulesConfig};
pub use cyberware::{
    compute_slot_usage, sync_chip_active_flags, sync_chip_levels, sync_chips, PlacementReport,
    SlotUsage,
};
pub use defense::{combine, WoundTier};
pub use derive::{derive_character, derive_with_rules, derive_with_sources, ModifierAccumulator};
pub use model::{Character, Item, ItemData, SnapshotError};
pub use source::ModifierSource;
pub use store::{apply_batch, ItemUpdate, StoreError};
pub use types::{CheckKey, CyberKind, ItemId, StatKey};
