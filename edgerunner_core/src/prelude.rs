//! Prelude module for convenient imports
//!
//! ```rust
//! use edgerunner_core::prelude::*;
//! ```

// Records
pub use crate::model::{
    ArmorData, Character, CyberwareData, Item, ItemData, ModuleInfo, SkillData, Stat, Stats,
    WorkType,
};
pub use crate::types::{CheckKey, CyberKind, ItemId, KindSet, StatKey};

// Derivation
pub use crate::derive::{derive_character, derive_with_rules, derive_with_sources};
pub use crate::source::ModifierSource;

// Cyberware
pub use crate::cyberware::{
    attach_module, compute_slot_usage, detach_module, sync_chips, PlacementReport, SlotUsage,
};

// Writes
pub use crate::store::{apply_batch, ItemUpdate};

// Config
pub use crate::config::{default_rules, RulesConfig};
