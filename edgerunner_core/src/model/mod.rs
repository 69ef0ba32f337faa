//! Character and item records

mod character;
mod item;
pub mod lenient;

pub use character::{
    BodyStats, Character, DerivedStats, HitLocation, Humanity, Movement, SnapshotError, Stat,
    Stats,
};
pub use item::{
    cyberware, find_item, skills, ArmorData, CyberwareData, Item, ItemData, ModuleInfo,
    SkillData, WorkType,
};
