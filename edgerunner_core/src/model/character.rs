//! Character snapshot: base attributes, damage, hit locations and owned items

use super::item::{find_item, Item};
use super::lenient;
use crate::defense::WoundTier;
use crate::types::{ItemId, StatKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error loading or saving a character snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to parse character snapshot: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One attribute with its layered modifiers
///
/// Only `base` and `temp_mod` are inputs. Every other field is overwritten
/// by the derivation pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    #[serde(default, deserialize_with = "lenient::int")]
    pub base: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub temp_mod: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub cyber_mod: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub armor_mod: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub armor_implant_mod: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub wound_mod: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub total: i32,
}

impl Stat {
    pub fn with_base(base: i32) -> Self {
        Stat {
            base,
            ..Default::default()
        }
    }
}

/// The nine character attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "int", default)]
    pub intelligence: Stat,
    #[serde(rename = "ref", default)]
    pub reflex: Stat,
    #[serde(rename = "tech", default)]
    pub technique: Stat,
    #[serde(default)]
    pub cool: Stat,
    #[serde(rename = "attr", default)]
    pub attractiveness: Stat,
    #[serde(default)]
    pub luck: Stat,
    #[serde(rename = "ma", default)]
    pub movement: Stat,
    #[serde(rename = "bt", default)]
    pub body: Stat,
    #[serde(rename = "emp", default)]
    pub empathy: Stat,
}

impl Stats {
    /// All stats set to the same base value
    pub fn uniform(base: i32) -> Self {
        let mut stats = Stats::default();
        for key in StatKey::all() {
            stats.get_mut(*key).base = base;
        }
        stats
    }

    pub fn get(&self, key: StatKey) -> &Stat {
        match key {
            StatKey::Intelligence => &self.intelligence,
            StatKey::Reflex => &self.reflex,
            StatKey::Technique => &self.technique,
            StatKey::Cool => &self.cool,
            StatKey::Attractiveness => &self.attractiveness,
            StatKey::Luck => &self.luck,
            StatKey::Movement => &self.movement,
            StatKey::Body => &self.body,
            StatKey::Empathy => &self.empathy,
        }
    }

    pub fn get_mut(&mut self, key: StatKey) -> &mut Stat {
        match key {
            StatKey::Intelligence => &mut self.intelligence,
            StatKey::Reflex => &mut self.reflex,
            StatKey::Technique => &mut self.technique,
            StatKey::Cool => &mut self.cool,
            StatKey::Attractiveness => &mut self.attractiveness,
            StatKey::Luck => &mut self.luck,
            StatKey::Movement => &mut self.movement,
            StatKey::Body => &mut self.body,
            StatKey::Empathy => &mut self.empathy,
        }
    }

    /// Derived total of a stat
    pub fn total(&self, key: StatKey) -> i32 {
        self.get(key).total
    }
}

/// A body zone: the d10 faces that hit it, and its derived stopping power
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitLocation {
    /// `[face]` or inclusive `[start, end]`
    #[serde(default)]
    pub location: Vec<i32>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub stopping_power: i32,
}

impl HitLocation {
    pub fn new(location: &[i32]) -> Self {
        HitLocation {
            location: location.to_vec(),
            stopping_power: 0,
        }
    }

    /// Die faces that land on this zone
    ///
    /// Ranges are clipped to the faces of a d10.
    pub fn faces(&self) -> Vec<i32> {
        match self.location.as_slice() {
            [] => Vec::new(),
            [start] => vec![*start],
            [start, end, ..] if *end == 0 => vec![*start],
            [start, end, ..] => ((*start).max(1)..=(*end).min(10)).collect(),
        }
    }

    /// Standard six-zone body layout
    pub fn standard_zones() -> BTreeMap<String, HitLocation> {
        [
            ("Head", &[1][..]),
            ("Torso", &[2, 4][..]),
            ("rArm", &[5][..]),
            ("lArm", &[6][..]),
            ("rLeg", &[7, 8][..]),
            ("lLeg", &[9, 10][..]),
        ]
        .into_iter()
        .map(|(zone, faces)| (zone.to_string(), HitLocation::new(faces)))
        .collect()
    }
}

/// Humanity pool derived from empathy and cyberware cost
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Humanity {
    pub base: i32,
    pub loss: i32,
    pub total: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub run: i32,
    pub leap: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyStats {
    pub carry: i32,
    pub lift: i32,
    /// Body type modifier (damage reduction)
    pub modifier: i32,
}

/// Everything else the pipeline derives for the sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    /// d10 face -> zone key
    #[serde(default)]
    pub hit_location_lookup: BTreeMap<i32, String>,
    #[serde(default)]
    pub movement: Movement,
    #[serde(default)]
    pub body: BodyStats,
    #[serde(default)]
    pub wound_state: u32,
    #[serde(default)]
    pub wound_tier: WoundTier,
    #[serde(default)]
    pub stun_threshold: i32,
    #[serde(default)]
    pub death_threshold: i32,
    #[serde(default)]
    pub initiative_implant_mod: i32,
    #[serde(default)]
    pub save_stun_implant_mod: i32,
    /// Total encumbrance charged against reflex
    #[serde(default)]
    pub armor_encumbrance: i32,
}

/// A character snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default)]
    pub stats: Stats,
    /// Accumulated damage points; never written by the engine
    #[serde(default, deserialize_with = "lenient::uint")]
    pub damage: u32,
    #[serde(default = "HitLocation::standard_zones")]
    pub hit_locations: BTreeMap<String, HitLocation>,
    #[serde(default)]
    pub carry_weight: f64,
    #[serde(default)]
    pub humanity: Humanity,
    #[serde(default)]
    pub derived: DerivedStats,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Character {
    /// Create a character with base 5 in every stat and the standard body layout
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Character {
            id: id.into(),
            name: name.into(),
            stats: Stats::uniform(5),
            damage: 0,
            hit_locations: HitLocation::standard_zones(),
            carry_weight: 0.0,
            humanity: Humanity::default(),
            derived: DerivedStats::default(),
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Recompute every derived field with the default rules
    pub fn derive(&mut self) {
        crate::derive::derive_character(self);
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        find_item(&self.items, id)
    }

    /// First skill record with the given name
    pub fn skill_named(&self, name: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.as_skill().is_some() && item.name == name)
    }
}
