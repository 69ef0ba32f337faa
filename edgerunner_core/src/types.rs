//! Core keys and identifiers shared by the character and item records

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The nine fixed character attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKey {
    #[serde(rename = "int")]
    Intelligence,
    #[serde(rename = "ref")]
    Reflex,
    #[serde(rename = "tech")]
    Technique,
    #[serde(rename = "cool")]
    Cool,
    #[serde(rename = "attr")]
    Attractiveness,
    #[serde(rename = "luck")]
    Luck,
    #[serde(rename = "ma")]
    Movement,
    #[serde(rename = "bt")]
    Body,
    #[serde(rename = "emp")]
    Empathy,
}

impl StatKey {
    /// Get all stat keys in sheet order
    pub fn all() -> &'static [StatKey] {
        &[
            StatKey::Intelligence,
            StatKey::Reflex,
            StatKey::Technique,
            StatKey::Cool,
            StatKey::Attractiveness,
            StatKey::Luck,
            StatKey::Movement,
            StatKey::Body,
            StatKey::Empathy,
        ]
    }

    /// Short key used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            StatKey::Intelligence => "int",
            StatKey::Reflex => "ref",
            StatKey::Technique => "tech",
            StatKey::Cool => "cool",
            StatKey::Attractiveness => "attr",
            StatKey::Luck => "luck",
            StatKey::Movement => "ma",
            StatKey::Body => "bt",
            StatKey::Empathy => "emp",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StatKey {
    type Err = UnknownKey;

    /// Accepts the short wire key or the full attribute name, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "int" | "intelligence" => StatKey::Intelligence,
            "ref" | "reflex" | "reflexes" => StatKey::Reflex,
            "tech" | "technique" | "technical" => StatKey::Technique,
            "cool" => StatKey::Cool,
            "attr" | "attractiveness" => StatKey::Attractiveness,
            "luck" => StatKey::Luck,
            "ma" | "movement" | "movementallowance" => StatKey::Movement,
            "bt" | "body" | "bodytype" => StatKey::Body,
            "emp" | "empathy" => StatKey::Empathy,
            _ => return Err(UnknownKey(s.to_string())),
        };
        Ok(key)
    }
}

/// Capability tags a cyberware record can carry (several at once)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CyberKind {
    Descriptive,
    Characteristic,
    Armor,
    Weapon,
    Implant,
    Chip,
}

impl FromStr for CyberKind {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim() {
            "Descriptive" => CyberKind::Descriptive,
            "Characteristic" => CyberKind::Characteristic,
            "Armor" => CyberKind::Armor,
            "Weapon" => CyberKind::Weapon,
            "Implant" => CyberKind::Implant,
            "Chip" => CyberKind::Chip,
            _ => return Err(UnknownKey(s.to_string())),
        };
        Ok(kind)
    }
}

/// Set of [`CyberKind`] tags, queried with [`KindSet::has`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KindSet(BTreeSet<CyberKind>);

impl KindSet {
    pub fn has(&self, kind: CyberKind) -> bool {
        self.0.contains(&kind)
    }
}

impl<'de> Deserialize<'de> for KindSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::model::lenient::kinds(deserializer)
    }
}

impl FromIterator<CyberKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = CyberKind>>(iter: I) -> Self {
        KindSet(iter.into_iter().collect())
    }
}

/// Check rolls that Characteristic cyberware can modify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckKey {
    Initiative,
    SaveStun,
}

impl FromStr for CheckKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Initiative" | "initiative" => Ok(CheckKey::Initiative),
            "SaveStun" | "saveStun" | "save_stun" => Ok(CheckKey::SaveStun),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

/// A key that did not name any known stat, kind or check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}'", self.0)
    }
}

impl std::error::Error for UnknownKey {}

/// Identifier of an item record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
