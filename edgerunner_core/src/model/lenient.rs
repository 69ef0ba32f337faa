//! Forgiving field decoders for user-authored sheet data
//!
//! Gear records are edited by hand, so numeric fields may be missing,
//! null, strings, or garbage. Every decoder here coerces what it can and
//! falls back to zero/empty instead of failing the whole record.

use crate::types::{CyberKind, ItemId, KindSet};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Coerce a JSON value to an integer; anything non-numeric becomes 0
pub fn coerce_int(value: &Value) -> i32 {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
            } else {
                n.as_f64().map(float_to_int).unwrap_or(0)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
                .or_else(|_| s.parse::<f64>().map(float_to_int))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Coerce a JSON value to a float; anything non-numeric becomes 0.0
pub fn coerce_float(value: &Value) -> f64 {
    let v = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Coerce a JSON value to a boolean
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim(), "true" | "1"),
        _ => false,
    }
}

fn float_to_int(v: f64) -> i32 {
    if v.is_finite() {
        v.trunc().clamp(i32::MIN as f64, i32::MAX as f64) as i32
    } else {
        0
    }
}

pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_int).unwrap_or(0))
}

/// Like [`int`], but negative values clamp to 0
pub fn uint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = int(deserializer)?;
    Ok(value.max(0) as u32)
}

pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_float).unwrap_or(0.0))
}

pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_flag).unwrap_or(false))
}

/// Plain string; non-string scalars are stringified, null becomes empty
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Optional item reference; empty strings and null are both "no reference"
pub fn reference<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ItemId>, D::Error> {
    let value = text(deserializer)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(ItemId::from(trimmed)))
    }
}

/// Map of key -> integer; unknown keys are dropped and values coerced
pub fn int_map<'de, D, K>(deserializer: D) -> Result<BTreeMap<K, i32>, D::Error>
where
    D: Deserializer<'de>,
    K: FromStr + Ord,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let mut map = BTreeMap::new();
    if let Some(Value::Object(entries)) = value {
        for (key, raw) in &entries {
            if let Ok(key) = key.parse::<K>() {
                map.insert(key, coerce_int(raw));
            }
        }
    }
    Ok(map)
}

/// Armor coverage: zone -> `{stoppingPower}` or zone -> bare number
pub fn coverage<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, i32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let mut map = BTreeMap::new();
    if let Some(Value::Object(entries)) = value {
        for (zone, raw) in entries {
            let sp = match &raw {
                Value::Object(fields) => fields.get("stoppingPower").map(coerce_int).unwrap_or(0),
                other => coerce_int(other),
            };
            map.insert(zone, sp);
        }
    }
    Ok(map)
}

/// List of strings; a bare string becomes a one-element list
pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Capability tags; accepts a list or a single tag, ignores unknown tags
pub fn kinds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<KindSet, D::Error> {
    let tags = string_list(deserializer)?;
    Ok(tags
        .iter()
        .filter_map(|tag| tag.parse::<CyberKind>().ok())
        .collect())
}
