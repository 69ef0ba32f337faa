//! Secondary values computed from derived stat totals

use crate::config::BodyRules;
use crate::model::{BodyStats, HitLocation, Movement};
use std::collections::BTreeMap;

/// Run and leap distances from the movement total
pub fn movement(ma_total: i32, rules: &BodyRules) -> Movement {
    let run = ma_total.saturating_mul(rules.run_multiplier);
    Movement {
        run,
        leap: run.div_euclid(rules.leap_divisor.max(1)),
    }
}

/// Carry/lift capacity and body type modifier from the body total
pub fn body_stats(bt_total: i32, rules: &BodyRules) -> BodyStats {
    BodyStats {
        carry: bt_total.saturating_mul(rules.carry_multiplier),
        lift: bt_total.saturating_mul(rules.lift_multiplier),
        modifier: body_type_modifier(bt_total, rules),
    }
}

/// Body type modifier: first table row whose `min_body` the total reaches
pub fn body_type_modifier(bt_total: i32, rules: &BodyRules) -> i32 {
    rules
        .btm
        .iter()
        .find(|step| bt_total >= step.min_body)
        .map(|step| step.modifier)
        .unwrap_or(0)
}

/// d10 face -> zone key
pub fn hit_location_lookup(zones: &BTreeMap<String, HitLocation>) -> BTreeMap<i32, String> {
    let mut lookup = BTreeMap::new();
    for (zone, location) in zones {
        for face in location.faces() {
            lookup.insert(face, zone.clone());
        }
    }
    lookup
}
