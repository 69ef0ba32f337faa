//! Wounds - Damage to wound state, save thresholds and stat penalties

use super::constants::{DEATH_THRESHOLD_OFFSET, MAX_MORTAL};
use crate::config::WoundRules;
use crate::model::Stats;
use serde::{Deserialize, Serialize};

/// Named position on the wound track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WoundTier {
    #[default]
    Uninjured,
    Light,
    Serious,
    Critical,
    /// Mortal 0 through Mortal 6
    Mortal(u8),
}

impl WoundTier {
    /// Tier for a wound state; states past the end of the track stay at the last Mortal box
    pub fn from_state(state: u32) -> Self {
        match state {
            0 => WoundTier::Uninjured,
            1 => WoundTier::Light,
            2 => WoundTier::Serious,
            3 => WoundTier::Critical,
            n => WoundTier::Mortal((n - 4).min(MAX_MORTAL as u32) as u8),
        }
    }

    pub fn is_mortal(&self) -> bool {
        matches!(self, WoundTier::Mortal(_))
    }
}

/// Wound state for accumulated damage: 0 when unhurt, else `ceil(damage / 4)`
pub fn wound_state(damage: u32) -> u32 {
    wound_state_with(damage, WoundRules::default().damage_per_state)
}

/// Wound state with a configured track width
pub fn wound_state_with(damage: u32, damage_per_state: u32) -> u32 {
    if damage == 0 {
        return 0;
    }
    damage.div_ceil(damage_per_state.max(1))
}

/// Stun save threshold: `body - wound_state + 1`
///
/// Light wounds carry no penalty, hence the `+ 1`.
pub fn stun_threshold(body_total: i32, wound_state: u32) -> i32 {
    let state = i32::try_from(wound_state).unwrap_or(i32::MAX);
    body_total.saturating_sub(state).saturating_add(1)
}

/// Death save threshold, three above the stun threshold
pub fn death_threshold(stun_threshold: i32) -> i32 {
    stun_threshold.saturating_add(DEATH_THRESHOLD_OFFSET)
}

/// Scale reflex, intelligence and cool for the wound state
///
/// Records `new - old` in each stat's `wound_mod`. Must run after every other
/// modifier has been folded into `total`.
pub fn apply_wound_scaling(stats: &mut Stats, wound_state: u32) {
    for stat in [
        &mut stats.reflex,
        &mut stats.intelligence,
        &mut stats.cool,
    ] {
        stat.wound_mod = 0;
    }

    match wound_state {
        0 | 1 => {}
        2 => scale(&mut stats.reflex, |total| total.saturating_sub(2)),
        3 => {
            scale(&mut stats.reflex, |total| ceil_div(total, 2));
            scale(&mut stats.intelligence, |total| ceil_div(total, 2));
            scale(&mut stats.cool, |total| ceil_div(total, 2));
        }
        _ => {
            scale(&mut stats.reflex, |total| ceil_div(total, 3));
            scale(&mut stats.intelligence, |total| ceil_div(total, 3));
            scale(&mut stats.cool, |total| ceil_div(total, 3));
        }
    }
}

fn scale(stat: &mut crate::model::Stat, change: impl Fn(i32) -> i32) {
    let new_total = change(stat.total);
    stat.wound_mod = new_total.saturating_sub(stat.total);
    stat.total = new_total;
}

/// Ceiling division for a positive divisor
fn ceil_div(value: i32, divisor: i32) -> i32 {
    let quotient = value / divisor;
    if value % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}
