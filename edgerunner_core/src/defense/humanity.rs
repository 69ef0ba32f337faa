//! Humanity - Empathy cost of installed cyberware

use crate::model::{Humanity, Stat};

/// Empathy before humanity loss: base + temp + cyber
pub fn pre_loss_empathy(empathy: &Stat) -> i32 {
    empathy
        .base
        .saturating_add(empathy.temp_mod)
        .saturating_add(empathy.cyber_mod)
}

/// Derive the humanity pool and empathy's displayed total
///
/// Returns `(humanity, empathy_total)`. Humanity clamps at zero; the
/// empathy total does not and may go negative.
pub fn calculate_humanity(empathy: &Stat, loss: i32, points_per_empathy: i32) -> (Humanity, i32) {
    let pre_loss = pre_loss_empathy(empathy);
    let base = pre_loss.saturating_mul(points_per_empathy);
    let humanity = Humanity {
        base,
        loss,
        total: base.saturating_sub(loss).max(0),
    };
    let empathy_total = pre_loss.saturating_sub(loss.div_euclid(points_per_empathy.max(1)));
    (humanity, empathy_total)
}
