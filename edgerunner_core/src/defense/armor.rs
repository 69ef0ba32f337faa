//! Armor - Stopping power layering with diminishing returns

use crate::config::ArmorRules;

/// Combine two stopping-power layers at one body location
///
/// If either layer is zero the values simply add. Otherwise the result is
/// the stronger layer plus a bonus that shrinks as the layers grow apart:
///
/// | difference | bonus |
/// |-----------:|------:|
/// | ≥ 27       | 0     |
/// | ≥ 21       | 2     |
/// | ≥ 15       | 3     |
/// | ≥ 9        | 3     |
/// | ≥ 5        | 4     |
/// | otherwise  | 5     |
pub fn combine(a: i32, b: i32) -> i32 {
    combine_with(a, b, &ArmorRules::default())
}

/// [`combine`] with a configured step table
pub fn combine_with(a: i32, b: i32, rules: &ArmorRules) -> i32 {
    if a == 0 || b == 0 {
        return a.saturating_add(b);
    }
    let diff = (i64::from(a) - i64::from(b)).abs();
    let bonus = rules
        .steps
        .iter()
        .find(|step| diff >= i64::from(step.min_diff))
        .map(|step| step.bonus)
        .unwrap_or(rules.close_layer_bonus);
    a.max(b).saturating_add(bonus)
}

/// Fold every layer, in order, onto an unarmored zone
pub fn stack_layers(layers: &[i32], rules: &ArmorRules) -> i32 {
    layers
        .iter()
        .fold(0, |current, layer| combine_with(current, *layer, rules))
}
