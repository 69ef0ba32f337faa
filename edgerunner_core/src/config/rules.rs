//! Tunable rule tables for the derivation pipeline

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All rule tables used by the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub armor: ArmorRules,
    #[serde(default)]
    pub wounds: WoundRules,
    #[serde(default)]
    pub humanity: HumanityRules,
    #[serde(default)]
    pub body: BodyRules,
}

/// One row of the layering table: differences of at least `min_diff` get `bonus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpStep {
    pub min_diff: i32,
    pub bonus: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorRules {
    /// Rows ordered by descending `min_diff`; first match wins
    #[serde(default = "default_sp_steps")]
    pub steps: Vec<SpStep>,
    /// Bonus when the layers differ by less than every row
    #[serde(default = "default_close_layer_bonus")]
    pub close_layer_bonus: i32,
}

impl Default for ArmorRules {
    fn default() -> Self {
        ArmorRules {
            steps: default_sp_steps(),
            close_layer_bonus: default_close_layer_bonus(),
        }
    }
}

fn default_sp_steps() -> Vec<SpStep> {
    [(27, 0), (21, 2), (15, 3), (9, 3), (5, 4)]
        .into_iter()
        .map(|(min_diff, bonus)| SpStep { min_diff, bonus })
        .collect()
}

fn default_close_layer_bonus() -> i32 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WoundRules {
    /// Damage boxes per wound state
    #[serde(default = "default_damage_per_state")]
    pub damage_per_state: u32,
}

impl Default for WoundRules {
    fn default() -> Self {
        WoundRules {
            damage_per_state: default_damage_per_state(),
        }
    }
}

fn default_damage_per_state() -> u32 {
    4
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanityRules {
    /// Humanity points per point of empathy
    #[serde(default = "default_points_per_empathy")]
    pub points_per_empathy: i32,
}

impl Default for HumanityRules {
    fn default() -> Self {
        HumanityRules {
            points_per_empathy: default_points_per_empathy(),
        }
    }
}

fn default_points_per_empathy() -> i32 {
    10
}

/// Body type modifier row: bodies of at least `min_body` get `modifier`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtmStep {
    pub min_body: i32,
    pub modifier: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRules {
    #[serde(default = "default_run_multiplier")]
    pub run_multiplier: i32,
    #[serde(default = "default_leap_divisor")]
    pub leap_divisor: i32,
    #[serde(default = "default_carry_multiplier")]
    pub carry_multiplier: i32,
    #[serde(default = "default_lift_multiplier")]
    pub lift_multiplier: i32,
    /// Rows ordered by descending `min_body`; below every row the modifier is 0
    #[serde(default = "default_btm")]
    pub btm: Vec<BtmStep>,
}

impl Default for BodyRules {
    fn default() -> Self {
        BodyRules {
            run_multiplier: default_run_multiplier(),
            leap_divisor: default_leap_divisor(),
            carry_multiplier: default_carry_multiplier(),
            lift_multiplier: default_lift_multiplier(),
            btm: default_btm(),
        }
    }
}

fn default_run_multiplier() -> i32 {
    3
}
fn default_leap_divisor() -> i32 {
    4
}
fn default_carry_multiplier() -> i32 {
    10
}
fn default_lift_multiplier() -> i32 {
    40
}

fn default_btm() -> Vec<BtmStep> {
    [(11, 5), (10, 4), (8, 3), (5, 2), (3, 1)]
        .into_iter()
        .map(|(min_body, modifier)| BtmStep { min_body, modifier })
        .collect()
}

impl RulesConfig {
    /// Reject tables the pipeline cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !descending(self.armor.steps.iter().map(|s| s.min_diff)) {
            return Err(ConfigError::ValidationError(
                "armor.steps must be ordered by strictly descending min_diff".to_string(),
            ));
        }
        if !descending(self.body.btm.iter().map(|s| s.min_body)) {
            return Err(ConfigError::ValidationError(
                "body.btm must be ordered by strictly descending min_body".to_string(),
            ));
        }
        if self.wounds.damage_per_state == 0 {
            return Err(ConfigError::ValidationError(
                "wounds.damage_per_state must be positive".to_string(),
            ));
        }
        if self.humanity.points_per_empathy <= 0 {
            return Err(ConfigError::ValidationError(
                "humanity.points_per_empathy must be positive".to_string(),
            ));
        }
        if self.body.leap_divisor <= 0 {
            return Err(ConfigError::ValidationError(
                "body.leap_divisor must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn descending(values: impl Iterator<Item = i32>) -> bool {
    let values: Vec<i32> = values.collect();
    values.windows(2).all(|pair| pair[0] > pair[1])
}

/// Load and validate rules from a TOML file
pub fn load_rules(path: &Path) -> Result<RulesConfig, ConfigError> {
    let rules: RulesConfig = super::load_toml(path)?;
    rules.validate()?;
    Ok(rules)
}

/// Parse and validate rules from a TOML string
pub fn parse_rules(content: &str) -> Result<RulesConfig, ConfigError> {
    let rules: RulesConfig = super::parse_toml(content)?;
    rules.validate()?;
    Ok(rules)
}

/// Rules shipped with the crate
pub fn default_rules() -> RulesConfig {
    let toml = include_str!("../../config/rules.toml");
    parse_rules(toml).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_rules_match_builtin_defaults() {
        assert_eq!(default_rules(), RulesConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let rules = parse_rules(
            r#"
[wounds]
damage_per_state = 5
"#,
        )
        .unwrap();
        assert_eq!(rules.wounds.damage_per_state, 5);
        assert_eq!(rules.armor, ArmorRules::default());
        assert_eq!(rules.humanity.points_per_empathy, 10);
    }

    #[test]
    fn test_unordered_steps_rejected() {
        let err = parse_rules(
            r#"
[armor]
steps = [{ min_diff = 5, bonus = 4 }, { min_diff = 27, bonus = 0 }]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_zero_wound_width_rejected() {
        let err = parse_rules("[wounds]\ndamage_per_state = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = parse_rules("[armor\nsteps = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_rules(Path::new("/nonexistent/rules.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
