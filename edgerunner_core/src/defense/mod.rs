//! Defense system - Armor layering, wounds, humanity

mod armor;
mod humanity;
mod wound;

pub use armor::{combine, combine_with, stack_layers};
pub use humanity::{calculate_humanity, pre_loss_empathy};
pub use wound::{
    apply_wound_scaling, death_threshold, stun_threshold, wound_state, wound_state_with,
    WoundTier,
};

/// Defense calculation constants
pub mod constants {
    /// Death save threshold sits this far above the stun threshold
    pub const DEATH_THRESHOLD_OFFSET: i32 = 3;

    /// Last Mortal box on the wound track
    pub const MAX_MORTAL: u8 = 6;
}
