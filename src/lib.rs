//! Fun Zone - mini-games and pointer trail for the Gurukul school site
//!
//! Core modules:
//! - `sim`: Game-agnostic engine (seeded RNG, deferred tasks, session state machine)
//! - `games`: The six round games and the selector that mounts them
//! - `trail`: Pointer particle trail simulation
//! - `renderer`: WebGPU rendering of the trail overlay
//! - `ui`: View models (menu cards, Game Over overlay)
//! - `config`: Injectable content catalog (symbols, words, colours)

pub mod config;
pub mod games;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod trail;
pub mod ui;

pub use config::{Catalog, ConfigError};
pub use games::{GameAction, GameId, GameSelector};
pub use settings::{QualityPreset, Settings};
pub use sim::{Outcome, Phase, Session};
pub use trail::Trail;

/// Game and trail tuning constants
pub mod consts {
    use std::time::Duration;

    /// Particles spawned per pointer-move event
    pub const TRAIL_BURST: usize = 3;
    /// Spawn size range (pixels)
    pub const PARTICLE_MIN_SPAWN_SIZE: f32 = 4.0;
    pub const PARTICLE_MAX_SPAWN_SIZE: f32 = 14.0;
    /// Horizontal spawn speed is drawn from ±this (pixels/frame)
    pub const PARTICLE_SPREAD: f32 = 1.5;
    /// Constant upward bias added to the vertical spawn speed
    pub const PARTICLE_LIFT: f32 = 1.0;
    /// Rotation speed is drawn from ±this (radians/frame)
    pub const PARTICLE_SPIN: f32 = 0.1;
    /// Opacity lost every frame
    pub const OPACITY_DECAY: f32 = 0.015;
    /// Size multiplier applied every frame
    pub const SIZE_DECAY: f32 = 0.97;
    /// Particles smaller than this are retired
    pub const MIN_PARTICLE_SIZE: f32 = 0.5;
    /// Glow blur radius around every shape (pixels)
    pub const GLOW_RADIUS: f32 = 10.0;
    /// Star spike count
    pub const STAR_POINTS: usize = 5;

    /// Memory Match: cumulative misses that end the session
    pub const MAX_MISSES: u32 = 10;
    /// Memory Match: delay before a matching pair locks in
    pub const MATCH_DELAY: Duration = Duration::from_millis(500);
    /// Memory Match: delay before a mismatched pair flips back
    pub const MISMATCH_DELAY: Duration = Duration::from_millis(1000);
    /// Memory Match: reported score per matched pair
    pub const POINTS_PER_MATCH: u32 = 10;

    /// Math Whiz: operand range (inclusive)
    pub const MATH_MIN_OPERAND: u32 = 1;
    pub const MATH_MAX_OPERAND: u32 = 10;
    /// Math Whiz: distractors lie within ±this of the answer
    pub const MATH_DISTRACTOR_SPREAD: u32 = 3;
    pub const MATH_POINTS: u32 = 10;

    /// Emoji Pop: countdown length in one-second ticks
    pub const POP_SECONDS: u32 = 30;
    pub const POP_TICK: Duration = Duration::from_secs(1);
    /// Emoji Pop: symbol placement band (percent of each axis)
    pub const POP_MIN_PERCENT: f32 = 15.0;
    pub const POP_MAX_PERCENT: f32 = 85.0;

    /// Spelling Bee: how long the success banner lingers before the next word
    pub const SPELL_ADVANCE_DELAY: Duration = Duration::from_millis(1000);
    pub const SPELL_POINTS: u32 = 10;

    /// Quick Count: counted items per round (inclusive)
    pub const COUNT_MIN: u32 = 1;
    pub const COUNT_MAX: u32 = 8;
    /// Quick Count: range offered options are drawn from (inclusive)
    pub const COUNT_OPTION_MAX: u32 = 10;

    /// Number of options shown by Math Whiz and Quick Count
    pub const CHOICE_COUNT: usize = 3;
}
