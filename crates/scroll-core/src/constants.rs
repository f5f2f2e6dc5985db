// Engine tuning defaults shared by the core crate and the web front-end.

// Speed presets, pixels per animation frame (~60 Hz)
pub const SLOW_PX_PER_TICK: f64 = 0.2;
pub const MEDIUM_PX_PER_TICK: f64 = 0.4;
pub const FAST_PX_PER_TICK: f64 = 0.6;

// Multiplier bounds applied to the medium preset
pub const MIN_SPEED_MULTIPLIER: f64 = 0.1;
pub const MAX_SPEED_MULTIPLIER: f64 = 5.0;

// Rewind to the top after `reset`
pub const RESET_DURATION_MS: f64 = 450.0;

// Label used for the document itself in the candidate list
pub const PAGE_LABEL: &str = "Whole Page";
