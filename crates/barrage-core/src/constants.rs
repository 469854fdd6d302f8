//! Simulation constants and tuning parameters.

// --- Timing ---

/// Nominal frame rate of the driver.
pub const DEFAULT_FPS: u32 = 60;

/// Largest frame delta accepted by the engine, in nominal frames.
/// Longer stalls are clamped so reflection and emission stay stable.
pub const MAX_DT_FRAMES: f32 = 3.0;

/// Duration of a bullet fade-in or fade-out (seconds).
pub const FADE_DURATION: f32 = 0.25;

/// Fully opaque alpha.
pub const ALPHA_MAX: f32 = 255.0;

// --- Screen ---

/// Visible area width (pixels).
pub const SCREEN_WIDTH: f32 = 1024.0;

/// Visible area height (pixels).
pub const SCREEN_HEIGHT: f32 = 768.0;

/// The cull region is the screen scaled by this factor around its centre.
pub const CULL_SCALE: f32 = 1.5;

// --- Scenario ---

/// Simulation time at which the demo timeline begins (seconds).
pub const SCENARIO_START: f64 = 3.0;

/// Time between two countdown labels (seconds).
pub const COUNTDOWN_STEP: f32 = 1.0;

/// Countdown labels shown before the timeline starts.
pub const COUNTDOWN_TEXTS: [&str; 4] = ["3", "2", "1", "Go!"];

/// How long the run statistics stay up before the run stops (seconds).
pub const STATS_HOLD: f64 = 5.0;

// --- Target ---

/// Speed of the bouncing target (pixels/s).
pub const TARGET_SPEED: f32 = 100.0;

/// Lower bound of the target's initial heading (degrees).
pub const TARGET_HEADING_MIN: f32 = 15.0;

/// Width of the target's initial heading range (degrees).
pub const TARGET_HEADING_SPAN: f32 = 30.0;

/// Radius of the marker circle drawn around the target (pixels).
pub const TARGET_MARKER_RADIUS: f32 = 16.0;

// --- HUD ---

/// Font size of the stage title and stats labels.
pub const LABEL_SIZE: u32 = 48;

/// Font size of the countdown label.
pub const COUNTDOWN_SIZE: u32 = 128;

/// Distance of the stage title from the top edge (pixels).
pub const LABEL_TOP: f32 = 50.0;

/// Vertical offset of the two stats labels from the screen centre (pixels).
pub const STATS_OFFSET: f32 = 50.0;

// --- Run statistics ---

/// "Slowest frame" is only recorded while more sprites than this are alive.
pub const STATS_MIN_SPRITES: usize = 100;

/// "Most sprites" is only recorded while running faster than this.
pub const STATS_MIN_FPS: f64 = 58.0;

/// Initial value of the slowest recorded frame rate.
pub const STATS_SLOWEST_INIT: u32 = 999;

// --- Heartbeat encoding ---

/// Heartbeat symbol for a fire sub-slot.
pub const BEAT_FIRE: char = '#';

/// Heartbeat symbol for a rest sub-slot.
pub const BEAT_REST: char = '.';
