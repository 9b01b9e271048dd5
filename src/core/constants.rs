// Step ranges
pub const MAX_STEPS: f64 = 20.0;
pub const BONUS_STEPS: f64 = 10.0;
pub const SLOT_COUNT: usize = 8;

// Potential penalty (percent) indexed by how many active slots share a category
pub const PENALTY_TABLE: [u32; 9] = [0, 0, 20, 45, 80, 125, 180, 245, 320];

// Potential return when removing steps: 5% base + technique / 10
pub const BASE_POTENTIAL_RETURN: f64 = 5.0;
pub const TECHNIQUE_RETURN_DIVISOR: f64 = 10.0;
pub const BONUS_RETURN_DIVISOR: f64 = 4.0;

// Success rate: 160 + future * 230 / max(current, recipe)
pub const SUCCESS_RATE_BASE: f64 = 160.0;
pub const SUCCESS_RATE_SCALE: f64 = 230.0;
pub const SUCCESS_TIER_HIGH: i32 = 80;
pub const SUCCESS_TIER_MEDIUM: i32 = 60;

// Material cost reduction
pub const PROFICIENCY_MINOR_DIVISOR: u32 = 10;
pub const PROFICIENCY_MAJOR_DIVISOR: u32 = 50;
pub const MATERIAL_REDUCTION_MULTIPLIER: f64 = 0.9;

// Session defaults
pub const DEFAULT_WEAPON_RECIPE_POT: i32 = 46;
pub const DEFAULT_ARMOR_RECIPE_POT: i32 = 44;
pub const DEFAULT_STARTING_POT: i32 = 99;
pub const DEFAULT_TECHNIQUE: u32 = 255;
pub const DEFAULT_PROFICIENCY: u32 = 0;

// Front end
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;
pub const SESSION_SAVE_FILE: &str = "session.json";
pub const LOG_FILE: &str = "fillstat.log";

// Material warnings: per-step cost thresholds and budget warning ratio
pub const HIGH_STEP_COST: i64 = 1000;
pub const VERY_HIGH_STEP_COST: i64 = 5000;
pub const BUDGET_WARNING_RATIO: f64 = 0.8;

// Material efficiency
pub const LOW_EFFICIENCY_SCORE: i32 = 50;
pub const SUGGESTED_PROFICIENCY: u32 = 100;
