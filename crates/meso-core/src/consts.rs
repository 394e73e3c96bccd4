/// Minimum pixel count (h*w) to use Rayon parallelism for per-pixel maps.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Offset between Kelvin and degrees Celsius.
pub const KELVIN_OFFSET: f32 = 273.15;

/// Highest channel number on the imager (ABI bands 1..=16).
pub const MAX_CHANNEL_ID: u8 = 16;

/// Number of planes in a composite (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Pseudo-green weights applied to (red, veggie, blue) reflectance.
pub const PSEUDO_GREEN_RED: f32 = 0.45;
pub const PSEUDO_GREEN_VEGGIE: f32 = 0.10;
pub const PSEUDO_GREEN_BLUE: f32 = 0.45;

/// Night-IR overlay: brightness temperature window in Kelvin.
pub const NIGHT_IR_LOWER_K: f32 = 90.0;
pub const NIGHT_IR_UPPER_K: f32 = 313.0;

/// Night-IR overlay: divisor that dims the coldest cloud tops.
pub const NIGHT_IR_DIMMING: f32 = 1.4;

/// Natural color albedo-to-brightness scale: sqrt(v * 100) * 25.5.
pub const ALBEDO_PERCENT: f32 = 100.0;
pub const ALBEDO_BRIGHTNESS_SCALE: f32 = 25.5;

/// Natural color breakpoint stretch: [0, 10] low end, [10, 255] high end.
pub const BREAKPOINT_LOW: f32 = 0.0;
pub const BREAKPOINT_KNEE: f32 = 10.0;
pub const BREAKPOINT_HIGH: f32 = 255.0;

/// Default true color gamma.
pub const DEFAULT_TRUE_COLOR_GAMMA: f32 = 2.2;

/// Default natural color gamma.
pub const DEFAULT_NATURAL_COLOR_GAMMA: f32 = 0.8;

/// Natural color gamma used by the storm browser dashboard preset.
pub const DASHBOARD_NATURAL_COLOR_GAMMA: f32 = 0.9;

/// Gamma applied to the red and green planes of Day Cloud Convection.
pub const DAY_CLOUD_CONVECTION_GAMMA: f32 = 1.7;
