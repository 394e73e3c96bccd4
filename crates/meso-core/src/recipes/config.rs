use serde::{Deserialize, Serialize};

use crate::consts::{
    DASHBOARD_NATURAL_COLOR_GAMMA, DEFAULT_NATURAL_COLOR_GAMMA, DEFAULT_TRUE_COLOR_GAMMA,
};

/// Everything a caller can tune about a composite run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeConfig {
    #[serde(default)]
    pub recipes: RecipeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Per-recipe parameters. Recipes without tunables take none.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeConfig {
    #[serde(default)]
    pub true_color: TrueColorParams,
    #[serde(default)]
    pub natural_color: NaturalColorParams,
    #[serde(default)]
    pub enhanced_ir: EnhancedIrParams,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrueColorParams {
    pub gamma: f32,
    /// Replace the veggie band with a red/veggie/blue blend.
    pub pseudo_green: bool,
    /// Blend clean-IR cloud tops in as a luminance floor.
    pub night_ir: bool,
}

impl Default for TrueColorParams {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_TRUE_COLOR_GAMMA,
            pseudo_green: true,
            night_ir: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaturalColorParams {
    pub gamma: f32,
    pub pseudo_green: bool,
    pub night_ir: bool,
}

impl Default for NaturalColorParams {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_NATURAL_COLOR_GAMMA,
            pseudo_green: true,
            night_ir: false,
        }
    }
}

impl NaturalColorParams {
    /// Settings used by the storm browser: brighter gamma, night IR on.
    pub fn dashboard() -> Self {
        Self {
            gamma: DASHBOARD_NATURAL_COLOR_GAMMA,
            pseudo_green: true,
            night_ir: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancedIrParams {
    pub gamma: f32,
    /// Fixed temperature window in °C. Without one the frame's own
    /// min/max is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f32; 2]>,
}

impl Default for EnhancedIrParams {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            range: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Derive latitude/longitude grids when packaging.
    pub geodetic: bool,
}
