//! Named composite recipes and the fixed table that dispatches to them.

pub mod air_mass;
pub mod cloud;
pub mod config;
pub mod convection;
pub mod enhanced_ir;
pub mod natural_color;
pub mod night_ir;
pub mod true_color;
pub mod water_vapor;

use std::fmt;
use std::str::FromStr;

use crate::color::colorscale::ColorRamp;
use crate::color::process::ColorPlanes;
use crate::error::{MesoError, Result};
use crate::frame::{ChannelId, MultiChannelFrame};

use self::config::RecipeConfig;

/// Signature shared by every registry entry.
pub type RecipeFn = fn(&MultiChannelFrame, &RecipeConfig) -> Result<ColorPlanes>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Recipe {
    TrueColor,
    NaturalColor,
    EnhancedIr,
    EnhancedIrIce,
    DayCloudPhase,
    DayConvection,
    DayCloudConvection,
    AirMass,
    WaterVapor,
    DifferentialWaterVapor,
}

pub struct RecipeEntry {
    pub recipe: Recipe,
    pub name: &'static str,
    /// Bands read with default parameters.
    pub channels: &'static [ChannelId],
    run: RecipeFn,
}

static REGISTRY: [RecipeEntry; 10] = [
    RecipeEntry {
        recipe: Recipe::TrueColor,
        name: "True Color",
        channels: &[ChannelId::C01, ChannelId::C02, ChannelId::C03, ChannelId::C13],
        run: run_true_color,
    },
    RecipeEntry {
        recipe: Recipe::NaturalColor,
        name: "Natural Color",
        channels: &[ChannelId::C01, ChannelId::C02, ChannelId::C03],
        run: run_natural_color,
    },
    RecipeEntry {
        recipe: Recipe::EnhancedIr,
        name: "Enhanced IR",
        channels: &[ChannelId::C13],
        run: run_enhanced_ir,
    },
    RecipeEntry {
        recipe: Recipe::EnhancedIrIce,
        name: "Enhanced IR (ice)",
        channels: &[ChannelId::C13],
        run: run_enhanced_ir_ice,
    },
    RecipeEntry {
        recipe: Recipe::DayCloudPhase,
        name: "Day Cloud Phase",
        channels: &[ChannelId::C02, ChannelId::C05, ChannelId::C13],
        run: run_day_cloud_phase,
    },
    RecipeEntry {
        recipe: Recipe::DayConvection,
        name: "Day Convection",
        channels: &[
            ChannelId::C02,
            ChannelId::C05,
            ChannelId::C07,
            ChannelId::C08,
            ChannelId::C10,
            ChannelId::C13,
        ],
        run: run_day_convection,
    },
    RecipeEntry {
        recipe: Recipe::DayCloudConvection,
        name: "Day Cloud Convection",
        channels: &[ChannelId::C02, ChannelId::C13],
        run: run_day_cloud_convection,
    },
    RecipeEntry {
        recipe: Recipe::AirMass,
        name: "Air Mass",
        channels: &[ChannelId::C08, ChannelId::C10, ChannelId::C12, ChannelId::C13],
        run: run_air_mass,
    },
    RecipeEntry {
        recipe: Recipe::WaterVapor,
        name: "Water Vapor",
        channels: &[ChannelId::C08, ChannelId::C10, ChannelId::C13],
        run: run_water_vapor,
    },
    RecipeEntry {
        recipe: Recipe::DifferentialWaterVapor,
        name: "Differential Water Vapor",
        channels: &[ChannelId::C08, ChannelId::C10],
        run: run_differential_water_vapor,
    },
];

fn run_true_color(frame: &MultiChannelFrame, config: &RecipeConfig) -> Result<ColorPlanes> {
    true_color::true_color(frame, &config.true_color)
}

fn run_natural_color(frame: &MultiChannelFrame, config: &RecipeConfig) -> Result<ColorPlanes> {
    natural_color::natural_color(frame, &config.natural_color)
}

fn run_enhanced_ir(frame: &MultiChannelFrame, config: &RecipeConfig) -> Result<ColorPlanes> {
    enhanced_ir::enhanced_ir(frame, &config.enhanced_ir, &ColorRamp::ice_r())
}

fn run_enhanced_ir_ice(frame: &MultiChannelFrame, config: &RecipeConfig) -> Result<ColorPlanes> {
    enhanced_ir::enhanced_ir(frame, &config.enhanced_ir, &ColorRamp::ice())
}

fn run_day_cloud_phase(frame: &MultiChannelFrame, _config: &RecipeConfig) -> Result<ColorPlanes> {
    cloud::day_cloud_phase(frame)
}

fn run_day_convection(frame: &MultiChannelFrame, _config: &RecipeConfig) -> Result<ColorPlanes> {
    convection::day_convection(frame)
}

fn run_day_cloud_convection(
    frame: &MultiChannelFrame,
    _config: &RecipeConfig,
) -> Result<ColorPlanes> {
    cloud::day_cloud_convection(frame)
}

fn run_air_mass(frame: &MultiChannelFrame, _config: &RecipeConfig) -> Result<ColorPlanes> {
    air_mass::air_mass(frame)
}

fn run_water_vapor(frame: &MultiChannelFrame, _config: &RecipeConfig) -> Result<ColorPlanes> {
    water_vapor::water_vapor(frame)
}

fn run_differential_water_vapor(
    frame: &MultiChannelFrame,
    _config: &RecipeConfig,
) -> Result<ColorPlanes> {
    water_vapor::differential_water_vapor(frame)
}

/// Case, whitespace and punctuation are ignored when matching names, so
/// "(Day) Cloud Phase" and "day-cloud-phase" both find Day Cloud Phase.
fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// All registered recipes, in display order.
pub fn registry() -> &'static [RecipeEntry] {
    &REGISTRY
}

impl Recipe {
    pub fn from_name(name: &str) -> Result<Self> {
        let key = lookup_key(name);
        REGISTRY
            .iter()
            .find(|entry| lookup_key(entry.name) == key)
            .map(|entry| entry.recipe)
            .ok_or_else(|| MesoError::UnknownRecipe(name.trim().to_string()))
    }

    pub fn all() -> impl Iterator<Item = Recipe> {
        REGISTRY.iter().map(|entry| entry.recipe)
    }

    fn entry(self) -> &'static RecipeEntry {
        // REGISTRY rows follow variant declaration order.
        &REGISTRY[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn channels(self) -> &'static [ChannelId] {
        self.entry().channels
    }

    /// Run the recipe, producing planes in [0, 1].
    pub fn render(self, frame: &MultiChannelFrame, config: &RecipeConfig) -> Result<ColorPlanes> {
        (self.entry().run)(frame, config)
    }
}

impl FromStr for Recipe {
    type Err = MesoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_rows_follow_variant_order() {
        for (index, entry) in REGISTRY.iter().enumerate() {
            assert_eq!(entry.recipe as usize, index, "{} is out of place", entry.name);
        }
    }

    #[test]
    fn test_lookup_key_strips_punctuation() {
        assert_eq!(lookup_key(" (Day) Cloud Phase"), "daycloudphase");
        assert_eq!(lookup_key("differential-water-vapor"), "differentialwatervapor");
    }
}
