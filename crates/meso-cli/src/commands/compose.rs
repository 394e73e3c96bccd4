use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use meso_core::io::image_io::save_composite;
use meso_core::io::manifest::load_scene;
use meso_core::pipeline::compose;
use meso_core::recipes::config::CompositeConfig;
use meso_core::recipes::Recipe;
use tracing::debug;

use crate::summary::print_compose_summary;

use super::{load_config, write_sidecar};

#[derive(Args)]
pub struct ComposeArgs {
    /// Scene manifest (TOML)
    pub manifest: PathBuf,

    /// Recipe name, e.g. "Day Cloud Phase" (see `meso recipes`)
    #[arg(short, long)]
    pub recipe: String,

    /// Output image (.png, .jpg or .tiff)
    #[arg(short, long, default_value = "composite.png")]
    pub output: PathBuf,

    /// Composite config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the recipe's gamma
    #[arg(long)]
    pub gamma: Option<f32>,

    /// Blend clean-IR cloud tops in as a night-time floor
    #[arg(long, conflicts_with = "no_night_ir")]
    pub night_ir: bool,

    /// Disable the night-time IR floor
    #[arg(long)]
    pub no_night_ir: bool,

    /// Derive latitude/longitude grids
    #[arg(long)]
    pub latlon: bool,
}

impl ComposeArgs {
    fn night_ir(&self) -> Option<bool> {
        match (self.night_ir, self.no_night_ir) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Fold command-line overrides into the config for `recipe`.
fn apply_overrides(config: &mut CompositeConfig, recipe: Recipe, args: &ComposeArgs) -> Result<()> {
    let params = &mut config.recipes;

    if let Some(gamma) = args.gamma {
        match recipe {
            Recipe::TrueColor => params.true_color.gamma = gamma,
            Recipe::NaturalColor => params.natural_color.gamma = gamma,
            Recipe::EnhancedIr | Recipe::EnhancedIrIce => params.enhanced_ir.gamma = gamma,
            other => bail!("{other} has no adjustable gamma"),
        }
    }

    if let Some(night_ir) = args.night_ir() {
        match recipe {
            Recipe::TrueColor => params.true_color.night_ir = night_ir,
            Recipe::NaturalColor => params.natural_color.night_ir = night_ir,
            other => bail!("{other} has no night IR overlay"),
        }
    }

    if args.latlon {
        config.output.geodetic = true;
    }
    Ok(())
}

pub fn run(args: &ComposeArgs) -> Result<()> {
    let recipe: Recipe = args.recipe.parse()?;
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, recipe, args)?;
    debug!(?config, "Effective composite config");

    print_compose_summary(&args.manifest, &[recipe], &config, &args.output);

    let frame = load_scene(&args.manifest)
        .with_context(|| format!("Failed to load scene {}", args.manifest.display()))?;
    let image = compose(&frame, recipe, &config)
        .with_context(|| format!("Failed to compose {recipe}"))?;

    save_composite(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    let sidecar = write_sidecar(&image, &args.output)?;

    println!("Output saved to {}", args.output.display());
    println!("Metadata saved to {}", sidecar.display());
    Ok(())
}
