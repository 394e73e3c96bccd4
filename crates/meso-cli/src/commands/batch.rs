use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use meso_core::io::image_io::save_composite;
use meso_core::io::manifest::load_scene;
use meso_core::package::CompositeImage;
use meso_core::pipeline::compose_all_reported;
use meso_core::pipeline::types::ProgressReporter;
use meso_core::recipes::Recipe;
use rayon::prelude::*;
use tracing::debug;

use crate::summary::print_compose_summary;

use super::{load_config, slug, write_sidecar};

#[derive(Clone, Copy, ValueEnum)]
pub enum ImageFormatArg {
    Png,
    Jpeg,
    Tiff,
}

impl ImageFormatArg {
    fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Tiff => "tiff",
        }
    }
}

#[derive(Args)]
pub struct BatchArgs {
    /// Scene manifest (TOML)
    pub manifest: PathBuf,

    /// Directory for the rendered images
    #[arg(long, default_value = "composites")]
    pub out_dir: PathBuf,

    /// Image format
    #[arg(long, value_enum, default_value = "png")]
    pub format: ImageFormatArg,

    /// Composite config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only these recipes (repeatable); all when omitted
    #[arg(short, long)]
    pub recipe: Vec<String>,
}

struct BarReporter(ProgressBar);

impl ProgressReporter for BarReporter {
    fn begin(&self, total: usize) {
        self.0.set_length(total as u64);
    }

    fn recipe_done(&self, recipe: Recipe, ok: bool) {
        if !ok {
            self.0.println(format!("  {recipe} failed"));
        }
        self.0.set_message(recipe.name());
        self.0.inc(1);
    }

    fn finish(&self) {
        self.0.finish_with_message("Done");
    }
}

fn output_path(dir: &Path, image: &CompositeImage, ext: &str) -> PathBuf {
    let stamp = image.timestamp.format("%Y%m%dT%H%M%SZ");
    dir.join(format!("{stamp}_{}.{ext}", slug(&image.description)))
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let recipes: Vec<Recipe> = if args.recipe.is_empty() {
        Recipe::all().collect()
    } else {
        args.recipe
            .iter()
            .map(|name| name.parse::<Recipe>())
            .collect::<meso_core::error::Result<Vec<_>>>()?
    };
    let config = load_config(args.config.as_deref())?;

    print_compose_summary(&args.manifest, &recipes, &config, &args.out_dir);

    let frame = load_scene(&args.manifest)
        .with_context(|| format!("Failed to load scene {}", args.manifest.display()))?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let pb = ProgressBar::new(recipes.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:26} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let results = compose_all_reported(&frame, &recipes, &config, &BarReporter(pb));

    let ext = args.format.extension();
    let written: Vec<Result<PathBuf>> = results
        .into_par_iter()
        .zip(recipes.par_iter())
        .map(|(result, recipe)| {
            let image = result.with_context(|| format!("Failed to compose {recipe}"))?;
            let path = output_path(&args.out_dir, &image, ext);
            save_composite(&image, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            write_sidecar(&image, &path)?;
            debug!(path = %path.display(), "Wrote composite");
            Ok(path)
        })
        .collect();

    println!();
    let mut failures = 0;
    for outcome in &written {
        match outcome {
            Ok(path) => println!("  {}", path.display()),
            Err(e) => {
                failures += 1;
                eprintln!("  error: {e:#}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} composites failed", recipes.len());
    }
    println!("\n{} composites saved to {}", recipes.len(), args.out_dir.display());
    Ok(())
}
