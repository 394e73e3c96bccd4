//! Frame → recipe → packaged composite.

pub mod types;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::Result;
use crate::frame::MultiChannelFrame;
use crate::package::projection::{Geostationary, MapProjection};
use crate::package::{package, package_with_projection, CompositeImage};
use crate::recipes::config::CompositeConfig;
use crate::recipes::Recipe;

use self::types::{NoOpReporter, ProgressReporter};

/// Render one recipe and package it. A lat/lon grid is attached when
/// `config.output.geodetic` is set, using the frame's own geostationary
/// parameters.
pub fn compose(
    frame: &MultiChannelFrame,
    recipe: Recipe,
    config: &CompositeConfig,
) -> Result<CompositeImage> {
    if config.output.geodetic {
        let projection = Geostationary::from_imager(frame.projection());
        compose_with_projection(frame, recipe, config, Some(&projection as &dyn MapProjection))
    } else {
        compose_with_projection(frame, recipe, config, None)
    }
}

/// Render one recipe and package it, projecting through `projection` when
/// given. `config.output.geodetic` is not consulted.
pub fn compose_with_projection(
    frame: &MultiChannelFrame,
    recipe: Recipe,
    config: &CompositeConfig,
    projection: Option<&dyn MapProjection>,
) -> Result<CompositeImage> {
    info!(recipe = recipe.name(), timestamp = %frame.timestamp(), "Composing");
    let planes = recipe.render(frame, &config.recipes)?;
    match projection {
        Some(p) => package_with_projection(frame, &planes, recipe.name(), p),
        None => package(frame, &planes, recipe.name()),
    }
}

/// Compose several recipes against one frame in parallel. Results come back
/// in request order; one failing recipe does not stop the others.
pub fn compose_all(
    frame: &MultiChannelFrame,
    recipes: &[Recipe],
    config: &CompositeConfig,
) -> Vec<Result<CompositeImage>> {
    compose_all_reported(frame, recipes, config, &NoOpReporter)
}

/// [`compose_all`] with progress callbacks.
pub fn compose_all_reported(
    frame: &MultiChannelFrame,
    recipes: &[Recipe],
    config: &CompositeConfig,
    reporter: &dyn ProgressReporter,
) -> Vec<Result<CompositeImage>> {
    reporter.begin(recipes.len());

    let results: Vec<Result<CompositeImage>> = recipes
        .par_iter()
        .map(|&recipe| {
            let result = compose(frame, recipe, config);
            if let Err(e) = &result {
                warn!(recipe = recipe.name(), error = %e, "Recipe failed");
            }
            reporter.recipe_done(recipe, result.is_ok());
            result
        })
        .collect();

    reporter.finish();
    let ok = results.iter().filter(|r| r.is_ok()).count();
    info!(ok, total = recipes.len(), "Batch composition complete");
    results
}
