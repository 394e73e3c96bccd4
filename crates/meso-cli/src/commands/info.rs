use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use meso_core::io::manifest::load_scene;

#[derive(Args)]
pub struct InfoArgs {
    /// Scene manifest (TOML)
    pub manifest: PathBuf,

    /// Check whether LON,LAT lies inside the scan window
    #[arg(long, value_parser = parse_lon_lat, allow_hyphen_values = true)]
    pub locate: Option<(f64, f64)>,
}

fn parse_lon_lat(s: &str) -> std::result::Result<(f64, f64), String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT, got '{s}'"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude '{lon}': {e}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
    Ok((lon, lat))
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let frame = load_scene(&args.manifest)
        .with_context(|| format!("Failed to load scene {}", args.manifest.display()))?;
    let platform = frame.platform();
    let extent = frame.extent();

    println!("Manifest:    {}", args.manifest.display());
    println!("Time:        {}", frame.timestamp().format("%Y-%m-%d %H:%M:%S UTC"));
    if !platform.title.is_empty() {
        println!("Title:       {}", platform.title);
    }
    if !platform.platform_id.is_empty() {
        println!("Platform:    {} {}", platform.platform_id, platform.orbital_slot);
    }
    if !platform.scene_id.is_empty() {
        println!("Scene:       {}", platform.scene_id);
    }
    if !platform.spatial_resolution.is_empty() {
        println!("Resolution:  {}", platform.spatial_resolution);
    }
    println!("Dimensions:  {}x{}", frame.width(), frame.height());
    println!(
        "Extent:      N {:.2}  S {:.2}  E {:.2}  W {:.2}",
        extent.north, extent.south, extent.east, extent.west
    );
    let (lon, lat) = extent.center();
    println!("Center:      {:.2}, {:.2}", lon, lat);

    println!("Channels:");
    for id in frame.channel_ids() {
        let Some(channel) = frame.channel(id) else {
            continue;
        };
        let (lo, hi) = channel
            .data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if lo <= hi {
            println!("  {id}  {:<12} {:>9.3} .. {:.3}", channel.unit.to_string(), lo, hi);
        } else {
            println!("  {id}  {:<12} no valid pixels", channel.unit.to_string());
        }
    }

    if let Some((lon, lat)) = args.locate {
        let inside = extent.contains(lon, lat);
        println!(
            "Location:    {:.3}, {:.3} is {} the scan window",
            lon,
            lat,
            if inside { "inside" } else { "outside" }
        );
    }

    Ok(())
}
