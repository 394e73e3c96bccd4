use std::path::Path;

use console::Style;
use meso_core::recipes::config::CompositeConfig;
use meso_core::recipes::Recipe;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn on_off(s: &Styles, enabled: bool) -> String {
    if enabled {
        s.method.apply_to("on").to_string()
    } else {
        s.disabled.apply_to("off").to_string()
    }
}

pub fn print_compose_summary(
    manifest: &Path,
    recipes: &[Recipe],
    config: &CompositeConfig,
    output: &Path,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Meso Composite"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Scene"),
        s.path.apply_to(manifest.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Lat/lon"),
        on_off(&s, config.output.geodetic)
    );
    println!();

    println!("  {}", s.header.apply_to("Recipes"));
    for recipe in recipes {
        println!("    {}", s.method.apply_to(recipe));
        print_recipe_params(&s, *recipe, config);
    }
    println!();
}

fn print_recipe_params(s: &Styles, recipe: Recipe, config: &CompositeConfig) {
    let params = &config.recipes;
    match recipe {
        Recipe::TrueColor => {
            let p = &params.true_color;
            println!("      {:<12}{}", s.label.apply_to("Gamma"), s.value.apply_to(p.gamma));
            println!("      {:<12}{}", s.label.apply_to("Pseudo G"), on_off(s, p.pseudo_green));
            println!("      {:<12}{}", s.label.apply_to("Night IR"), on_off(s, p.night_ir));
        }
        Recipe::NaturalColor => {
            let p = &params.natural_color;
            println!("      {:<12}{}", s.label.apply_to("Gamma"), s.value.apply_to(p.gamma));
            println!("      {:<12}{}", s.label.apply_to("Pseudo G"), on_off(s, p.pseudo_green));
            println!("      {:<12}{}", s.label.apply_to("Night IR"), on_off(s, p.night_ir));
        }
        Recipe::EnhancedIr | Recipe::EnhancedIrIce => {
            let p = &params.enhanced_ir;
            println!("      {:<12}{}", s.label.apply_to("Gamma"), s.value.apply_to(p.gamma));
            let window = match p.range {
                Some([lo, hi]) => s.value.apply_to(format!("{lo} .. {hi} °C")).to_string(),
                None => s.disabled.apply_to("auto").to_string(),
            };
            println!("      {:<12}{}", s.label.apply_to("Window"), window);
        }
        _ => {}
    }
}
