use glam::{Vec2, Vec3};
use mograph::prelude::*;
use mograph_demos::{init_tracing, render_elements_to_png, ElementStyle, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let palette = vec![[220, 60, 60], [60, 160, 80], [50, 90, 210], [230, 170, 30]];
    let cfg = ClonerConfig::circular(36, 8.0)
        .with_height(1.0)
        .with_instance_rotation(Vec3::new(0.0, 0.0, 15.0))
        .with_random(Vec3::ZERO, Vec3::ZERO, 0.25)
        .with_random_instance(palette.len())
        .with_material(MaterialRef::new("Painted")?, false)
        .with_seed(7);
    let elements = Cloner::try_new(cfg)?.elements();

    let mut counts = vec![0usize; palette.len()];
    for e in &elements {
        if let Some(v) = e.variant {
            counts[v] += 1;
        }
    }
    println!("variant histogram: {counts:?}");
    if let MaterialSlot::Override(material) = &elements[0].material {
        println!("material override: {}", material.as_str());
    }

    let config = RenderConfig::new((800, 800), Vec2::splat(20.0))
        .with_style(ElementStyle::Heading { radius_px: 12.0 })
        .with_variant_palette(palette);
    render_elements_to_png(&elements, &config, "cloners-circle-random-instances.png")?;
    Ok(())
}
