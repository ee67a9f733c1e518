use glam::{UVec3, Vec2, Vec3, Vec4};
use mograph::prelude::*;
use mograph_demos::{init_tracing, render_elements_to_png, ElementStyle, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Same grid twice: once plain, once with per-element jitter.
    let base = ClonerConfig::grid(UVec3::new(12, 12, 1), Vec3::splat(2.0))
        .with_center_grid(true)
        .with_color(Vec4::new(0.2, 0.45, 0.9, 1.0));
    let jittered = base
        .clone()
        .with_random(Vec3::new(0.4, 0.4, 0.0), Vec3::new(0.0, 0.0, 30.0), 0.3)
        .with_seed(42);

    let config = RenderConfig::new((800, 800), Vec2::splat(28.0))
        .with_style(ElementStyle::Heading { radius_px: 10.0 });

    let plain = Cloner::try_new(base)?.elements();
    render_elements_to_png(&plain, &config, "cloners-grid-centered-plain.png")?;

    let cloner = Cloner::try_new(jittered)?;
    let elements = cloner.elements();
    render_elements_to_png(&elements, &config, "cloners-grid-centered-jittered.png")?;

    // Any element can be recomputed on its own.
    let single = cloner.element(77);
    assert_eq!(single, elements[77]);
    println!(
        "element 77: translation {:?}, rotation {:?}, scale {:?}",
        single.transform.translation, single.transform.rotation, single.transform.scale
    );
    Ok(())
}
