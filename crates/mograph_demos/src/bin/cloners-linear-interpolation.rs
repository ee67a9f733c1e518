use glam::{Vec2, Vec3, Vec4};
use mograph::prelude::*;
use mograph_demos::{init_tracing, render_elements_to_png, ElementStyle, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cfg = ClonerConfig::linear(10, Vec3::new(2.0, 0.0, 0.0))
        .with_scale_ramp(Vec3::splat(0.3), Vec3::splat(1.5))
        .with_rotation_ramp(Vec3::ZERO, Vec3::new(0.0, 0.0, 180.0))
        .with_global_transform(Vec3::new(-9.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 15.0))
        .with_color(Vec4::new(0.9, 0.4, 0.1, 1.0));
    let cloner = Cloner::try_new(cfg)?;

    for i in 0..cloner.element_count() {
        let e = cloner.element(i);
        println!(
            "#{i:<2} t={:.3} pos=({:6.2}, {:6.2}) rot_z={:7.2} scale={:.2}",
            cloner.interpolation_factor(i),
            e.transform.translation.x,
            e.transform.translation.y,
            e.transform.rotation.z,
            e.transform.scale.x,
        );
    }

    let config = RenderConfig::new((1000, 500), Vec2::new(26.0, 13.0))
        .with_style(ElementStyle::Heading { radius_px: 12.0 });
    render_elements_to_png(&cloner.elements(), &config, "cloners-linear-interpolation.png")?;
    Ok(())
}
