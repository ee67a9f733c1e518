use glam::{UVec3, Vec2, Vec3};
use mograph::prelude::*;
use mograph_demos::{init_tracing, render_field_to_png, ElementStyle, RenderConfig};

const MODES: [(InterpolationMode, &str); 3] = [
    (InterpolationMode::SCurve, "s-curve"),
    (InterpolationMode::EaseIn, "ease-in"),
    (InterpolationMode::EaseOut, "ease-out"),
];

fn main() -> anyhow::Result<()> {
    init_tracing();

    let source = FieldSource::sphere(Vec3::ZERO, 10.0);

    println!("{:>6} {:>9} {:>9} {:>9}", "d", "s-curve", "ease-in", "ease-out");
    let fields = MODES
        .iter()
        .map(|&(mode, _)| {
            SphereField::try_new(
                FieldConfig::new(source)
                    .with_falloff(0.25)
                    .with_interpolation(mode, 1.0),
            )
        })
        .collect::<Result<Vec<_>>>()?;
    for step in 0..=10 {
        let d = step as f32;
        let p = Vec3::new(d, 0.0, 0.0);
        println!(
            "{d:>6.1} {:>9.3} {:>9.3} {:>9.3}",
            fields[0].weight(p),
            fields[1].weight(p),
            fields[2].weight(p)
        );
    }

    for (&(mode, label), field) in MODES.iter().zip(&fields) {
        let mut rig = Rig::new();
        let grid = rig.add_cloner(
            "Grid",
            ClonerConfig::grid(UVec3::new(15, 15, 1), Vec3::splat(1.6)).with_center_grid(true),
        )?;
        let sphere = rig.add_field("Sphere", field.config().clone())?;
        let random = rig.add_effector(
            "Random",
            EffectorConfig::enabled()
                .with_position_range(Vec3::new(0.6, 0.6, 0.0))
                .with_rotation_range(Vec3::new(0.0, 0.0, 60.0))
                .with_seed(3),
        )?;
        rig.link_field(&random, &sphere)?;
        rig.link_effector(&grid, &random)?;
        let elements = rig.recompute(&grid)?;

        let config = RenderConfig::new((800, 800), Vec2::splat(26.0))
            .with_style(ElementStyle::Heading { radius_px: 6.0 });
        render_field_to_png(
            field,
            0.0,
            &elements,
            &config,
            format!("fields-falloff-profile-{label}.png"),
        )?;
        println!("{mode:?}: rendered {} elements", elements.len());
    }
    Ok(())
}
