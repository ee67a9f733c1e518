use glam::{UVec3, Vec2, Vec3};
use mograph::prelude::*;
use mograph_demos::{init_tracing, render_elements_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut rig = Rig::new();
    let grid = rig.add_cloner(
        "Grid",
        ClonerConfig::grid(UVec3::new(8, 8, 1), Vec3::splat(3.0)).with_center_grid(true),
    )?;
    let spin = rig.add_effector(
        "Spin",
        EffectorConfig::enabled()
            .with_rotation_range(Vec3::new(0.0, 0.0, 90.0))
            .with_seed(1),
    )?;
    let push = rig.add_effector(
        "Push",
        EffectorConfig::enabled()
            .with_position_range(Vec3::new(1.2, 0.0, 0.0))
            .with_scale_range(Vec3::splat(0.4), true)
            .with_seed(2),
    )?;
    let base = rig.recompute(&grid)?;

    rig.link_effector(&grid, &spin)?;
    rig.link_effector(&grid, &push)?;
    let spin_then_push = rig.recompute(&grid)?;

    rig.move_effector(&grid, &push, Direction::Up)?;
    let push_then_spin = rig.recompute(&grid)?;
    println!("chain {:?}", rig.linked_effectors(&grid)?);

    let config = RenderConfig::new((800, 800), Vec2::splat(30.0));
    render_elements_to_png(&base, &config, "effectors-chain-order-base.png")?;
    render_elements_to_png(&spin_then_push, &config, "effectors-chain-order-spin-push.png")?;
    render_elements_to_png(&push_then_spin, &config, "effectors-chain-order-push-spin.png")?;

    // Detaching restores the unmodified grid exactly.
    rig.unlink_effector(&grid, &spin)?;
    rig.unlink_effector(&grid, &push)?;
    let detached = rig.recompute(&grid)?;
    println!("detached == base: {}", detached == base);

    // A removed effector is pruned from the linkage on the next recompute.
    rig.link_effector(&grid, &spin)?;
    rig.remove_effector(&spin)?;
    let mut sink = FnSink::new(|event| println!("event: {event:?}"));
    rig.recompute_with_events(&grid, &mut sink)?;
    Ok(())
}
