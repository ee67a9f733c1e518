use glam::Vec2;
use mograph::prelude::*;
use mograph_demos::{init_tracing, render_elements_to_png, RenderConfig};

const RIG: &str = include_str!("../../assets/orbit.rig.ron");

fn main() -> anyhow::Result<()> {
    init_tracing();

    let def = RigDef::from_ron(RIG)?;
    let mut rig = def.build()?;

    let mut events = VecSink::new();
    let outputs = rig.recompute_all_with_events(&mut events);
    for event in events.as_slice() {
        println!("{event:?}");
    }

    let config = RenderConfig::new((900, 900), Vec2::splat(30.0));
    let merged: Vec<Element> = outputs.into_iter().flat_map(|(_, e)| e).collect();
    render_elements_to_png(&merged, &config, "rig-from-ron.png")?;

    // The in-memory rig serializes back to an equivalent document.
    let text = rig.to_def().to_ron()?;
    assert_eq!(RigDef::from_ron(&text)?, rig.to_def());
    std::fs::write("rig-from-ron.out.ron", text)?;
    Ok(())
}
