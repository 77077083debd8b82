//! Cloth simulation - Main Entry
//!
//! A 20x20 sheet hanging from a rod, blown about by a cycling wind.
//! Space pauses, Shift+R resets, Q quits; see `simulation::input` for the rest.

use bevy::prelude::*;
use cloth::render::ClothRenderPlugin;
use cloth::simulation::{Cloth, ClothLayout, SimulationPlugin};
use cloth::ClothError;

fn main() -> Result<(), ClothError> {
    let cloth = Cloth::new(&ClothLayout::default())?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cloth".into(),
                resolution: (1600.0, 900.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(SimulationPlugin::new(cloth))
        .add_plugins(ClothRenderPlugin)
        .run();

    Ok(())
}
