//! Cloth rendering module - camera, light, textured sheet and suspension rod.
//!
//! The simulation keeps y growing downward (row 0 is the rod), so the cloth
//! entity is mirrored on y to hang the right way up in Bevy's y-up world.

use std::f32::consts::FRAC_PI_2;

use bevy::{
    color::ColorToPacked,
    image::ImageSampler,
    prelude::*,
    render::{
        render_asset::RenderAssetUsages,
        render_resource::{Extent3d, TextureDimension, TextureFormat},
    },
};

use crate::simulation::{build_cloth_mesh, Cloth, ClothMesh};

/// Pixels per grid cell in the cloth texture.
const TEXTURE_CELL_PIXELS: usize = 10;
/// Hue advance in degrees from one cell to the next.
const HUE_STEP: f32 = 23.3;

/// Plugin that spawns everything needed to look at the cloth.
pub struct ClothRenderPlugin;

impl Plugin for ClothRenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .insert_resource(AmbientLight {
                color: Color::srgb(0.98, 0.92, 0.84),
                brightness: 400.0,
            })
            .add_systems(Startup, (spawn_cloth, spawn_rod, spawn_camera));
    }
}

/// RGBA pixels of the hue-stepped checker texture: one `cell_px` square per
/// grid cell, hue advancing `HUE_STEP` degrees per cell in row-major order.
pub fn checker_pixels(n: usize, cell_px: usize) -> Vec<u8> {
    let side = n * cell_px;
    let mut data = vec![0u8; side * side * 4];
    let mut hue = 0.0f32;
    for row in 0..n {
        for col in 0..n {
            let rgba = Color::hsv(hue % 360.0, 0.5, 0.9).to_srgba().to_u8_array();
            for y in row * cell_px..(row + 1) * cell_px {
                for x in col * cell_px..(col + 1) * cell_px {
                    let offset = (y * side + x) * 4;
                    data[offset..offset + 4].copy_from_slice(&rgba);
                }
            }
            hue += HUE_STEP;
        }
    }
    data
}

fn checker_image(n: usize) -> Image {
    let side = (n * TEXTURE_CELL_PIXELS) as u32;
    let mut image = Image::new(
        Extent3d {
            width: side,
            height: side,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        checker_pixels(n, TEXTURE_CELL_PIXELS),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::nearest();
    image
}

/// Mirror y so row 0 ends up on top.
fn sheet_transform() -> Transform {
    Transform::from_scale(Vec3::new(1.0, -1.0, 1.0))
}

fn spawn_cloth(
    mut commands: Commands,
    cloth: Res<Cloth>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let texture = images.add(checker_image(cloth.grid().size()));
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(texture),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(build_cloth_mesh(&cloth))),
        MeshMaterial3d(material),
        sheet_transform(),
        ClothMesh,
    ));
}

/// Wooden bar between the two anchors, with a knob on each end.
fn spawn_rod(
    mut commands: Commands,
    cloth: Res<Cloth>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let [left, right] = cloth.grid().anchors();
    let left = cloth.position(left.0, left.1).as_vec3() * Vec3::new(1.0, -1.0, 1.0);
    let right = cloth.position(right.0, right.1).as_vec3() * Vec3::new(1.0, -1.0, 1.0);
    let wood = materials.add(Color::srgb(0.55, 0.35, 0.18));

    let length = left.distance(right);
    let direction = (right - left).normalize_or_zero();
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(3.0, length))),
        MeshMaterial3d(wood.clone()),
        Transform::from_translation((left + right) / 2.0)
            .with_rotation(Quat::from_rotation_arc(Vec3::Y, direction)),
    ));

    let knob = meshes.add(Sphere::new(5.0));
    for end in [left, right] {
        commands.spawn((
            Mesh3d(knob.clone()),
            MeshMaterial3d(wood.clone()),
            Transform::from_translation(end),
        ));
    }
}

fn spawn_camera(mut commands: Commands, cloth: Res<Cloth>) {
    let extent = (cloth.grid().size() - 1) as f32 * cloth.grid().edge_length() as f32;
    let centre = Vec3::new(extent / 2.0, -extent / 2.0, 0.0);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(centre + Vec3::new(-0.6 * extent, 0.3 * extent, 1.6 * extent))
            .looking_at(centre, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2 / 2.0)),
    ));
}
