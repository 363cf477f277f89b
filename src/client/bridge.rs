//! RenderBridge backed by bevy entities
//!
//! Every handle is an `Entity`. Pixel space has y growing downward, so points
//! are mirrored on the way into world space.

use std::iter::once;

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

use hex_overlay::{Region, RenderBridge, Rgba};

const TILE_Z: f32 = 0.;
const MARKER_Z: f32 = 1.;
const LABEL_Z: f32 = 2.;

/// Tile outline in world space, drawn with gizmos
#[derive(Component)]
pub struct Outline {
    pub points: Vec<Vec2>,
    pub centroid: Vec2,
}

#[derive(Component)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

pub fn color(rgba: Rgba) -> Color {
    Color::srgba_u8(rgba.0, rgba.1, rgba.2, rgba.3)
}

pub fn to_world(point: glam::Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}

pub fn to_pixel(point: Vec2) -> glam::Vec2 {
    glam::Vec2::new(point.x, -point.y)
}

/// Triangle fan around the centroid
fn polygon_mesh(points: &[Vec2], centroid: Vec2) -> Mesh {
    let positions: Vec<[f32; 3]> = once(centroid).chain(points.iter().copied())
        .map(|p| [p.x, p.y, 0.])
        .collect();
    let n = points.len() as u32;
    let indices: Vec<u32> = (0..n).flat_map(|i| [0, 1 + (i + 1) % n, 1 + i]).collect();
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_indices(Indices::U32(indices))
}

pub struct BevyBridge<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<ColorMaterial>,
}

impl RenderBridge for BevyBridge<'_, '_, '_> {
    type Handle = Entity;

    fn add_polygon(&mut self, points: &[glam::Vec2]) -> Entity {
        let points: Vec<Vec2> = points.iter().copied().map(to_world).collect();
        let centroid = points.iter().copied().sum::<Vec2>() / points.len().max(1) as f32;
        let mesh = self.meshes.add(polygon_mesh(&points, centroid));
        let material = self.materials.add(ColorMaterial::from_color(color(Rgba::BASE)));
        self.commands.spawn((
            Mesh2d(mesh),
            MeshMaterial2d(material),
            Transform::from_xyz(0., 0., TILE_Z),
            Outline { points, centroid },
            Stroke { color: color(Rgba::OUTLINE), width: 1. },
        )).id()
    }

    fn add_marker(&mut self, center: glam::Vec2, size: glam::Vec2) -> Entity {
        let at = to_world(center);
        self.commands.spawn((
            Sprite::from_color(color(Rgba::MARKER), Vec2::new(size.x, size.y)),
            Transform::from_xyz(at.x, at.y, MARKER_Z),
        )).id()
    }

    fn add_label(&mut self, text: &str) -> Entity {
        self.commands.spawn((
            Text2d::new(text),
            TextColor(color(Rgba::LABEL)),
            Visibility::Hidden,
        )).id()
    }

    fn place_label(&mut self, handle: Entity, center: glam::Vec2, font_size: f32) {
        let at = to_world(center);
        self.commands.entity(handle).insert((
            Transform::from_xyz(at.x, at.y, LABEL_Z),
            TextFont { font_size, ..default() },
            Visibility::Visible,
        ));
    }

    fn remove_handle(&mut self, handle: Entity) {
        self.commands.entity(handle).despawn();
    }

    fn set_fill(&mut self, handle: Entity, rgba: Rgba) {
        let material = self.materials.add(ColorMaterial::from_color(color(rgba)));
        self.commands.entity(handle).insert(MeshMaterial2d(material));
    }

    fn set_stroke(&mut self, handle: Entity, rgba: Rgba, width: f32) {
        self.commands.entity(handle).insert(Stroke { color: color(rgba), width });
    }

    // bevy redraws the whole frame anyway
    fn invalidate_region(&mut self, region: Region) {
        trace!("invalidate {region:?}");
    }

    fn invalidate_all(&mut self) {
        trace!("invalidate all");
    }
}
