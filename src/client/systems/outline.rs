use std::iter::once;

use bevy::prelude::*;

use crate::client::bridge::{Outline, Stroke};

/// Inset of the second strip drawn for wide strokes
const INSET: f32 = 0.93;

/// Draw tile outlines; wide strokes get a second, inset strip
pub fn draw(
    mut gizmos: Gizmos,
    tiles: Query<(&Outline, &Stroke)>,
) {
    for (outline, stroke) in &tiles {
        let Some(&first) = outline.points.first() else { continue };
        gizmos.linestrip_2d(outline.points.iter().copied().chain(once(first)), stroke.color);

        if stroke.width > 1.5 {
            let inset = |p: Vec2| outline.centroid + (p - outline.centroid) * INSET;
            gizmos.linestrip_2d(outline.points.iter().copied().chain(once(first)).map(inset), stroke.color);
        }
    }
}
