//! Level geometry drawn under the water's raster distortion.

use bevy::color::Srgba;
use bevy::math::Vec2;
use shared::physics::Body;
use shared::water::DrawingScope;
use shared::world::{Rect, SolidMap};

use super::canvas::{Canvas, Primitive, Vertex};
use crate::constants::{BODY_COLOR, SOLID_COLOR, SUBMERGED_BODY_COLOR};

/// Rows a rect is cut into so the ripple can bend its sides.
const DISTORTION_ROW_HEIGHT: i32 = 4;

/// Draws `rect` as a strip of rows, each corner moved by the active water
/// distortions.
pub fn draw_distorted_rect<C: Canvas + ?Sized>(
    rect: Rect,
    color: Srgba,
    scope: &DrawingScope<'_>,
    canvas: &mut C,
) {
    if rect.is_empty() {
        return;
    }

    let mut vertices = Vec::new();
    let mut y = rect.y();
    loop {
        for x in [rect.x(), rect.x2()] {
            let p = scope.distort_point(Vec2::new(x as f32, y as f32));
            vertices.push(Vertex {
                position: p,
                color,
            });
        }

        if y == rect.y2() {
            break;
        }
        y = (y + DISTORTION_ROW_HEIGHT).min(rect.y2());
    }

    canvas.draw(Primitive::TriangleStrip, &vertices);
}

/// Draws the visible solids and bodies. Returns how many rects were drawn.
pub fn draw_level<'b, C: Canvas + ?Sized>(
    solids: &SolidMap,
    bodies: impl IntoIterator<Item = (&'b Body, bool)>,
    scope: &DrawingScope<'_>,
    canvas: &mut C,
    viewport: Rect,
) -> usize {
    let mut count = 0;

    for solid in solids.rects().iter().filter(|r| r.intersects(&viewport)) {
        draw_distorted_rect(*solid, SOLID_COLOR, scope, canvas);
        count += 1;
    }

    for (body, submerged) in bodies {
        if !body.rect.intersects(&viewport) {
            continue;
        }
        let color = if submerged {
            SUBMERGED_BODY_COLOR
        } else {
            BODY_COLOR
        };
        draw_distorted_rect(body.rect, color, scope, canvas);
        count += 1;
    }

    count
}
