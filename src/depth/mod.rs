//! Point-cloud rendering with nearest-wins visibility

pub mod presets;

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::display::PixelSurface;
use crate::math3d::{Axis, Mat4, Point4, Vec3};
use crate::pipeline::{Pivot, Viewport};

/// A colored sample of one object's surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPoint {
    pub position: Point4,
    pub color: Color,
    pub object_id: u32,
}

impl ObjectPoint {
    pub const fn new(position: Point4, color: Color, object_id: u32) -> Self {
        Self {
            position,
            color,
            object_id,
        }
    }
}

/// Project every point onto a copy of `surface` through a fresh depth
/// buffer. Smaller z is nearer; on equal z the first point drawn stays.
pub fn render_objects(surface: &PixelSurface, points: &[ObjectPoint], viewport: &Viewport) -> PixelSurface {
    let mut out = surface.clone().with_depth();
    let mut written = 0_usize;
    for p in points {
        if let Some(screen) = viewport.project(p.position) {
            if out.set_pixel_z(screen.x, screen.y, p.position.z, p.color) {
                written += 1;
            }
        }
    }
    debug!("depth render: {} points, {} depth-test passes", points.len(), written);
    out.without_depth()
}

/// Rotate every point about the origin, or each object about its own centroid
pub fn rotate_objects(points: &[ObjectPoint], axis: Axis, degrees: f64, pivot: Pivot) -> Vec<ObjectPoint> {
    let r = Mat4::rotation(axis, degrees);
    if !r.is_finite() {
        warn!("rotation angle {degrees} is not finite, leaving points in place");
        return points.to_vec();
    }
    match pivot {
        Pivot::Origin => points
            .iter()
            .map(|p| ObjectPoint {
                position: r.apply(p.position),
                ..*p
            })
            .collect(),
        Pivot::Centroid => {
            let per_object: BTreeMap<u32, Mat4> = centroids(points)
                .into_iter()
                .map(|(id, c)| (id, r.about(c)))
                .collect();
            points
                .iter()
                .map(|p| {
                    let m = per_object.get(&p.object_id).copied().unwrap_or(r);
                    ObjectPoint {
                        position: m.apply(p.position),
                        ..*p
                    }
                })
                .collect()
        },
    }
}

pub fn translate_objects(points: &[ObjectPoint], offset: Vec3) -> Vec<ObjectPoint> {
    let m = Mat4::translation(offset).sanitized();
    points
        .iter()
        .map(|p| ObjectPoint {
            position: m.apply(p.position),
            ..*p
        })
        .collect()
}

/// Mean position of each object's points
pub fn centroids(points: &[ObjectPoint]) -> BTreeMap<u32, Vec3> {
    let mut sums: BTreeMap<u32, (Vec3, u32)> = BTreeMap::new();
    for p in points {
        let entry = sums.entry(p.object_id).or_insert((Vec3::zero(), 0));
        entry.0 = entry.0 + p.position.xyz();
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(id, (sum, n))| (id, sum * (1.0 / f64::from(n))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> PixelSurface {
        PixelSurface::new(64, 64).unwrap()
    }

    #[test]
    fn nearest_point_wins_regardless_of_order() {
        let s = canvas();
        let view = Viewport::centered(&s);
        let near = ObjectPoint::new(Point4::new(3.0, 3.0, 5.0), Color::RED, 0);
        let far = ObjectPoint::new(Point4::new(3.0, 3.0, 10.0), Color::BLUE, 1);

        for points in [[near, far], [far, near]] {
            let out = render_objects(&s, &points, &view);
            assert_eq!(out.get_pixel(35, 35), Some(Color::RED));
            assert!(!out.has_depth());
        }
    }

    #[test]
    fn equal_depth_keeps_first_drawn() {
        let s = canvas();
        let view = Viewport::centered(&s);
        let a = ObjectPoint::new(Point4::new(0.0, 0.0, 7.0), Color::GREEN, 0);
        let b = ObjectPoint::new(Point4::new(0.0, 0.0, 7.0), Color::BLUE, 1);
        let out = render_objects(&s, &[a, b], &view);
        assert_eq!(out.get_pixel(32, 32), Some(Color::GREEN));
    }

    #[test]
    fn every_render_starts_from_a_fresh_depth_buffer() {
        let s = canvas();
        let view = Viewport::centered(&s);
        let near = ObjectPoint::new(Point4::new(0.0, 0.0, 1.0), Color::RED, 0);
        let far = ObjectPoint::new(Point4::new(0.0, 0.0, 50.0), Color::BLUE, 1);
        let first = render_objects(&s, &[near], &view);
        // The earlier near point must not hide the later far one
        let second = render_objects(&first, &[far], &view);
        assert_eq!(second.get_pixel(32, 32), Some(Color::BLUE));
    }

    #[test]
    fn centroid_rotation_is_per_object() {
        let a = ObjectPoint::new(Point4::new(10.0, 0.0, 0.0), Color::RED, 0);
        let b = ObjectPoint::new(Point4::new(12.0, 0.0, 0.0), Color::RED, 0);
        let c = ObjectPoint::new(Point4::new(-5.0, 0.0, 0.0), Color::BLUE, 1);
        let out = rotate_objects(&[a, b, c], Axis::Z, 90.0, Pivot::Centroid);

        assert!(out[0].position.approx_eq(&Point4::new(11.0, -1.0, 0.0), 1e-9));
        assert!(out[1].position.approx_eq(&Point4::new(11.0, 1.0, 0.0), 1e-9));
        // Single-point object spins in place
        assert!(out[2].position.approx_eq(&c.position, 1e-9));
        assert_eq!(out[2].color, Color::BLUE);
    }

    #[test]
    fn origin_rotation_and_translation() {
        let a = ObjectPoint::new(Point4::new(1.0, 0.0, 0.0), Color::RED, 3);
        let out = rotate_objects(&[a], Axis::Z, 90.0, Pivot::Origin);
        assert!(out[0].position.approx_eq(&Point4::new(0.0, 1.0, 0.0), 1e-12));

        let moved = translate_objects(&out, Vec3::new(2.0, 2.0, 2.0));
        assert!(moved[0].position.approx_eq(&Point4::new(2.0, 3.0, 2.0), 1e-12));
        assert_eq!(moved[0].object_id, 3);
    }
}
