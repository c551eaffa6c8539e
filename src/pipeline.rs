//! Wireframe geometry pipeline
//!
//! Each transform takes the surface to draw on and the current object, and
//! returns that surface with the transformed wireframe on top plus the new
//! object. Pass a clean backup surface to get a fresh redraw.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::display::PixelSurface;
use crate::geometry::Point;
use crate::math3d::{Axis, Mat4, Point4, Vec3};
use crate::raster::plot_line_bresenham;
use crate::scene::SceneObject;

/// Where scene coordinate (0, 0) lands on the surface. Screen y grows
/// downward, same as scene y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Viewport {
    pub const fn new(origin_x: f64, origin_y: f64) -> Self {
        Self { origin_x, origin_y }
    }

    /// Origin at the surface center
    pub fn centered(surface: &PixelSurface) -> Self {
        Self {
            origin_x: f64::from(surface.width() / 2),
            origin_y: f64::from(surface.height() / 2),
        }
    }

    /// Orthographic projection: drop z, offset x and y. None for
    /// coordinates that cannot be placed on a surface.
    pub fn project(&self, p: Point4) -> Option<Point> {
        let x = (self.origin_x + p.x).round();
        let y = (self.origin_y + p.y).round();
        if x.is_finite() && y.is_finite() {
            Some(Point::new(x as i32, y as i32))
        } else {
            None
        }
    }
}

/// How wireframes are drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wireframe {
    pub viewport: Viewport,
    pub color: Color,
}

impl Wireframe {
    /// Black lines, origin at the surface center
    pub fn for_surface(surface: &PixelSurface) -> Self {
        Self {
            viewport: Viewport::centered(surface),
            color: Color::BLACK,
        }
    }
}

/// Rotation center
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pivot {
    /// Coordinate origin
    #[default]
    Origin,
    /// Mean of the object's vertices
    Centroid,
}

/// Draw every edge of `object` on a copy of `surface`
pub fn render_wireframe(surface: &PixelSurface, object: &SceneObject, style: &Wireframe) -> PixelSurface {
    let mut out = surface.clone();
    for edge in &object.edges {
        if let (Some(a), Some(b)) = (style.viewport.project(edge.0), style.viewport.project(edge.1)) {
            plot_line_bresenham(&mut out, a, b, style.color);
        }
    }
    out
}

/// Apply `m` to every vertex, then redraw. Non-finite entries are replaced
/// by the identity's.
pub fn transform(
    surface: &PixelSurface,
    object: &SceneObject,
    m: &Mat4,
    style: &Wireframe,
) -> (PixelSurface, SceneObject) {
    let m = if m.is_finite() {
        *m
    } else {
        warn!("transform matrix has non-finite entries, using identity in their place");
        m.sanitized()
    };
    let next = object.transformed(&m);
    (render_wireframe(surface, &next, style), next)
}

pub fn translate(
    surface: &PixelSurface,
    object: &SceneObject,
    offset: Vec3,
    style: &Wireframe,
) -> (PixelSurface, SceneObject) {
    transform(surface, object, &Mat4::translation(offset), style)
}

/// Scale about the object's own centroid: `diag(sx, sy, sz, 1)`
pub fn scale_local(
    surface: &PixelSurface,
    object: &SceneObject,
    factors: Vec3,
    style: &Wireframe,
) -> (PixelSurface, SceneObject) {
    let m = Mat4::scale(factors.x, factors.y, factors.z, 1.0).about(object.centroid());
    transform(surface, object, &m, style)
}

/// Change the coordinate unit: `diag(1, 1, 1, w)` about the origin. The
/// w-divide shrinks every coordinate by `1 / w`, so the whole frame
/// rescales while the object keeps its proportions.
pub fn scale_global(
    surface: &PixelSurface,
    object: &SceneObject,
    w: f64,
    style: &Wireframe,
) -> (PixelSurface, SceneObject) {
    transform(surface, object, &Mat4::scale(1.0, 1.0, 1.0, w), style)
}

pub fn rotate(
    surface: &PixelSurface,
    object: &SceneObject,
    axis: Axis,
    degrees: f64,
    pivot: Pivot,
    style: &Wireframe,
) -> (PixelSurface, SceneObject) {
    let r = Mat4::rotation(axis, degrees);
    let m = match pivot {
        Pivot::Origin => r,
        Pivot::Centroid => r.about(object.centroid()),
    };
    transform(surface, object, &m, style)
}

/// Apply a caller-supplied matrix as is
pub fn shear(
    surface: &PixelSurface,
    object: &SceneObject,
    matrix: &Mat4,
    style: &Wireframe,
) -> (PixelSurface, SceneObject) {
    transform(surface, object, matrix, style)
}

/// Re-apply the identity to the originally loaded object
pub fn reset(surface: &PixelSurface, original: &SceneObject, style: &Wireframe) -> (PixelSurface, SceneObject) {
    transform(surface, original, &Mat4::identity(), style)
}
