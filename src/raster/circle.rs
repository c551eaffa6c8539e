use std::f64::consts::TAU;

use crate::color::Color;
use crate::display::PixelSurface;
use crate::geometry::Point;

/// Angular samples used by the parametric rasterizer (quarter-degree step)
const PARAMETRIC_STEPS: u32 = 1440;
/// Upper bound on samples taken by the naive rasterizer
const NAIVE_MAX_SAMPLES: f64 = 65_536.0;
/// Radii are capped here; anything larger never fits a canvas anyway
pub const MAX_RADIUS: i32 = 1 << 24;

/// Radius implied by a center and a point on the circle, rounded to nearest
pub fn circle_radius(center: Point, edge: Point) -> i32 {
    let r = center.distance_to(&edge).round();
    if r >= f64::from(MAX_RADIUS) {
        MAX_RADIUS
    } else {
        r as i32
    }
}

/// Pixel write for coordinates that may exceed i32 near the radius cap
#[inline]
fn plot_wide(surface: &mut PixelSurface, x: i64, y: i64, color: Color) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        surface.set_pixel(x, y, color);
    }
}

/// Draw a circle by sampling the angle densely enough for its radius
pub fn draw_circle(surface: &PixelSurface, center: Point, edge: Point, color: Color) -> PixelSurface {
    let mut out = surface.clone();
    plot_circle(&mut out, center, circle_radius(center, edge), color);
    out
}

/// Draw a circle with the midpoint (Bresenham) algorithm
pub fn draw_circle_bresenham(
    surface: &PixelSurface,
    center: Point,
    edge: Point,
    color: Color,
) -> PixelSurface {
    let mut out = surface.clone();
    plot_circle_bresenham(&mut out, center, circle_radius(center, edge), color);
    out
}

/// Draw a circle from a fixed number of evenly spaced angles
pub fn draw_circle_parametric(
    surface: &PixelSurface,
    center: Point,
    edge: Point,
    color: Color,
) -> PixelSurface {
    let mut out = surface.clone();
    plot_circle_parametric(&mut out, center, circle_radius(center, edge), color);
    out
}

/// Plot `(cx + r cos t, cy + r sin t)` for t in [0, 2pi) with a step of 1/r
/// radians, i.e. roughly one pixel of arc per sample.
pub fn plot_circle(surface: &mut PixelSurface, center: Point, radius: i32, color: Color) {
    if radius <= 0 {
        surface.set_pixel(center.x, center.y, color);
        return;
    }
    let r = f64::from(radius);
    let step = (1.0 / r).max(TAU / NAIVE_MAX_SAMPLES);
    let (cx, cy) = (f64::from(center.x), f64::from(center.y));

    let mut t = 0.0_f64;
    while t < TAU {
        let (sin, cos) = t.sin_cos();
        surface.set_pixel((cx + r * cos).round() as i32, (cy + r * sin).round() as i32, color);
        t += step;
    }
}

/// Squared distance from `(cx, cy)` to the nearest and farthest pixel
/// centers of a `w` x `h` surface
fn distance_range(cx: i64, cy: i64, w: i64, h: i64) -> (i128, i128) {
    let near = |c: i64, size: i64| i128::from((c.clamp(0, size - 1) - c).abs());
    let far = |c: i64, size: i64| i128::from(c.abs().max((size - 1 - c).abs()));
    let (nx, ny) = (near(cx, w), near(cy, h));
    let (fx, fy) = (far(cx, w), far(cy, h));
    (nx * nx + ny * ny, fx * fx + fy * fy)
}

/// Octant offsets `y` in `0..=r` whose mirrored rows or columns can land on
/// the surface. At most four intervals, each no longer than the surface.
fn visible_octant_rows(cx: i64, cy: i64, w: i64, h: i64, r: i64) -> Vec<(i64, i64)> {
    [
        (-cy, h - 1 - cy),
        (cy - (h - 1), cy),
        (-cx, w - 1 - cx),
        (cx - (w - 1), cx),
    ]
    .into_iter()
    .map(|(lo, hi)| (lo.max(0), hi.min(r)))
    .filter(|(lo, hi)| lo <= hi)
    .collect()
}

/// Largest x with `(2x - 1)^2 <= 4 (r^2 - y^2)`: the midpoint choice at row y
fn octant_x(r: i64, y: i64) -> i64 {
    let q = 4 * (r * r - y * y);
    let mut s = (q as f64).sqrt() as i64;
    while s * s > q {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= q {
        s += 1;
    }
    (s + 1) / 2
}

/// Midpoint circle: integer decision variable, one octant computed and
/// mirrored eight ways.
///
/// Only octant rows that can reach the surface are walked, so the work is
/// bounded by the surface size rather than the radius.
pub fn plot_circle_bresenham(surface: &mut PixelSurface, center: Point, radius: i32, color: Color) {
    if radius <= 0 {
        surface.set_pixel(center.x, center.y, color);
        return;
    }
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    let (w, h) = (i64::from(surface.width()), i64::from(surface.height()));
    let r = i64::from(radius.min(MAX_RADIUS));

    // Ring entirely outside the surface, or the surface entirely inside it
    let (near, far) = distance_range(cx, cy, w, h);
    if near > i128::from(r + 1).pow(2) || far < i128::from(r - 1).pow(2) {
        return;
    }

    for (lo, hi) in visible_octant_rows(cx, cy, w, h, r) {
        let mut x = octant_x(r, lo);
        for y in lo..=hi {
            // Step x inward while the midpoint (x - 1/2, y) is outside
            while (2 * x - 1) * (2 * x - 1) + 4 * y * y > 4 * r * r {
                x -= 1;
            }
            if x < y {
                break;
            }
            plot_wide(surface, cx + x, cy + y, color);
            plot_wide(surface, cx + y, cy + x, color);
            plot_wide(surface, cx - y, cy + x, color);
            plot_wide(surface, cx - x, cy + y, color);
            plot_wide(surface, cx - x, cy - y, color);
            plot_wide(surface, cx - y, cy - x, color);
            plot_wide(surface, cx + y, cy - x, color);
            plot_wide(surface, cx + x, cy - y, color);
        }
    }
}

/// Fixed angular step, advancing the point by rotating it with a constant
/// (cos d, sin d) pair instead of evaluating trig per sample.
pub fn plot_circle_parametric(surface: &mut PixelSurface, center: Point, radius: i32, color: Color) {
    if radius <= 0 {
        surface.set_pixel(center.x, center.y, color);
        return;
    }
    let (sin_d, cos_d) = (TAU / f64::from(PARAMETRIC_STEPS)).sin_cos();
    let (cx, cy) = (f64::from(center.x), f64::from(center.y));
    let mut x = f64::from(radius);
    let mut y = 0.0_f64;

    for _ in 0..PARAMETRIC_STEPS {
        surface.set_pixel((cx + x).round() as i32, (cy + y).round() as i32, color);
        let nx = x * cos_d - y * sin_d;
        y = x * sin_d + y * cos_d;
        x = nx;
    }
}
