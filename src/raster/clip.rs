//! Cohen-Sutherland line clipping against an axis-aligned rectangle

use super::line::plot_line_bresenham;
use crate::color::Color;
use crate::display::PixelSurface;
use crate::geometry::{Point, Rect};

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;
// Each pass moves one endpoint onto a boundary line, so 4 passes suffice;
// the cap only guards against degenerate floating-point input.
const MAX_ITERATIONS: u32 = 16;

/// Region code of a point relative to the rectangle (one of 9 regions)
#[inline]
fn outcode(x: f64, y: f64, r: &Rect) -> u8 {
    let mut code = INSIDE;
    if x < f64::from(r.min.x) {
        code |= LEFT;
    } else if x > f64::from(r.max.x) {
        code |= RIGHT;
    }
    if y < f64::from(r.min.y) {
        code |= TOP;
    } else if y > f64::from(r.max.y) {
        code |= BOTTOM;
    }
    code
}

/// Clip a segment to an inclusive rectangle.
///
/// Returns the endpoints untouched when the segment is fully inside, None
/// when it is fully outside, and otherwise the portion inside with each
/// endpoint moved along the segment to the half-plane it violated.
pub fn clip_segment(p0: Point, p1: Point, boundary: Rect) -> Option<(Point, Point)> {
    let (mut x0, mut y0) = (f64::from(p0.x), f64::from(p0.y));
    let (mut x1, mut y1) = (f64::from(p1.x), f64::from(p1.y));
    let mut code0 = outcode(x0, y0, &boundary);
    let mut code1 = outcode(x1, y1, &boundary);

    if (code0 | code1) == 0 {
        return Some((p0, p1));
    }

    let (xmin, ymin) = (f64::from(boundary.min.x), f64::from(boundary.min.y));
    let (xmax, ymax) = (f64::from(boundary.max.x), f64::from(boundary.max.y));

    for _ in 0..MAX_ITERATIONS {
        if (code0 | code1) == 0 {
            return Some((
                Point::new(x0.round() as i32, y0.round() as i32),
                Point::new(x1.round() as i32, y1.round() as i32),
            ));
        }
        if (code0 & code1) != 0 {
            // Both endpoints share an outside half-plane
            return None;
        }

        let code_out = if code0 != 0 { code0 } else { code1 };
        let dx = x1 - x0;
        let dy = y1 - y0;

        // A set bit guarantees the matching delta is non-zero
        let (x, y) = if (code_out & BOTTOM) != 0 {
            (x0 + dx * (ymax - y0) / dy, ymax)
        } else if (code_out & TOP) != 0 {
            (x0 + dx * (ymin - y0) / dy, ymin)
        } else if (code_out & RIGHT) != 0 {
            (xmax, y0 + dy * (xmax - x0) / dx)
        } else {
            (xmin, y0 + dy * (xmin - x0) / dx)
        };

        if code_out == code0 {
            x0 = x;
            y0 = y;
            code0 = outcode(x0, y0, &boundary);
        } else {
            x1 = x;
            y1 = y;
            code1 = outcode(x1, y1, &boundary);
        }
    }

    None
}

/// Draw only the part of a line that falls inside `boundary`
pub fn draw_line_clipped(
    surface: &PixelSurface,
    p0: Point,
    p1: Point,
    color: Color,
    boundary: Rect,
) -> PixelSurface {
    let mut out = surface.clone();
    if let Some((a, b)) = clip_segment(p0, p1, boundary) {
        plot_line_bresenham(&mut out, a, b, color);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
        Rect::from_corners(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn inside_segment_is_returned_verbatim() {
        let a = Point::new(3, 4);
        let b = Point::new(8, 1);
        assert_eq!(clip_segment(a, b, rect(0, 0, 10, 10)), Some((a, b)));
    }

    #[test]
    fn segment_in_one_outside_region_is_rejected() {
        assert_eq!(
            clip_segment(Point::new(-5, 2), Point::new(-1, 8), rect(0, 0, 10, 10)),
            None
        );
        assert_eq!(
            clip_segment(Point::new(12, 12), Point::new(30, 11), rect(0, 0, 10, 10)),
            None
        );
    }

    #[test]
    fn crossing_segment_is_cut_at_both_edges() {
        let clipped = clip_segment(Point::new(-10, 5), Point::new(20, 5), rect(0, 0, 10, 10));
        assert_eq!(clipped, Some((Point::new(0, 5), Point::new(10, 5))));

        let diag = clip_segment(Point::new(-5, -5), Point::new(15, 15), rect(0, 0, 10, 10));
        assert_eq!(diag, Some((Point::new(0, 0), Point::new(10, 10))));
    }

    #[test]
    fn segment_passing_a_corner_region_without_entering_is_rejected() {
        // Crosses LEFT and TOP regions but misses the rectangle
        assert_eq!(
            clip_segment(Point::new(-6, 3), Point::new(3, -6), rect(0, 0, 10, 10)),
            None
        );
    }

    #[test]
    fn clipped_drawing_stays_inside_boundary() {
        let s = PixelSurface::filled(40, 40, Color::BLACK).unwrap();
        let boundary = rect(10, 10, 20, 20);
        let out = draw_line_clipped(&s, Point::new(0, 15), Point::new(39, 15), Color::RED, boundary);
        assert_eq!(out.count_color(Color::RED), 11);
        for x in 0..40 {
            let inside = (10..=20).contains(&x);
            assert_eq!(out.get_pixel(x, 15) == Some(Color::RED), inside, "x = {x}");
        }
    }
}
