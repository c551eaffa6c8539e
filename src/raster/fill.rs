use serde::{Deserialize, Serialize};

use super::line::plot_line_bresenham;
use crate::color::Color;
use crate::display::PixelSurface;
use crate::geometry::Point;

/// Which neighbours count as connected during a flood fill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Up, down, left, right
    #[default]
    Four,
    /// The four orthogonal neighbours plus the diagonals
    Eight,
}

const FOUR_NEIGHBOURS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const EIGHT_NEIGHBOURS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl Connectivity {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::Four => &FOUR_NEIGHBOURS,
            Self::Eight => &EIGHT_NEIGHBOURS,
        }
    }
}

/// Replace the connected region holding `seed` with `color`.
///
/// Uses an explicit stack; each pixel is recolored when pushed, so it can
/// never be pushed twice.
pub fn flood_fill(
    surface: &PixelSurface,
    seed: Point,
    color: Color,
    connectivity: Connectivity,
) -> PixelSurface {
    let mut out = surface.clone();
    let Some(target) = out.get_pixel(seed.x, seed.y) else {
        return out;
    };
    if target == color {
        return out;
    }

    let mut stack = vec![seed];
    out.set_pixel(seed.x, seed.y, color);

    while let Some(p) = stack.pop() {
        for &(dx, dy) in connectivity.offsets() {
            let (nx, ny) = (p.x + dx, p.y + dy);
            if out.get_pixel(nx, ny) == Some(target) {
                out.set_pixel(nx, ny, color);
                stack.push(Point::new(nx, ny));
            }
        }
    }
    out
}

/// Triangle outline: the three connecting Bresenham edges
pub fn draw_triangle(
    surface: &PixelSurface,
    p0: Point,
    p1: Point,
    p2: Point,
    color: Color,
) -> PixelSurface {
    let mut out = surface.clone();
    plot_triangle(&mut out, p0, p1, p2, color);
    out
}

/// Scanline-filled triangle with its outline drawn on top
pub fn fill_triangle(
    surface: &PixelSurface,
    p0: Point,
    p1: Point,
    p2: Point,
    color: Color,
) -> PixelSurface {
    let mut out = surface.clone();
    let vertices = [p0, p1, p2].map(|p| (f64::from(p.x) + 0.5, f64::from(p.y) + 0.5));
    out.fill_polygon(&vertices, color);
    plot_triangle(&mut out, p0, p1, p2, color);
    out
}

fn plot_triangle(surface: &mut PixelSurface, p0: Point, p1: Point, p2: Point, color: Color) {
    plot_line_bresenham(surface, p0, p1, color);
    plot_line_bresenham(surface, p1, p2, color);
    plot_line_bresenham(surface, p2, p0, color);
}
