use crate::color::Color;
use crate::display::PixelSurface;
use crate::geometry::Point;

/// Draw a line by stepping along the major axis with a floating-point slope
pub fn draw_line(surface: &PixelSurface, p0: Point, p1: Point, color: Color) -> PixelSurface {
    let mut out = surface.clone();
    plot_line(&mut out, p0, p1, color);
    out
}

/// Draw a line using Bresenham's algorithm
pub fn draw_line_bresenham(
    surface: &PixelSurface,
    p0: Point,
    p1: Point,
    color: Color,
) -> PixelSurface {
    let mut out = surface.clone();
    plot_line_bresenham(&mut out, p0, p1, color);
    out
}

/// Order endpoints so a segment rasterizes the same whichever end comes first
#[inline]
fn canonical(p0: Point, p1: Point) -> (Point, Point) {
    if (p0.x, p0.y) <= (p1.x, p1.y) {
        (p0, p1)
    } else {
        (p1, p0)
    }
}

/// Indices `i` in `0..=len` for which `start + step * i` lies in `0..size`
fn visible_steps(start: i64, step: i64, len: i64, size: i64) -> Option<(i64, i64)> {
    let (lo, hi) = if step < 0 {
        ((start - (size - 1)).max(0), len.min(start))
    } else {
        ((-start).max(0), len.min(size - 1 - start))
    };
    (lo <= hi).then_some((lo, hi))
}

#[inline]
fn plot(surface: &mut PixelSurface, x: i64, y: i64, color: Color) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        surface.set_pixel(x, y, color);
    }
}

/// One line split into its major and minor axes
struct Span {
    x_major: bool,
    /// Start, step and length along the major axis
    major: (i64, i64, i64),
    /// Start, step and length along the minor axis
    minor: (i64, i64, i64),
    /// Surface extent along the major axis
    size: i64,
}

impl Span {
    fn new(surface: &PixelSurface, p0: Point, p1: Point) -> Self {
        let (x0, y0) = (i64::from(p0.x), i64::from(p0.y));
        let (dx, dy) = (i64::from(p1.x) - x0, i64::from(p1.y) - y0);
        let x_axis = (x0, dx.signum(), dx.abs());
        let y_axis = (y0, dy.signum(), dy.abs());
        if dx.abs() >= dy.abs() {
            Self {
                x_major: true,
                major: x_axis,
                minor: y_axis,
                size: i64::from(surface.width()),
            }
        } else {
            Self {
                x_major: false,
                major: y_axis,
                minor: x_axis,
                size: i64::from(surface.height()),
            }
        }
    }

    /// Steps whose major coordinate lands on the surface
    fn visible(&self) -> Option<(i64, i64)> {
        let (start, step, len) = self.major;
        visible_steps(start, step, len, self.size)
    }

    fn plot(&self, surface: &mut PixelSurface, i: i64, minor: i64, color: Color) {
        let m = self.major.0 + self.major.1 * i;
        let n = self.minor.0 + self.minor.1 * minor;
        if self.x_major {
            plot(surface, m, n, color);
        } else {
            plot(surface, n, m, color);
        }
    }
}

/// Naive DDA line, in place.
///
/// Each step along the major axis evaluates the slope from the first
/// endpoint, so only the steps that land on the surface are visited.
pub fn plot_line(surface: &mut PixelSurface, p0: Point, p1: Point, color: Color) {
    let (p0, p1) = canonical(p0, p1);
    let span = Span::new(surface, p0, p1);
    let Some((lo, hi)) = span.visible() else {
        return;
    };
    let (major_len, minor_len) = (span.major.2, span.minor.2);
    if major_len == 0 {
        span.plot(surface, 0, 0, color);
        return;
    }

    let m = minor_len as f64 / major_len as f64;
    for i in lo..=hi {
        let minor = (m * i as f64).round() as i64;
        span.plot(surface, i, minor, color);
    }
}

/// Bresenham line for all octants, in place.
///
/// Integer-only stepping. Endpoints are put in canonical order first, so
/// swapping them yields the same pixel set. When the line starts off the
/// surface, the error term is advanced to the first visible step in one
/// integer division, so the visible pixels match the full line exactly.
pub fn plot_line_bresenham(surface: &mut PixelSurface, p0: Point, p1: Point, color: Color) {
    let (p0, p1) = canonical(p0, p1);
    let span = Span::new(surface, p0, p1);
    let Some((lo, hi)) = span.visible() else {
        return;
    };
    let (major_len, minor_len) = (span.major.2, span.minor.2);
    if major_len == 0 {
        span.plot(surface, 0, 0, color);
        return;
    }

    // Minor offset at step i is (2·i·minor + major) div (2·major)
    let den = 2 * major_len;
    let inc = 2 * minor_len;
    let acc = i128::from(lo) * i128::from(inc) + i128::from(major_len);
    let den_wide = i128::from(den);
    let (Ok(mut minor), Ok(mut err)) =
        (i64::try_from(acc / den_wide), i64::try_from(acc % den_wide))
    else {
        return;
    };

    for i in lo..=hi {
        span.plot(surface, i, minor, color);
        err += inc;
        if err >= den {
            err -= den;
            minor += 1;
        }
    }
}
