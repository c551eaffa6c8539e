use crate::color::Color;
use crate::error::{KernelError, Result};
use crate::geometry::{Point, Rect};

/// Blank canvas size used by the drawing window
pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 500;

// ============================================================================
// PixelSurface
// ============================================================================

/// RGBA8 pixel surface, row-major, bytes stored as `[r, g, b, a]`.
///
/// Every kernel operation reads one of these and hands back a new one;
/// the only in-place mutation happens on the private copy an operation makes.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    depth: Option<Vec<f64>>,
}

impl PixelSurface {
    /// Create a white, opaque surface
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Color::WHITE)
    }

    /// Create a surface filled with a single color
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(KernelError::InvalidDimensions { width, height });
        }
        let pixel = color.to_array();
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&pixel);
        }
        Ok(Self {
            pixels,
            width,
            height,
            depth: None,
        })
    }

    /// Wrap raw RGBA bytes handed over by an image loader
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(KernelError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(KernelError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            pixels: bytes,
            width,
            height,
            depth: None,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The whole surface as an inclusive rectangle
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(
            Point::new(0, 0),
            Point::new(self.width as i32 - 1, self.height as i32 - 1),
        )
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as i64) < i64::from(self.width) && y >= 0 && (y as i64) < i64::from(self.height)
    }

    /// Index of pixel (x, y) in pixel units
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Clear to a solid color
    pub fn clear(&mut self, color: Color) {
        let pixel = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Set a single pixel; writes outside the surface are ignored
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Read a pixel, None if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32) * 4;
            Some(Color::new(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            ))
        } else {
            None
        }
    }

    /// Number of pixels exactly equal to `color`
    pub fn count_color(&self, color: Color) -> usize {
        let target = color.to_array();
        self.pixels
            .chunks_exact(4)
            .filter(|px| *px == target)
            .count()
    }

    /// Coordinates of every pixel that differs from `color`
    pub fn pixels_not(&self, color: Color) -> Vec<Point> {
        let target = color.to_array();
        self.pixels
            .chunks_exact(4)
            .enumerate()
            .filter(|(_, px)| *px != target)
            .map(|(i, _)| {
                let i = i as u32;
                Point::new((i % self.width) as i32, (i / self.width) as i32)
            })
            .collect()
    }

    /// Draw a horizontal span, clipped to the surface
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return;
        }

        let pixel = color.to_array();
        let mut idx = self.pixel_index(start as u32, y as u32) * 4;
        for _ in start..=end {
            self.pixels[idx..idx + 4].copy_from_slice(&pixel);
            idx += 4;
        }
    }

    /// Fill a polygon using the scanline algorithm (even-odd rule).
    /// Samples at pixel centers, so shared edges are not filled twice.
    pub fn fill_polygon(&mut self, vertices: &[(f64, f64)], color: Color) {
        if vertices.len() < 3 {
            return;
        }

        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;
        for (_, y) in vertices {
            min_y = min_y.min(*y);
            max_y = max_y.max(*y);
        }
        if !min_y.is_finite() || !max_y.is_finite() {
            return;
        }

        let min_y = (min_y.floor() as i32).max(0);
        let max_y = (max_y.ceil() as i32).min(self.height as i32 - 1);

        // Reused per scanline
        let mut intersections: Vec<f64> = Vec::with_capacity(vertices.len());
        let n = vertices.len();

        for y in min_y..=max_y {
            intersections.clear();
            let yf = f64::from(y) + 0.5;

            for i in 0..n {
                let (x1, y1) = vertices[i];
                let (x2, y2) = vertices[(i + 1) % n];

                if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                    intersections.push(x1 + (yf - y1) / (y2 - y1) * (x2 - x1));
                }
            }

            intersections.sort_by(f64::total_cmp);
            for pair in intersections.chunks_exact(2) {
                // Pixel centers x + 0.5 inside [left, right)
                let start = (pair[0] - 0.5).ceil() as i32;
                let end = (pair[1] - 0.5).ceil() as i32 - 1;
                if start <= end {
                    self.hline(start, end, y, color);
                }
            }
        }
    }

    /// Copy the pixels inside `area` (clipped to the surface) into a new surface
    pub fn crop(&self, area: Rect) -> Result<PixelSurface> {
        let area = area
            .intersect(&self.bounds())
            .ok_or(KernelError::EmptySelection)?;
        let (w, h) = (area.width(), area.height());
        let mut bytes = Vec::with_capacity(w as usize * h as usize * 4);
        for y in area.min.y..=area.max.y {
            let start = self.pixel_index(area.min.x as u32, y as u32) * 4;
            bytes.extend_from_slice(&self.pixels[start..start + w as usize * 4]);
        }
        PixelSurface::from_rgba(w, h, bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    // ========================================================================
    // Depth Buffer
    // ========================================================================

    /// Same pixels with a depth buffer attached, every entry at +infinity
    pub fn with_depth(mut self) -> Self {
        self.depth = Some(vec![f64::INFINITY; self.width as usize * self.height as usize]);
        self
    }

    /// Drop the depth buffer
    pub fn without_depth(mut self) -> Self {
        self.depth = None;
        self
    }

    #[inline]
    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }

    /// Reset depth buffer to infinity. No-op if no depth buffer.
    pub fn clear_depth(&mut self) {
        if let Some(ref mut d) = self.depth {
            d.fill(f64::INFINITY);
        }
    }

    /// Read depth value at (x, y). None if out of bounds or no depth buffer.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f64> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let pi = self.pixel_index(x as u32, y as u32);
        self.depth.as_ref().map(|d| d[pi])
    }

    /// Depth-tested write: only if z is strictly nearer than the stored depth.
    /// Equal depth keeps the pixel already there. Without a depth buffer
    /// this is a plain write. Returns whether the pixel was written.
    #[inline]
    pub fn set_pixel_z(&mut self, x: i32, y: i32, z: f64, color: Color) -> bool {
        if !self.in_bounds(x, y) || z.is_nan() {
            return false;
        }
        let pi = self.pixel_index(x as u32, y as u32);
        if let Some(ref mut d) = self.depth {
            if z >= d[pi] {
                return false;
            }
            d[pi] = z;
        }
        let idx = pi * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
        true
    }
}
