//! Point-based raster primitives
//!
//! Every public `draw_*` function takes the current surface by reference and
//! returns a redrawn copy of the same size. The `plot_*` functions are the
//! in-place building blocks shared with the 3D wireframe and sweep renderers.

mod circle;
mod clip;
mod fill;
mod line;

pub use circle::{
    circle_radius, draw_circle, draw_circle_bresenham, draw_circle_parametric, plot_circle,
    plot_circle_bresenham, plot_circle_parametric,
};
pub use clip::{clip_segment, draw_line_clipped};
pub use fill::{draw_triangle, fill_triangle, flood_fill, Connectivity};
pub use line::{draw_line, draw_line_bresenham, plot_line, plot_line_bresenham};

use serde::{Deserialize, Serialize};

/// Line rasterization strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineAlgorithm {
    /// Floating-point slope stepping
    Naive,
    /// Integer error accumulation
    #[default]
    Bresenham,
}

/// Circle rasterization strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleAlgorithm {
    /// Angle sampled densely enough for the radius
    Naive,
    /// Midpoint algorithm with 8-way symmetry
    #[default]
    Bresenham,
    /// Fixed angular step with an incremental rotation
    Parametric,
}
