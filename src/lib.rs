//! cglab: an instructional computer-graphics kernel
//!
//! Raster primitives, line clipping, homogeneous 3D transforms, depth-tested
//! point rendering, Phong shading and 240-scaled HSL conversion. Every
//! operation reads its inputs by reference and returns fresh values.

pub mod color;
pub mod config;
pub mod depth;
pub mod display;
pub mod error;
pub mod geometry;
pub mod illumination;
pub mod math3d;
pub mod ops;
pub mod pipeline;
pub mod raster;
pub mod scene;
pub mod session;
pub mod sweep;

pub use color::{hsl_to_rgb, rgb_to_hsl, Color, Hsl};
pub use config::KernelConfig;
pub use display::PixelSurface;
pub use error::{KernelError, Result};
pub use geometry::{Point, Rect};
pub use ops::{dispatch, KernelState, Operation};
pub use session::Session;
