mod pixel_surface;
#[cfg(feature = "viewer")]
mod window;

pub use pixel_surface::{PixelSurface, DEFAULT_HEIGHT, DEFAULT_WIDTH};
#[cfg(feature = "viewer")]
pub use window::{InputEvent, RenderTarget, Window};
