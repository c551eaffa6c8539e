//! Surface of revolution from a hand-drawn profile

use std::f64::consts::TAU;

use log::debug;

use crate::color::{clamp_channel, Color};
use crate::display::PixelSurface;
use crate::error::Result;

/// Upper bound on the number of angular increments
pub const MAX_STEPS: u32 = 3600;
/// Default increments, one per degree
pub const DEFAULT_STEPS: u32 = 360;

/// Mark the revolution axis (vertical center line) on a copy of `surface`
pub fn with_axis_guide(surface: &PixelSurface, color: Color) -> PixelSurface {
    let mut out = surface.clone();
    let axis = (surface.width() / 2) as i32;
    for y in 0..surface.height() as i32 {
        out.set_pixel(axis, y, color);
    }
    out
}

/// Revolve the profile drawn right of the center line around it.
///
/// Every pixel right of the axis that differs from `background` is a
/// profile sample at distance `x - axis` from it. Each sample is swept
/// through `steps` equal angles and projected straight onto a fresh surface
/// of the same size; the depth buffer keeps the front of the solid, which
/// is shaded brighter toward the viewer.
pub fn rotational_sweep(surface: &PixelSurface, background: Color, steps: u32) -> Result<PixelSurface> {
    let steps = steps.clamp(1, MAX_STEPS);
    let (w, h) = (surface.width(), surface.height());
    let axis = (w / 2) as i32;

    let profile: Vec<(i32, i32, Color)> = surface
        .pixels_not(background)
        .into_iter()
        .filter(|p| p.x > axis)
        .filter_map(|p| surface.get_pixel(p.x, p.y).map(|c| (p.x - axis, p.y, c)))
        .collect();
    debug!("sweep: {} profile samples x {steps} steps", profile.len());

    let mut out = PixelSurface::filled(w, h, background)?.with_depth();
    let axis_f = f64::from(axis);
    for k in 0..steps {
        let (sin, cos) = (TAU * f64::from(k) / f64::from(steps)).sin_cos();
        let shade = 0.6 + 0.4 * sin;
        for &(r, y, color) in &profile {
            let r = f64::from(r);
            let x = (axis_f + r * cos).round() as i32;
            // Toward the viewer is +z, so nearer means smaller -z
            let depth = -(r * sin);
            let shaded = Color::new(
                clamp_channel(f64::from(color.r) * shade),
                clamp_channel(f64::from(color.g) * shade),
                clamp_channel(f64::from(color.b) * shade),
                color.a,
            );
            out.set_pixel_z(x, y, depth, shaded);
        }
    }
    Ok(out.without_depth())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample_sweeps_a_horizontal_span() {
        let mut s = PixelSurface::new(41, 9).unwrap();
        s.set_pixel(30, 4, Color::BLACK);
        let out = rotational_sweep(&s, Color::WHITE, 360).unwrap();
        // r = 10 around axis x = 20 covers x in [10, 30] on row 4 only
        for x in 10..=30 {
            assert_ne!(out.get_pixel(x, 4), Some(Color::WHITE), "x = {x}");
        }
        assert_eq!(out.get_pixel(9, 4), Some(Color::WHITE));
        assert_eq!(out.get_pixel(20, 3), Some(Color::WHITE));
        assert_eq!(out.count_color(Color::WHITE), 41 * 9 - 21);
    }

    #[test]
    fn front_of_the_solid_is_brightest() {
        let mut s = PixelSurface::new(41, 3).unwrap();
        s.set_pixel(30, 1, Color::new(100, 100, 100, 255));
        let out = rotational_sweep(&s, Color::WHITE, 360).unwrap();
        // The pixel on the axis is the point facing the viewer (sin = 1)
        assert_eq!(out.get_pixel(20, 1), Some(Color::new(100, 100, 100, 255)));
    }

    #[test]
    fn left_half_and_axis_are_ignored() {
        let s = with_axis_guide(&PixelSurface::new(40, 10).unwrap(), Color::rgb(128, 128, 128));
        let mut s2 = s.clone();
        s2.set_pixel(3, 3, Color::RED);
        let out = rotational_sweep(&s2, Color::WHITE, 90).unwrap();
        assert_eq!(out.count_color(Color::WHITE), 400);
        assert_eq!(s.count_color(Color::rgb(128, 128, 128)), 10);
    }

    #[test]
    fn zero_steps_still_draws_the_profile() {
        let mut s = PixelSurface::new(20, 5).unwrap();
        s.set_pixel(15, 2, Color::BLUE);
        let out = rotational_sweep(&s, Color::WHITE, 0).unwrap();
        assert_eq!(out.count_color(Color::WHITE), 99);
    }
}
