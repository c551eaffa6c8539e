//! Phong shading of a rendered image
//!
//! The image is lit as if it were painted on a sphere inscribed in the
//! canvas; pixels outside the sphere sit on a flat backdrop facing the
//! viewer. Each pixel's own color is the albedo.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::color::{clamp_channel, Color};
use crate::display::PixelSurface;
use crate::math3d::Vec3;

/// Sphere radius as a fraction of the shorter canvas side
const SPHERE_FRACTION: f64 = 0.45;
/// Smallest attenuation denominator
const MIN_DENOMINATOR: f64 = 1e-6;

/// Which diffuse/specular pair is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    /// `kd1`, `ks1`
    #[default]
    One,
    /// `kd2`, `ks2`
    Two,
}

/// Reflectance coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coefficients {
    pub kd1: f64,
    pub ks1: f64,
    pub kd2: f64,
    pub ks2: f64,
    /// Distance offset in the attenuation denominator
    pub k: f64,
    /// Ambient light intensity
    pub ia: f64,
    /// Ambient reflectance
    pub ka: f64,
    /// Point light intensity
    pub il: f64,
    /// Specular exponent
    pub n: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            kd1: 1.0,
            ks1: 1.0,
            kd2: 1.0,
            ks2: 1.0,
            k: 1.0,
            ia: 1.0,
            ka: 1.0,
            il: 1.0,
            n: 1.0,
        }
    }
}

impl Coefficients {
    /// Replace NaN and infinities: weights become 0, `k` and `n` become 1
    pub fn sanitized(&self) -> Self {
        let weight = |v: f64| if v.is_finite() { v } else { 0.0 };
        let unit = |v: f64| if v.is_finite() { v } else { 1.0 };
        Self {
            kd1: weight(self.kd1),
            ks1: weight(self.ks1),
            kd2: weight(self.kd2),
            ks2: weight(self.ks2),
            k: unit(self.k),
            ia: weight(self.ia),
            ka: weight(self.ka),
            il: weight(self.il),
            n: unit(self.n),
        }
    }

    fn is_finite(&self) -> bool {
        [
            self.kd1, self.ks1, self.kd2, self.ks2, self.k, self.ia, self.ka, self.il, self.n,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// (kd, ks) for the selected model
    pub fn pair(&self, model: Model) -> (f64, f64) {
        match model {
            Model::One => (self.kd1, self.ks1),
            Model::Two => (self.kd2, self.ks2),
        }
    }
}

/// Light and viewer directions, both pointing away from the surface.
/// Screen axes: x right, y down, z toward the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSetup {
    pub light: Vec3,
    pub viewer: Vec3,
}

impl Default for LightSetup {
    /// Light from the upper left, in front of the canvas
    fn default() -> Self {
        Self {
            light: Vec3::new(-1.0, -1.0, 1.0).normalize(),
            viewer: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Normal and normalized depth (0 at the sphere front, 1 on the backdrop)
fn surface_at(x: u32, y: u32, cx: f64, cy: f64, radius: f64) -> (Vec3, f64) {
    let dx = (f64::from(x) + 0.5 - cx) / radius;
    let dy = (f64::from(y) + 0.5 - cy) / radius;
    let rr = dx * dx + dy * dy;
    if rr <= 1.0 {
        let nz = (1.0 - rr).sqrt();
        (Vec3::new(dx, dy, nz), 1.0 - nz)
    } else {
        (Vec3::new(0.0, 0.0, 1.0), 1.0)
    }
}

/// Shade every pixel with ambient + attenuated diffuse and specular terms.
/// Alpha is kept.
pub fn apply_illumination(
    surface: &PixelSurface,
    model: Model,
    coefficients: &Coefficients,
    setup: &LightSetup,
) -> PixelSurface {
    let c = if coefficients.is_finite() {
        *coefficients
    } else {
        warn!("illumination coefficients contain non-finite values, substituting neutral ones");
        coefficients.sanitized()
    };
    let (kd, ks) = c.pair(model);
    let light = setup.light.normalize();
    let viewer = setup.viewer.normalize();
    let ambient = c.ia * c.ka;

    let (w, h) = (surface.width(), surface.height());
    let (cx, cy) = (f64::from(w) / 2.0, f64::from(h) / 2.0);
    let radius = (SPHERE_FRACTION * f64::from(w.min(h))).max(MIN_DENOMINATOR);
    debug!("illumination {:?}: kd={kd} ks={ks} ambient={ambient}", model);

    let mut out = surface.clone();
    for y in 0..h {
        for x in 0..w {
            let (xi, yi) = (x as i32, y as i32);
            let Some(albedo) = surface.get_pixel(xi, yi) else {
                continue;
            };
            let (normal, depth) = surface_at(x, y, cx, cy, radius);
            let attenuation = c.il / (c.k + depth).max(MIN_DENOMINATOR);

            let n_dot_l = normal.dot(&light);
            let diffuse = kd * n_dot_l.max(0.0);
            let specular = if n_dot_l > 0.0 {
                let reflected = normal * (2.0 * n_dot_l) - light;
                ks * reflected.dot(&viewer).max(0.0).powf(c.n)
            } else {
                0.0
            };

            let body = ambient + attenuation * diffuse;
            let highlight = attenuation * specular * 255.0;
            let shade = |ch: u8| clamp_channel(f64::from(ch) / 255.0 * body * 255.0 + highlight);
            out.set_pixel(
                xi,
                yi,
                Color::new(shade(albedo.r), shade(albedo.g), shade(albedo.b), albedo.a),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(size: u32) -> PixelSurface {
        PixelSurface::filled(size, size, Color::new(128, 128, 128, 200)).unwrap()
    }

    fn ambient_only(ia: f64) -> Coefficients {
        Coefficients {
            kd1: 0.0,
            ks1: 0.0,
            kd2: 0.0,
            ks2: 0.0,
            ia,
            ka: 1.0,
            ..Coefficients::default()
        }
    }

    #[test]
    fn ambient_term_scales_albedo() {
        let out = apply_illumination(&gray(16), Model::One, &ambient_only(0.5), &LightSetup::default());
        assert_eq!(out.count_color(Color::new(64, 64, 64, 200)), 256);
    }

    #[test]
    fn output_keeps_size_and_alpha() {
        let s = gray(20);
        let out = apply_illumination(&s, Model::Two, &Coefficients::default(), &LightSetup::default());
        assert_eq!((out.width(), out.height()), (20, 20));
        for p in out.pixels_not(Color::BLACK) {
            assert_eq!(out.get_pixel(p.x, p.y).map(|c| c.a), Some(200));
        }
    }

    #[test]
    fn lit_side_is_brighter_than_shadowed_side() {
        let c = Coefficients {
            ks1: 0.0,
            ia: 0.1,
            ..Coefficients::default()
        };
        let out = apply_illumination(&gray(100), Model::One, &c, &LightSetup::default());
        // Light comes from the upper left
        let lit = out.get_pixel(25, 25).unwrap();
        let dark = out.get_pixel(74, 74).unwrap();
        assert!(lit.r > dark.r, "{lit:?} vs {dark:?}");
    }

    #[test]
    fn models_select_their_own_pair() {
        let c = Coefficients {
            kd1: 0.0,
            ks1: 0.0,
            kd2: 1.0,
            ks2: 0.5,
            ia: 0.0,
            ..Coefficients::default()
        };
        let s = gray(50);
        let one = apply_illumination(&s, Model::One, &c, &LightSetup::default());
        let two = apply_illumination(&s, Model::Two, &c, &LightSetup::default());
        // Model One has nothing but a zero ambient term
        assert_eq!(one.count_color(Color::new(0, 0, 0, 200)), 2500);
        assert_ne!(one, two);
    }

    #[test]
    fn output_channels_clamp() {
        let c = Coefficients {
            ia: 100.0,
            ..Coefficients::default()
        };
        let out = apply_illumination(&gray(8), Model::One, &c, &LightSetup::default());
        assert_eq!(out.count_color(Color::new(255, 255, 255, 200)), 64);
    }

    #[test]
    fn non_finite_coefficients_do_not_poison_output() {
        let c = Coefficients {
            kd1: f64::NAN,
            ks1: f64::INFINITY,
            k: f64::NAN,
            n: f64::NEG_INFINITY,
            ia: 0.5,
            ..Coefficients::default()
        };
        let s = gray(12);
        let out = apply_illumination(&s, Model::One, &c, &LightSetup::default());
        let expected = apply_illumination(&s, Model::One, &c.sanitized(), &LightSetup::default());
        assert_eq!(out, expected);
        assert_eq!(out.get_pixel(0, 0), Some(Color::new(64, 64, 64, 200)));
    }

    #[test]
    fn zero_denominator_is_guarded() {
        let c = Coefficients {
            k: -1.0,
            ..Coefficients::default()
        };
        // k + d == 0 on the backdrop
        let out = apply_illumination(&gray(10), Model::One, &c, &LightSetup::default());
        assert_eq!(out.width(), 10);
    }
}
