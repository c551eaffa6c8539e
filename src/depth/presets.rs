//! Built-in point scenes for the depth renderer

use std::f64::consts::{PI, TAU};

use super::ObjectPoint;
use crate::color::Color;
use crate::error::{KernelError, Result};
use crate::math3d::{Point4, Vec3};

/// Number of built-in scenes
pub const COUNT: usize = 2;

/// Preset scene by index: 0 two squares and a sphere, 1 cube and pyramid
pub fn scene(index: usize) -> Result<Vec<ObjectPoint>> {
    match index {
        0 => Ok(squares_and_sphere()),
        1 => Ok(cube_and_pyramid()),
        _ => Err(KernelError::UnknownPreset {
            kind: "scene",
            index,
        }),
    }
}

/// Two overlapping flat squares (z = 10 behind z = 5) and a sphere shell
/// poking through both
pub fn squares_and_sphere() -> Vec<ObjectPoint> {
    let mut points = Vec::new();
    push_square(&mut points, -100, 20, 10.0, Color::RED, 0);
    push_square(&mut points, -20, 100, 5.0, Color::BLUE, 1);
    push_sphere(&mut points, Vec3::new(60.0, -60.0, 20.0), 50.0, Color::GREEN, 2);
    points
}

/// Sampled surfaces of a cube and a square pyramid
pub fn cube_and_pyramid() -> Vec<ObjectPoint> {
    let mut points = Vec::new();
    push_cube(&mut points, Vec3::new(-140.0, -60.0, 0.0), 120.0, Color::rgb(200, 120, 40), 0);
    push_pyramid(&mut points, Vec3::new(80.0, 60.0, 40.0), 120.0, 130.0, Color::rgb(60, 90, 200), 1);
    points
}

/// Filled square spanning `lo..=hi` on both axes at depth `z`
fn push_square(points: &mut Vec<ObjectPoint>, lo: i32, hi: i32, z: f64, color: Color, id: u32) {
    for y in lo..=hi {
        for x in lo..=hi {
            points.push(ObjectPoint::new(
                Point4::new(f64::from(x), f64::from(y), z),
                color,
                id,
            ));
        }
    }
}

fn push_sphere(points: &mut Vec<ObjectPoint>, center: Vec3, radius: f64, color: Color, id: u32) {
    // Half-degree latitude, one-degree longitude: dense enough for r <= 60
    const RINGS: u32 = 360;
    const SEGMENTS: u32 = 360;
    for i in 0..=RINGS {
        let theta = PI * f64::from(i) / f64::from(RINGS);
        let (st, ct) = theta.sin_cos();
        for j in 0..SEGMENTS {
            let phi = TAU * f64::from(j) / f64::from(SEGMENTS);
            let (sp, cp) = phi.sin_cos();
            let p = center + Vec3::new(st * cp, ct, st * sp) * radius;
            points.push(ObjectPoint::new(p.into(), color, id));
        }
    }
}

/// Points of the parallelogram `origin + s*u + t*v`, s and t in [0, 1]
fn push_patch(points: &mut Vec<ObjectPoint>, origin: Vec3, u: Vec3, v: Vec3, color: Color, id: u32) {
    let n = u.length().max(v.length()).ceil().max(1.0) as u32;
    for i in 0..=n {
        for j in 0..=n {
            let s = f64::from(i) / f64::from(n);
            let t = f64::from(j) / f64::from(n);
            points.push(ObjectPoint::new((origin + u * s + v * t).into(), color, id));
        }
    }
}

/// Triangle `a, b, c` sampled by folding a patch onto its half
fn push_triangle(points: &mut Vec<ObjectPoint>, a: Vec3, b: Vec3, c: Vec3, color: Color, id: u32) {
    let (u, v) = (b - a, c - a);
    let n = u.length().max(v.length()).ceil().max(1.0) as u32;
    for i in 0..=n {
        for j in 0..=(n - i) {
            let s = f64::from(i) / f64::from(n);
            let t = f64::from(j) / f64::from(n);
            points.push(ObjectPoint::new((a + u * s + v * t).into(), color, id));
        }
    }
}

fn push_cube(points: &mut Vec<ObjectPoint>, corner: Vec3, side: f64, color: Color, id: u32) {
    let x = Vec3::new(side, 0.0, 0.0);
    let y = Vec3::new(0.0, side, 0.0);
    let z = Vec3::new(0.0, 0.0, side);
    for (origin, u, v) in [
        (corner, x, y),
        (corner + z, x, y),
        (corner, x, z),
        (corner + y, x, z),
        (corner, y, z),
        (corner + x, y, z),
    ] {
        push_patch(points, origin, u, v, color, id);
    }
}

/// Base on the plane through `base_center`, apex `height` above it (toward -y)
fn push_pyramid(points: &mut Vec<ObjectPoint>, base_center: Vec3, side: f64, height: f64, color: Color, id: u32) {
    let h = side / 2.0;
    let corners = [
        base_center + Vec3::new(-h, 0.0, -h),
        base_center + Vec3::new(h, 0.0, -h),
        base_center + Vec3::new(h, 0.0, h),
        base_center + Vec3::new(-h, 0.0, h),
    ];
    let apex = base_center + Vec3::new(0.0, -height, 0.0);
    push_patch(
        points,
        corners[0],
        Vec3::new(side, 0.0, 0.0),
        Vec3::new(0.0, 0.0, side),
        color,
        id,
    );
    for i in 0..4 {
        push_triangle(points, corners[i], corners[(i + 1) % 4], apex, color, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_have_distinct_objects() {
        let ids = |pts: &[ObjectPoint]| {
            let mut ids: Vec<u32> = pts.iter().map(|p| p.object_id).collect();
            ids.dedup();
            ids
        };
        assert_eq!(ids(&scene(0).unwrap()), vec![0, 1, 2]);
        assert_eq!(ids(&scene(1).unwrap()), vec![0, 1]);
    }

    #[test]
    fn unknown_scene_is_an_error() {
        assert!(matches!(
            scene(COUNT),
            Err(KernelError::UnknownPreset { kind: "scene", index: 2 })
        ));
    }

    #[test]
    fn squares_overlap_at_their_own_depths() {
        let pts = squares_and_sphere();
        let at = |id: u32| {
            pts.iter()
                .find(|p| p.object_id == id && p.position.x == 0.0 && p.position.y == 0.0)
                .map(|p| p.position.z)
        };
        assert_eq!(at(0), Some(10.0));
        assert_eq!(at(1), Some(5.0));
    }

    #[test]
    fn sphere_points_lie_on_the_shell() {
        let center = Vec3::new(60.0, -60.0, 20.0);
        for p in squares_and_sphere().iter().filter(|p| p.object_id == 2) {
            assert!(((p.position.xyz() - center).length() - 50.0).abs() < 1e-9);
        }
    }
}
