//! Built-in test geometry

use super::{Edge, SceneObject};
use crate::error::{KernelError, Result};
use crate::math3d::Point4;

/// Number of built-in objects
pub const COUNT: usize = 3;

/// Preset object by index: 0 house, 1 cube, 2 pyramid
pub fn edges(index: usize) -> Result<SceneObject> {
    match index {
        0 => Ok(house()),
        1 => Ok(cube()),
        2 => Ok(pyramid()),
        _ => Err(KernelError::UnknownPreset {
            kind: "object",
            index,
        }),
    }
}

#[inline]
fn p(x: f64, y: f64, z: f64) -> Point4 {
    Point4::new(x, y, z)
}

/// Pentagonal prism: a house outline at z = 0 and z = 100, joined front to back
pub fn house() -> SceneObject {
    let mut edges = Vec::with_capacity(15);
    for z in [0.0, 100.0] {
        edges.extend([
            Edge::new(p(0.0, 0.0, z), p(0.0, 100.0, z)),
            Edge::new(p(0.0, 0.0, z), p(100.0, 0.0, z)),
            Edge::new(p(50.0, 150.0, z), p(0.0, 100.0, z)),
            Edge::new(p(50.0, 150.0, z), p(100.0, 100.0, z)),
            Edge::new(p(100.0, 100.0, z), p(100.0, 0.0, z)),
        ]);
    }
    edges.extend([
        Edge::new(p(50.0, 150.0, 100.0), p(50.0, 150.0, 0.0)),
        Edge::new(p(0.0, 100.0, 0.0), p(0.0, 100.0, 100.0)),
        Edge::new(p(0.0, 0.0, 0.0), p(0.0, 0.0, 100.0)),
        Edge::new(p(100.0, 0.0, 0.0), p(100.0, 0.0, 100.0)),
        Edge::new(p(100.0, 100.0, 0.0), p(100.0, 100.0, 100.0)),
    ]);
    SceneObject::new("house", edges)
}

/// Axis-aligned cube with side 100 and one corner at the origin
pub fn cube() -> SceneObject {
    let s = 100.0;
    let corners = [
        p(0.0, 0.0, 0.0),
        p(s, 0.0, 0.0),
        p(s, s, 0.0),
        p(0.0, s, 0.0),
        p(0.0, 0.0, s),
        p(s, 0.0, s),
        p(s, s, s),
        p(0.0, s, s),
    ];
    let pairs = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    let edges = pairs
        .iter()
        .map(|&(a, b)| Edge::new(corners[a], corners[b]))
        .collect();
    SceneObject::new("cube", edges)
}

/// Square pyramid: 100 x 100 base on y = 0, apex 120 above its center
pub fn pyramid() -> SceneObject {
    let base = [
        p(0.0, 0.0, 0.0),
        p(100.0, 0.0, 0.0),
        p(100.0, 0.0, 100.0),
        p(0.0, 0.0, 100.0),
    ];
    let apex = p(50.0, 120.0, 50.0);
    let mut edges = Vec::with_capacity(8);
    for i in 0..4 {
        edges.push(Edge::new(base[i], base[(i + 1) % 4]));
    }
    for corner in base {
        edges.push(Edge::new(corner, apex));
    }
    SceneObject::new("pyramid", edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math3d::Vec3;

    #[test]
    fn preset_sizes() {
        assert_eq!(edges(0).unwrap().edges.len(), 15);
        assert_eq!(edges(1).unwrap().edges.len(), 12);
        assert_eq!(edges(2).unwrap().edges.len(), 8);
    }

    #[test]
    fn unknown_index_is_an_error() {
        assert!(matches!(
            edges(COUNT),
            Err(KernelError::UnknownPreset { kind: "object", index: 3 })
        ));
    }

    #[test]
    fn cube_centroid_is_its_center() {
        assert!(cube().centroid().approx_eq(&Vec3::new(50.0, 50.0, 50.0), 1e-12));
    }

    #[test]
    fn pyramid_centroid_counts_the_apex_once() {
        let pyr = pyramid();
        assert_eq!(pyr.unique_vertices().len(), 5);
        assert!(pyr.centroid().approx_eq(&Vec3::new(50.0, 24.0, 50.0), 1e-12));
    }

    #[test]
    fn every_preset_vertex_is_homogeneous() {
        for i in 0..COUNT {
            assert!(edges(i).unwrap().vertices().all(|v| v.w == 1.0));
        }
    }
}
