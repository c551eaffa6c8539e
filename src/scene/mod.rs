//! Edge-list scene objects for the wireframe pipeline

pub mod presets;

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math3d::{Mat4, Point4, Vec3};

/// Ordered pair of homogeneous points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge(pub Point4, pub Point4);

impl Edge {
    pub const fn new(a: Point4, b: Point4) -> Self {
        Self(a, b)
    }

    /// Both endpoints run through `m`
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self(m.apply(self.0), m.apply(self.1))
    }
}

/// A loaded object: a flat list of edges, drawn in list order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub edges: Vec<Edge>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, edges: Vec<Edge>) -> Self {
        Self {
            name: name.into(),
            edges,
        }
    }

    /// Every edge endpoint, in edge order (shared corners repeat)
    pub fn vertices(&self) -> impl Iterator<Item = Point4> + '_ {
        self.edges.iter().flat_map(|e| [e.0, e.1])
    }

    /// Each distinct vertex once, in first-seen order
    pub fn unique_vertices(&self) -> Vec<Point4> {
        // +0.0 folds -0.0 into 0.0 so both spellings of a corner match
        let key = |p: &Point4| [p.x, p.y, p.z, p.w].map(|c| (c + 0.0).to_bits());
        let mut seen = BTreeSet::new();
        self.vertices().filter(|p| seen.insert(key(p))).collect()
    }

    /// Mean of the distinct vertices; the origin for an empty object
    pub fn centroid(&self) -> Vec3 {
        let unique = self.unique_vertices();
        if unique.is_empty() {
            return Vec3::zero();
        }
        let sum = unique.iter().fold(Vec3::zero(), |acc, v| acc + v.xyz());
        sum * (1.0 / unique.len() as f64)
    }

    /// New object with every vertex run through `m`
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self {
            name: self.name.clone(),
            edges: self.edges.iter().map(|e| e.transformed(m)).collect(),
        }
    }

    /// Save object to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load object from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Default for SceneObject {
    fn default() -> Self {
        Self::new("empty", Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> SceneObject {
        let p = |x, y| Point4::new(x, y, 0.0);
        SceneObject::new(
            "square",
            vec![
                Edge::new(p(0.0, 0.0), p(2.0, 0.0)),
                Edge::new(p(2.0, 0.0), p(2.0, 2.0)),
                Edge::new(p(2.0, 2.0), p(0.0, 2.0)),
                Edge::new(p(0.0, 2.0), p(0.0, 0.0)),
            ],
        )
    }

    #[test]
    fn centroid_is_mean_of_distinct_vertices() {
        assert_eq!(unit_square().centroid(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(SceneObject::default().centroid(), Vec3::zero());

        // A spoke from one corner to a far point counts that point once
        let mut obj = unit_square();
        let far = Point4::new(10.0, 0.0, 0.0);
        obj.edges.push(Edge::new(Point4::new(0.0, 0.0, 0.0), far));
        obj.edges.push(Edge::new(Point4::new(-0.0, 0.0, 0.0), far));
        assert_eq!(obj.unique_vertices().len(), 5);
        assert!(obj.centroid().approx_eq(&Vec3::new(2.8, 0.8, 0.0), 1e-12));
    }

    #[test]
    fn transform_keeps_name_and_edge_order() {
        let obj = unit_square();
        let moved = obj.transformed(&Mat4::translation(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(moved.name, "square");
        assert_eq!(moved.edges.len(), 4);
        assert_eq!(moved.edges[1].0, Point4::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn json_round_trip_through_a_file() {
        let path = std::env::temp_dir().join(format!("cglab-scene-{}.json", std::process::id()));
        let obj = unit_square();
        obj.save(&path).unwrap();
        let loaded = SceneObject::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, obj);
    }

    #[test]
    fn missing_w_defaults_to_one() {
        let obj: SceneObject = serde_json::from_str(
            r#"{"name":"seg","edges":[[{"x":1,"y":2,"z":3},{"x":4,"y":5,"z":6,"w":1}]]}"#,
        )
        .unwrap();
        assert_eq!(obj.edges[0].0.w, 1.0);
    }
}
