//! Operation dispatch
//!
//! Every kernel call is an `Operation` value run against a `KernelState`
//! by [`dispatch`], which never touches its input.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::depth::{self, ObjectPoint};
use crate::display::PixelSurface;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::illumination::{self, Coefficients, LightSetup, Model};
use crate::math3d::{Axis, Mat4, Vec3};
use crate::pipeline::{self, Pivot, Viewport, Wireframe};
use crate::raster::{self, CircleAlgorithm, Connectivity, LineAlgorithm};
use crate::scene::{self, SceneObject};
use crate::sweep;

/// Everything one kernel call reads and produces
#[derive(Debug, Clone, PartialEq)]
pub struct KernelState {
    pub surface: PixelSurface,
    /// Current wireframe object
    pub object: SceneObject,
    /// Current depth-scene points
    pub points: Vec<ObjectPoint>,
    /// Projection origin; None centers it on the surface
    pub viewport: Option<Viewport>,
}

impl KernelState {
    pub fn new(surface: PixelSurface) -> Self {
        Self {
            surface,
            object: SceneObject::default(),
            points: Vec::new(),
            viewport: None,
        }
    }

    /// White canvas, no geometry
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        Ok(Self::new(PixelSurface::new(width, height)?))
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.unwrap_or_else(|| Viewport::centered(&self.surface))
    }

    fn wireframe(&self, color: Color) -> Wireframe {
        Wireframe {
            viewport: self.viewport(),
            color,
        }
    }

    fn with_surface(&self, surface: PixelSurface) -> Self {
        Self {
            surface,
            ..self.clone()
        }
    }
}

fn default_wire_color() -> Color {
    Color::BLACK
}

fn default_steps() -> u32 {
    sweep::DEFAULT_STEPS
}

/// One kernel operation and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Clear {
        color: Color,
    },
    DrawLine {
        p0: Point,
        p1: Point,
        color: Color,
        #[serde(default)]
        algorithm: LineAlgorithm,
    },
    DrawLineClipped {
        p0: Point,
        p1: Point,
        color: Color,
        /// Two opposite corners of the clip rectangle
        boundary: [Point; 2],
    },
    DrawCircle {
        center: Point,
        edge: Point,
        color: Color,
        #[serde(default)]
        algorithm: CircleAlgorithm,
    },
    DrawTriangle {
        p0: Point,
        p1: Point,
        p2: Point,
        color: Color,
        #[serde(default)]
        filled: bool,
    },
    FloodFill {
        seed: Point,
        color: Color,
        #[serde(default)]
        connectivity: Connectivity,
    },
    /// Crop the surface to a rectangle
    SelectArea {
        corners: [Point; 2],
    },
    /// Replace the wireframe object with a built-in one and draw it
    LoadObject {
        index: usize,
        #[serde(default = "default_wire_color")]
        color: Color,
    },
    Translate {
        offset: Vec3,
        #[serde(default = "default_wire_color")]
        color: Color,
    },
    ScaleLocal {
        factors: Vec3,
        #[serde(default = "default_wire_color")]
        color: Color,
    },
    ScaleGlobal {
        factor: f64,
        #[serde(default = "default_wire_color")]
        color: Color,
    },
    Rotate {
        axis: Axis,
        degrees: f64,
        #[serde(default)]
        pivot: Pivot,
        #[serde(default = "default_wire_color")]
        color: Color,
    },
    Shear {
        matrix: Mat4,
        #[serde(default = "default_wire_color")]
        color: Color,
    },
    /// Replace the depth-scene points with a built-in scene and render it
    LoadScene {
        index: usize,
    },
    RotateObjects {
        axis: Axis,
        degrees: f64,
        #[serde(default)]
        pivot: Pivot,
    },
    TranslateObjects {
        offset: Vec3,
    },
    RenderObjects,
    Illuminate {
        #[serde(default)]
        model: Model,
        #[serde(default)]
        coefficients: Coefficients,
        #[serde(default)]
        light: LightSetup,
    },
    Sweep {
        background: Color,
        #[serde(default = "default_steps")]
        steps: u32,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear { .. } => "clear",
            Self::DrawLine { .. } => "draw_line",
            Self::DrawLineClipped { .. } => "draw_line_clipped",
            Self::DrawCircle { .. } => "draw_circle",
            Self::DrawTriangle { .. } => "draw_triangle",
            Self::FloodFill { .. } => "flood_fill",
            Self::SelectArea { .. } => "select_area",
            Self::LoadObject { .. } => "load_object",
            Self::Translate { .. } => "translate",
            Self::ScaleLocal { .. } => "scale_local",
            Self::ScaleGlobal { .. } => "scale_global",
            Self::Rotate { .. } => "rotate",
            Self::Shear { .. } => "shear",
            Self::LoadScene { .. } => "load_scene",
            Self::RotateObjects { .. } => "rotate_objects",
            Self::TranslateObjects { .. } => "translate_objects",
            Self::RenderObjects => "render_objects",
            Self::Illuminate { .. } => "illuminate",
            Self::Sweep { .. } => "sweep",
        }
    }

    /// Operations that redraw geometry from scratch rather than paint over
    /// the current image
    pub fn redraws_scene(&self) -> bool {
        matches!(
            self,
            Self::LoadObject { .. }
                | Self::Translate { .. }
                | Self::ScaleLocal { .. }
                | Self::ScaleGlobal { .. }
                | Self::Rotate { .. }
                | Self::Shear { .. }
                | Self::LoadScene { .. }
                | Self::RotateObjects { .. }
                | Self::TranslateObjects { .. }
                | Self::RenderObjects
        )
    }
}

/// Run one operation, returning the next state
pub fn dispatch(state: &KernelState, op: &Operation) -> Result<KernelState> {
    debug!("dispatch {}", op.name());
    let s = &state.surface;

    let next = match op {
        Operation::Clear { color } => {
            let mut surface = s.clone();
            surface.clear(*color);
            state.with_surface(surface)
        },
        Operation::DrawLine {
            p0,
            p1,
            color,
            algorithm,
        } => state.with_surface(match algorithm {
            LineAlgorithm::Naive => raster::draw_line(s, *p0, *p1, *color),
            LineAlgorithm::Bresenham => raster::draw_line_bresenham(s, *p0, *p1, *color),
        }),
        Operation::DrawLineClipped {
            p0,
            p1,
            color,
            boundary,
        } => {
            let rect = Rect::from_corners(boundary[0], boundary[1]);
            state.with_surface(raster::draw_line_clipped(s, *p0, *p1, *color, rect))
        },
        Operation::DrawCircle {
            center,
            edge,
            color,
            algorithm,
        } => state.with_surface(match algorithm {
            CircleAlgorithm::Naive => raster::draw_circle(s, *center, *edge, *color),
            CircleAlgorithm::Bresenham => raster::draw_circle_bresenham(s, *center, *edge, *color),
            CircleAlgorithm::Parametric => raster::draw_circle_parametric(s, *center, *edge, *color),
        }),
        Operation::DrawTriangle {
            p0,
            p1,
            p2,
            color,
            filled,
        } => state.with_surface(if *filled {
            raster::fill_triangle(s, *p0, *p1, *p2, *color)
        } else {
            raster::draw_triangle(s, *p0, *p1, *p2, *color)
        }),
        Operation::FloodFill {
            seed,
            color,
            connectivity,
        } => state.with_surface(raster::flood_fill(s, *seed, *color, *connectivity)),
        Operation::SelectArea { corners } => {
            state.with_surface(s.crop(Rect::from_corners(corners[0], corners[1]))?)
        },
        Operation::LoadObject { index, color } => {
            let object = scene::presets::edges(*index)?;
            let surface = pipeline::render_wireframe(s, &object, &state.wireframe(*color));
            KernelState {
                surface,
                object,
                ..state.clone()
            }
        },
        Operation::Translate { offset, color } => {
            geometry(state, pipeline::translate(s, &state.object, *offset, &state.wireframe(*color)))
        },
        Operation::ScaleLocal { factors, color } => geometry(
            state,
            pipeline::scale_local(s, &state.object, *factors, &state.wireframe(*color)),
        ),
        Operation::ScaleGlobal { factor, color } => geometry(
            state,
            pipeline::scale_global(s, &state.object, *factor, &state.wireframe(*color)),
        ),
        Operation::Rotate {
            axis,
            degrees,
            pivot,
            color,
        } => geometry(
            state,
            pipeline::rotate(s, &state.object, *axis, *degrees, *pivot, &state.wireframe(*color)),
        ),
        Operation::Shear { matrix, color } => {
            geometry(state, pipeline::shear(s, &state.object, matrix, &state.wireframe(*color)))
        },
        Operation::LoadScene { index } => {
            let points = depth::presets::scene(*index)?;
            with_points(state, points)
        },
        Operation::RotateObjects {
            axis,
            degrees,
            pivot,
        } => with_points(state, depth::rotate_objects(&state.points, *axis, *degrees, *pivot)),
        Operation::TranslateObjects { offset } => {
            with_points(state, depth::translate_objects(&state.points, *offset))
        },
        Operation::RenderObjects => with_points(state, state.points.clone()),
        Operation::Illuminate {
            model,
            coefficients,
            light,
        } => state.with_surface(illumination::apply_illumination(s, *model, coefficients, light)),
        Operation::Sweep { background, steps } => {
            state.with_surface(sweep::rotational_sweep(s, *background, *steps)?)
        },
    };
    Ok(next)
}

fn geometry(state: &KernelState, (surface, object): (PixelSurface, SceneObject)) -> KernelState {
    KernelState {
        surface,
        object,
        ..state.clone()
    }
}

/// Replace the points and re-run the depth render from scratch
fn with_points(state: &KernelState, points: Vec<ObjectPoint>) -> KernelState {
    let surface = depth::render_objects(&state.surface, &points, &state.viewport());
    KernelState {
        surface,
        points,
        ..state.clone()
    }
}

/// Run a list of operations in order
pub fn run_script(state: &KernelState, ops: &[Operation]) -> Result<KernelState> {
    ops.iter().try_fold(state.clone(), |st, op| dispatch(&st, op))
}

/// Load a JSON array of operations
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Operation>> {
    let json = fs::read_to_string(path)?;
    parse_script(&json)
}

pub fn parse_script(json: &str) -> Result<Vec<Operation>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KernelError;

    fn state() -> KernelState {
        KernelState::blank(100, 100).unwrap()
    }

    #[test_log::test]
    fn dispatch_leaves_input_untouched() {
        let st = state();
        let before = st.clone();
        let next = dispatch(
            &st,
            &Operation::DrawLine {
                p0: Point::new(0, 0),
                p1: Point::new(99, 99),
                color: Color::RED,
                algorithm: LineAlgorithm::Bresenham,
            },
        )
        .unwrap();
        assert_eq!(st, before);
        assert_eq!(next.surface.count_color(Color::RED), 100);
    }

    #[test_log::test]
    fn script_json_is_tagged_by_op() {
        let ops = parse_script(
            r#"[
                {"op": "clear", "color": {"r": 0, "g": 0, "b": 0}},
                {"op": "draw_circle", "center": {"x": 50, "y": 50}, "edge": {"x": 60, "y": 50},
                 "color": {"r": 255, "g": 0, "b": 0}, "algorithm": "parametric"},
                {"op": "load_object", "index": 1},
                {"op": "rotate", "axis": "y", "degrees": 30, "pivot": "centroid"},
                {"op": "flood_fill", "seed": {"x": 50, "y": 50}, "color": {"r": 0, "g": 0, "b": 255}},
                {"op": "render_objects"}
            ]"#,
        )
        .unwrap();
        assert_eq!(ops.len(), 6);
        assert_eq!(ops[3].name(), "rotate");
        assert!(matches!(
            ops[1],
            Operation::DrawCircle {
                algorithm: CircleAlgorithm::Parametric,
                ..
            }
        ));
        assert!(matches!(
            ops[4],
            Operation::FloodFill {
                connectivity: Connectivity::Four,
                ..
            }
        ));
        let end = run_script(&state(), &ops).unwrap();
        assert_eq!(end.object.name, "cube");
    }

    #[test_log::test]
    fn unknown_presets_surface_as_errors() {
        let err = dispatch(&state(), &Operation::LoadObject { index: 9, color: Color::BLACK });
        assert!(matches!(err, Err(KernelError::UnknownPreset { kind: "object", .. })));
        let err = dispatch(&state(), &Operation::LoadScene { index: 9 });
        assert!(matches!(err, Err(KernelError::UnknownPreset { kind: "scene", .. })));
    }

    #[test_log::test]
    fn select_area_shrinks_surface() {
        let next = dispatch(
            &state(),
            &Operation::SelectArea {
                corners: [Point::new(10, 10), Point::new(29, 39)],
            },
        )
        .unwrap();
        assert_eq!((next.surface.width(), next.surface.height()), (20, 30));
    }

    #[test_log::test]
    fn geometry_ops_replace_the_object() {
        let st = dispatch(&state(), &Operation::LoadObject { index: 0, color: Color::BLACK }).unwrap();
        let moved = dispatch(
            &st,
            &Operation::Translate {
                offset: Vec3::new(-50.0, -50.0, 0.0),
                color: Color::BLACK,
            },
        )
        .unwrap();
        assert_eq!(moved.object.edges.len(), 15);
        assert_ne!(moved.object, st.object);
        assert!(Operation::RenderObjects.redraws_scene());
        assert!(!Operation::Clear { color: Color::WHITE }.redraws_scene());
    }

    #[test_log::test]
    fn depth_ops_keep_points_and_rerender() {
        let st = dispatch(&state(), &Operation::LoadScene { index: 0 }).unwrap();
        assert!(!st.points.is_empty());
        // Blue square (z = 5) is in front of red (z = 10) where they overlap
        assert_eq!(st.surface.get_pixel(50, 50), Some(Color::BLUE));

        let rotated = dispatch(
            &st,
            &Operation::RotateObjects {
                axis: Axis::Z,
                degrees: 90.0,
                pivot: Pivot::Centroid,
            },
        )
        .unwrap();
        assert_eq!(rotated.points.len(), st.points.len());
    }
}
