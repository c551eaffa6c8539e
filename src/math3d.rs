//! 3D math for the geometry pipeline
//!
//! Vectors, homogeneous points and row-major 4x4 transform matrices.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            *self
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

// ============================================================================
// Homogeneous points
// ============================================================================

/// Point in homogeneous coordinates. Loaded geometry carries w = 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default = "unit_w")]
    pub w: f64,
}

fn unit_w() -> f64 {
    1.0
}

impl Point4 {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    #[inline]
    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Divide through by w. A zero or non-finite w leaves the point as is.
    #[inline]
    pub fn normalized(self) -> Self {
        if self.w != 0.0 && self.w.is_finite() && self.w != 1.0 {
            Self {
                x: self.x / self.w,
                y: self.y / self.w,
                z: self.z / self.w,
                w: 1.0,
            }
        } else {
            self
        }
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.xyz().approx_eq(&other.xyz(), epsilon) && (self.w - other.w).abs() < epsilon
    }
}

impl Default for Point4 {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<Vec3> for Point4 {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

// ============================================================================
// Matrices
// ============================================================================

/// Coordinate axis for rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Row-major 4x4 transform; points are column vectors (`v' = M * v`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mat4(pub [[f64; 4]; 4]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn identity() -> Self {
        Self([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub const fn translation(offset: Vec3) -> Self {
        Self([
            [1.0, 0.0, 0.0, offset.x],
            [0.0, 1.0, 0.0, offset.y],
            [0.0, 0.0, 1.0, offset.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Diagonal matrix `diag(sx, sy, sz, w)`
    pub const fn scale(sx: f64, sy: f64, sz: f64, w: f64) -> Self {
        Self([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, w],
        ])
    }

    pub fn rotation_x(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cos, -sin, 0.0],
            [0.0, sin, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self([
            [cos, 0.0, sin, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-sin, 0.0, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self([
            [cos, -sin, 0.0, 0.0],
            [sin, cos, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about a coordinate axis, angle in degrees
    pub fn rotation(axis: Axis, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        match axis {
            Axis::X => Self::rotation_x(radians),
            Axis::Y => Self::rotation_y(radians),
            Axis::Z => Self::rotation_z(radians),
        }
    }

    /// `T(pivot) * self * T(-pivot)`: the same transform about another point
    pub fn about(self, pivot: Vec3) -> Self {
        Self::translation(pivot) * self * Self::translation(-pivot)
    }

    /// `M * p` followed by the guarded w-divide. The identity hands the
    /// point back untouched, so re-applying it is bit-exact.
    pub fn apply(&self, p: Point4) -> Point4 {
        if *self == Self::identity() {
            return p;
        }
        let v = p.to_array();
        let row = |i: usize| -> f64 { (0..4).map(|k| self.0[i][k] * v[k]).sum() };
        Point4 {
            x: row(0),
            y: row(1),
            z: row(2),
            w: row(3),
        }
        .normalized()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|v| v.is_finite())
    }

    /// Copy with every NaN or infinite entry replaced by the identity's entry
    pub fn sanitized(&self) -> Self {
        let mut out = self.0;
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                if !cell.is_finite() {
                    *cell = if i == j { 1.0 } else { 0.0 };
                }
            }
        }
        Self(out)
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[i][k] * rhs.0[k][j]).sum();
            }
        }
        Self(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_neutral() {
        let p = Point4::new(1.5, -2.0, 7.25);
        assert_eq!(Mat4::identity().apply(p), p);
        let r = Mat4::rotation(Axis::Y, 33.0);
        assert_eq!(Mat4::identity() * r, r);
        assert_eq!(r * Mat4::identity(), r);
        let negative_zero = Point4::new(-0.0, 0.0, 1.0);
        assert_eq!(Mat4::identity().apply(negative_zero).x.to_bits(), (-0.0_f64).to_bits());
    }

    #[test]
    fn quarter_turns_follow_the_right_hand_rule() {
        let p = Point4::new(1.0, 0.0, 0.0);
        let z = Mat4::rotation(Axis::Z, 90.0).apply(p);
        assert!(z.approx_eq(&Point4::new(0.0, 1.0, 0.0), 1e-12));
        let y = Mat4::rotation(Axis::Y, 90.0).apply(p);
        assert!(y.approx_eq(&Point4::new(0.0, 0.0, -1.0), 1e-12));
        let x = Mat4::rotation(Axis::X, 90.0).apply(Point4::new(0.0, 1.0, 0.0));
        assert!(x.approx_eq(&Point4::new(0.0, 0.0, 1.0), 1e-12));
    }

    #[test]
    fn translation_moves_points_not_w() {
        let m = Mat4::translation(Vec3::new(3.0, -4.0, 5.0));
        assert_eq!(m.apply(Point4::new(1.0, 1.0, 1.0)), Point4::new(4.0, -3.0, 6.0));
    }

    #[test]
    fn w_scale_is_divided_out() {
        let m = Mat4::scale(1.0, 1.0, 1.0, 2.0);
        assert_eq!(m.apply(Point4::new(10.0, 4.0, -6.0)), Point4::new(5.0, 2.0, -3.0));
    }

    #[test]
    fn zero_w_leaves_coordinates_undivided() {
        let m = Mat4::scale(1.0, 1.0, 1.0, 0.0);
        let out = m.apply(Point4::new(3.0, 4.0, 5.0));
        assert_eq!((out.x, out.y, out.z, out.w), (3.0, 4.0, 5.0, 0.0));
    }

    #[test]
    fn rotation_about_pivot_keeps_pivot_fixed() {
        let pivot = Vec3::new(50.0, 50.0, 0.0);
        let m = Mat4::rotation(Axis::Z, 90.0).about(pivot);
        assert!(m.apply(Point4::from(pivot)).approx_eq(&Point4::from(pivot), 1e-9));
        let out = m.apply(Point4::new(60.0, 50.0, 0.0));
        assert!(out.approx_eq(&Point4::new(50.0, 60.0, 0.0), 1e-9));
    }

    #[test]
    fn sanitize_replaces_non_finite_entries() {
        let mut raw = Mat4::identity().0;
        raw[0][0] = f64::NAN;
        raw[0][3] = f64::INFINITY;
        raw[1][2] = 0.5;
        let m = Mat4(raw);
        assert!(!m.is_finite());
        let s = m.sanitized();
        assert!(s.is_finite());
        assert_eq!(s.0[0][0], 1.0);
        assert_eq!(s.0[0][3], 0.0);
        assert_eq!(s.0[1][2], 0.5);
    }

    #[test]
    fn cross_and_dot() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(x.dot(&y), 0.0);
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).normalize(), Vec3::new(0.6, 0.8, 0.0));
    }
}
