//! Quaternion and rotation-matrix helpers for the pose transformer.

/// Rotation quaternion, Hamilton convention, [w, x, y, z].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Quaternion for a rotation of `angle` radians about `axis`.
    /// The axis is assumed normalized.
    pub fn from_axis_angle(axis: [f64; 3], angle: f64) -> Quat {
        let half = angle / 2.0;
        let s = half.sin();
        Quat {
            w: half.cos(),
            x: axis[0] * s,
            y: axis[1] * s,
            z: axis[2] * s,
        }
    }

    /// Extract the rotation quaternion from a 3x3 row-major rotation matrix.
    pub fn from_rotation_matrix(m: &[[f32; 3]; 3]) -> Quat {
        let m: [[f64; 3]; 3] = [
            [m[0][0] as f64, m[0][1] as f64, m[0][2] as f64],
            [m[1][0] as f64, m[1][1] as f64, m[1][2] as f64],
            [m[2][0] as f64, m[2][1] as f64, m[2][2] as f64],
        ];
        let w = (1.0 + m[0][0] + m[1][1] + m[2][2]).max(0.0).sqrt() / 2.0;
        let x = (1.0 + m[0][0] - m[1][1] - m[2][2]).max(0.0).sqrt() / 2.0;
        let y = (1.0 - m[0][0] + m[1][1] - m[2][2]).max(0.0).sqrt() / 2.0;
        let z = (1.0 - m[0][0] - m[1][1] + m[2][2]).max(0.0).sqrt() / 2.0;
        Quat {
            w,
            x: x.copysign(m[2][1] - m[1][2]),
            y: y.copysign(m[0][2] - m[2][0]),
            z: z.copysign(m[1][0] - m[0][1]),
        }
    }

    pub fn conjugate(&self) -> Quat {
        Quat {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Componentwise comparison within `tolerance`, treating q and -q as
    /// the same rotation.
    pub fn approx_eq(&self, other: &Quat, tolerance: f64) -> bool {
        let same = (self.w - other.w).abs() <= tolerance
            && (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance;
        let negated = (self.w + other.w).abs() <= tolerance
            && (self.x + other.x).abs() <= tolerance
            && (self.y + other.y).abs() <= tolerance
            && (self.z + other.z).abs() <= tolerance;
        same || negated
    }
}

impl std::ops::Mul for Quat {
    type Output = Quat;

    fn mul(self, rhs: Quat) -> Quat {
        Quat {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

/// Fixed orientation correction for the mechanical mounting offset between
/// the shadowed controller and the glove: -90 degrees about the local X axis.
pub fn mounting_correction() -> Quat {
    Quat::from_axis_angle([1.0, 0.0, 0.0], (-90.0f64).to_radians())
}

/// The 3x3 rotation submatrix of a 3x4 device-to-world transform.
pub fn rotation_part(m: &[[f32; 4]; 3]) -> [[f32; 3]; 3] {
    [
        [m[0][0], m[0][1], m[0][2]],
        [m[1][0], m[1][1], m[1][2]],
        [m[2][0], m[2][1], m[2][2]],
    ]
}

/// Rotate a vector by a 3x3 row-major rotation matrix.
pub fn rotate(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}
