//! Pose (position and orientation)
//!
//! A Pose places a model in the world: a position plus roll, pitch and yaw
//! in radians, written in SDF as six space-separated numbers.

use gzworld_math::Vec3;
use serde::{Serialize, Deserialize};
use std::fmt;

/// Position and fixed-axis Euler orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position in world space
    pub position: Vec3,
    /// Rotation about X (radians)
    #[serde(default)]
    pub roll: f64,
    /// Rotation about Y (radians)
    #[serde(default)]
    pub pitch: f64,
    /// Rotation about Z (radians)
    #[serde(default)]
    pub yaw: f64,
}

impl Pose {
    /// Pose at the origin with no rotation
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        roll: 0.0,
        pitch: 0.0,
        yaw: 0.0,
    };

    /// Create a pose from all six components
    pub fn new(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            roll,
            pitch,
            yaw,
        }
    }

    /// Create a pose with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Same position with the orientation cleared
    pub fn without_orientation(&self) -> Self {
        Self::from_position(self.position)
    }

    /// True when any orientation angle is non-zero
    pub fn has_orientation(&self) -> bool {
        self.roll != 0.0 || self.pitch != 0.0 || self.yaw != 0.0
    }

    /// True when every component is finite
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.roll.is_finite()
            && self.pitch.is_finite()
            && self.yaw.is_finite()
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.position, self.roll, self.pitch, self.yaw)
    }
}
