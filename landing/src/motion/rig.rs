//! Root-group motion: pointer tilt with exponential smoothing, idle spin and
//! scroll-linked rotation.

use bevy::prelude::*;

/// Fraction of the remaining distance to the pointer target covered per frame.
pub const SMOOTHING: f32 = 0.05;
/// Maximum pitch (radians) when the pointer sits at the top/bottom edge.
pub const TILT_X: f32 = 0.3;
/// Maximum yaw (radians) when the pointer sits at the left/right edge.
pub const TILT_Y: f32 = 0.5;
/// Idle yaw speed in radians per second.
pub const SPIN_RATE: f32 = 0.12;
/// Yaw added per scrolled pixel.
pub const SCROLL_ROTATION: f32 = 0.0008;
/// World units the chip sinks per scrolled pixel.
pub const SCROLL_SINK: f32 = 0.002;

/// Everything one frame of animation reads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub elapsed: f32,
    pub delta: f32,
    pub pointer: Vec2,
    pub scroll: f32,
}

/// Pose of the root group for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigPose {
    pub rotation: Quat,
    pub translation: Vec3,
}

/// Motion state carried by the chip root between frames.
#[derive(Component, Clone, Debug)]
pub struct RigMotion {
    /// Smoothed (pitch, yaw) chasing the pointer.
    pub smoothed: Vec2,
    /// Accumulated idle yaw.
    pub spin: f32,
    pub rest: Vec3,
}

impl RigMotion {
    pub fn new(rest: Vec3) -> Self {
        Self {
            smoothed: Vec2::ZERO,
            spin: 0.0,
            rest,
        }
    }

    /// Advances one frame and returns the pose to apply.
    pub fn advance(&mut self, input: &FrameInput) -> RigPose {
        let target = pointer_target(input.pointer);
        self.smoothed = smooth_toward(self.smoothed, target, SMOOTHING);
        self.spin += SPIN_RATE * input.delta;

        let pitch = self.smoothed.x;
        let yaw = self.smoothed.y + self.spin + input.scroll * SCROLL_ROTATION;
        RigPose {
            rotation: Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0),
            translation: self.rest - Vec3::Y * (input.scroll * SCROLL_SINK),
        }
    }
}

/// (pitch, yaw) the rig leans toward for a normalized pointer.
pub fn pointer_target(pointer: Vec2) -> Vec2 {
    Vec2::new(-pointer.y * TILT_X, pointer.x * TILT_Y)
}

/// `current += (target - current) * factor`
pub fn smooth_toward(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current + (target - current) * factor
}
