//! Drag gesture → launch impulse.
//!
//! Pure functions, no physics. The slingshot fires opposite to the pull:
//! the launch direction points from the drag end back to the drag start.

use glam::Vec2;

/// Longest drag the slingshot accepts, in world units.
pub const MAX_DRAG_DISTANCE: f32 = 100.0;

/// Magnitude + angle pair derived from a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImpulseVector {
    /// Raw impulse magnitude (the clamped drag distance).
    pub magnitude: f32,
    /// Launch angle in radians.
    pub angle: f32,
}

impl ImpulseVector {
    pub fn new(magnitude: f32, angle: f32) -> Self {
        Self { magnitude, angle }
    }

    /// Unit vector along the launch angle.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }
}

/// Angle (radians) of the direction from `end` back to `start`.
pub fn launch_angle(start: Vec2, end: Vec2) -> f32 {
    let d = start - end;
    d.y.atan2(d.x)
}

/// Pull `end` back onto the circle of radius `max_distance` around `start`,
/// keeping the drag direction. Drags inside the circle are returned as is.
pub fn clamp_drag_to(start: Vec2, end: Vec2, max_distance: f32) -> Vec2 {
    let offset = end - start;
    let distance = offset.length();
    if distance > max_distance {
        start + offset * (max_distance / distance)
    } else {
        end
    }
}

/// [`clamp_drag_to`] with the default [`MAX_DRAG_DISTANCE`].
pub fn clamp_drag(start: Vec2, end: Vec2) -> Vec2 {
    clamp_drag_to(start, end, MAX_DRAG_DISTANCE)
}

/// Compute the launch impulse for a drag, clamping the end point first.
pub fn compute_impulse_with_limit(start: Vec2, end: Vec2, max_distance: f32) -> ImpulseVector {
    let end = clamp_drag_to(start, end, max_distance);
    ImpulseVector {
        magnitude: start.distance(end),
        angle: launch_angle(start, end),
    }
}

/// Compute the launch impulse for a drag using [`MAX_DRAG_DISTANCE`].
pub fn compute_impulse(start: Vec2, end: Vec2) -> ImpulseVector {
    compute_impulse_with_limit(start, end, MAX_DRAG_DISTANCE)
}
