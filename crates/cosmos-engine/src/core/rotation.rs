use std::f32::consts::TAU;

/// Planet spin accumulator.
///
/// Advances by a fixed step per animation frame and wraps at a full turn, so
/// the angle keeps full `f32` precision over arbitrarily long sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    angle: f32,
    step: f32,
}

impl Rotation {
    pub fn new(step: f32) -> Self {
        Self { angle: 0.0, step }
    }

    /// Current angle in radians, always in `[0, TAU)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Return the angle for this frame and move on to the next one.
    pub fn advance(&mut self) -> f32 {
        let current = self.angle;
        self.angle = (self.angle + self.step).rem_euclid(TAU);
        current
    }

    pub fn reset(&mut self) {
        self.angle = 0.0;
    }
}
