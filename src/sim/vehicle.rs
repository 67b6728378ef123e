//! The player's vehicle: lateral steering inside the track plus a jump arc

use glam::Vec2;

use super::collision::Rect;
use crate::consts::*;

/// Selectable vehicle variants (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleKind {
    #[default]
    Comet,
    Viper,
    Titan,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Comet, VehicleKind::Viper, VehicleKind::Titan];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Comet => "Comet",
            VehicleKind::Viper => "Viper",
            VehicleKind::Titan => "Titan",
        }
    }

    /// Map a selection digit ('1'..='3') to a variant
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(VehicleKind::Comet),
            '2' => Some(VehicleKind::Viper),
            '3' => Some(VehicleKind::Titan),
            _ => None,
        }
    }
}

/// The player vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub kind: VehicleKind,
    /// Top-left corner in world units
    pub pos: Vec2,
    /// Horizontal velocity: -STEER_SPEED, 0 or STEER_SPEED
    pub vel_x: f32,
    /// True while in a jump arc
    pub airborne: bool,
    /// Upward velocity consumed each airborne tick
    pub jump_velocity: f32,
}

impl Vehicle {
    /// Place a fresh vehicle centered on the road, resting on the ground
    pub fn new(kind: VehicleKind) -> Self {
        Self {
            kind,
            pos: Vec2::new(SCREEN_WIDTH / 2.0 - VEHICLE_WIDTH / 2.0, GROUND_Y),
            vel_x: 0.0,
            airborne: false,
            jump_velocity: JUMP_LAUNCH_VELOCITY,
        }
    }

    /// Leftmost permitted x
    pub const MIN_X: f32 = TRACK_LEFT;
    /// Rightmost permitted x (left edge of the vehicle)
    pub const MAX_X: f32 = TRACK_RIGHT - VEHICLE_WIDTH;

    /// Start moving left unless already at the left bound.
    ///
    /// When denied the previous velocity is left untouched; `advance`
    /// clamps the position so a stale velocity can never leave the track.
    pub fn steer_left(&mut self) {
        if self.pos.x > Self::MIN_X {
            self.vel_x = -STEER_SPEED;
        }
    }

    /// Start moving right unless already at the right bound
    pub fn steer_right(&mut self) {
        if self.pos.x < Self::MAX_X {
            self.vel_x = STEER_SPEED;
        }
    }

    pub fn steer_stop(&mut self) {
        self.vel_x = 0.0;
    }

    /// Begin a jump. Returns false (no-op) if already airborne.
    pub fn jump(&mut self) -> bool {
        if self.airborne {
            return false;
        }
        self.airborne = true;
        self.jump_velocity = JUMP_LAUNCH_VELOCITY;
        true
    }

    /// Integrate one tick of motion
    pub fn advance(&mut self) {
        self.pos.x = (self.pos.x + self.vel_x).clamp(Self::MIN_X, Self::MAX_X);

        if self.airborne {
            self.pos.y -= self.jump_velocity;
            self.jump_velocity -= JUMP_GRAVITY;
            if self.jump_velocity < -JUMP_LAUNCH_VELOCITY {
                self.land();
            }
        }
    }

    fn land(&mut self) {
        self.airborne = false;
        self.jump_velocity = JUMP_LAUNCH_VELOCITY;
        self.pos.y = GROUND_Y;
    }

    /// Height above the ground baseline (0 when grounded)
    pub fn altitude(&self) -> f32 {
        GROUND_Y - self.pos.y
    }

    /// Bounding box used for collision tests
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, VEHICLE_WIDTH, VEHICLE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_vehicle_is_centered_and_grounded() {
        let v = Vehicle::new(VehicleKind::Viper);
        assert_eq!(v.pos, Vec2::new(460.0, GROUND_Y));
        assert!(!v.airborne);
        assert_eq!(v.vel_x, 0.0);
    }

    #[test]
    fn test_steer_and_stop() {
        let mut v = Vehicle::new(VehicleKind::Comet);
        v.steer_right();
        v.advance();
        assert_eq!(v.pos.x, 465.0);
        v.steer_left();
        v.advance();
        v.advance();
        assert_eq!(v.pos.x, 455.0);
        v.steer_stop();
        v.advance();
        assert_eq!(v.pos.x, 455.0);
    }

    #[test]
    fn test_holding_left_pins_at_track_edge() {
        // Steering is pre-checked against the current position and the
        // result is clamped, so the vehicle never overruns the bound
        let mut v = Vehicle::new(VehicleKind::Comet);
        v.pos.x = Vehicle::MIN_X + 2.0;
        for _ in 0..10 {
            v.steer_left();
            v.advance();
        }
        assert_eq!(v.pos.x, Vehicle::MIN_X);
    }

    #[test]
    fn test_steer_denied_at_bound_keeps_previous_velocity() {
        let mut v = Vehicle::new(VehicleKind::Comet);
        v.pos.x = Vehicle::MAX_X;
        v.steer_stop();
        v.steer_right();
        assert_eq!(v.vel_x, 0.0);

        v.vel_x = STEER_SPEED;
        v.steer_right();
        v.advance();
        assert_eq!(v.pos.x, Vehicle::MAX_X);
    }

    #[test]
    fn test_jump_is_noop_while_airborne() {
        let mut v = Vehicle::new(VehicleKind::Titan);
        assert!(v.jump());
        v.advance();
        let velocity = v.jump_velocity;
        assert!(!v.jump());
        assert_eq!(v.jump_velocity, velocity);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut v = Vehicle::new(VehicleKind::Comet);
        v.jump();

        let mut ticks = 0;
        let mut peak: f32 = 0.0;
        while v.airborne {
            v.advance();
            peak = peak.max(v.altitude());
            ticks += 1;
            assert!(ticks < 100, "jump never landed");
        }

        // 15, 14.2, ... -14.6 then velocity drops below -15
        assert_eq!(ticks, 38);
        assert!(peak > 140.0 && peak < 150.0, "peak was {peak}");
        assert_eq!(v.pos.y, GROUND_Y);
        assert_eq!(v.jump_velocity, JUMP_LAUNCH_VELOCITY);
    }

    #[test]
    fn test_jump_velocity_decreases_monotonically() {
        let mut v = Vehicle::new(VehicleKind::Comet);
        v.jump();
        let mut last = v.jump_velocity;
        v.advance();
        while v.airborne {
            assert!(v.jump_velocity < last);
            last = v.jump_velocity;
            v.advance();
        }
    }

    proptest! {
        #[test]
        fn prop_x_stays_on_track(moves in proptest::collection::vec(0u8..4, 0..600)) {
            let mut v = Vehicle::new(VehicleKind::Comet);
            for m in moves {
                match m {
                    0 => v.steer_left(),
                    1 => v.steer_right(),
                    2 => v.steer_stop(),
                    _ => { v.jump(); }
                }
                v.advance();
                prop_assert!(v.pos.x >= Vehicle::MIN_X);
                prop_assert!(v.pos.x <= Vehicle::MAX_X);
            }
        }
    }
}
