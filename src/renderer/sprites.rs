//! Sprite table and scene packing
//!
//! Every drawable is a unit shape scaled to its sprite's target size, then
//! packed into the fixed-size rect array the shader reads.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::consts::*;
use crate::sim::{GameState, Hazard, HazardKind, VehicleKind};

/// Maximum rects per frame (uniform array length in the shader)
pub const MAX_RECTS: usize = 64;

/// Signed distance shapes understood by the shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Shape {
    Car = 0,
    Disc = 1,
    Block = 2,
    Heart = 3,
}

/// One sprite: shape, target dimensions and tint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub shape: Shape,
    pub size: Vec2,
    pub color: [f32; 3],
}

impl Sprite {
    pub fn for_vehicle(kind: VehicleKind) -> Self {
        let color = match kind {
            VehicleKind::Comet => [0.2, 0.8, 1.0],
            VehicleKind::Viper => [1.0, 0.25, 0.6],
            VehicleKind::Titan => [1.0, 0.75, 0.1],
        };
        Self {
            shape: Shape::Car,
            size: Vec2::new(VEHICLE_WIDTH, VEHICLE_HEIGHT),
            color,
        }
    }

    pub fn for_hazard(kind: HazardKind) -> Self {
        let (shape, color) = match kind {
            HazardKind::Coin => (Shape::Disc, [1.0, 0.85, 0.2]),
            HazardKind::Obstacle => (Shape::Block, [0.9, 0.3, 0.2]),
            HazardKind::Heart => (Shape::Heart, [1.0, 0.3, 0.45]),
        };
        Self {
            shape,
            size: Vec2::splat(kind.size()),
            color,
        }
    }

    /// Place this sprite with its top-left corner at `pos`
    fn at(&self, pos: Vec2) -> RectData {
        RectData {
            pos: pos.to_array(),
            size: self.size.to_array(),
            color: self.color,
            shape: self.shape as u32,
        }
    }
}

/// GPU rect record (must match shader)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RectData {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 3],
    pub shape: u32,
}

/// Pack the run into draw order: hazards first, vehicle on top.
/// Hazards past the array capacity are dropped; the vehicle never is.
pub fn build_rects(state: &GameState) -> Vec<RectData> {
    let hazards = state
        .coins
        .hazards
        .iter()
        .chain(&state.hearts.hazards)
        .chain(&state.obstacles.hazards);

    let mut rects: Vec<RectData> = hazards
        .take(MAX_RECTS - 1)
        .map(|h: &Hazard| Sprite::for_hazard(h.kind).at(h.pos))
        .collect();

    rects.push(Sprite::for_vehicle(state.vehicle.kind).at(state.vehicle.pos));
    rects
}
