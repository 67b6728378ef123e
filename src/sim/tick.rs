//! Fixed timestep simulation tick
//!
//! Core game loop that advances one run deterministically:
//! input -> vehicle -> road -> spawners -> collisions.

use super::collision::resolve_collisions;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left steering key held
    pub left: bool,
    /// Right steering key held
    pub right: bool,
    /// Jump pressed since the last tick
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Autopilot drives the vehicle (attract mode / headless runs)
    pub autopilot: bool,
}

/// Advance the run by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause && !state.terminal {
        state.paused = !state.paused;
        log::debug!("Paused: {}", state.paused);
    }

    // Don't tick if paused or over
    if state.paused || state.terminal {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }
    let input = &input;

    state.time_ticks += 1;

    // Steering: both held resolves to right, neither held stops
    if input.left {
        state.vehicle.steer_left();
    }
    if input.right {
        state.vehicle.steer_right();
    }
    if !input.left && !input.right {
        state.vehicle.steer_stop();
    }
    if input.jump && state.vehicle.jump() {
        state.events.push(GameEvent::Jumped);
    }

    state.vehicle.advance();
    state.road.advance();

    for spawner in [&mut state.coins, &mut state.obstacles, &mut state.hearts] {
        if spawner.try_spawn(&mut state.rng).is_some() {
            log::trace!("Spawned {:?} at tick {}", spawner.kind, state.time_ticks);
        }
        spawner.advance_all();
    }

    resolve_collisions(state);
}

/// Gap (vehicle top minus obstacle bottom) at which the autopilot jumps
const AUTOPILOT_JUMP_GAP: f32 = 25.0;
/// Obstacles further away than this are dodged sideways instead of jumped
const AUTOPILOT_DODGE_GAP: f32 = 120.0;
/// Horizontal dead zone to avoid jittering around a target
const AUTOPILOT_DEAD_ZONE: f32 = STEER_SPEED;

/// Replace player steering/jump with a simple driver
fn autopilot(state: &GameState, input: &mut TickInput) {
    let car = state.vehicle.rect();
    let car_center = car.x + car.w / 2.0;

    // Closest obstacle in our column that hasn't reached us yet
    let threat = state
        .obstacles
        .hazards
        .iter()
        .map(|o| o.rect())
        .filter(|r| r.right() >= car.x - 10.0 && r.x <= car.right() + 10.0)
        .filter(|r| r.bottom() <= car.y)
        .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));

    input.jump = false;
    let mut target_x = None;

    if let Some(obstacle) = threat {
        let gap = car.y - obstacle.bottom();
        if gap < AUTOPILOT_JUMP_GAP {
            input.jump = true;
        } else if gap > AUTOPILOT_DODGE_GAP {
            // Slide to whichever side of the obstacle has more room
            let obstacle_center = obstacle.x + obstacle.w / 2.0;
            let room_left = obstacle.x - TRACK_LEFT;
            let room_right = TRACK_RIGHT - obstacle.right();
            target_x = Some(if room_left > room_right {
                obstacle.x - car.w / 2.0 - 10.0
            } else {
                obstacle.right() + car.w / 2.0 + 10.0
            });
            log::trace!("Autopilot dodging obstacle at x={obstacle_center}");
        }
    }

    // Otherwise go for the nearest pickup still above us
    if target_x.is_none() && !input.jump {
        target_x = state
            .hearts
            .hazards
            .iter()
            .chain(state.coins.hazards.iter())
            .map(|h| h.rect())
            .filter(|r| r.bottom() <= car.y)
            .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
            .map(|r| r.x + r.w / 2.0);
    }

    input.left = false;
    input.right = false;
    if let Some(target) = target_x {
        let delta = target - car_center;
        if delta < -AUTOPILOT_DEAD_ZONE {
            input.left = true;
        } else if delta > AUTOPILOT_DEAD_ZONE {
            input.right = true;
        }
    }
}
