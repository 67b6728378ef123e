//! Run state and core simulation types
//!
//! One `GameState` per run: created at vehicle selection, replaced on restart.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::hazard::{HazardKind, Spawner};
use super::road::Road;
use super::vehicle::{Vehicle, VehicleKind};
use crate::consts::START_LIVES;

/// Gameplay events produced by a tick, drained by the front end for audio/HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Vehicle left the ground
    Jumped,
    /// A coin was picked up
    CoinCollected,
    /// An obstacle was jumped over
    ObstacleCleared,
    /// An obstacle hit a grounded vehicle
    Crashed,
    /// A heart was picked up
    LifeGained,
    /// Lives reached zero
    RunOver { score: u64 },
}

/// Complete state of one run (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG
    pub rng: Pcg32,
    /// Simulation tick counter (frozen while paused)
    pub time_ticks: u64,
    pub score: u64,
    pub lives: u32,
    /// Freezes all ticking while true
    pub paused: bool,
    /// Set once lives reach zero; the run is over
    pub terminal: bool,
    pub vehicle: Vehicle,
    pub road: Road,
    pub coins: Spawner,
    pub obstacles: Spawner,
    pub hearts: Spawner,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh run for the chosen vehicle
    pub fn new(seed: u64, kind: VehicleKind) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            score: 0,
            lives: START_LIVES,
            paused: false,
            terminal: false,
            vehicle: Vehicle::new(kind),
            road: Road::default(),
            coins: Spawner::new(HazardKind::Coin),
            obstacles: Spawner::new(HazardKind::Obstacle),
            hearts: Spawner::new(HazardKind::Heart),
            events: Vec::new(),
        }
    }

    /// Spawner for a given hazard kind
    #[cfg(test)]
    pub(crate) fn spawner_mut(&mut self, kind: HazardKind) -> &mut Spawner {
        match kind {
            HazardKind::Coin => &mut self.coins,
            HazardKind::Obstacle => &mut self.obstacles,
            HazardKind::Heart => &mut self.hearts,
        }
    }

    /// Total live hazards across all kinds
    pub fn hazard_count(&self) -> usize {
        self.coins.len() + self.obstacles.len() + self.hearts.len()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_run() {
        let state = GameState::new(1, VehicleKind::Titan);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(!state.paused);
        assert!(!state.terminal);
        assert_eq!(state.hazard_count(), 0);
        assert_eq!(state.vehicle.kind, VehicleKind::Titan);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(1, VehicleKind::Comet);
        state.events.push(GameEvent::Jumped);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
        assert!(state.events.is_empty());
    }
}
