//! Falling hazards and the per-kind spawners that feed them onto the road

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use crate::consts::*;

/// Hazard kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
    /// +10 score on contact
    Coin,
    /// Costs a life unless jumped, +20 when cleared
    Obstacle,
    /// +1 life on contact
    Heart,
}

/// Bernoulli spawn trial: draw uniformly from `1..=range`, spawn when `draw < threshold`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRule {
    pub range: u32,
    pub threshold: u32,
}

impl SpawnRule {
    /// Probability of a spawn on any given tick
    pub fn probability(&self) -> f64 {
        self.threshold.saturating_sub(1) as f64 / self.range as f64
    }

    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.random_range(1..=self.range) < self.threshold
    }
}

impl HazardKind {
    /// Square edge length of the hazard's bounding box
    pub fn size(&self) -> f32 {
        match self {
            HazardKind::Coin => 30.0,
            HazardKind::Obstacle => 60.0,
            HazardKind::Heart => 40.0,
        }
    }

    /// Coin ~4%, obstacle ~2%, heart ~0.2% per tick
    pub fn spawn_rule(&self) -> SpawnRule {
        match self {
            HazardKind::Coin => SpawnRule { range: 100, threshold: 5 },
            HazardKind::Obstacle => SpawnRule { range: 100, threshold: 3 },
            HazardKind::Heart => SpawnRule { range: 1000, threshold: 3 },
        }
    }
}

/// A single falling hazard
#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    /// Top-left corner in world units
    pub pos: Vec2,
}

impl Hazard {
    pub fn rect(&self) -> Rect {
        let size = self.kind.size();
        Rect::new(self.pos.x, self.pos.y, size, size)
    }
}

/// Owns every live hazard of one kind
#[derive(Debug, Clone)]
pub struct Spawner {
    pub kind: HazardKind,
    pub speed: f32,
    pub hazards: Vec<Hazard>,
    next_id: u32,
}

impl Spawner {
    pub fn new(kind: HazardKind) -> Self {
        Self {
            kind,
            speed: HAZARD_SPEED,
            hazards: Vec::new(),
            next_id: 1,
        }
    }

    /// Run this tick's spawn trial. Returns the new hazard's id on success.
    pub fn try_spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<u32> {
        if !self.kind.spawn_rule().roll(rng) {
            return None;
        }
        let size = self.kind.size();
        let x = rng.random_range(TRACK_LEFT..=TRACK_RIGHT - size).floor();
        Some(self.spawn_at(Vec2::new(x, -size)))
    }

    /// Insert a hazard at an explicit position
    pub fn spawn_at(&mut self, pos: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.hazards.push(Hazard {
            id,
            kind: self.kind,
            pos,
        });
        id
    }

    /// Move every hazard down and drop those past the bottom of the screen
    pub fn advance_all(&mut self) {
        for hazard in &mut self.hazards {
            hazard.pos.y += self.speed;
        }
        self.hazards.retain(|h| h.pos.y <= SCREEN_HEIGHT);
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }
}
