//! Collision detection and scoring
//!
//! Axis-aligned box overlap between the vehicle and every live hazard, then
//! resolution of each contact into score/lives changes. Kinds resolve in a
//! fixed order: coins, obstacles, hearts.

use super::state::{GameEvent, GameState};
use crate::consts::{CLEAR_SCORE, COIN_SCORE};

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Overlap test. Touching edges count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

/// Resolve every vehicle/hazard contact for this tick
///
/// Hazards are partitioned (collect hits, then filter) so removal never
/// disturbs the traversal. Once the run turns terminal, later contacts in
/// the same tick are left unresolved.
pub fn resolve_collisions(state: &mut GameState) {
    let vehicle_rect = state.vehicle.rect();

    // Coins
    let before = state.coins.len();
    state
        .coins
        .hazards
        .retain(|coin| !coin.rect().intersects(&vehicle_rect));
    for _ in state.coins.len()..before {
        state.score += COIN_SCORE;
        state.events.push(GameEvent::CoinCollected);
    }

    // Obstacles
    let airborne = state.vehicle.airborne;
    let mut removed = Vec::new();
    for obstacle in &state.obstacles.hazards {
        if state.terminal {
            break;
        }
        if !obstacle.rect().intersects(&vehicle_rect) {
            continue;
        }
        if airborne {
            state.score += CLEAR_SCORE;
            state.events.push(GameEvent::ObstacleCleared);
            removed.push(obstacle.id);
        } else {
            state.events.push(GameEvent::Crashed);
            state.lives = state.lives.saturating_sub(1);
            if state.lives == 0 {
                state.terminal = true;
                state.events.push(GameEvent::RunOver { score: state.score });
            } else {
                removed.push(obstacle.id);
            }
        }
    }
    if !removed.is_empty() {
        state.obstacles.hazards.retain(|o| !removed.contains(&o.id));
    }

    if state.terminal {
        return;
    }

    // Hearts
    let before = state.hearts.len();
    state
        .hearts
        .hazards
        .retain(|heart| !heart.rect().intersects(&vehicle_rect));
    for _ in state.hearts.len()..before {
        state.lives += 1;
        state.events.push(GameEvent::LifeGained);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hazard::HazardKind;
    use crate::sim::vehicle::VehicleKind;
    use glam::Vec2;

    fn fresh() -> GameState {
        GameState::new(12345, VehicleKind::Comet)
    }

    /// Place a hazard of `kind` squarely on top of the vehicle
    fn drop_on_vehicle(state: &mut GameState, kind: HazardKind) -> u32 {
        let pos = state.vehicle.pos + Vec2::new(10.0, 10.0);
        state.spawner_mut(kind).spawn_at(pos)
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(11.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.5, 10.0, 10.0)));
        // Containment
        assert!(a.intersects(&Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(a.intersects(&Rect::new(0.0, 10.0, 5.0, 5.0)));
        assert!(a.intersects(&Rect::new(10.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_coin_pickup() {
        let mut state = fresh();
        let hit = drop_on_vehicle(&mut state, HazardKind::Coin);
        let far = state.coins.spawn_at(Vec2::new(260.0, 0.0));

        resolve_collisions(&mut state);

        assert_eq!(state.score, 10);
        assert_eq!(state.lives, 3);
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.coins.hazards[0].id, far);
        assert_ne!(hit, far);
        assert_eq!(state.events, vec![GameEvent::CoinCollected]);
    }

    #[test]
    fn test_two_coins_same_tick() {
        let mut state = fresh();
        drop_on_vehicle(&mut state, HazardKind::Coin);
        drop_on_vehicle(&mut state, HazardKind::Coin);
        resolve_collisions(&mut state);
        assert_eq!(state.score, 20);
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_grounded_obstacle_costs_a_life() {
        let mut state = fresh();
        drop_on_vehicle(&mut state, HazardKind::Obstacle);

        resolve_collisions(&mut state);

        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(!state.terminal);
        assert_eq!(state.events, vec![GameEvent::Crashed]);
    }

    #[test]
    fn test_airborne_obstacle_is_cleared() {
        let mut state = fresh();
        state.vehicle.jump();
        drop_on_vehicle(&mut state, HazardKind::Obstacle);

        resolve_collisions(&mut state);

        assert_eq!(state.score, 20);
        assert_eq!(state.lives, 3);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.events, vec![GameEvent::ObstacleCleared]);
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut state = fresh();
        state.lives = 1;
        state.score = 70;
        drop_on_vehicle(&mut state, HazardKind::Obstacle);

        resolve_collisions(&mut state);

        assert_eq!(state.lives, 0);
        assert!(state.terminal);
        assert_eq!(
            state.events,
            vec![GameEvent::Crashed, GameEvent::RunOver { score: 70 }]
        );
    }

    #[test]
    fn test_heart_after_fatal_crash_is_not_collected() {
        // Game over always happens at zero lives
        let mut state = fresh();
        state.lives = 1;
        drop_on_vehicle(&mut state, HazardKind::Obstacle);
        drop_on_vehicle(&mut state, HazardKind::Heart);

        resolve_collisions(&mut state);

        assert!(state.terminal);
        assert_eq!(state.lives, 0);
        assert_eq!(state.hearts.len(), 1);
    }

    #[test]
    fn test_each_obstacle_damages_once() {
        let mut state = fresh();
        drop_on_vehicle(&mut state, HazardKind::Obstacle);
        drop_on_vehicle(&mut state, HazardKind::Obstacle);

        resolve_collisions(&mut state);
        assert_eq!(state.lives, 1);
        assert!(state.obstacles.is_empty());

        resolve_collisions(&mut state);
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_heart_has_no_cap() {
        let mut state = fresh();
        state.lives = 99;
        drop_on_vehicle(&mut state, HazardKind::Heart);

        resolve_collisions(&mut state);

        assert_eq!(state.lives, 100);
        assert!(state.hearts.is_empty());
        assert_eq!(state.events, vec![GameEvent::LifeGained]);
    }

    #[test]
    fn test_resolution_order_coin_obstacle_heart() {
        let mut state = fresh();
        drop_on_vehicle(&mut state, HazardKind::Heart);
        drop_on_vehicle(&mut state, HazardKind::Obstacle);
        drop_on_vehicle(&mut state, HazardKind::Coin);

        resolve_collisions(&mut state);

        assert_eq!(
            state.events,
            vec![
                GameEvent::CoinCollected,
                GameEvent::Crashed,
                GameEvent::LifeGained
            ]
        );
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_miss_leaves_everything_alone() {
        let mut state = fresh();
        state.obstacles.spawn_at(Vec2::new(700.0, 100.0));
        state.coins.spawn_at(Vec2::new(300.0, 100.0));
        resolve_collisions(&mut state);
        assert_eq!(state.hazard_count(), 2);
        assert!(state.events.is_empty());
    }
}
