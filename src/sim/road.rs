//! Scrolling road backdrop. Purely cosmetic: nothing in gameplay reads it.

use crate::consts::{ROAD_SCROLL_SPEED, SCREEN_HEIGHT};

#[derive(Debug, Clone)]
pub struct Road {
    /// Vertical offset of the upper road tile, wraps to 0 past the screen height
    pub offset: f32,
    pub speed: f32,
}

impl Default for Road {
    fn default() -> Self {
        Self {
            offset: 0.0,
            speed: ROAD_SCROLL_SPEED,
        }
    }
}

impl Road {
    pub fn advance(&mut self) {
        self.offset += self.speed;
        if self.offset > SCREEN_HEIGHT {
            self.offset = 0.0;
        }
    }

    /// Y positions of the two stacked tiles that cover the screen
    pub fn tile_offsets(&self) -> [f32; 2] {
        [self.offset, self.offset - SCREEN_HEIGHT]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_road_wraps() {
        let mut road = Road::default();
        for _ in 0..140 {
            road.advance();
        }
        assert_eq!(road.offset, 700.0);
        road.advance();
        assert_eq!(road.offset, 0.0);
    }

    #[test]
    fn test_tiles_cover_screen() {
        let road = Road {
            offset: 200.0,
            ..Default::default()
        };
        assert_eq!(road.tile_offsets(), [200.0, -500.0]);
    }
}
