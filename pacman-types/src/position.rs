use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// A cell on the grid. `y` grows upwards, so the first line of a layout is the highest row
pub struct Position {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Position {
    /// Construct a new position
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell reached by stepping once in `direction`
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();

        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The actions available to every agent in a [crate::GridGame]
pub enum Direction {
    #[allow(missing_docs)]
    North,
    #[allow(missing_docs)]
    South,
    #[allow(missing_docs)]
    East,
    #[allow(missing_docs)]
    West,
    /// Stay in place. Only pacman may choose this voluntarily
    Stop,
}

impl Direction {
    /// Every direction, in the order legal actions are enumerated
    pub const fn all() -> [Direction; 5] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Stop,
        ]
    }

    /// The `(dx, dy)` this direction moves by
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Stop => "Stop",
        };

        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_up_for_north() {
        assert_eq!(Position::new(1, 1).step(Direction::North), Position::new(1, 2));
        assert_eq!(Position::new(1, 1).step(Direction::West), Position::new(0, 1));
        assert_eq!(Position::new(1, 1).step(Direction::Stop), Position::new(1, 1));
    }
}
