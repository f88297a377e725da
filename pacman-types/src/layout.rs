use std::{collections::BTreeSet, str::FromStr};

use thiserror::Error;

use crate::{grid::GhostState, GridGame, Position};

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
/// Everything that can go wrong turning layout text into a [GridGame]
pub enum LayoutError {
    /// The layout had no rows
    #[error("the layout is empty")]
    Empty,
    /// A row did not match the width of the first row
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        #[allow(missing_docs)]
        row: usize,
        #[allow(missing_docs)]
        expected: usize,
        #[allow(missing_docs)]
        found: usize,
    },
    /// A character we don't know how to place
    #[error("unknown tile {tile:?} at row {row}, column {column}")]
    UnknownTile {
        #[allow(missing_docs)]
        tile: char,
        #[allow(missing_docs)]
        row: usize,
        #[allow(missing_docs)]
        column: usize,
    },
    /// Exactly one `P` is required
    #[error("expected exactly one pacman, found {0}")]
    PacmanCount(usize),
}

impl FromStr for GridGame {
    type Err = LayoutError;

    /// Parse the classic layout format
    ///
    /// `%` is a wall, `.` food, `o` a capsule, `P` pacman and `G` a ghost. Ghost agent indices
    /// follow reading order, top row first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();

        let width = rows.first().ok_or(LayoutError::Empty)?.chars().count();
        let height = rows.len();

        let mut walls = BTreeSet::new();
        let mut food = BTreeSet::new();
        let mut capsules = vec![];
        let mut pacmen = vec![];
        let mut ghosts = vec![];

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            let y = (height - 1 - row) as i32;
            for (column, tile) in line.chars().enumerate() {
                let pos = Position::new(column as i32, y);
                match tile {
                    '%' => {
                        walls.insert(pos);
                    }
                    '.' => {
                        food.insert(pos);
                    }
                    'o' => capsules.push(pos),
                    'P' => pacmen.push(pos),
                    'G' => ghosts.push(GhostState::new(pos)),
                    ' ' => {}
                    _ => return Err(LayoutError::UnknownTile { tile, row, column }),
                }
            }
        }

        if pacmen.len() != 1 {
            return Err(LayoutError::PacmanCount(pacmen.len()));
        }

        Ok(GridGame::new(
            width as i32,
            height as i32,
            walls,
            food,
            capsules,
            pacmen[0],
            ghosts,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    #[test]
    fn test_parse_small_layout() {
        let game: GridGame = include_str!("../fixtures/small.lay").parse().unwrap();

        assert_eq!(game.agent_count(), 2);
        assert_eq!(game.pacman_position(), Position::new(1, 1));
        assert_eq!(game.ghost_positions(), vec![Position::new(5, 3)]);
        assert_eq!(game.capsule_positions(), vec![Position::new(5, 1)]);
        assert_eq!(game.food_positions().len(), 4);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = "%%%\n%P\n%%%".parse::<GridGame>().unwrap_err();

        assert_eq!(
            err,
            LayoutError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_unknown_tiles_are_rejected() {
        let err = "%%%\n%P#\n%%%".parse::<GridGame>().unwrap_err();

        assert_eq!(
            err,
            LayoutError::UnknownTile {
                tile: '#',
                row: 1,
                column: 2
            }
        );
    }

    #[test]
    fn test_pacman_is_required() {
        assert_eq!(
            "%%%\n% %\n%%%".parse::<GridGame>().unwrap_err(),
            LayoutError::PacmanCount(0)
        );
        assert_eq!("".parse::<GridGame>().unwrap_err(), LayoutError::Empty);
    }
}
