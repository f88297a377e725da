use std::{collections::BTreeSet, fmt::Display};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{types::*, Direction, Position};

const TIME_PENALTY: i64 = 1;
const FOOD_SCORE: i64 = 10;
const WIN_SCORE: i64 = 500;
const LOSE_PENALTY: i64 = 500;
const GHOST_EATEN_SCORE: i64 = 200;
const SCARED_TIME: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// A single ghost on the board
pub struct GhostState {
    /// Where the ghost currently is
    pub position: Position,
    /// Where the ghost respawns after being eaten
    pub start: Position,
    /// How many more ghost moves this ghost stays edible for
    pub scared_timer: u32,
}

impl GhostState {
    /// A ghost standing on its own start cell, not scared
    pub fn new(start: Position) -> Self {
        Self {
            position: start,
            start,
            scared_timer: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A snapshot of a Pacman maze
///
/// Every transition returns a new `GridGame`; nothing is ever mutated in place from the outside.
/// This is also the JSON wire representation used for fixtures.
pub struct GridGame {
    width: i32,
    height: i32,
    walls: BTreeSet<Position>,
    food: BTreeSet<Position>,
    capsules: Vec<Position>,
    pacman: Position,
    ghosts: Vec<GhostState>,
    score: i64,
    #[serde(default)]
    win: bool,
    #[serde(default)]
    lose: bool,
}

impl GridGame {
    /// Build a game from its parts. Most callers want to parse a layout instead
    pub fn new(
        width: i32,
        height: i32,
        walls: BTreeSet<Position>,
        food: BTreeSet<Position>,
        capsules: Vec<Position>,
        pacman: Position,
        ghosts: Vec<GhostState>,
    ) -> Self {
        Self {
            width,
            height,
            walls,
            food,
            capsules,
            pacman,
            ghosts,
            score: 0,
            win: false,
            lose: false,
        }
    }

    #[allow(missing_docs)]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The full state of every ghost, ordered by agent index
    pub fn ghost_states(&self) -> &[GhostState] {
        &self.ghosts
    }

    /// Anything off the board counts as a wall
    pub fn is_wall(&self, pos: &Position) -> bool {
        pos.x < 0
            || pos.y < 0
            || pos.x >= self.width
            || pos.y >= self.height
            || self.walls.contains(pos)
    }

    fn open_directions(&self, from: &Position) -> impl Iterator<Item = Direction> + '_ {
        let from = *from;
        Direction::all()
            .into_iter()
            .filter(|d| *d != Direction::Stop)
            .filter(move |d| !self.is_wall(&from.step(*d)))
    }

    fn move_pacman(&mut self, direction: Direction) {
        let next = self.pacman.step(direction);
        if !self.is_wall(&next) {
            self.pacman = next;
        }

        self.score -= TIME_PENALTY;

        if self.food.remove(&self.pacman) {
            self.score += FOOD_SCORE;

            if self.food.is_empty() && !self.lose {
                self.score += WIN_SCORE;
                self.win = true;
            }
        }

        if let Some(i) = self.capsules.iter().position(|c| *c == self.pacman) {
            self.capsules.remove(i);
            for ghost in self.ghosts.iter_mut() {
                ghost.scared_timer = SCARED_TIME;
            }
        }

        for ghost_index in 0..self.ghosts.len() {
            self.check_collision(ghost_index);
        }
    }

    fn move_ghost(&mut self, ghost_index: usize, direction: Direction) {
        let next = self.ghosts[ghost_index].position.step(direction);
        if !self.is_wall(&next) {
            self.ghosts[ghost_index].position = next;
        }

        let ghost = &mut self.ghosts[ghost_index];
        ghost.scared_timer = ghost.scared_timer.saturating_sub(1);

        self.check_collision(ghost_index);
    }

    fn check_collision(&mut self, ghost_index: usize) {
        if self.win || self.lose {
            return;
        }

        let ghost = &mut self.ghosts[ghost_index];
        if ghost.position != self.pacman {
            return;
        }

        if ghost.scared_timer > 0 {
            self.score += GHOST_EATEN_SCORE;
            ghost.position = ghost.start;
            ghost.scared_timer = 0;
        } else {
            self.score -= LOSE_PENALTY;
            self.lose = true;
        }
    }
}

impl AgentCountableGame for GridGame {
    fn agent_count(&self) -> usize {
        self.ghosts.len() + 1
    }
}

impl ActionGeneratableGame for GridGame {
    type Action = Direction;

    fn legal_actions(&self, agent_index: usize) -> Vec<Direction> {
        if self.is_over() {
            return vec![];
        }

        if agent_index == PACMAN_INDEX {
            let mut actions = self.open_directions(&self.pacman).collect_vec();
            actions.push(Direction::Stop);
            return actions;
        }

        match self.ghosts.get(agent_index - 1) {
            Some(ghost) => {
                let actions = self.open_directions(&ghost.position).collect_vec();
                if actions.is_empty() {
                    vec![Direction::Stop]
                } else {
                    actions
                }
            }
            None => vec![],
        }
    }
}

impl SuccessorGeneratableGame for GridGame {
    fn generate_successor(&self, agent_index: usize, action: Direction) -> Self {
        let mut next = self.clone();
        if next.is_over() {
            return next;
        }

        if agent_index == PACMAN_INDEX {
            next.move_pacman(action);
        } else if agent_index <= next.ghosts.len() {
            next.move_ghost(agent_index - 1, action);
        }

        next
    }
}

impl VictorDeterminableGame for GridGame {
    fn is_win(&self) -> bool {
        self.win
    }

    fn is_lose(&self) -> bool {
        self.lose
    }
}

impl ScoreGettableGame for GridGame {
    fn raw_score(&self) -> f64 {
        self.score as f64
    }
}

impl PacmanPositionGettableGame for GridGame {
    fn pacman_position(&self) -> Position {
        self.pacman
    }
}

impl FoodGettableGame for GridGame {
    fn food_positions(&self) -> Vec<Position> {
        self.food.iter().copied().collect()
    }
}

impl CapsuleGettableGame for GridGame {
    fn capsule_positions(&self) -> Vec<Position> {
        self.capsules.clone()
    }
}

impl GhostGettableGame for GridGame {
    fn ghost_positions(&self) -> Vec<Position> {
        self.ghosts.iter().map(|g| g.position).collect()
    }

    fn ghost_scared_timers(&self) -> Vec<u32> {
        self.ghosts.iter().map(|g| g.scared_timer).collect()
    }
}

impl Display for GridGame {
    /// Writes the board back out in layout format, top row first
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..self.height).rev() {
            let row: String = (0..self.width)
                .map(|x| {
                    let pos = Position::new(x, y);
                    if pos == self.pacman {
                        'P'
                    } else if self.ghosts.iter().any(|g| g.position == pos) {
                        'G'
                    } else if self.walls.contains(&pos) {
                        '%'
                    } else if self.food.contains(&pos) {
                        '.'
                    } else if self.capsules.contains(&pos) {
                        'o'
                    } else {
                        ' '
                    }
                })
                .collect();
            writeln!(f, "{}", row)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_game() -> GridGame {
        include_str!("../fixtures/small.lay").parse().unwrap()
    }

    #[test]
    fn test_pacman_always_may_stop() {
        let game = small_game();

        assert_eq!(
            game.legal_actions(PACMAN_INDEX),
            vec![Direction::North, Direction::East, Direction::Stop]
        );
    }

    #[test]
    fn test_ghost_never_stops_voluntarily() {
        let game = small_game();

        assert_eq!(game.legal_actions(1), vec![Direction::South, Direction::West]);
        assert!(game.legal_actions(2).is_empty());
    }

    #[test]
    fn test_eating_food_scores() {
        let game = small_game();
        let next = game.generate_successor(PACMAN_INDEX, Direction::East);

        assert_eq!(next.pacman_position(), Position::new(2, 1));
        assert_eq!(next.raw_score(), (FOOD_SCORE - TIME_PENALTY) as f64);
        assert_eq!(next.food_positions().len(), 3);
        assert_eq!(game.food_positions().len(), 4, "the parent is untouched");
    }

    #[test]
    fn test_stopping_costs_time() {
        let game = small_game();
        let next = game.generate_successor(PACMAN_INDEX, Direction::Stop);

        assert_eq!(next.pacman_position(), game.pacman_position());
        assert_eq!(next.raw_score(), -(TIME_PENALTY as f64));
    }

    #[test]
    fn test_capsule_scares_ghosts() {
        let game: GridGame = "%%%%%%\n%Po G%\n%%%%%%".parse().unwrap();
        let next = game.generate_successor(PACMAN_INDEX, Direction::East);

        assert!(next.capsule_positions().is_empty());
        assert_eq!(next.ghost_scared_timers(), vec![SCARED_TIME]);

        let after_ghost = next.generate_successor(1, Direction::West);
        assert_eq!(after_ghost.ghost_scared_timers(), vec![SCARED_TIME - 1]);
    }

    #[test]
    fn test_running_into_a_ghost_loses() {
        let game: GridGame = "%%%%\n%PG%\n%%%%".parse().unwrap();
        let next = game.generate_successor(PACMAN_INDEX, Direction::East);

        assert!(next.is_lose());
        assert!(!next.is_win());
        assert!(next.legal_actions(PACMAN_INDEX).is_empty());
        assert_eq!(next.raw_score(), -((TIME_PENALTY + LOSE_PENALTY) as f64));
    }

    #[test]
    fn test_eating_a_scared_ghost_sends_it_home() {
        let game: GridGame = "%%%%%%\n%Po G%\n%%%%%%".parse().unwrap();
        let scared = game.generate_successor(PACMAN_INDEX, Direction::East);
        let adjacent = scared.generate_successor(1, Direction::West);
        let eaten = adjacent.generate_successor(PACMAN_INDEX, Direction::East);

        assert!(!eaten.is_lose());
        assert_eq!(eaten.ghost_positions(), vec![Position::new(4, 1)]);
        assert_eq!(eaten.ghost_scared_timers(), vec![0]);
        assert_eq!(
            eaten.raw_score() - adjacent.raw_score(),
            (GHOST_EATEN_SCORE - TIME_PENALTY) as f64
        );
    }

    #[test]
    fn test_last_food_wins() {
        let game: GridGame = "%%%%\n%P.%\n%%%%".parse().unwrap();
        let next = game.generate_successor(PACMAN_INDEX, Direction::East);

        assert!(next.is_win());
        assert_eq!(
            next.raw_score(),
            (FOOD_SCORE + WIN_SCORE - TIME_PENALTY) as f64
        );
    }

    #[test]
    fn test_display_round_trips_the_layout() {
        let layout = include_str!("../fixtures/small.lay");
        let game: GridGame = layout.parse().unwrap();

        assert_eq!(format!("{}", game), layout);
    }

    #[test]
    fn test_wire_representation_round_trips() {
        let game = small_game().generate_successor(PACMAN_INDEX, Direction::East);
        let json = serde_json::to_string(&game).unwrap();
        let back: GridGame = serde_json::from_str(&json).unwrap();

        assert_eq!(back, game);
    }
}
