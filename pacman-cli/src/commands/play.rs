use std::path::PathBuf;

use color_eyre::eyre::Result;
use itertools::Itertools;
use pacman_minimax::{BoxedAgent, PacmanAgent};
use pacman_types::{
    types::{
        ActionGeneratableGame, AgentCountableGame, ScoreGettableGame, SuccessorGeneratableGame,
        VictorDeterminableGame, PACMAN_INDEX,
    },
    GridGame,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info, warn};

use super::{load_game, AgentArgs};

#[derive(clap::Args, Debug)]
pub struct Play {
    /// Layout to play, either `.lay` text or a `.json` game state
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    #[clap(flatten)]
    agent: AgentArgs,

    /// Stop the game after this many rounds
    #[clap(long, value_parser, default_value_t = 500)]
    max_turns: usize,

    /// Seed for the ghosts' random moves. Uses entropy if not specified
    #[clap(long, value_parser)]
    ghost_seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    Win,
    Lose,
    Stuck,
    OutOfTurns,
}

/// Play rounds until the game is decided, pacman can't move, or we run out of turns
fn play_game(
    mut game: GridGame,
    agent: &mut BoxedAgent<GridGame>,
    rng: &mut StdRng,
    max_turns: usize,
) -> (GridGame, Ending, usize) {
    for turn in 0..max_turns {
        if game.is_win() {
            return (game, Ending::Win, turn);
        }
        if game.is_lose() {
            return (game, Ending::Lose, turn);
        }

        let Some(action) = agent.get_action(&game) else {
            return (game, Ending::Stuck, turn);
        };
        game = game.generate_successor(PACMAN_INDEX, action);
        debug!(turn, %action, score = game.raw_score(), "Pacman moved");

        for ghost in 1..game.agent_count() {
            if game.is_over() {
                break;
            }

            if let Some(action) = game.legal_actions(ghost).choose(rng).copied() {
                game = game.generate_successor(ghost, action);
            }
        }
    }

    let ending = if game.is_win() {
        Ending::Win
    } else if game.is_lose() {
        Ending::Lose
    } else {
        Ending::OutOfTurns
    };

    (game, ending, max_turns)
}

/// One line per ghost with where it ended up and how scared it still is
fn ghost_summary(game: &GridGame) -> Vec<String> {
    game.ghost_states()
        .iter()
        .enumerate()
        .map(|(i, ghost)| {
            format!(
                "Ghost {} at {} (started at {}), scared for {} more moves",
                i + 1,
                ghost.position,
                ghost.start,
                ghost.scared_timer
            )
        })
        .collect_vec()
}

impl Play {
    pub fn run(self) -> Result<()> {
        let game = load_game(&self.layout)?;
        let spec = self.agent.spec()?;
        let mut agent: BoxedAgent<GridGame> = spec.build();

        let mut rng = match self.ghost_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            agent = %agent.name(),
            width = game.width(),
            height = game.height(),
            ghosts = game.ghost_states().len(),
            max_turns = self.max_turns,
            "Starting game"
        );
        let (game, ending, turns) = play_game(game, &mut agent, &mut rng, self.max_turns);

        println!("{}", game);
        for line in ghost_summary(&game) {
            println!("{}", line);
        }
        match ending {
            Ending::Win => info!(turns, score = game.raw_score(), "Pacman won"),
            Ending::Lose => info!(turns, score = game.raw_score(), "Pacman lost"),
            Ending::Stuck => warn!(turns, "Pacman had no legal actions"),
            Ending::OutOfTurns => warn!(turns, score = game.raw_score(), "Ran out of turns"),
        }
        println!("{:?} after {} turns with a score of {}", ending, turns, game.raw_score());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pacman_minimax::AgentSpec;

    use super::*;

    #[test]
    fn test_eating_the_last_pellet_wins() {
        let game: GridGame = "%%%%%\n%P..%\n%%%%%".parse().unwrap();
        let mut agent = AgentSpec::parse("AlphaBetaAgent", "depth=2")
            .unwrap()
            .build::<GridGame>();
        let mut rng = StdRng::seed_from_u64(0);

        let (game, ending, turns) = play_game(game, &mut agent, &mut rng, 10);

        assert_eq!(ending, Ending::Win);
        assert_eq!(turns, 2);
        assert_eq!(game.raw_score(), 518.0);
    }

    #[test]
    fn test_ghost_summary_lists_every_ghost() {
        let game: GridGame = include_str!("../../../pacman-types/fixtures/medium.lay")
            .parse()
            .unwrap();
        assert_eq!((game.width(), game.height()), (20, 7));

        assert_eq!(
            ghost_summary(&game),
            vec![
                "Ghost 1 at (8, 5) (started at (8, 5)), scared for 0 more moves".to_owned(),
                "Ghost 2 at (11, 5) (started at (11, 5)), scared for 0 more moves".to_owned(),
            ]
        );
    }

    #[test]
    fn test_turn_limit() {
        let game: GridGame = "%%%%%%\n%P %.%\n%%%%%%".parse().unwrap();
        let mut agent = AgentSpec::parse("MinimaxAgent", "depth=1")
            .unwrap()
            .build::<GridGame>();
        let mut rng = StdRng::seed_from_u64(0);

        let (_, ending, turns) = play_game(game, &mut agent, &mut rng, 3);

        assert_eq!(ending, Ending::OutOfTurns);
        assert_eq!(turns, 3);
    }
}
