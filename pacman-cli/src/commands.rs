pub mod decide;
pub mod play;

use std::{fs::read_to_string, path::Path};

use decide::Decide;
use play::Play;

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr};
use pacman_minimax::{AgentSpec, GreedyWeights};
use pacman_types::GridGame;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Pick pacman's next action for a single board
    Decide(Decide),
    /// Play a whole game against ghosts that move at random
    Play(Play),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Decide(d) => d.run()?,
            Command::Play(p) => p.run()?,
        }

        Ok(())
    }
}

/// The agent flags shared by every command
#[derive(clap::Args, Debug)]
pub(crate) struct AgentArgs {
    /// Agent to run: ReflexAgent, MinimaxAgent, AlphaBetaAgent or ExpectimaxAgent
    #[clap(short, long, value_parser, default_value = "MinimaxAgent")]
    agent: String,

    /// Comma separated agent arguments, for example `depth=3,evalFn=better`
    #[clap(long, value_parser, default_value = "")]
    agent_args: String,

    /// JSON file overriding the reflex agent's weights
    #[clap(short, long, value_parser)]
    weights: Option<std::path::PathBuf>,
}

impl AgentArgs {
    pub fn spec(&self) -> Result<AgentSpec> {
        let spec = AgentSpec::parse(&self.agent, &self.agent_args)
            .wrap_err_with(|| format!("Could not build agent {}", self.agent))?;

        Ok(spec.with_weights(load_weights(self.weights.as_deref())?))
    }
}

/// Load a board from either layout text or the JSON wire format, picked by file extension
pub(crate) fn load_game(path: &Path) -> Result<GridGame> {
    let contents = read_to_string(path)
        .wrap_err_with(|| format!("Could not read layout {}", path.display()))?;

    let is_json = path.extension().map_or(false, |ext| ext == "json");
    if is_json {
        serde_json::from_str::<GridGame>(&contents)
            .wrap_err_with(|| format!("{} is not a valid game state", path.display()))
    } else {
        contents
            .parse::<GridGame>()
            .wrap_err_with(|| format!("{} is not a valid layout", path.display()))
    }
}

pub(crate) fn load_weights(path: Option<&Path>) -> Result<GreedyWeights> {
    let Some(path) = path else {
        return Ok(GreedyWeights::default());
    };

    let contents = read_to_string(path)
        .wrap_err_with(|| format!("Could not read weights {}", path.display()))?;

    serde_json::from_str::<GreedyWeights>(&contents)
        .wrap_err_with(|| format!("{} is not a valid set of weights", path.display()))
}
