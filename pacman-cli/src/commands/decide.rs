use std::path::PathBuf;

use color_eyre::eyre::Result;
use itertools::Itertools;
use pacman_minimax::PacmanAgent;
use pacman_types::GridGame;
use tracing::info;

use super::{load_game, AgentArgs};

#[derive(clap::Args, Debug)]
pub struct Decide {
    /// Layout to decide on, either `.lay` text or a `.json` game state
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    #[clap(flatten)]
    agent: AgentArgs,

    /// Print every candidate action with its value, not just the chosen one
    #[clap(long, value_parser, default_value_t = false)]
    tree: bool,
}

impl Decide {
    pub fn run(self) -> Result<()> {
        let game = load_game(&self.layout)?;
        let spec = self.agent.spec()?;

        println!("{}", game);

        let action = match spec.build_search::<GridGame>() {
            Some(search) => {
                let outcome = search.search(&game);

                if self.tree {
                    println!("{}", outcome.to_text_tree());
                }
                info!(stats = ?outcome.stats(), "Finished search");

                outcome.action()
            }
            None => {
                let mut agent = spec.build_reflex();

                if self.tree {
                    let scored = agent.scored_actions(&game);
                    println!(
                        "{}",
                        scored
                            .iter()
                            .map(|(action, score)| format!("{} {:.2}", action, score))
                            .join("\n")
                    );
                }

                agent.get_action(&game)
            }
        };

        match action {
            Some(action) => println!("{}", action),
            None => println!("Pacman has no legal actions"),
        }

        Ok(())
    }
}
