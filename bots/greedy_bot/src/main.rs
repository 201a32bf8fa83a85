use clap::Parser;
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, SeedableRng};
use yahtzee::{CategoryChoice, CategorySet, Hand, KeepDice};
use yahtzee_bot_utils::{best_scoring_categories, Bot};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    GreedyBot { rng }.run()
}

/// Never rerolls, and takes whatever scores the most right away.
struct GreedyBot {
    rng: StdRng,
}

impl Bot for GreedyBot {
    fn new_game(&mut self, _name: String) {}

    fn play_roll(
        &mut self,
        _open_categories: CategorySet,
        _kept_dice: Hand,
        rolled_dice: Hand,
        _roll_number: u8,
    ) -> KeepDice {
        KeepDice {
            keep: rolled_dice.into(),
            stand: true,
        }
    }

    fn choose_category(&mut self, open_categories: CategorySet, dice: Hand) -> CategoryChoice {
        let top_choices = best_scoring_categories(open_categories, dice);
        CategoryChoice(top_choices.choose(&mut self.rng).copied())
    }
}
