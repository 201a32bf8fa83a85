use clap::Parser;
use rand::{rngs::StdRng, seq::IteratorRandom, Rng, SeedableRng};
use yahtzee::{valid_categories, CategoryChoice, CategorySet, Hand, KeepDice};
use yahtzee_bot_utils::Bot;

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

    RandomBot { rng }.run()
}

struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn new_game(&mut self, _name: String) {}

    fn play_roll(
        &mut self,
        _open_categories: CategorySet,
        _kept_dice: Hand,
        rolled_dice: Hand,
        _roll_number: u8,
    ) -> KeepDice {
        let keep: Vec<u8> = rolled_dice
            .iter()
            .filter(|_| self.rng.gen_bool(0.5))
            .collect();
        KeepDice {
            keep,
            stand: self.rng.gen_bool(0.2),
        }
    }

    fn choose_category(&mut self, open_categories: CategorySet, dice: Hand) -> CategoryChoice {
        let valid = open_categories & valid_categories(dice);
        CategoryChoice(valid.into_iter().choose(&mut self.rng))
    }
}
