use yahtzee::{
    recommend, select_target, CategoryChoice, CategorySet, Hand, KeepDice, OutcomeTree,
};
use yahtzee_bot_utils::Bot;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

/// Follows the recommendations of the strategy engine.
struct AdvisorBot {
    tree: &'static OutcomeTree,
    name: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    AdvisorBot {
        tree: OutcomeTree::shared(),
        name: String::new(),
    }
    .run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

impl Bot for AdvisorBot {
    fn new_game(&mut self, name: String) {
        debug!(%name, "New game");
        self.name = name;
    }

    fn play_roll(
        &mut self,
        open_categories: CategorySet,
        kept_dice: Hand,
        rolled_dice: Hand,
        roll_number: u8,
    ) -> KeepDice {
        let recommendation = recommend(self.tree, open_categories, kept_dice, rolled_dice);
        info!(
            player = %self.name,
            roll_number,
            kept = %kept_dice,
            rolled = %rolled_dice,
            "Advice:\n{}",
            recommendation
        );
        KeepDice {
            keep: recommendation.dice_to_keep.into(),
            stand: recommendation.stand,
        }
    }

    fn choose_category(&mut self, open_categories: CategorySet, dice: Hand) -> CategoryChoice {
        let category = select_target(self.tree, open_categories, dice);
        debug!(player = %self.name, %dice, ?category, "Choosing category");
        CategoryChoice(category)
    }
}
