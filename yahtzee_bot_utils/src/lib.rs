mod scoring;
pub use scoring::*;

use yahtzee::{CategoryChoice, CategorySet, Hand, KeepDice, Okay, Request};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, name: String);
    fn play_roll(
        &mut self,
        open_categories: CategorySet,
        kept_dice: Hand,
        rolled_dice: Hand,
        roll_number: u8,
    ) -> KeepDice;
    fn choose_category(&mut self, open_categories: CategorySet, dice: Hand) -> CategoryChoice;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { name } => {
                    self.new_game(name);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::PlayRoll {
                    open_categories,
                    kept_dice,
                    rolled_dice,
                    roll_number,
                } => serde_json::to_writer(
                    &mut stdout,
                    &self.play_roll(open_categories, kept_dice, rolled_dice, roll_number),
                )?,
                Request::ChooseCategory {
                    open_categories,
                    dice,
                } => serde_json::to_writer(
                    &mut stdout,
                    &self.choose_category(open_categories, dice),
                )?,
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}
