mod game;
mod player;
mod recording;
pub use game::*;
pub use player::*;
pub use recording::*;

/// Thirteen times the number of categories.
pub const DEFAULT_MAX_ROUNDS: u32 = 13 * 12;

pub struct Config {
    pub rng: rand::rngs::StdRng,
    pub recorder: Option<recording::Recorder>,
    /// End games after this many rounds even if the scorecard isn't full.
    ///
    /// Passing is legal, so without a limit two bots that always pass would
    /// play forever.
    pub max_rounds: u32,
}
