use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    potential_categories, valid_categories, Category, CategorySet, Hand, IllegalMove,
    ALL_CATEGORIES,
};

/// A filled category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// The name of the player who filled the category.
    pub player: String,
    pub round: u32,
}

/// The scorecard that both players of a game write to.
///
/// Whoever scores a category first owns it, and a filled category never
/// becomes open again.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Indexed by [`Category::to_index()`].
    entries: [Option<ScoreEntry>; 12],
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, category: Category) -> Option<&ScoreEntry> {
        self.entries[usize::from(category.to_index())].as_ref()
    }

    pub fn is_open(&self, category: Category) -> bool {
        self.entry(category).is_none()
    }

    /// The categories nobody has filled yet.
    pub fn open_categories(&self) -> CategorySet {
        ALL_CATEGORIES
            .into_iter()
            .filter(|&c| self.is_open(c))
            .collect()
    }

    /// Open categories that can still be reached after keeping `kept`.
    pub fn potential_categories(&self, kept: Hand) -> CategorySet {
        self.open_categories() & potential_categories(kept)
    }

    /// Open categories that `hand` satisfies.
    pub fn valid_categories(&self, hand: Hand) -> CategorySet {
        self.open_categories() & valid_categories(hand)
    }

    /// Fills `category` with the score of `hand` and returns that score.
    pub fn set_score(
        &mut self,
        category: Category,
        hand: Hand,
        player: &str,
        round: u32,
    ) -> Result<u32, IllegalMove> {
        let slot = &mut self.entries[usize::from(category.to_index())];
        if slot.is_some() {
            return Err(IllegalMove::CategoryNotAvailable { category });
        }
        let score = category.score(hand);
        *slot = Some(ScoreEntry {
            score,
            player: player.to_owned(),
            round,
        });
        Ok(score)
    }

    pub fn total_score(&self, player: &str) -> u32 {
        self.entries
            .iter()
            .flatten()
            .filter(|entry| entry.player == player)
            .map(|entry| entry.score)
            .sum()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(Option::is_some)
    }

    /// Everyone who has filled at least one category, in order of first appearance
    /// on the card.
    pub fn players(&self) -> Vec<&str> {
        let mut players: Vec<&str> = Vec::new();
        for entry in self.entries.iter().flatten() {
            if !players.contains(&entry.player.as_str()) {
                players.push(&entry.player);
            }
        }
        players
    }
}

/// A game in progress, as saved to disk.
///
/// The text format is a `Round:` line, a `Scorecard:` line and then one line
/// per category in scorecard order: `0` for an open category, otherwise the
/// score, the player and the round, separated by spaces.
///
/// ```
/// use yahtzee::{hand, Category, GameSnapshot};
/// let mut snapshot = GameSnapshot::new();
/// snapshot.round = 2;
/// snapshot.scorecard.set_score(Category::Fives, hand!("55123"), "Alice", 1).unwrap();
/// let text = snapshot.to_string();
/// assert!(text.starts_with("Round: 2\nScorecard:\n0\n0\n0\n0\n10 Alice 1\n0\n"));
/// assert_eq!(text.parse::<GameSnapshot>().unwrap(), snapshot);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub round: u32,
    pub scorecard: ScoreCard,
}

impl GameSnapshot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for GameSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Round: {}", self.round)?;
        writeln!(f, "Scorecard:")?;
        for category in ALL_CATEGORIES {
            match self.scorecard.entry(category) {
                Some(ScoreEntry {
                    score,
                    player,
                    round,
                }) => writeln!(f, "{} {} {}", score, player, round)?,
                None => writeln!(f, "0")?,
            }
        }
        Ok(())
    }
}

/// The error type for parsing a [`GameSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScoreCardParseErr {
    MissingLine { expected: &'static str },
    InvalidRound { line: String },
    InvalidEntry { category: Category, line: String },
    UnexpectedLine { line: String },
}

impl std::error::Error for ScoreCardParseErr {}

impl std::fmt::Display for ScoreCardParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreCardParseErr::MissingLine { expected } => {
                write!(f, "Saved game ends before the {} line", expected)
            }
            ScoreCardParseErr::InvalidRound { line } => {
                write!(f, "Expected \"Round: <number>\", found {:?}", line)
            }
            ScoreCardParseErr::InvalidEntry { category, line } => write!(
                f,
                "Expected \"0\" or \"<score> <player> <round>\" for {}, found {:?}",
                category, line
            ),
            ScoreCardParseErr::UnexpectedLine { line } => {
                write!(f, "Unexpected line {:?} in saved game", line)
            }
        }
    }
}

fn parse_entry(line: &str) -> Option<ScoreEntry> {
    let (score, rest) = line.split_once(' ')?;
    let (player, round) = rest.rsplit_once(' ')?;
    if player.is_empty() {
        return None;
    }
    Some(ScoreEntry {
        score: score.parse().ok()?,
        player: player.to_owned(),
        round: round.parse().ok()?,
    })
}

impl FromStr for GameSnapshot {
    type Err = ScoreCardParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());

        let line = lines
            .next()
            .ok_or(ScoreCardParseErr::MissingLine { expected: "round" })?;
        let round = line
            .strip_prefix("Round:")
            .and_then(|num| num.trim().parse().ok())
            .ok_or_else(|| ScoreCardParseErr::InvalidRound {
                line: line.to_owned(),
            })?;

        match lines.next() {
            Some("Scorecard:") => {}
            Some(line) => {
                return Err(ScoreCardParseErr::UnexpectedLine {
                    line: line.to_owned(),
                })
            }
            None => {
                return Err(ScoreCardParseErr::MissingLine {
                    expected: "scorecard",
                })
            }
        }

        let mut scorecard = ScoreCard::new();
        for category in ALL_CATEGORIES {
            let line = lines.next().ok_or(ScoreCardParseErr::MissingLine {
                expected: "category",
            })?;
            if line == "0" {
                continue;
            }
            let entry = parse_entry(line).ok_or_else(|| ScoreCardParseErr::InvalidEntry {
                category,
                line: line.to_owned(),
            })?;
            scorecard.entries[usize::from(category.to_index())] = Some(entry);
        }

        if let Some(line) = lines.next() {
            return Err(ScoreCardParseErr::UnexpectedLine {
                line: line.to_owned(),
            });
        }
        Ok(GameSnapshot { round, scorecard })
    }
}
