use crate::{Category, Hand};

/// The error type for constructing a [`Hand`](crate::Hand).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidHand {
    DieOutOfRange { value: u8 },
    TooManyDice { len: usize },
    UnexpectedChar { c: char },
}

impl std::error::Error for InvalidHand {}

impl std::fmt::Display for InvalidHand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidHand::DieOutOfRange { value } => {
                write!(f, "A die shows {}, but dice only have the faces 1 to 6", value)
            }
            InvalidHand::TooManyDice { len } => {
                write!(f, "A hand holds at most five dice, but {} were given", len)
            }
            InvalidHand::UnexpectedChar { c } => {
                write!(f, "Unexpected character {:?} in a hand of dice", c)
            }
        }
    }
}

/// The error type for one turn, i.e. a response by a bot that breaks the rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    KeptDiceNotRolled {
        roll_number: u8,
        keep: Hand,
        rolled: Hand,
    },
    InvalidKeptDice {
        roll_number: u8,
        err: InvalidHand,
    },
    CategoryNotAvailable {
        category: Category,
    },
    CategoryNotSatisfied {
        category: Category,
        hand: Hand,
    },
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::InvalidKeptDice { err, .. } => Some(err),
            _ => None,
        }
    }
}

fn ordinal_number(num: u8) -> &'static str {
    match num {
        1 => "first",
        2 => "second",
        3 => "third",
        _ => panic!("ordinal_number called with {}", num),
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::KeptDiceNotRolled {
                roll_number,
                keep,
                rolled,
            } => write!(
                f,
                "Tried to keep {} after the {} roll, but only {} were rolled",
                keep,
                ordinal_number(*roll_number),
                rolled
            ),
            IllegalMove::InvalidKeptDice { roll_number, err: _ } => write!(
                f,
                "The dice to keep after the {} roll are not a valid hand",
                ordinal_number(*roll_number)
            ),
            IllegalMove::CategoryNotAvailable { category } => write!(
                f,
                "Tried to score {}, but that category is already filled",
                category
            ),
            IllegalMove::CategoryNotSatisfied { category, hand } => {
                write!(f, "Tried to score {} with {}, which doesn't fit", category, hand)
            }
        }
    }
}
