use serde::{Deserialize, Serialize};

use crate::{Category, CategorySet, Hand};

/// Request for a bot to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        /// The name the bot plays under.
        name: String,
    },
    /// Request to decide which of the rolled dice to keep.
    ///
    /// The response should be a [`KeepDice`].
    PlayRoll {
        /// The categories nobody has filled yet, in scorecard order.
        open_categories: CategorySet,
        /// The dice set aside after earlier rolls of this turn.
        kept_dice: Hand,
        /// The dice that were just rolled.
        rolled_dice: Hand,
        /// 1, 2 or 3. After the third roll, all dice are kept regardless of the response.
        roll_number: u8,
    },
    /// Request to pick the category to score the complete hand in.
    ///
    /// The response should be a [`CategoryChoice`]. This is only sent if at
    /// least one open category is valid for the dice.
    ChooseCategory {
        open_categories: CategorySet,
        dice: Hand,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

/// Which dice to set aside before the next roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepDice {
    /// Must be drawn from the rolled dice. Kept as plain numbers so that the
    /// judge can report invalid dice as an illegal move.
    pub keep: Vec<u8>,
    /// If set, all rolled dice are kept and the turn moves on to scoring.
    #[serde(default)]
    pub stand: bool,
}

/// The category to score in, or `None` to pass without scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChoice(pub Option<Category>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand;

    #[test]
    fn request_json() {
        let req = Request::PlayRoll {
            open_categories: CategorySet::new()
                .insert(Category::Yahtzee)
                .insert(Category::Sixes),
            kept_dice: hand!("66"),
            rolled_dice: hand!("612"),
            roll_number: 2,
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"type":"PlayRoll","open_categories":["sixes","yahtzee"],"kept_dice":[6,6],"rolled_dice":[6,1,2],"roll_number":2}"#
        );
        assert!(matches!(
            serde_json::from_str::<Request>(r#"{"type":"Bye"}"#).unwrap(),
            Request::Bye
        ));
        assert!(serde_json::from_str::<Request>(
            r#"{"type":"ChooseCategory","open_categories":[],"dice":[7]}"#
        )
        .is_err());
    }

    #[test]
    fn response_json() {
        let keep: KeepDice = serde_json::from_str(r#"{"keep":[6]}"#).unwrap();
        assert_eq!(
            keep,
            KeepDice {
                keep: vec![6],
                stand: false
            }
        );
        let choice: CategoryChoice = serde_json::from_str(r#""full_house""#).unwrap();
        assert_eq!(choice, CategoryChoice(Some(Category::FullHouse)));
        let choice: CategoryChoice = serde_json::from_str("null").unwrap();
        assert_eq!(choice, CategoryChoice(None));
    }
}
