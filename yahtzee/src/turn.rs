use rand::rngs::StdRng;

use crate::{Category, CategoryChoice, DiceRoll, Hand, IllegalMove, KeepDice, ScoreCard, MAX_ROLLS};

/// Summarizes the outcome of a [`KeepDice`] response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollOutcome {
    /// The remaining dice were rolled again.
    Rerolled,
    /// All five dice are set aside, so the hand is ready to be scored.
    AllKept { hand: Hand },
    /// None of the open categories can be reached with the kept dice anymore,
    /// so the turn ends without scoring.
    NoPotentialCategory,
}

/// Summarizes the outcome of a [`CategoryChoice`] response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoringOutcome {
    Scored { category: Category, score: u32 },
    Passed,
}

/// Applies a player's choice of dice to keep.
///
/// On failure, the dice are unchanged.
pub fn execute_keep(
    dice: &mut DiceRoll,
    scorecard: &ScoreCard,
    action: KeepDice,
    rng: &mut StdRng,
) -> Result<RollOutcome, IllegalMove> {
    let roll_number = dice.roll_number;
    let keep = Hand::try_from(action.keep)
        .map_err(|err| IllegalMove::InvalidKeptDice { roll_number, err })?;
    if !keep.is_submultiset_of(dice.rolled) {
        return Err(IllegalMove::KeptDiceNotRolled {
            roll_number,
            keep,
            rolled: dice.rolled,
        });
    }

    if action.stand || roll_number >= MAX_ROLLS || keep.same_dice_as(dice.rolled) {
        let hand = dice.keep_all();
        return Ok(RollOutcome::AllKept { hand });
    }

    let kept_after = dice
        .kept
        .concat(keep)
        .expect("Kept and rolled dice never exceed five");
    if scorecard.potential_categories(kept_after).is_empty() {
        dice.kept = kept_after;
        dice.rolled = Hand::new();
        return Ok(RollOutcome::NoPotentialCategory);
    }

    dice.reroll(keep, rng);
    Ok(RollOutcome::Rerolled)
}

/// Applies a player's choice of category for a complete hand.
///
/// The category must be open and satisfied by the hand, or the player passes.
pub fn execute_scoring(
    scorecard: &mut ScoreCard,
    player: &str,
    round: u32,
    hand: Hand,
    action: CategoryChoice,
) -> Result<ScoringOutcome, IllegalMove> {
    match action.0 {
        Some(category) => {
            if scorecard.is_open(category) && !category.is_valid(hand) {
                return Err(IllegalMove::CategoryNotSatisfied { category, hand });
            }
            let score = scorecard.set_score(category, hand, player, round)?;
            Ok(ScoringOutcome::Scored { category, score })
        }
        None => Ok(ScoringOutcome::Passed),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::{hand, InvalidHand};

    fn dice(kept: Hand, rolled: Hand, roll_number: u8) -> DiceRoll {
        DiceRoll {
            kept,
            rolled,
            roll_number,
        }
    }

    fn keep(values: &[u8], stand: bool) -> KeepDice {
        KeepDice {
            keep: values.to_vec(),
            stand,
        }
    }

    #[test]
    fn reroll_keeps_dice() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = dice(Hand::new(), hand!("66123"), 1);
        let outcome = execute_keep(&mut state, &ScoreCard::new(), keep(&[6, 6], false), &mut rng);
        assert_eq!(outcome, Ok(RollOutcome::Rerolled));
        assert_eq!(state.kept, hand!("66"));
        assert_eq!(state.rolled.len(), 3);
        assert_eq!(state.roll_number, 2);
    }

    #[test]
    fn stand_and_third_roll_keep_everything() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = dice(hand!("66"), hand!("612"), 2);
        let outcome = execute_keep(&mut state, &ScoreCard::new(), keep(&[6], true), &mut rng);
        assert_eq!(
            outcome,
            Ok(RollOutcome::AllKept {
                hand: hand!("66612")
            })
        );

        let mut state = dice(hand!("66"), hand!("612"), 3);
        let outcome = execute_keep(&mut state, &ScoreCard::new(), keep(&[], false), &mut rng);
        assert_eq!(
            outcome,
            Ok(RollOutcome::AllKept {
                hand: hand!("66612")
            })
        );
    }

    #[test]
    fn illegal_keeps() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = dice(Hand::new(), hand!("66123"), 1);
        assert_eq!(
            execute_keep(&mut state, &ScoreCard::new(), keep(&[6, 6, 6], false), &mut rng),
            Err(IllegalMove::KeptDiceNotRolled {
                roll_number: 1,
                keep: hand!("666"),
                rolled: hand!("66123"),
            })
        );
        assert_eq!(
            execute_keep(&mut state, &ScoreCard::new(), keep(&[9], false), &mut rng),
            Err(IllegalMove::InvalidKeptDice {
                roll_number: 1,
                err: InvalidHand::DieOutOfRange { value: 9 },
            })
        );
        assert_eq!(state.rolled, hand!("66123"));
        assert_eq!(state.roll_number, 1);
    }

    #[test]
    fn turn_ends_without_potential_category() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut scorecard = ScoreCard::new();
        for category in crate::ALL_CATEGORIES {
            if category != Category::Yahtzee {
                scorecard
                    .set_score(category, hand!("12345"), "Alice", 1)
                    .unwrap();
            }
        }
        let mut state = dice(Hand::new(), hand!("11234"), 1);
        assert_eq!(
            execute_keep(&mut state, &scorecard, keep(&[1, 2], false), &mut rng),
            Ok(RollOutcome::NoPotentialCategory)
        );
    }

    #[test]
    fn scoring() {
        let mut scorecard = ScoreCard::new();
        let hand = hand!("33322");
        assert_eq!(
            execute_scoring(
                &mut scorecard,
                "Alice",
                1,
                hand,
                CategoryChoice(Some(Category::FullHouse))
            ),
            Ok(ScoringOutcome::Scored {
                category: Category::FullHouse,
                score: 25
            })
        );
        assert_eq!(
            execute_scoring(&mut scorecard, "Bob", 1, hand, CategoryChoice(None)),
            Ok(ScoringOutcome::Passed)
        );
        assert_eq!(
            execute_scoring(
                &mut scorecard,
                "Bob",
                1,
                hand,
                CategoryChoice(Some(Category::FullHouse))
            ),
            Err(IllegalMove::CategoryNotAvailable {
                category: Category::FullHouse
            })
        );
    }

    #[test]
    fn scoring_requires_a_fitting_hand() {
        let mut scorecard = ScoreCard::new();
        let hand = hand!("12346");
        assert_eq!(
            execute_scoring(
                &mut scorecard,
                "Alice",
                1,
                hand,
                CategoryChoice(Some(Category::Fives))
            ),
            Err(IllegalMove::CategoryNotSatisfied {
                category: Category::Fives,
                hand,
            })
        );
        assert_eq!(
            execute_scoring(
                &mut scorecard,
                "Alice",
                1,
                hand,
                CategoryChoice(Some(Category::LargeStraight))
            ),
            Err(IllegalMove::CategoryNotSatisfied {
                category: Category::LargeStraight,
                hand,
            })
        );
        assert!(scorecard.is_open(Category::Fives));
        assert!(scorecard.is_open(Category::LargeStraight));
        assert_eq!(
            execute_scoring(
                &mut scorecard,
                "Alice",
                1,
                hand,
                CategoryChoice(Some(Category::SmallStraight))
            ),
            Ok(ScoringOutcome::Scored {
                category: Category::SmallStraight,
                score: 30
            })
        );
    }
}
