use rand::rngs::StdRng;
use rand::Rng;

use crate::{Hand, FACES};

/// The number of times the dice may be rolled in one turn.
pub const MAX_ROLLS: u8 = 3;

pub fn roll_die(rng: &mut StdRng) -> u8 {
    rng.gen_range(FACES)
}

/// Rolls `num_dice` dice.
///
/// # Panics
///
/// Panics if `num_dice` is greater than five.
pub fn roll_dice(num_dice: usize, rng: &mut StdRng) -> Hand {
    let values: Vec<u8> = (0..num_dice).map(|_| roll_die(rng)).collect();
    Hand::try_from(values).unwrap_or_else(|err| panic!("Cannot roll {} dice: {}", num_dice, err))
}

/// The dice of the player whose turn it is.
#[derive(Clone, Debug)]
pub struct DiceRoll {
    pub kept: Hand,
    pub rolled: Hand,
    /// Starts at 1 with the first roll of the turn.
    pub roll_number: u8,
}

impl DiceRoll {
    /// The first roll of a turn: all five dice.
    pub fn new(rng: &mut StdRng) -> Self {
        Self {
            kept: Hand::new(),
            rolled: roll_dice(Hand::new().dice_left(), rng),
            roll_number: 1,
        }
    }

    /// Sets `keep` aside and rolls the other dice again.
    ///
    /// `keep` must be drawn from the rolled dice.
    pub fn reroll(&mut self, keep: Hand, rng: &mut StdRng) {
        debug_assert!(keep.is_submultiset_of(self.rolled));
        debug_assert!(self.roll_number < MAX_ROLLS);
        self.kept = self
            .kept
            .concat(keep)
            .expect("Kept and rolled dice never exceed five");
        self.rolled = roll_dice(self.kept.dice_left(), rng);
        self.roll_number += 1;
    }

    /// Sets all rolled dice aside, which completes the hand.
    pub fn keep_all(&mut self) -> Hand {
        self.kept = self
            .kept
            .concat(self.rolled)
            .expect("Kept and rolled dice never exceed five");
        self.rolled = Hand::new();
        self.kept
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn three_rolls() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut dice = DiceRoll::new(&mut rng);
        assert_eq!(dice.rolled.len(), 5);
        assert_eq!(dice.roll_number, 1);

        let keep = dice.rolled.suffix(3);
        dice.reroll(keep, &mut rng);
        assert_eq!(dice.kept, keep);
        assert_eq!(dice.rolled.len(), 3);
        assert_eq!(dice.roll_number, 2);

        dice.reroll(Hand::new(), &mut rng);
        assert_eq!(dice.rolled.len(), 3);
        assert_eq!(dice.roll_number, 3);

        let hand = dice.keep_all();
        assert!(hand.is_complete());
        assert!(dice.rolled.is_empty());
        assert!(keep.is_submultiset_of(hand));
    }

    #[test]
    fn seeded_rolls_repeat() {
        let a = roll_dice(5, &mut StdRng::seed_from_u64(42));
        let b = roll_dice(5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(a.iter().all(|d| FACES.contains(&d)));
    }
}
