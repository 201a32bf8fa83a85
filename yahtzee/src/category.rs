use serde::{Deserialize, Serialize};

use crate::{CategorySet, Hand};

/// A scoring category on the scorecard.
///
/// The six upper-section categories score the matching faces, the lower
/// section scores patterns. Categories are plain values without state, so the
/// rules are pure functions of the [`Hand`] they are given.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    Aces,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
}

/// All categories, in scorecard order.
pub const ALL_CATEGORIES: [Category; 12] = [
    Category::Aces,
    Category::Twos,
    Category::Threes,
    Category::Fours,
    Category::Fives,
    Category::Sixes,
    Category::ThreeOfAKind,
    Category::FourOfAKind,
    Category::FullHouse,
    Category::SmallStraight,
    Category::LargeStraight,
    Category::Yahtzee,
];

const SMALL_STRAIGHTS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];
const LARGE_STRAIGHTS: [[u8; 5]; 2] = [[1, 2, 3, 4, 5], [2, 3, 4, 5, 6]];

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Aces => "Aces",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::Yahtzee => "Yahtzee",
        };
        write!(f, "{}", name)
    }
}

impl Category {
    /// The position of this category in [`ALL_CATEGORIES`].
    pub fn to_index(self) -> u8 {
        self as u8
    }

    /// The category at position `idx` in [`ALL_CATEGORIES`], if there is one.
    pub fn from_index(idx: u8) -> Option<Self> {
        ALL_CATEGORIES.get(usize::from(idx)).copied()
    }

    /// The face counted by an upper-section category.
    pub fn face_value(self) -> Option<u8> {
        match self {
            Category::Aces => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    pub fn is_straight(self) -> bool {
        matches!(self, Category::SmallStraight | Category::LargeStraight)
    }

    /// Categories that are built from dice of a single face.
    pub fn is_same_kind(self) -> bool {
        matches!(
            self,
            Category::ThreeOfAKind | Category::FourOfAKind | Category::Yahtzee
        )
    }

    /// Whether the hand already satisfies this category.
    ///
    /// Upper-section categories accept partial hands; the pattern categories
    /// expect five dice but are well-defined for fewer.
    pub fn is_valid(self, hand: Hand) -> bool {
        if let Some(face) = self.face_value() {
            return hand.contains(face);
        }
        match self {
            Category::ThreeOfAKind => hand.max_multiplicity() >= 3,
            Category::FourOfAKind => hand.max_multiplicity() >= 4,
            Category::FullHouse => {
                let counts = hand.counts();
                counts.contains(&3) && counts.contains(&2)
            }
            Category::SmallStraight => SMALL_STRAIGHTS
                .iter()
                .any(|run| run.iter().all(|&d| hand.contains(d))),
            Category::LargeStraight => LARGE_STRAIGHTS
                .iter()
                .any(|run| run.iter().all(|&d| hand.contains(d))),
            Category::Yahtzee => hand.is_complete() && hand.distinct_count() == 1,
            _ => unreachable!("upper-section categories are handled above"),
        }
    }

    /// The points this hand is worth in this category.
    pub fn score(self, hand: Hand) -> u32 {
        if let Some(face) = self.face_value() {
            return hand.count(face) as u32 * u32::from(face);
        }
        if !self.is_valid(hand) {
            return 0;
        }
        match self {
            Category::ThreeOfAKind | Category::FourOfAKind => hand.sum(),
            Category::FullHouse => 25,
            Category::SmallStraight => 30,
            Category::LargeStraight => 40,
            Category::Yahtzee => 50,
            _ => unreachable!("upper-section categories are handled above"),
        }
    }

    /// Whether this category can still be (or already is) satisfied once the
    /// remaining `5 - hand.len()` dice are rolled.
    ///
    /// For the upper section, any face can still show up as long as dice
    /// remain.
    pub fn is_potential(self, hand: Hand) -> bool {
        let dice_left = hand.dice_left();
        if let Some(face) = self.face_value() {
            return dice_left > 0 || hand.contains(face);
        }
        match self {
            Category::ThreeOfAKind => dice_left + hand.max_multiplicity() >= 3,
            Category::FourOfAKind => dice_left + hand.max_multiplicity() >= 4,
            Category::FullHouse => hand.distinct_count() <= 2 && hand.max_multiplicity() <= 3,
            Category::SmallStraight => hand.repeated_count() < 2 && dice_left > 0,
            Category::LargeStraight => {
                hand.repeated_count() == 0 && !(hand.contains(1) && hand.contains(6))
            }
            Category::Yahtzee => hand.distinct_count() <= 1,
            _ => unreachable!("upper-section categories are handled above"),
        }
    }
}

/// All categories the hand satisfies.
pub fn valid_categories(hand: Hand) -> CategorySet {
    ALL_CATEGORIES
        .into_iter()
        .filter(|c| c.is_valid(hand))
        .collect()
}

/// All categories that are still reachable from the hand.
pub fn potential_categories(hand: Hand) -> CategorySet {
    ALL_CATEGORIES
        .into_iter()
        .filter(|c| c.is_potential(hand))
        .collect()
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::hand;

    quickcheck! {
        fn large_straight_implies_small_straight(hand: Hand) -> bool {
            !Category::LargeStraight.is_valid(hand) || Category::SmallStraight.is_valid(hand)
        }

        fn lower_section_scores_zero_iff_invalid(hand: Hand) -> bool {
            ALL_CATEGORIES
                .into_iter()
                .filter(|c| c.face_value().is_none())
                .all(|c| (c.score(hand) == 0) != c.is_valid(hand))
        }

        fn valid_complete_hands_are_potential(hand: Hand) -> bool {
            !hand.is_complete()
                || ALL_CATEGORIES
                    .into_iter()
                    .filter(|c| !c.is_straight())
                    .all(|c| !c.is_valid(hand) || c.is_potential(hand))
        }

        fn index_roundtrip(category: Category) -> bool {
            Category::from_index(category.to_index()) == Some(category)
        }
    }

    #[test]
    fn index_out_of_range() {
        assert_eq!(Category::from_index(11), Some(Category::Yahtzee));
        assert_eq!(Category::from_index(12), None);
        assert_eq!(Category::from_index(u8::MAX), None);
    }

    #[test]
    fn straights() {
        for hand in [hand!("12345"), hand!("23456")] {
            assert!(Category::SmallStraight.is_valid(hand));
            assert!(Category::LargeStraight.is_valid(hand));
            assert_eq!(Category::SmallStraight.score(hand), 30);
            assert_eq!(Category::LargeStraight.score(hand), 40);
        }
        let small_only = hand!("34566");
        assert!(Category::SmallStraight.is_valid(small_only));
        assert!(!Category::LargeStraight.is_valid(small_only));
        assert!(!Category::SmallStraight.is_valid(hand!("12356")));
        // Order does not matter
        assert!(Category::LargeStraight.is_valid(hand!("53142")));
    }

    #[test]
    fn yahtzee() {
        assert!(Category::Yahtzee.is_valid(hand!("33333")));
        assert_eq!(Category::Yahtzee.score(hand!("33333")), 50);
        assert!(!Category::Yahtzee.is_valid(hand!("33332")));
        assert_eq!(Category::Yahtzee.score(hand!("33332")), 0);
        assert!(!Category::Yahtzee.is_valid(hand!("3333")));
    }

    #[test]
    fn full_house() {
        assert!(Category::FullHouse.is_valid(hand!("22255")));
        assert_eq!(Category::FullHouse.score(hand!("25252")), 25);
        assert!(!Category::FullHouse.is_valid(hand!("22225")));
        assert!(!Category::FullHouse.is_valid(hand!("22222")));
    }

    #[test]
    fn of_a_kind_scores_the_sum() {
        assert_eq!(Category::ThreeOfAKind.score(hand!("44426")), 20);
        assert_eq!(Category::FourOfAKind.score(hand!("44426")), 0);
        assert_eq!(Category::FourOfAKind.score(hand!("44441")), 17);
        assert_eq!(Category::ThreeOfAKind.score(hand!("12345")), 0);
    }

    #[test]
    fn upper_section() {
        let hand = hand!("66162");
        assert_eq!(Category::Sixes.score(hand), 18);
        assert_eq!(Category::Aces.score(hand), 1);
        assert_eq!(Category::Fours.score(hand), 0);
        assert!(Category::Twos.is_valid(hand));
        assert!(!Category::Fives.is_valid(hand));
        assert!(Category::Fives.is_valid(hand!("5")));
    }

    #[test]
    fn potential() {
        // Upper section: anything goes while dice remain
        assert!(Category::Fives.is_potential(hand!("1111")));
        assert!(!Category::Fives.is_potential(hand!("11112")));
        assert!(Category::Fives.is_potential(hand!("11115")));

        assert!(Category::ThreeOfAKind.is_potential(hand!("123")));
        assert!(!Category::ThreeOfAKind.is_potential(hand!("1234")));
        assert!(!Category::FourOfAKind.is_potential(hand!("1124")));
        assert!(Category::FourOfAKind.is_potential(hand!("112")));

        assert!(Category::FullHouse.is_potential(hand!("2255")));
        assert!(Category::FullHouse.is_potential(hand!("2225")));
        assert!(!Category::FullHouse.is_potential(hand!("2222")));
        assert!(!Category::FullHouse.is_potential(hand!("125")));

        assert!(Category::SmallStraight.is_potential(hand!("1123")));
        assert!(!Category::SmallStraight.is_potential(hand!("1122")));
        assert!(!Category::SmallStraight.is_potential(hand!("12345")));

        assert!(Category::LargeStraight.is_potential(hand!("2345")));
        assert!(!Category::LargeStraight.is_potential(hand!("16")));
        assert!(!Category::LargeStraight.is_potential(hand!("223")));

        assert!(Category::Yahtzee.is_potential(hand!("")));
        assert!(Category::Yahtzee.is_potential(hand!("444")));
        assert!(!Category::Yahtzee.is_potential(hand!("443")));
    }

    #[test]
    fn category_sets_from_hand() {
        let valid = valid_categories(hand!("22255"));
        assert_eq!(
            Vec::from_iter(valid),
            vec![
                Category::Twos,
                Category::Fives,
                Category::ThreeOfAKind,
                Category::FullHouse
            ]
        );
        assert_eq!(potential_categories(hand!("")).len(), 12);
    }

    #[test]
    fn serde_names() {
        assert_eq!(
            serde_json::to_string(&Category::ThreeOfAKind).unwrap(),
            "\"three_of_a_kind\""
        );
        assert_eq!(Category::FullHouse.to_string(), "Full House");
    }
}
