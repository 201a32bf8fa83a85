use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::InvalidHand;

/// The number of dice in a complete hand.
pub const NUM_DICE: usize = 5;

/// The faces of a die.
pub const FACES: std::ops::RangeInclusive<u8> = 1..=6;

/// Up to five die values, in the order they were added.
///
/// Every value is in `1..=6`, which is checked on construction, so functions
/// taking a `Hand` never see out-of-range dice.
///
/// ```
/// use yahtzee::{hand, Hand};
/// let kept = hand!("6 6 6");
/// let rolled = hand!("62");
/// assert_eq!(kept.concat(rolled).unwrap(), hand!("6 6 6 6 2"));
/// assert!(Hand::try_from(&[7u8][..]).is_err());
/// ```
///
/// # Note on immutability
///
/// Like the other small value types in this crate, a `Hand` is [`Copy`] and
/// its "mutating" methods return a new value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Hand {
    // Slots at index `len` and above are always zero, so the derived
    // equality compares only the used part.
    dice: [u8; NUM_DICE],
    len: u8,
}

impl Hand {
    /// Creates an empty hand.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(self) -> usize {
        usize::from(self.len)
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// The number of dice that still have to be rolled to complete the hand.
    pub fn dice_left(self) -> usize {
        NUM_DICE - self.len()
    }

    pub fn is_complete(self) -> bool {
        self.len() == NUM_DICE
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.dice[..self.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn contains(self, value: u8) -> bool {
        self.as_slice().contains(&value)
    }

    /// How often the given value appears.
    pub fn count(self, value: u8) -> usize {
        self.iter().filter(|&d| d == value).count()
    }

    /// The multiplicity of each face, indexed by `face - 1`.
    pub fn counts(self) -> [usize; 6] {
        let mut counts = [0; 6];
        for d in self.iter() {
            counts[usize::from(d - 1)] += 1;
        }
        counts
    }

    pub fn sum(self) -> u32 {
        self.iter().map(u32::from).sum()
    }

    /// The highest number of dice showing the same face, 0 for an empty hand.
    pub fn max_multiplicity(self) -> usize {
        self.counts().into_iter().max().unwrap_or(0)
    }

    pub fn distinct_count(self) -> usize {
        self.counts().into_iter().filter(|&c| c > 0).count()
    }

    /// The number of dice that duplicate a face already present.
    pub fn repeated_count(self) -> usize {
        self.counts().into_iter().map(|c| c.saturating_sub(1)).sum()
    }

    /// Appends a die.
    #[must_use = "Hand is immutable, this returns a new hand"]
    pub fn push(self, value: u8) -> Result<Self, InvalidHand> {
        if !FACES.contains(&value) {
            return Err(InvalidHand::DieOutOfRange { value });
        }
        if self.is_complete() {
            return Err(InvalidHand::TooManyDice {
                len: self.len() + 1,
            });
        }
        let mut dice = self.dice;
        dice[self.len()] = value;
        Ok(Self {
            dice,
            len: self.len + 1,
        })
    }

    /// The dice of `self` followed by the dice of `other`.
    #[must_use = "Hand is immutable, this returns a new hand"]
    pub fn concat(self, other: Hand) -> Result<Self, InvalidHand> {
        if self.len() + other.len() > NUM_DICE {
            return Err(InvalidHand::TooManyDice {
                len: self.len() + other.len(),
            });
        }
        Ok(other.iter().fold(self, |hand, d| hand.push_unchecked(d)))
    }

    /// The dice in ascending order.
    #[must_use = "Hand is immutable, this returns a new hand"]
    pub fn sorted(self) -> Self {
        let mut sorted = self;
        sorted.dice[..self.len()].sort_unstable();
        sorted
    }

    /// Keeps the first occurrence of every face.
    #[must_use = "Hand is immutable, this returns a new hand"]
    pub fn distinct(self) -> Self {
        let mut result = Hand::new();
        for d in self.iter() {
            if !result.contains(d) {
                result = result.push_unchecked(d);
            }
        }
        result
    }

    /// Removes the first occurrence of `value`, if there is one.
    #[must_use = "Hand is immutable, this returns a new hand"]
    pub fn remove_one(self, value: u8) -> Self {
        match self.iter().position(|d| d == value) {
            Some(idx) => self
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != idx)
                .fold(Hand::new(), |hand, (_, d)| hand.push_unchecked(d)),
            None => self,
        }
    }

    /// Removes every occurrence of `value`.
    #[must_use = "Hand is immutable, this returns a new hand"]
    pub fn without(self, value: u8) -> Self {
        self.iter()
            .filter(|&d| d != value)
            .fold(Hand::new(), |hand, d| hand.push_unchecked(d))
    }

    /// The dice from index `start` on.
    #[must_use = "Hand is immutable, this returns a new hand"]
    pub fn suffix(self, start: usize) -> Self {
        self.as_slice()
            .iter()
            .skip(start)
            .fold(Hand::new(), |hand, &d| hand.push_unchecked(d))
    }

    /// Multiset intersection: each face appears as often as in the hand that
    /// has fewer of it. The result is in ascending order.
    ///
    /// ```
    /// use yahtzee::hand;
    /// assert_eq!(hand!("223").intersection(hand!("233")), hand!("23"));
    /// ```
    #[must_use = "Hand is immutable, this returns a new hand"]
    pub fn intersection(self, other: Hand) -> Self {
        let (counts_1, counts_2) = (self.counts(), other.counts());
        let mut result = Hand::new();
        for face in FACES {
            let idx = usize::from(face - 1);
            for _ in 0..counts_1[idx].min(counts_2[idx]) {
                result = result.push_unchecked(face);
            }
        }
        result
    }

    /// Whether every die of `self` can be matched with a distinct die of `other`.
    pub fn is_submultiset_of(self, other: Hand) -> bool {
        self.counts()
            .into_iter()
            .zip(other.counts())
            .all(|(mine, theirs)| mine <= theirs)
    }

    /// Whether both hands hold the same dice, regardless of order.
    pub fn same_dice_as(self, other: Hand) -> bool {
        self.sorted() == other.sorted()
    }

    /// All `2^len` sub-hands, including the empty and the full one.
    ///
    /// Sub-hand `i` contains die `j` iff bit `j` of `i` is set.
    pub fn subsets(self) -> impl Iterator<Item = Hand> {
        (0u32..(1 << self.len())).map(move |mask| {
            self.iter()
                .enumerate()
                .filter(|&(j, _)| (mask >> j) & 1 == 1)
                .fold(Hand::new(), |hand, (_, d)| hand.push_unchecked(d))
        })
    }

    // Only for values that are already known to be valid faces, and hands
    // that are known to have room.
    pub(crate) fn push_unchecked(self, value: u8) -> Self {
        debug_assert!(FACES.contains(&value) && !self.is_complete());
        let mut dice = self.dice;
        dice[self.len()] = value;
        Self {
            dice,
            len: self.len + 1,
        }
    }
}

impl TryFrom<&[u8]> for Hand {
    type Error = InvalidHand;

    fn try_from(values: &[u8]) -> Result<Self, Self::Error> {
        if values.len() > NUM_DICE {
            return Err(InvalidHand::TooManyDice { len: values.len() });
        }
        values.iter().try_fold(Hand::new(), |hand, &d| hand.push(d))
    }
}

impl TryFrom<Vec<u8>> for Hand {
    type Error = InvalidHand;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        Hand::try_from(values.as_slice())
    }
}

impl From<Hand> for Vec<u8> {
    fn from(hand: Hand) -> Vec<u8> {
        hand.as_slice().to_vec()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

/// Parses a hand from its digits. Spaces and commas between digits are ignored,
/// so `"66662"`, `"6 6 6 6 2"` and `"6, 6, 6, 6, 2"` are the same hand.
impl FromStr for Hand {
    type Err = InvalidHand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::with_capacity(NUM_DICE);
        for c in s.chars() {
            match c {
                ' ' | ',' => {}
                '0'..='9' => values.push(c as u8 - b'0'),
                _ => return Err(InvalidHand::UnexpectedChar { c }),
            }
        }
        Hand::try_from(values.as_slice())
    }
}

/// Shorthand for creating hands from a string of digits.
///
/// This macro is just calling the [`FromStr`] instance of [`Hand`].
/// ```
/// # use yahtzee::{hand, Hand};
/// assert_eq!(hand!("3 3 5"), Hand::try_from(&[3u8, 3, 5][..]).unwrap());
/// assert!(hand!("").is_empty());
/// ```
#[macro_export]
macro_rules! hand {
    ($s:literal) => {
        <$crate::Hand as std::str::FromStr>::from_str($s)
            .expect("Invalid dice given to hand! macro")
    };
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn intersection_is_symmetric_and_bounded(a: Hand, b: Hand) -> bool {
            let ab = a.intersection(b);
            let ba = b.intersection(a);
            ab.len() == ba.len() && ab.len() <= a.len().min(b.len())
        }

        fn intersection_is_submultiset_of_both(a: Hand, b: Hand) -> bool {
            let ab = a.intersection(b);
            ab.is_submultiset_of(a) && ab.is_submultiset_of(b)
        }

        fn subsets_are_submultisets(hand: Hand) -> bool {
            hand.subsets().all(|sub| sub.is_submultiset_of(hand))
        }
    }

    #[test]
    fn parse_and_display() {
        let hand: Hand = "6, 6, 6, 6, 2".parse().unwrap();
        assert_eq!(hand.as_slice(), &[6, 6, 6, 6, 2]);
        assert_eq!(hand.to_string(), "[6, 6, 6, 6, 2]");
        assert_eq!(
            "7".parse::<Hand>(),
            Err(InvalidHand::DieOutOfRange { value: 7 })
        );
        assert_eq!(
            "123456".parse::<Hand>(),
            Err(InvalidHand::TooManyDice { len: 6 })
        );
        assert_eq!(
            "1x".parse::<Hand>(),
            Err(InvalidHand::UnexpectedChar { c: 'x' })
        );
    }

    #[test]
    fn multiplicities() {
        let hand = hand!("22335");
        assert_eq!(hand.counts(), [0, 2, 2, 0, 1, 0]);
        assert_eq!(hand.max_multiplicity(), 2);
        assert_eq!(hand.distinct_count(), 3);
        assert_eq!(hand.repeated_count(), 2);
        assert_eq!(hand.sum(), 15);
        assert_eq!(Hand::new().max_multiplicity(), 0);
    }

    #[test]
    fn intersection_counts_per_face() {
        assert_eq!(hand!("223").intersection(hand!("233")), hand!("23"));
        assert_eq!(hand!("6666").intersection(hand!("2")), Hand::new());
        assert_eq!(hand!("5151").intersection(hand!("115")), hand!("115"));
    }

    #[test]
    fn subsets_in_bitmask_order() {
        let subsets: Vec<Hand> = hand!("123").subsets().collect();
        assert_eq!(subsets.len(), 8);
        assert_eq!(subsets[0], Hand::new());
        assert_eq!(subsets[1], hand!("1"));
        assert_eq!(subsets[2], hand!("2"));
        assert_eq!(subsets[3], hand!("12"));
        assert_eq!(subsets[7], hand!("123"));
        assert_eq!(Hand::new().subsets().count(), 1);
    }

    #[test]
    fn editing() {
        let hand = hand!("3 1 3 6");
        assert_eq!(hand.sorted(), hand!("1336"));
        assert_eq!(hand.distinct(), hand!("316"));
        assert_eq!(hand.remove_one(3), hand!("136"));
        assert_eq!(hand.remove_one(4), hand);
        assert_eq!(hand.without(3), hand!("16"));
        assert_eq!(hand.suffix(2), hand!("36"));
        assert!(hand.same_dice_as(hand!("6331")));
        assert!(hand.concat(hand!("22")).is_err());
    }

    #[test]
    fn serde_as_list() {
        let hand = hand!("12");
        assert_eq!(serde_json::to_string(&hand).unwrap(), "[1,2]");
        assert_eq!(serde_json::from_str::<Hand>("[1,2]").unwrap(), hand);
        assert!(serde_json::from_str::<Hand>("[0]").is_err());
    }
}
