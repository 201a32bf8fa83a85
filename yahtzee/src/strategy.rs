use std::cmp::Ordering;

use tracing::trace;

use crate::{Category, CategorySet, Hand, OutcomeTree, FACES};

/// Checked in this order before anything else: if the dice already form one of
/// these, the recommendation is to go for it.
const PRIORITY_CATEGORIES: [Category; 4] = [
    Category::Yahtzee,
    Category::LargeStraight,
    Category::SmallStraight,
    Category::FullHouse,
];

/// Advice for the player whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recommendation {
    /// The category to aim for, or `None` if no open category can score.
    pub target_category: Option<Category>,
    /// Which of the rolled dice to keep.
    pub dice_to_keep: Hand,
    /// `true` iff all rolled dice should be kept, i.e. rolling again won't help.
    pub stand: bool,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target_category {
            Some(category) => writeln!(f, "Target category: {}", category)?,
            None => writeln!(f, "Target category: none")?,
        }
        writeln!(f, "Dice to keep: {}", self.dice_to_keep)?;
        if self.stand {
            writeln!(f, "You should stand")
        } else {
            writeln!(f, "You should not stand")
        }
    }
}

/// Recommends which of the `rolled` dice to keep, given the dice that were
/// `kept` from earlier rolls and the categories that are still `open`.
///
/// This is a greedy heuristic:
/// 1. If the dice already form a Yahtzee, straight or full house that is
///    open, go for it.
/// 2. Otherwise, find the best-scoring complete hands reachable from the kept
///    dice, and keep the rolled dice that have the most in common with one of
///    them.
///
/// The result only depends on the arguments.
///
/// # Panics
///
/// Panics if `kept` and `rolled` together hold more than five dice.
pub fn recommend(
    tree: &OutcomeTree,
    open: CategorySet,
    kept: Hand,
    rolled: Hand,
) -> Recommendation {
    let all_dice = kept.concat(rolled).unwrap_or_else(|err| {
        panic!(
            "Invalid dice for a recommendation (kept {}, rolled {}): {}",
            kept, rolled, err
        )
    });

    if kept.is_complete() {
        return Recommendation {
            target_category: select_target(tree, open, kept),
            dice_to_keep: Hand::new(),
            stand: rolled.is_empty(),
        };
    }

    if let Some((category, dice_to_keep)) = priority_shortcut(open, kept, rolled, all_dice) {
        trace!(%category, %dice_to_keep, "Taking priority category");
        return Recommendation {
            target_category: Some(category),
            dice_to_keep,
            stand: dice_to_keep.same_dice_as(rolled),
        };
    }

    let dice_to_keep = best_fit_keep(tree, open, kept, rolled);
    let resulting_dice = kept
        .concat(dice_to_keep)
        .expect("The dice to keep are drawn from the rolled dice");
    Recommendation {
        target_category: select_target(tree, open, resulting_dice),
        dice_to_keep,
        stand: dice_to_keep.same_dice_as(rolled),
    }
}

/// The open category with the best score among the complete hands reachable
/// from `hand`, counting only categories that are valid for the complete hand.
///
/// When Four of a Kind and Three of a Kind both reach the best score, Four of a
/// Kind wins. Other ties go to the first one found, scanning complete hands in
/// value order and categories in scorecard order.
pub fn select_target(tree: &OutcomeTree, open: CategorySet, hand: Hand) -> Option<Category> {
    let node = tree.child_for_path(hand.as_slice()).ok()?;

    let mut max_score = 0;
    let mut top_categories: Vec<Category> = Vec::new();
    for leaf in node.leaves() {
        let path = leaf.path();
        for category in open {
            if !category.is_valid(path) {
                continue;
            }
            let score = category.score(path);
            match score.cmp(&max_score) {
                Ordering::Less => {}
                Ordering::Equal => {
                    top_categories.push(category);
                }
                Ordering::Greater => {
                    top_categories = vec![category];
                    max_score = score;
                }
            }
        }
    }

    if top_categories.contains(&Category::FourOfAKind)
        && top_categories.contains(&Category::ThreeOfAKind)
    {
        return Some(Category::FourOfAKind);
    }
    top_categories.first().copied()
}

fn priority_shortcut(
    open: CategorySet,
    kept: Hand,
    rolled: Hand,
    all_dice: Hand,
) -> Option<(Category, Hand)> {
    let category = PRIORITY_CATEGORIES
        .into_iter()
        .find(|&c| open.contains(c) && c.is_valid(all_dice))?;

    let mut dice_to_keep = rolled.sorted();
    if category.is_straight() {
        dice_to_keep = keep_for_straight(kept, rolled, dice_to_keep);
    }
    Some((category, dice_to_keep))
}

/// Searches all complete hands reachable from `kept` for the best score in
/// any open category, then keeps the rolled dice that overlap most with one
/// of those hands.
fn best_fit_keep(tree: &OutcomeTree, open: CategorySet, kept: Hand, rolled: Hand) -> Hand {
    let kept_node = tree
        .child_for_path(kept.as_slice())
        .expect("Fewer than five kept dice always form a path");

    // The rest of each best-scoring hand after the kept dice, i.e. what we'd
    // like to roll, together with the category it scores in.
    let mut max_score = 0;
    let mut targets: Vec<(Hand, Category)> = Vec::new();
    for leaf in kept_node.leaves() {
        let path = leaf.path();
        for category in open {
            let score = category.score(path);
            if score == 0 {
                continue;
            }
            match score.cmp(&max_score) {
                Ordering::Less => {}
                Ordering::Equal => {
                    targets.push((path.suffix(kept.len()), category));
                }
                Ordering::Greater => {
                    targets = vec![(path.suffix(kept.len()), category)];
                    max_score = score;
                }
            }
        }
    }

    let candidates: Vec<Hand> = rolled.subsets().collect();
    let mut largest_intersection = Hand::new();
    let mut pursued_category = None;
    for &(combination, category) in &targets {
        for &candidate in &candidates {
            let intersection = combination.intersection(candidate);
            if intersection.len() > largest_intersection.len() {
                trace!(%category, %combination, %intersection, "New largest intersection");
                largest_intersection = intersection;
                pursued_category = Some(category);
            }
        }
    }

    let Some(category) = pursued_category else {
        return Hand::new();
    };

    let mut dice_to_keep = largest_intersection;
    if category.is_straight() {
        dice_to_keep = keep_for_straight(kept, rolled, dice_to_keep);
    }
    if category.is_same_kind() {
        dice_to_keep = only_maximal_kind(dice_to_keep);
    }
    if category == Category::FullHouse {
        dice_to_keep = release_singletons(kept, dice_to_keep);
    }
    dice_to_keep
}

/// Straights need distinct faces, and the kept dice already cover some of them.
fn keep_for_straight(kept: Hand, rolled: Hand, candidate: Hand) -> Hand {
    let mut dice_to_keep = candidate.distinct();
    for d in kept.iter() {
        dice_to_keep = dice_to_keep.remove_one(d);
    }

    // No straight contains both a 1 and a 6
    if kept.contains(1) && rolled.contains(6) {
        dice_to_keep = rolled.without(6);
    }
    if kept.contains(6) && rolled.contains(1) {
        dice_to_keep = rolled.without(1);
    }
    dice_to_keep
}

/// Only the faces that appear most often.
fn only_maximal_kind(dice: Hand) -> Hand {
    let counts = dice.counts();
    let max_count = dice.max_multiplicity();
    let mut result = Hand::new();
    for face in FACES {
        if counts[usize::from(face - 1)] == max_count {
            for _ in 0..max_count {
                result = result.push_unchecked(face);
            }
        }
    }
    result
}

/// A single die of some face doesn't help with a full house, so reroll it.
fn release_singletons(kept: Hand, dice_to_keep: Hand) -> Hand {
    let final_dice = kept
        .concat(dice_to_keep)
        .expect("The dice to keep are drawn from the rolled dice");
    let mut result = dice_to_keep;
    for face in FACES {
        if final_dice.count(face) == 1 && result.contains(face) {
            result = result.remove_one(face);
        }
    }
    result
}
