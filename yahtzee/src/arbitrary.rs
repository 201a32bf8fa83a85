use quickcheck::{Arbitrary, Gen};

use crate::{Category, CategorySet, Hand, ALL_CATEGORIES, ALL_CATEGORIES_SET, FACES, NUM_DICE};

/// The arguments of one call to the strategy engine.
#[derive(Clone, Debug)]
pub struct AdviceInput {
    pub open: CategorySet,
    pub kept: Hand,
    // Always exactly the dice that are left after `kept`
    pub rolled: Hand,
}

fn arbitrary_die(g: &mut Gen) -> u8 {
    let faces: Vec<u8> = FACES.collect();
    *g.choose(&faces).unwrap()
}

fn arbitrary_hand_of_len(g: &mut Gen, len: usize) -> Hand {
    let mut hand = Hand::new();
    for _ in 0..len {
        hand = hand.push(arbitrary_die(g)).unwrap();
    }
    hand
}

impl Arbitrary for AdviceInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let kept = Hand::arbitrary(g);
        let rolled = arbitrary_hand_of_len(g, kept.dice_left());
        AdviceInput {
            open: CategorySet::arbitrary(g),
            kept,
            rolled,
        }
    }
}

impl Arbitrary for Hand {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (NUM_DICE + 1);
        arbitrary_hand_of_len(g, len)
    }
}

impl Arbitrary for Category {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&ALL_CATEGORIES).unwrap()
    }
}

impl Arbitrary for CategorySet {
    fn arbitrary(g: &mut Gen) -> Self {
        CategorySet {
            bits: u16::arbitrary(g),
        } & ALL_CATEGORIES_SET
    }
}
