use yahtzee::{Category, CategorySet, Hand};

/// The open categories in which `hand` scores the most points right now.
///
/// Categories that score nothing are never included, so this is empty iff no
/// open category scores above zero.
pub fn best_scoring_categories(open_categories: CategorySet, hand: Hand) -> Vec<Category> {
    let mut top_choices: Vec<Category> = Vec::new();
    let mut top_score = 0;
    for category in open_categories {
        let score = category.score(hand);
        if score == 0 {
            continue;
        }
        match score.cmp(&top_score) {
            std::cmp::Ordering::Less => {}
            std::cmp::Ordering::Equal => {
                top_choices.push(category);
            }
            std::cmp::Ordering::Greater => {
                top_choices = vec![category];
                top_score = score;
            }
        }
    }
    top_choices
}

#[cfg(test)]
mod tests {
    use yahtzee::{hand, ALL_CATEGORIES_SET};

    use super::*;

    #[test]
    fn best_scores() {
        assert_eq!(
            best_scoring_categories(ALL_CATEGORIES_SET, hand!("66666")),
            vec![Category::Yahtzee]
        );
        assert_eq!(
            best_scoring_categories(ALL_CATEGORIES_SET, hand!("12346")),
            vec![Category::SmallStraight]
        );
        let open = CategorySet::new()
            .insert(Category::Fives)
            .insert(Category::FullHouse);
        assert!(best_scoring_categories(open, hand!("12346")).is_empty());
        // 3 + 3 = 6 in both
        let open = CategorySet::new()
            .insert(Category::Threes)
            .insert(Category::Sixes);
        assert_eq!(
            best_scoring_categories(open, hand!("33614")),
            vec![Category::Threes, Category::Sixes]
        );
    }
}
