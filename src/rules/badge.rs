//! Badge assignment.

use crate::models::UserBadge;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BadgeInput {
    pub completed_orders: i64,
    pub rating_count: i64,
    pub average_rating: f64,
}

/// First matching rule wins:
/// 1. top rated: at least 5 ratings averaging 4.5 or more
/// 2. trusted: at least 10 completed orders and an average of 4.0 or more
/// 3. rising: at least 3 completed orders
/// 4. newcomer
pub fn assign_badge(input: BadgeInput) -> UserBadge {
    if input.rating_count >= 5 && input.average_rating >= 4.5 {
        UserBadge::TopRated
    } else if input.completed_orders >= 10 && input.average_rating >= 4.0 {
        UserBadge::Trusted
    } else if input.completed_orders >= 3 {
        UserBadge::Rising
    } else {
        UserBadge::Newcomer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(completed_orders: i64, rating_count: i64, average_rating: f64) -> BadgeInput {
        BadgeInput {
            completed_orders,
            rating_count,
            average_rating,
        }
    }

    #[test]
    fn test_newcomer_by_default() {
        assert_eq!(assign_badge(BadgeInput::default()), UserBadge::Newcomer);
        assert_eq!(assign_badge(input(2, 2, 5.0)), UserBadge::Newcomer);
    }

    #[test]
    fn test_rising() {
        assert_eq!(assign_badge(input(3, 0, 0.0)), UserBadge::Rising);
        assert_eq!(assign_badge(input(12, 4, 3.9)), UserBadge::Rising);
    }

    #[test]
    fn test_trusted() {
        assert_eq!(assign_badge(input(10, 4, 4.0)), UserBadge::Trusted);
        assert_eq!(assign_badge(input(10, 9, 4.49)), UserBadge::Trusted);
    }

    #[test]
    fn test_top_rated_wins_over_trusted() {
        assert_eq!(assign_badge(input(10, 5, 4.5)), UserBadge::TopRated);
        assert_eq!(assign_badge(input(0, 5, 4.8)), UserBadge::TopRated);
        assert_eq!(assign_badge(input(0, 4, 5.0)), UserBadge::Newcomer);
    }

    proptest! {
        #[test]
        fn prop_more_completed_orders_never_downgrades(
            completed in 0i64..50,
            extra in 0i64..50,
            ratings in 0i64..50,
            average in 0.0f64..=5.0,
        ) {
            let rank = |b: UserBadge| match b {
                UserBadge::Newcomer => 0,
                UserBadge::Rising => 1,
                UserBadge::Trusted => 2,
                UserBadge::TopRated => 3,
            };
            let before = assign_badge(input(completed, ratings, average));
            let after = assign_badge(input(completed + extra, ratings, average));
            prop_assert!(rank(after) >= rank(before));
        }
    }
}
