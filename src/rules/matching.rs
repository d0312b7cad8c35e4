//! Work-post matching by shared categories.

use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub match_score: usize,
    pub matched_categories: Vec<String>,
}

/// Keeps the items sharing at least one category with `mine` and orders them
/// by number of shared categories (most first), then by `recency` (newest
/// first). `mine` is expected to be normalized already.
pub fn rank_by_overlap<T, K, C, R>(
    mine: &[String],
    items: Vec<T>,
    categories: C,
    recency: R,
) -> Vec<Ranked<T>>
where
    K: Ord,
    C: Fn(&T) -> &[String],
    R: Fn(&T) -> K,
{
    let mut ranked: Vec<Ranked<T>> = items
        .into_iter()
        .filter_map(|item| {
            let matched: Vec<String> = categories(&item)
                .iter()
                .filter(|c| mine.contains(c))
                .cloned()
                .collect();
            (!matched.is_empty()).then(|| Ranked {
                match_score: matched.len(),
                matched_categories: matched,
                item,
            })
        })
        .collect();

    ranked.sort_by_cached_key(|r| (Reverse(r.match_score), Reverse(recency(&r.item))));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Post {
        id: i32,
        categories: Vec<String>,
        created: i64,
    }

    fn post(id: i32, categories: &[&str], created: i64) -> Post {
        Post {
            id,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            created,
        }
    }

    fn rank(mine: &[&str], posts: Vec<Post>) -> Vec<Ranked<Post>> {
        let mine: Vec<String> = mine.iter().map(|c| c.to_string()).collect();
        rank_by_overlap(&mine, posts, |p| p.categories.as_slice(), |p| (p.created, p.id))
    }

    #[test]
    fn test_no_overlap_is_dropped() {
        let result = rank(&["food"], vec![post(1, &["tech"], 1), post(2, &[], 2)]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_ranked_by_score_then_newest() {
        let result = rank(
            &["food", "travel", "fitness"],
            vec![
                post(1, &["food"], 10),
                post(2, &["food", "travel"], 1),
                post(3, &["travel"], 20),
                post(4, &["tech", "fitness", "food"], 5),
            ],
        );

        let ids: Vec<i32> = result.iter().map(|r| r.item.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
        assert_eq!(result[0].match_score, 2);
        assert_eq!(result[0].matched_categories, vec!["fitness", "food"]);
    }

    #[test]
    fn test_empty_profile_matches_nothing() {
        assert!(rank(&[], vec![post(1, &["food"], 1)]).is_empty());
    }
}
