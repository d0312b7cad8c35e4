//! Category tag normalization shared by profiles and work posts.

pub const MAX_CATEGORIES: usize = 10;

/// Trims, lowercases and de-duplicates tags, keeping first-seen order.
/// Blank tags are dropped. More than [`MAX_CATEGORIES`] distinct tags is an error.
pub fn normalize_categories<S: AsRef<str>>(raw: &[S]) -> Result<Vec<String>, String> {
    let mut normalized: Vec<String> = Vec::with_capacity(raw.len());

    for tag in raw {
        let tag = tag.as_ref().trim().to_lowercase();
        if tag.is_empty() || normalized.contains(&tag) {
            continue;
        }
        normalized.push(tag);
    }

    if normalized.len() > MAX_CATEGORIES {
        return Err(format!(
            "at most {MAX_CATEGORIES} categories are allowed, got {}",
            normalized.len()
        ));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trim_lowercase_dedup() {
        let result = normalize_categories(&[" Food ", "travel", "FOOD", "", "  "]).unwrap();
        assert_eq!(result, vec!["food", "travel"]);
    }

    #[test]
    fn test_limit_counts_distinct_tags() {
        let mut tags: Vec<String> = (0..10).map(|i| format!("tag{i}")).collect();
        tags.push("TAG0".into());
        assert_eq!(normalize_categories(&tags).unwrap().len(), 10);

        tags.push("tag10".into());
        assert!(normalize_categories(&tags).is_err());
    }

    proptest! {
        #[test]
        fn prop_idempotent(tags in proptest::collection::vec("[ A-Za-z]{0,6}", 0..10)) {
            let once = normalize_categories(&tags).unwrap();
            let twice = normalize_categories(&once).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.iter().all(|t| !t.is_empty() && t.trim() == t && t.to_lowercase() == *t));
        }
    }
}
