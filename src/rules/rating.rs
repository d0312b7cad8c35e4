//! Rating aggregation.

use serde::Serialize;
use utoipa::ToSchema;

/// Number of ratings per star value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RatingDistribution {
    #[serde(rename = "1")]
    pub one: i64,
    #[serde(rename = "2")]
    pub two: i64,
    #[serde(rename = "3")]
    pub three: i64,
    #[serde(rename = "4")]
    pub four: i64,
    #[serde(rename = "5")]
    pub five: i64,
}

impl RatingDistribution {
    fn slot(&mut self, score: i16) -> Option<&mut i64> {
        match score {
            1 => Some(&mut self.one),
            2 => Some(&mut self.two),
            3 => Some(&mut self.three),
            4 => Some(&mut self.four),
            5 => Some(&mut self.five),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct RatingSummary {
    #[schema(example = 12)]
    pub count: i64,
    /// Rounded to two decimals; 0.0 without ratings
    #[schema(example = 4.58)]
    pub average: f64,
    pub distribution: RatingDistribution,
}

impl RatingSummary {
    /// Builds a summary from `(score, count)` pairs such as a `GROUP BY score`
    /// result. Scores outside 1..=5 are ignored.
    pub fn from_counts(counts: impl IntoIterator<Item = (i16, i64)>) -> Self {
        let mut distribution = RatingDistribution::default();
        let mut count = 0i64;
        let mut total = 0i64;

        for (score, n) in counts {
            if n <= 0 {
                continue;
            }
            if let Some(slot) = distribution.slot(score) {
                *slot += n;
                count += n;
                total += i64::from(score) * n;
            }
        }

        let average = if count == 0 {
            0.0
        } else {
            round2(total as f64 / count as f64)
        };

        Self {
            count,
            average,
            distribution,
        }
    }

    /// Builds a summary from individual scores.
    pub fn from_scores(scores: impl IntoIterator<Item = i16>) -> Self {
        Self::from_counts(scores.into_iter().map(|score| (score, 1)))
    }

    /// The average, or `None` when nothing was rated.
    pub fn average_or_none(&self) -> Option<f64> {
        (self.count > 0).then_some(self.average)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_summary() {
        let summary = RatingSummary::from_scores([]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.average_or_none(), None);
        assert_eq!(summary.distribution, RatingDistribution::default());
    }

    #[test]
    fn test_average_rounded_to_two_decimals() {
        let summary = RatingSummary::from_scores([5, 4, 4]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 4.33);
        assert_eq!(summary.distribution.four, 2);
        assert_eq!(summary.distribution.five, 1);
    }

    #[test]
    fn test_out_of_range_scores_ignored() {
        let summary = RatingSummary::from_scores([0, 6, -1, 3]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.average, 3.0);
    }

    #[test]
    fn test_from_grouped_counts() {
        let summary = RatingSummary::from_counts([(5, 8), (1, 2)]);
        assert_eq!(summary.count, 10);
        assert_eq!(summary.average, 4.2);
        assert_eq!(summary.distribution.one, 2);
        assert_eq!(summary.distribution.five, 8);
    }

    #[test]
    fn test_distribution_serializes_with_star_keys() {
        let summary = RatingSummary::from_scores([2]);
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["distribution"]["2"], 1);
        assert_eq!(json["distribution"]["5"], 0);
    }

    proptest! {
        #[test]
        fn prop_summary_consistent(scores in proptest::collection::vec(1i16..=5, 0..60)) {
            let summary = RatingSummary::from_scores(scores.clone());
            let d = summary.distribution;
            prop_assert_eq!(summary.count as usize, scores.len());
            prop_assert_eq!(d.one + d.two + d.three + d.four + d.five, summary.count);
            if summary.count > 0 {
                prop_assert!(summary.average >= 1.0 && summary.average <= 5.0);
                let exact = scores.iter().map(|s| f64::from(*s)).sum::<f64>() / scores.len() as f64;
                prop_assert!((summary.average - exact).abs() <= 0.005 + f64::EPSILON);
            }
        }
    }
}
