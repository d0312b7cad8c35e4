//! Business rules that run over already-fetched records.

pub mod badge;
pub mod categories;
pub mod coins;
pub mod completion;
pub mod matching;
pub mod rating;
pub mod transitions;

pub use badge::{BadgeInput, assign_badge};
pub use categories::normalize_categories;
pub use completion::{Completion, ProfileFields, profile_completion};
pub use matching::{Ranked, rank_by_overlap};
pub use rating::{RatingDistribution, RatingSummary};
pub use transitions::{
    ApplicationParty, OrderParty, application_transition_allowed, order_transition_allowed,
};
