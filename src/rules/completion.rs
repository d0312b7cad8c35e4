//! Profile-completion scoring.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{User, UserRole};

const FULL_NAME: (&str, u32) = ("full_name", 15);
const BIO: (&str, u32) = ("bio", 15);
const AVATAR_URL: (&str, u32) = ("avatar_url", 15);
const PHONE: (&str, u32) = ("phone", 10);
const LOCATION: (&str, u32) = ("location", 10);
const CATEGORIES: (&str, u32) = ("categories", 15);
const SOCIAL: (&str, u32) = ("social", 20);
const COMPANY_NAME: (&str, u32) = ("company_name", 20);
const WEBSITE: (&str, u32) = ("website", 15);

/// The profile fields that take part in scoring.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub role: Option<UserRole>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub company_name: Option<String>,
    pub instagram_handle: Option<String>,
    pub youtube_handle: Option<String>,
    pub categories: Vec<String>,
}

impl From<&User> for ProfileFields {
    fn from(user: &User) -> Self {
        Self {
            role: Some(user.role),
            full_name: user.full_name.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            phone: user.phone.clone(),
            location: user.location.clone(),
            website: user.website.clone(),
            company_name: user.company_name.clone(),
            instagram_handle: user.instagram_handle.clone(),
            youtube_handle: user.youtube_handle.clone(),
            categories: user.categories.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Completion {
    /// 0 to 100
    #[schema(example = 65)]
    pub percentage: u8,
    /// Field names still missing, in scoring order
    #[schema(value_type = Vec<String>, example = json!(["avatar_url", "social"]))]
    pub missing: Vec<&'static str>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Scores a profile by weighted presence of non-blank fields.
///
/// Shared fields weigh 65 in total; creators add categories and a social
/// handle, brands add company name and website, both reaching 100. Admin
/// profiles only have the shared fields, scaled to 100 and rounded down.
pub fn profile_completion(fields: &ProfileFields) -> Completion {
    let mut checks: Vec<((&'static str, u32), bool)> = vec![
        (FULL_NAME, present(&fields.full_name)),
        (BIO, present(&fields.bio)),
        (AVATAR_URL, present(&fields.avatar_url)),
        (PHONE, present(&fields.phone)),
        (LOCATION, present(&fields.location)),
    ];

    match fields.role {
        Some(UserRole::Creator) => {
            let has_categories = fields.categories.iter().any(|c| !c.trim().is_empty());
            let has_social = present(&fields.instagram_handle) || present(&fields.youtube_handle);
            checks.push((CATEGORIES, has_categories));
            checks.push((SOCIAL, has_social));
        }
        Some(UserRole::Brand) => {
            checks.push((COMPANY_NAME, present(&fields.company_name)));
            checks.push((WEBSITE, present(&fields.website)));
        }
        Some(UserRole::Admin) | None => {}
    }

    let total: u32 = checks.iter().map(|((_, weight), _)| weight).sum();
    let earned: u32 = checks
        .iter()
        .filter(|(_, ok)| *ok)
        .map(|((_, weight), _)| weight)
        .sum();
    let missing = checks
        .iter()
        .filter(|(_, ok)| !*ok)
        .map(|((name, _), _)| *name)
        .collect();

    let percentage = if total == 0 { 0 } else { earned * 100 / total };

    Completion {
        percentage: percentage.min(100) as u8,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn shared_filled(role: UserRole) -> ProfileFields {
        ProfileFields {
            role: Some(role),
            full_name: s("Ana Lima"),
            bio: s("Food and travel"),
            avatar_url: s("https://cdn.example.com/a.png"),
            phone: s("+5511999999999"),
            location: s("Sao Paulo"),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_creator_profile() {
        let result = profile_completion(&ProfileFields {
            role: Some(UserRole::Creator),
            ..Default::default()
        });
        assert_eq!(result.percentage, 0);
        assert_eq!(
            result.missing,
            vec!["full_name", "bio", "avatar_url", "phone", "location", "categories", "social"]
        );
    }

    #[test]
    fn test_creator_shared_only_is_65() {
        let result = profile_completion(&shared_filled(UserRole::Creator));
        assert_eq!(result.percentage, 65);
        assert_eq!(result.missing, vec!["categories", "social"]);
    }

    #[test]
    fn test_creator_complete_with_either_social() {
        let mut fields = shared_filled(UserRole::Creator);
        fields.categories = vec!["food".into()];
        fields.youtube_handle = s("@ana");
        let result = profile_completion(&fields);
        assert_eq!(result.percentage, 100);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_brand_weights() {
        let mut fields = ProfileFields {
            role: Some(UserRole::Brand),
            company_name: s("Acme"),
            ..Default::default()
        };
        assert_eq!(profile_completion(&fields).percentage, 20);

        fields.website = s("https://acme.example");
        fields.full_name = s("Acme Team");
        let result = profile_completion(&fields);
        assert_eq!(result.percentage, 50);
        assert_eq!(result.missing, vec!["bio", "avatar_url", "phone", "location"]);
    }

    #[test]
    fn test_admin_scaled_and_rounded_down() {
        let fields = ProfileFields {
            role: Some(UserRole::Admin),
            full_name: s("Root"),
            ..Default::default()
        };
        // 15 of 65 -> 23.07
        assert_eq!(profile_completion(&fields).percentage, 23);
        assert_eq!(profile_completion(&shared_filled(UserRole::Admin)).percentage, 100);
    }

    #[test]
    fn test_blank_values_are_missing() {
        let fields = ProfileFields {
            role: Some(UserRole::Creator),
            full_name: s("   "),
            categories: vec!["  ".into()],
            instagram_handle: s(""),
            ..Default::default()
        };
        let result = profile_completion(&fields);
        assert_eq!(result.percentage, 0);
        assert!(result.missing.contains(&"full_name"));
        assert!(result.missing.contains(&"categories"));
        assert!(result.missing.contains(&"social"));
    }

    fn arb_opt() -> impl Strategy<Value = Option<String>> {
        prop_oneof![Just(None), Just(Some(String::new())), "[a-z]{1,8}".prop_map(Some)]
    }

    fn arb_role() -> impl Strategy<Value = UserRole> {
        prop_oneof![
            Just(UserRole::Creator),
            Just(UserRole::Brand),
            Just(UserRole::Admin)
        ]
    }

    proptest! {
        #[test]
        fn prop_percentage_bounded_and_consistent(
            role in arb_role(),
            full_name in arb_opt(),
            bio in arb_opt(),
            avatar_url in arb_opt(),
            phone in arb_opt(),
            location in arb_opt(),
            website in arb_opt(),
            company_name in arb_opt(),
            instagram_handle in arb_opt(),
            youtube_handle in arb_opt(),
            categories in proptest::collection::vec("[a-z]{0,6}", 0..4),
        ) {
            let fields = ProfileFields {
                role: Some(role),
                full_name, bio, avatar_url, phone, location, website,
                company_name, instagram_handle, youtube_handle, categories,
            };
            let result = profile_completion(&fields);
            prop_assert!(result.percentage <= 100);
            prop_assert_eq!(result.percentage == 100, result.missing.is_empty());
            prop_assert_eq!(result.percentage == 0, result.missing.len() == match role {
                UserRole::Admin => 5,
                _ => 7,
            });
        }
    }
}
