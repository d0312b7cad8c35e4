//! Referral codes and signup reward planning.

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::config::RewardsConfig;
use crate::models::{CoinReason, NewCoinTransaction};

pub const REFERRAL_CODE_LEN: usize = 8;

/// Random 8 character uppercase alphanumeric code.
pub fn generate_referral_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(REFERRAL_CODE_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

/// Codes are matched case-insensitively and ignoring surrounding spaces.
pub fn normalize_referral_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Ledger entries to write when `new_user_id` registers, optionally through
/// `referrer_id`'s code. Zero amounts produce no entry.
pub fn plan_signup_rewards(
    rewards: &RewardsConfig,
    new_user_id: i32,
    referrer_id: Option<i32>,
) -> Vec<NewCoinTransaction> {
    let mut entries = vec![NewCoinTransaction {
        user_id: new_user_id,
        amount: rewards.signup_bonus,
        reason: CoinReason::SignupBonus,
        counterparty_id: None,
        note: None,
    }];

    if let Some(referrer_id) = referrer_id {
        entries.push(NewCoinTransaction {
            user_id: new_user_id,
            amount: rewards.referred_bonus,
            reason: CoinReason::ReferredBonus,
            counterparty_id: Some(referrer_id),
            note: None,
        });
        entries.push(NewCoinTransaction {
            user_id: referrer_id,
            amount: rewards.referral_bonus,
            reason: CoinReason::ReferralBonus,
            counterparty_id: Some(new_user_id),
            note: None,
        });
    }

    entries.retain(|entry| entry.amount != 0);
    entries
}

/// Ledger entry for a redemption of `amount` coins.
pub fn redemption_entry(user_id: i32, amount: i64, note: Option<String>) -> NewCoinTransaction {
    NewCoinTransaction {
        user_id,
        amount: -amount,
        reason: CoinReason::Redemption,
        counterparty_id: None,
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewards(signup: i64, referral: i64, referred: i64) -> RewardsConfig {
        RewardsConfig {
            signup_bonus: signup,
            referral_bonus: referral,
            referred_bonus: referred,
        }
    }

    #[test]
    fn test_referral_code_shape() {
        for _ in 0..50 {
            let code = generate_referral_code();
            assert_eq!(code.len(), REFERRAL_CODE_LEN);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn test_normalize_referral_code() {
        assert_eq!(normalize_referral_code("  ab12cd34 "), "AB12CD34");
    }

    #[test]
    fn test_signup_without_referral() {
        let plan = plan_signup_rewards(&rewards(50, 100, 25), 7, None);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].user_id, 7);
        assert_eq!(plan[0].amount, 50);
        assert_eq!(plan[0].reason, CoinReason::SignupBonus);
    }

    #[test]
    fn test_signup_with_referral_credits_both_sides() {
        let plan = plan_signup_rewards(&rewards(50, 100, 25), 7, Some(3));
        assert_eq!(plan.len(), 3);

        let new_user_total: i64 = plan.iter().filter(|e| e.user_id == 7).map(|e| e.amount).sum();
        assert_eq!(new_user_total, 75);

        let referrer = plan.iter().find(|e| e.user_id == 3).unwrap();
        assert_eq!(referrer.amount, 100);
        assert_eq!(referrer.reason, CoinReason::ReferralBonus);
        assert_eq!(referrer.counterparty_id, Some(7));
    }

    #[test]
    fn test_zero_amounts_skipped() {
        let plan = plan_signup_rewards(&rewards(0, 100, 0), 7, Some(3));
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].reason, CoinReason::ReferralBonus);

        assert!(plan_signup_rewards(&rewards(0, 0, 0), 7, Some(3)).is_empty());
    }

    #[test]
    fn test_redemption_is_debit() {
        let entry = redemption_entry(4, 30, Some("gift card".into()));
        assert_eq!(entry.amount, -30);
        assert_eq!(entry.reason, CoinReason::Redemption);
    }
}
