//! Status transitions for orders and work applications.

use crate::models::{ApplicationStatus, OrderStatus};

/// Which side of an order is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderParty {
    Brand,
    Creator,
}

/// Creators answer pending orders; brands cancel or complete them.
pub fn order_transition_allowed(party: OrderParty, from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;

    matches!(
        (party, from, to),
        (OrderParty::Creator, Pending, Accepted)
            | (OrderParty::Creator, Pending, Rejected)
            | (OrderParty::Brand, Pending, Cancelled)
            | (OrderParty::Brand, Accepted, Cancelled)
            | (OrderParty::Brand, Accepted, Completed)
    )
}

/// Which side of a work application is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationParty {
    PostOwner,
    Applicant,
}

/// Post owners accept or reject pending applications; applicants may
/// withdraw theirs while pending.
pub fn application_transition_allowed(
    party: ApplicationParty,
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> bool {
    use ApplicationStatus::*;

    matches!(
        (party, from, to),
        (ApplicationParty::PostOwner, Pending, Accepted)
            | (ApplicationParty::PostOwner, Pending, Rejected)
            | (ApplicationParty::Applicant, Pending, Withdrawn)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_transitions_table() {
        let allowed: Vec<(OrderParty, OrderStatus, OrderStatus)> = [OrderParty::Brand, OrderParty::Creator]
            .into_iter()
            .flat_map(|party| {
                OrderStatus::ALL.into_iter().flat_map(move |from| {
                    OrderStatus::ALL
                        .into_iter()
                        .filter(move |to| order_transition_allowed(party, from, *to))
                        .map(move |to| (party, from, to))
                })
            })
            .collect();

        assert_eq!(
            allowed,
            vec![
                (OrderParty::Brand, OrderStatus::Pending, OrderStatus::Cancelled),
                (OrderParty::Brand, OrderStatus::Accepted, OrderStatus::Completed),
                (OrderParty::Brand, OrderStatus::Accepted, OrderStatus::Cancelled),
                (OrderParty::Creator, OrderStatus::Pending, OrderStatus::Accepted),
                (OrderParty::Creator, OrderStatus::Pending, OrderStatus::Rejected),
            ]
        );
    }

    #[test]
    fn test_terminal_order_states() {
        for party in [OrderParty::Brand, OrderParty::Creator] {
            for from in [OrderStatus::Rejected, OrderStatus::Completed, OrderStatus::Cancelled] {
                for to in OrderStatus::ALL {
                    assert!(!order_transition_allowed(party, from, to));
                }
            }
        }
    }

    #[test]
    fn test_application_transitions() {
        use ApplicationStatus::*;

        assert!(application_transition_allowed(ApplicationParty::PostOwner, Pending, Accepted));
        assert!(application_transition_allowed(ApplicationParty::PostOwner, Pending, Rejected));
        assert!(!application_transition_allowed(ApplicationParty::PostOwner, Pending, Withdrawn));
        assert!(application_transition_allowed(ApplicationParty::Applicant, Pending, Withdrawn));
        assert!(!application_transition_allowed(ApplicationParty::Applicant, Pending, Accepted));
        assert!(!application_transition_allowed(ApplicationParty::PostOwner, Accepted, Rejected));
        assert!(!application_transition_allowed(ApplicationParty::Applicant, Withdrawn, Withdrawn));
    }
}
