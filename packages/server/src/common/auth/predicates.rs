//! Permission predicates.
//!
//! Pure functions of (principal, optional target owner) -> bool; no I/O.
//! Handlers resolve the principal's role first, then consult these before
//! mutating anything. A principal with no role fails every role check.

use super::Principal;
use crate::common::UserId;

/// Offer creation requires the business role. Staff does not pass through
/// here: an admin without a business profile cannot list services.
pub fn can_create_offer(actor: &Principal) -> bool {
    actor.is_business()
}

/// Offer mutation/deletion: owner or staff.
pub fn can_mutate_offer(actor: &Principal, owner_id: UserId) -> bool {
    actor.is_staff || actor.user_id == owner_id
}

/// Order creation requires the customer role; staff passes through.
pub fn can_create_order(actor: &Principal) -> bool {
    actor.is_staff || actor.is_customer()
}

/// Status transitions belong to the order's business side, or staff.
pub fn can_transition_order(actor: &Principal, business_id: UserId) -> bool {
    actor.is_staff || actor.user_id == business_id
}

/// Order deletion is staff-only.
pub fn can_delete_order(actor: &Principal) -> bool {
    actor.is_staff
}

/// An order is visible to either party, or staff.
pub fn can_view_order(actor: &Principal, customer_id: UserId, business_id: UserId) -> bool {
    actor.is_staff || actor.user_id == customer_id || actor.user_id == business_id
}

/// Review creation requires the customer role; staff passes through.
pub fn can_create_review(actor: &Principal) -> bool {
    actor.is_staff || actor.is_customer()
}

/// Review mutation/deletion: the reviewer or staff.
pub fn can_mutate_review(actor: &Principal, reviewer_id: UserId) -> bool {
    actor.is_staff || actor.user_id == reviewer_id
}

/// Profile mutation: the profile's user or staff.
pub fn can_mutate_profile(actor: &Principal, profile_user_id: UserId) -> bool {
    actor.is_staff || actor.user_id == profile_user_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::auth::Role;

    fn principal(role: Option<Role>, is_staff: bool) -> Principal {
        Principal {
            user_id: UserId::new(),
            role,
            is_staff,
        }
    }

    #[test]
    fn test_only_business_can_create_offers() {
        assert!(can_create_offer(&principal(Some(Role::Business), false)));
        assert!(!can_create_offer(&principal(Some(Role::Customer), false)));
        // Staff without a business profile still cannot create offers
        assert!(!can_create_offer(&principal(None, true)));
    }

    #[test]
    fn test_roleless_principal_is_denied_by_default() {
        let actor = principal(None, false);
        assert!(!can_create_offer(&actor));
        assert!(!can_create_order(&actor));
        assert!(!can_create_review(&actor));
    }

    #[test]
    fn test_offer_mutation_requires_ownership_or_staff() {
        let actor = principal(Some(Role::Business), false);
        assert!(can_mutate_offer(&actor, actor.user_id));
        assert!(!can_mutate_offer(&actor, UserId::new()));

        let staff = principal(None, true);
        assert!(can_mutate_offer(&staff, UserId::new()));
    }

    #[test]
    fn test_order_creation_requires_customer_or_staff() {
        assert!(can_create_order(&principal(Some(Role::Customer), false)));
        assert!(can_create_order(&principal(None, true)));
        assert!(!can_create_order(&principal(Some(Role::Business), false)));
    }

    #[test]
    fn test_order_transition_gated_on_business_side() {
        let business = principal(Some(Role::Business), false);
        assert!(can_transition_order(&business, business.user_id));
        assert!(!can_transition_order(&business, UserId::new()));

        let customer = principal(Some(Role::Customer), false);
        assert!(!can_transition_order(&customer, UserId::new()));

        assert!(can_transition_order(&principal(None, true), UserId::new()));
    }

    #[test]
    fn test_order_deletion_is_staff_only() {
        assert!(can_delete_order(&principal(None, true)));
        assert!(!can_delete_order(&principal(Some(Role::Business), false)));
        assert!(!can_delete_order(&principal(Some(Role::Customer), false)));
    }

    #[test]
    fn test_order_visibility() {
        let actor = principal(Some(Role::Customer), false);
        let other = UserId::new();
        assert!(can_view_order(&actor, actor.user_id, other));
        assert!(can_view_order(&actor, other, actor.user_id));
        assert!(!can_view_order(&actor, other, UserId::new()));
    }

    #[test]
    fn test_review_mutation_requires_reviewer_or_staff() {
        let actor = principal(Some(Role::Customer), false);
        assert!(can_mutate_review(&actor, actor.user_id));
        assert!(!can_mutate_review(&actor, UserId::new()));
        assert!(can_mutate_review(&principal(None, true), UserId::new()));
    }
}
