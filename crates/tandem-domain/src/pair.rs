//! Canonical unordered pair of users
//!
//! The relationship store is keyed by the *pair*, not by direction: for any
//! two users at most one record may exist, regardless of who acted first.
//! `PairKey` canonicalizes the two ids into a fixed order so uniqueness can
//! be enforced with a single index instead of a dual-direction lookup.
//! Direction ("who asked first") is carried separately on the record itself.

use crate::UserId;

/// Canonical unordered pair of two distinct user ids
///
/// The two ids are held sorted, so `PairKey::new(a, b) == PairKey::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    lo: UserId,
    hi: UserId,
}

impl PairKey {
    /// Build the canonical key for two users
    ///
    /// # Panics
    /// Panics if `a == b`; a user never has a relationship with themselves.
    /// Callers validate self-pairs before constructing a key.
    pub fn new(a: UserId, b: UserId) -> Self {
        assert_ne!(a, b, "Pair members must be distinct");

        if a < b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The smaller id of the pair
    pub fn lo(&self) -> UserId {
        self.lo
    }

    /// The larger id of the pair
    pub fn hi(&self) -> UserId {
        self.hi
    }

    /// Whether the given user is one side of this pair
    pub fn contains(&self, user: UserId) -> bool {
        self.lo == user || self.hi == user
    }

    /// The other side of the pair, if `user` is a member
    pub fn counterpart(&self, user: UserId) -> Option<UserId> {
        if user == self.lo {
            Some(self.hi)
        } else if user == self.hi {
            Some(self.lo)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    #[test]
    fn test_symmetric_construction() {
        let a = UserId::new();
        let b = UserId::new();
        assert_eq!(PairKey::new(a, b), PairKey::new(b, a));
    }

    #[test]
    fn test_counterpart() {
        let a = UserId::new();
        let b = UserId::new();
        let c = UserId::new();
        let key = PairKey::new(a, b);

        assert_eq!(key.counterpart(a), Some(b));
        assert_eq!(key.counterpart(b), Some(a));
        assert_eq!(key.counterpart(c), None);
    }

    #[test]
    #[should_panic]
    fn test_self_pair_panics() {
        let a = UserId::new();
        PairKey::new(a, a);
    }

    fn arb_user_id() -> impl Strategy<Value = UserId> {
        any::<u128>().prop_map(|v| UserId::from_uuid(Uuid::from_u128(v)))
    }

    proptest! {
        #[test]
        fn prop_order_independent(a in arb_user_id(), b in arb_user_id()) {
            prop_assume!(a != b);
            prop_assert_eq!(PairKey::new(a, b), PairKey::new(b, a));
        }

        #[test]
        fn prop_lo_below_hi(a in arb_user_id(), b in arb_user_id()) {
            prop_assume!(a != b);
            let key = PairKey::new(a, b);
            prop_assert!(key.lo() < key.hi());
            prop_assert!(key.contains(a) && key.contains(b));
        }
    }
}
