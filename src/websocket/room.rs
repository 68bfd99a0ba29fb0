use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Addresses the subscriber set for one conversation.
///
/// Direct conversations are keyed by the unordered pair of participants:
/// `direct(a, b)` and `direct(b, a)` produce the same key, so there is never
/// a second room for the reverse direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKey {
    Team(Uuid),
    Direct(Uuid, Uuid),
}

impl GroupKey {
    pub fn team(team_id: Uuid) -> Self {
        GroupKey::Team(team_id)
    }

    pub fn direct(a: Uuid, b: Uuid) -> Self {
        if a <= b {
            GroupKey::Direct(a, b)
        } else {
            GroupKey::Direct(b, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_key_is_order_independent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert_eq!(GroupKey::direct(a, b), GroupKey::direct(b, a));
    }

    #[test]
    fn direct_keys_for_different_pairs_differ() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        assert_ne!(GroupKey::direct(a, b), GroupKey::direct(a, c));
    }

    #[test]
    fn team_and_direct_keys_never_collide() {
        let id = Uuid::new_v4();

        assert_ne!(GroupKey::team(id), GroupKey::direct(id, id));
    }
}
