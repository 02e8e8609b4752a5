//! Property Tests
//!
//! Randomized checks of the map contract over user-visible keys.

use crate::*;
use proptest::prelude::*;

/// Keys that never carry the internal prefix
fn user_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[ -~]{0,16}".prop_map(Value::String),
        proptest::collection::vec(any::<u8>(), 0..8).prop_map(Value::Bytes),
    ]
}

proptest! {
    #[test]
    fn prop_set_then_get(key in user_key(), value in scalar()) {
        let store = SessionStore::new();
        let session = open_quiet(&store, BindingMode::Live);
        session.set(key.as_str(), value.clone());
        prop_assert_eq!(session.get(&key), Some(value));
    }

    #[test]
    fn prop_get_missing_returns_default(key in user_key(), default in scalar()) {
        let store = SessionStore::new();
        let session = open_quiet(&store, BindingMode::Live);
        prop_assert_eq!(session.get_or(&key, default.clone()), default);
    }

    #[test]
    fn prop_unset_then_get_is_default(key in user_key(), value in scalar()) {
        let store = SessionStore::new();
        let session = open_quiet(&store, BindingMode::Live);
        session.set(key.as_str(), value);
        session.unset(&key);
        prop_assert!(session.get(&key).is_none());
    }

    #[test]
    fn prop_count_matches_distinct_user_keys(
        keys in proptest::collection::vec(user_key(), 0..20),
        once_keys in proptest::collection::vec(user_key(), 0..5),
    ) {
        let store = SessionStore::new();
        let session = open_quiet(&store, BindingMode::Live);
        for key in &keys {
            session.set(key.as_str(), 1i64);
        }
        for key in &once_keys {
            session.once(key.as_str(), 1i64);
        }
        session.refresh_expire_time();

        let distinct: std::collections::HashSet<_> = keys.iter().collect();
        prop_assert_eq!(session.count(), distinct.len());
        prop_assert_eq!(session.iter().count(), distinct.len());
        prop_assert!(session.iter().all(|(k, _)| !session.is_internal_key(&k)));
    }

    #[test]
    fn prop_destroy_empties_view(keys in proptest::collection::vec(user_key(), 0..20)) {
        for mode in ALL_MODES {
            let store = SessionStore::new();
            let session = open_quiet(&store, mode);
            for key in &keys {
                session.set(key.as_str(), "v");
            }
            session.once("pending", "x");
            session.destroy();
            prop_assert_eq!(session.count(), 0);
            prop_assert!(session.iter().next().is_none());
            prop_assert_eq!(session.peek_all_once().len(), 1);
        }
    }

    #[test]
    fn prop_once_is_read_once(key in user_key(), value in scalar()) {
        let store = SessionStore::new();
        let session = open_quiet(&store, BindingMode::Live);
        session.once(key.as_str(), value.clone());
        prop_assert!(session.get(&key).is_none());
        prop_assert_eq!(session.peek_once(&key), Some(value.clone()));
        prop_assert_eq!(session.get_once(&key), Some(value));
        prop_assert!(session.get_once(&key).is_none());
    }
}
