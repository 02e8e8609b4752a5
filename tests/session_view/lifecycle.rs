//! Lifecycle Tests
//!
//! - live vs detached binding
//! - teardown on close and on drop, exactly once
//! - expiry sentinel refresh
//! - construction failures

use crate::*;

// ============================================================================
// Binding modes
// ============================================================================

#[test]
fn test_live_writes_visible_before_teardown() {
    let store = SessionStore::from_entries([("a", "b")]);
    let session = open_quiet(&store, BindingMode::Live);
    session.set("c", "d");
    session.unset("a");
    assert!(store.contains_key("c"));
    assert!(!store.contains_key("a"));
}

#[test]
fn test_live_sees_host_writes() {
    let store = SessionStore::new();
    let session = open_quiet(&store, BindingMode::Live);
    store.insert("late", 1i64);
    assert_eq!(session.get("late"), Some(Value::Int(1)));
}

#[test]
fn test_detached_writes_hidden_until_close() {
    let store = SessionStore::from_entries([("a", "b")]);
    let session = open_quiet(&store, BindingMode::Detached);
    session.set("a", "c");
    assert_eq!(session.get("a"), Some(Value::from("c")));
    assert_eq!(store.get("a"), Some(Value::from("b")));

    session.close().unwrap();
    assert_eq!(store.get("a"), Some(Value::from("c")));
}

#[test]
fn test_detached_writes_back_on_drop() {
    let store = SessionStore::from_entries([("a", "b")]);
    {
        let session = open_quiet(&store, BindingMode::Detached);
        session.unset("a");
        session.set("x", 1i64);
        assert!(store.contains_key("a"));
    }
    assert!(!store.contains_key("a"));
    assert_eq!(store.get("x"), Some(Value::Int(1)));
}

#[test]
fn test_detached_ignores_host_writes_after_open() {
    let store = SessionStore::from_entries([("a", "b")]);
    let session = open_quiet(&store, BindingMode::Detached);
    store.insert("late", 1i64);
    assert!(session.get("late").is_none());

    // The working copy replaces the host contents at teardown
    session.close().unwrap();
    assert!(!store.contains_key("late"));
}

#[test]
fn test_detached_close_after_host_closed_fails() {
    let store = SessionStore::from_entries([("a", "b")]);
    let session = open_quiet(&store, BindingMode::Detached);
    session.unset("a");
    store.close();

    assert_eq!(session.close().unwrap_err(), Error::StoreClosed);
    assert!(store.contains_key("a"));
}

#[test]
fn test_detached_drop_after_host_closed_does_not_panic() {
    let store = SessionStore::from_entries([("a", "b")]);
    let session = open_quiet(&store, BindingMode::Detached);
    session.unset("a");
    store.close();
    drop(session);
    assert!(store.contains_key("a"));
}

// ============================================================================
// Expiry refresh
// ============================================================================

#[test]
fn test_refresh_writes_integer_sentinel() {
    let store = SessionStore::new();
    let session = open_quiet(&store, BindingMode::Live);
    session.refresh_expire_time();
    assert!(store.get(SENTINEL_KEY).and_then(|v| v.as_int()).is_some());
    assert_eq!(session.count(), 0);
}

#[test]
fn test_refresh_changes_sentinel() {
    let store = SessionStore::new();
    let session = open_quiet(&store, BindingMode::Live);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..8 {
        session.refresh_expire_time();
        seen.insert(store.get(SENTINEL_KEY).and_then(|v| v.as_int()).unwrap());
    }
    // 64-bit random draws; eight identical values would mean no refresh
    assert!(seen.len() > 1);
}

#[test]
fn test_auto_refresh_on_close() {
    test_across_binding_modes(|mode| {
        let store = SessionStore::new();
        let session = SessionView::builder().binding(mode).open(&store).unwrap();
        assert!(!store.contains_key(SENTINEL_KEY));
        session.close().unwrap();
        assert!(store.contains_key(SENTINEL_KEY));
    });
}

#[test]
fn test_auto_refresh_on_drop() {
    let store = SessionStore::new();
    {
        let _session = SessionView::open(&store).unwrap();
    }
    assert!(store.contains_key(SENTINEL_KEY));
}

#[test]
fn test_auto_refresh_disabled_leaves_no_sentinel() {
    test_across_binding_modes(|mode| {
        let store = SessionStore::new();
        let session = open_quiet(&store, mode);
        session.close().unwrap();
        assert!(!store.contains_key(SENTINEL_KEY));
    });
}

#[test]
fn test_teardown_runs_on_error_return() {
    fn handler(store: &SessionStore) -> Result<()> {
        let session = SessionView::builder().detached().open(store)?;
        session.set("seen", true);
        SessionConfig::from_toml_str(r#"prefix = """#)?;
        session.set("unreached", true);
        Ok(())
    }

    let store = SessionStore::new();
    let err = handler(&store).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert_eq!(store.get("seen"), Some(Value::Bool(true)));
    assert!(!store.contains_key("unreached"));
    assert!(store.contains_key(SENTINEL_KEY));
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_open_closed_store_fails() {
    let store = SessionStore::new();
    store.close();
    let err = SessionView::open(&store).unwrap_err();
    assert!(err.is_initialization());
}

#[test]
fn test_open_from_host() {
    let host = InMemoryHost::new();
    {
        let session = SessionView::open_from(&host).unwrap();
        session.set("user", "alice");
    }
    let store = host.current().unwrap();
    assert_eq!(store.get("user"), Some(Value::from("alice")));

    let session = SessionView::open_from(&host).unwrap();
    assert_eq!(session.get("user"), Some(Value::from("alice")));
}

#[test]
fn test_open_from_shut_down_host_fails() {
    let host = InMemoryHost::new();
    host.shutdown();
    let err = SessionView::open_from(&host).unwrap_err();
    assert!(matches!(err, Error::StoreInitialization(_)));
}

#[test]
fn test_open_from_dyn_host() {
    let host: Box<dyn SessionHost> = Box::new(SessionStore::from_entries([("a", "b")]));
    let session = SessionView::open_from(host.as_ref()).unwrap();
    assert_eq!(session.get("a"), Some(Value::from("b")));
}

#[test]
fn test_open_with_toml_config() {
    let config = SessionConfig::from_toml_str(
        r#"
        auto_refresh = false
        binding = "detached"
        "#,
    )
    .unwrap();
    let store = SessionStore::new();
    let session = SessionView::builder().config(config).open(&store).unwrap();
    assert!(session.is_detached());
    session.set("a", 1i64);
    session.close().unwrap();
    assert!(store.contains_key("a"));
    assert!(!store.contains_key(SENTINEL_KEY));
}
