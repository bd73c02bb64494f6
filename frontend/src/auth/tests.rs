use super::*;
use crate::web::MemoryStorage;

// =========================================================
// Helpers
// =========================================================

fn session(role: &str) -> Session {
    Session {
        id: "u1".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        role: role.to_string(),
        token: "token-1".to_string(),
    }
}

fn storage() -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::new())
}

/// 写入失败的存储，用于验证内存会话不受影响
struct ReadOnlyStorage;

impl SessionStorage for ReadOnlyStorage {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &str) -> bool {
        false
    }

    fn remove(&self, _key: &str) -> bool {
        false
    }
}

// =========================================================
// SessionStore
// =========================================================

#[test]
fn test_login_persists_and_exposes_session() {
    let backing = storage();
    let mut store = SessionStore::new(backing.clone());

    store.login(session("user"));

    assert_eq!(store.current(), Some(&session("user")));
    let raw = backing.read(SESSION_STORAGE_KEY).expect("session persisted");
    let persisted: Session = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, session("user"));
}

#[test]
fn test_logout_clears_memory_and_storage() {
    let backing = storage();
    let mut store = SessionStore::new(backing.clone());
    store.login(session("user"));

    store.logout();

    assert!(store.current().is_none());
    assert!(backing.read(SESSION_STORAGE_KEY).is_none());
}

#[test]
fn test_login_replaces_previous_session() {
    let backing = storage();
    let mut store = SessionStore::new(backing.clone());
    store.login(session("user"));
    store.login(session("admin"));

    assert!(store.current().unwrap().is_admin());
    let raw = backing.read(SESSION_STORAGE_KEY).unwrap();
    assert!(raw.contains("admin"));
}

#[test]
fn test_restore_reads_persisted_session() {
    let backing = storage();
    SessionStore::new(backing.clone()).login(session("admin"));

    // 新标签页：全新的 store 共享同一个持久化层
    let mut store = SessionStore::new(backing);
    assert_eq!(store.restore(), Some(&session("admin")));
}

#[test]
fn test_restore_with_empty_storage_stays_anonymous() {
    let mut store = SessionStore::new(storage());
    assert!(store.restore().is_none());
    assert!(store.current().is_none());
}

#[test]
fn test_restore_discards_malformed_session() {
    let backing = storage();
    backing.write(SESSION_STORAGE_KEY, "{not json");
    let mut store = SessionStore::new(backing.clone());

    assert!(store.restore().is_none());
    assert!(backing.read(SESSION_STORAGE_KEY).is_none());
}

#[test]
fn test_restore_discards_session_missing_token() {
    let backing = storage();
    backing.write(
        SESSION_STORAGE_KEY,
        r#"{"id":"u1","name":"Ada","email":"ada@example.com","role":"user"}"#,
    );
    let mut store = SessionStore::new(backing.clone());

    assert!(store.restore().is_none());
    assert!(backing.read(SESSION_STORAGE_KEY).is_none());
}

#[test]
fn test_storage_failure_keeps_in_memory_session() {
    let mut store = SessionStore::new(Arc::new(ReadOnlyStorage));
    store.login(session("user"));
    assert_eq!(store.current(), Some(&session("user")));

    store.logout();
    assert!(store.current().is_none());
}

// =========================================================
// AuthContext
// =========================================================

#[test]
fn test_context_notifies_consumers() {
    let backing = storage();
    let ctx = AuthContext::new(backing.clone());
    let viewer = ctx.viewer_signal();
    assert_eq!(viewer.get_untracked(), Viewer::Anonymous);
    assert!(ctx.api_untracked().is_none());

    ctx.login(session("admin"));
    assert_eq!(viewer.get_untracked(), Viewer::Admin);
    assert_eq!(ctx.session().get_untracked(), Some(session("admin")));
    assert!(ctx.api_untracked().is_some());

    ctx.logout();
    assert_eq!(viewer.get_untracked(), Viewer::Anonymous);
    assert!(ctx.session().get_untracked().is_none());
    assert!(backing.read(SESSION_STORAGE_KEY).is_none());
}

#[test]
fn test_context_restore_from_storage() {
    let backing = storage();
    SessionStore::new(backing.clone()).login(session("user"));

    let ctx = AuthContext::new(backing);
    ctx.restore();
    assert_eq!(ctx.viewer_signal().get_untracked(), Viewer::Member);
}
