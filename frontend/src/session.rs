//! Persisted login session: the bearer token and the name shown in the header.

use tracing::warn;

pub const TOKEN_KEY: &str = "expense_tracker_token";
pub const USERNAME_KEY: &str = "expense_tracker_username";
pub const DEFAULT_DISPLAY_NAME: &str = "User";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`, scoped to the page origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalStorage;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match local_storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    warn!("could not persist {} to local storage", key);
                }
            }
            None => warn!("local storage unavailable, {} not persisted", key),
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session<S = LocalStorage> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn set_session(&self, token: &str, display_name: &str) {
        self.store.set(TOKEN_KEY, token);
        self.store.set(USERNAME_KEY, display_name);
    }

    pub fn set_display_name(&self, display_name: &str) {
        self.store.set(USERNAME_KEY, display_name);
    }

    pub fn clear_session(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USERNAME_KEY);
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn has_session(&self) -> bool {
        self.token().is_some()
    }

    pub fn current_display_name(&self) -> String {
        self.store
            .get(USERNAME_KEY)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::test_store::MemoryStore;
    use super::*;

    #[test]
    fn fresh_store_has_no_session() {
        let session = Session::new(MemoryStore::default());
        assert!(!session.has_session());
        assert_eq!(session.token(), None);
        assert_eq!(session.current_display_name(), "User");
    }

    #[test]
    fn set_session_persists_both_entries() {
        let store = MemoryStore::default();
        let session = Session::new(store.clone());
        session.set_session("abc.def", "ana");

        assert!(session.has_session());
        assert_eq!(session.token().as_deref(), Some("abc.def"));
        assert_eq!(session.current_display_name(), "ana");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc.def"));
        assert_eq!(store.get(USERNAME_KEY).as_deref(), Some("ana"));
    }

    #[test]
    fn clear_session_removes_both_entries() {
        let store = MemoryStore::default();
        let session = Session::new(store.clone());
        session.set_session("abc.def", "ana");
        session.clear_session();

        assert!(!session.has_session());
        assert!(!store.contains(TOKEN_KEY));
        assert!(!store.contains(USERNAME_KEY));
        assert_eq!(session.current_display_name(), "User");
    }

    #[test]
    fn empty_token_is_not_a_session() {
        let store = MemoryStore::default();
        store.set(TOKEN_KEY, "");
        assert!(!Session::new(store).has_session());
    }

    #[test]
    fn display_name_can_be_refreshed_alone() {
        let session = Session::new(MemoryStore::default());
        session.set_session("tok", "ana@example.com");
        session.set_display_name("ana");
        assert_eq!(session.current_display_name(), "ana");
        assert_eq!(session.token().as_deref(), Some("tok"));
    }
}
