use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use rand::Rng;

const CLIENT_SUFFIX_LEN: usize = 9;
const SESSION_SUFFIX_LEN: usize = 6;
const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
}

pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        match LocalStorage::get(key) {
            Ok(value) => Some(value),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                log::warn!("Failed to read {key} from local storage: {err}");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::set(key, value) {
            log::warn!("Failed to persist {key} to local storage: {err}");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub client_id: String,
    pub session_id: String,
}

pub struct IdentityStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> IdentityStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get_or_create(&self, token: &str, now_ms: f64) -> SessionIdentity {
        let client_id = self.get_or_mint(&client_id_key(token), "client", CLIENT_SUFFIX_LEN, now_ms);
        let session_id =
            self.get_or_mint(&session_id_key(token), "session", SESSION_SUFFIX_LEN, now_ms);
        SessionIdentity {
            client_id,
            session_id,
        }
    }

    // The results backend parses the <prefix>_<ms>_<suffix> shape out of
    // reported ids; keep it stable.
    fn get_or_mint(&self, key: &str, prefix: &str, suffix_len: usize, now_ms: f64) -> String {
        if let Some(existing) = self.store.read(key) {
            return existing;
        }
        let minted = format!("{prefix}_{}_{}", now_ms as u64, random_suffix(suffix_len));
        self.store.write(key, &minted);
        minted
    }

    pub fn display_name(&self, token: &str) -> Option<String> {
        self.store
            .read(&user_name_key(token))
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }

    pub fn set_display_name(&self, token: &str, name: &str) -> Option<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.store.write(&user_name_key(token), trimmed);
        Some(trimmed.to_string())
    }
}

fn client_id_key(token: &str) -> String {
    format!("clientId_{token}")
}

fn session_id_key(token: &str) -> String {
    format!("sessionId_{token}")
}

fn user_name_key(token: &str) -> String {
    format!("userName_{token}")
}

fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        entries: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStorage {
        fn read(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn write(&self, key: &str, value: &str) {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
    }

    fn store() -> IdentityStore<MemoryStorage> {
        IdentityStore::new(MemoryStorage::default())
    }

    #[test]
    fn identity_is_stable_across_repeat_visits() {
        let store = store();
        let first = store.get_or_create("abc123", 1_700_000_000_000.0);
        let second = store.get_or_create("abc123", 1_700_000_999_999.0);
        assert_eq!(first, second);
    }

    #[test]
    fn each_review_link_gets_its_own_identity() {
        let store = store();
        let one = store.get_or_create("token-one", 1_000.0);
        let two = store.get_or_create("token-two", 1_000.0);
        assert_ne!(one.client_id, two.client_id);
        assert_ne!(one.session_id, two.session_id);
    }

    #[test]
    fn minted_ids_follow_the_prefix_timestamp_suffix_shape() {
        let store = store();
        let identity = store.get_or_create("tok", 1_234.0);

        let client: Vec<&str> = identity.client_id.splitn(3, '_').collect();
        assert_eq!(client[0], "client");
        assert_eq!(client[1], "1234");
        assert_eq!(client[2].len(), CLIENT_SUFFIX_LEN);
        assert!(client[2].bytes().all(|b| SUFFIX_CHARSET.contains(&b)));

        let session: Vec<&str> = identity.session_id.splitn(3, '_').collect();
        assert_eq!(session[0], "session");
        assert_eq!(session[2].len(), SESSION_SUFFIX_LEN);
    }

    #[test]
    fn display_name_round_trips_trimmed() {
        let store = store();
        assert_eq!(store.display_name("tok"), None);
        assert_eq!(
            store.set_display_name("tok", "  Sean  "),
            Some("Sean".to_string())
        );
        assert_eq!(store.display_name("tok"), Some("Sean".to_string()));
    }

    #[test]
    fn blank_display_names_are_rejected() {
        let store = store();
        assert_eq!(store.set_display_name("tok", "   "), None);
        assert_eq!(store.display_name("tok"), None);
    }

    #[test]
    fn display_names_are_scoped_per_link() {
        let store = store();
        store.set_display_name("one", "Ada");
        assert_eq!(store.display_name("two"), None);
    }
}
