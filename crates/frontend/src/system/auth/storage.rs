use contracts::system::auth::Credential;
use std::cell::RefCell;
use std::collections::HashMap;

pub const ACCESS_TOKEN_KEY: &str = "authToken";
pub const CREATED_AT_TOKEN_KEY: &str = "createdAtToken";

/// Durable home of the session credential.
///
/// Both tokens are written and removed together; a store holding only one
/// of them reads as signed out.
pub trait CredentialStore {
    fn load(&self) -> Option<Credential>;
    fn save(&self, credential: &Credential);
    fn clear(&self);
}

fn credential_from(
    access_token: Option<String>,
    created_at_token: Option<String>,
) -> Option<Credential> {
    let access_token = access_token.filter(|t| !t.is_empty());
    let created_at_token = created_at_token.filter(|t| !t.is_empty());
    match (access_token, created_at_token) {
        (Some(access_token), Some(created_at_token)) => Some(Credential {
            access_token,
            created_at_token,
        }),
        (None, None) => None,
        _ => {
            log::warn!("Half of the credential is missing in storage, treating as signed out");
            None
        }
    }
}

/// localStorage of the current origin
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl CredentialStore for LocalStorageStore {
    fn load(&self) -> Option<Credential> {
        let storage = Self::storage()?;
        credential_from(
            storage.get_item(ACCESS_TOKEN_KEY).ok()?,
            storage.get_item(CREATED_AT_TOKEN_KEY).ok()?,
        )
    }

    fn save(&self, credential: &Credential) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(ACCESS_TOKEN_KEY, &credential.access_token);
            let _ = storage.set_item(CREATED_AT_TOKEN_KEY, &credential.created_at_token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(ACCESS_TOKEN_KEY);
            let _ = storage.remove_item(CREATED_AT_TOKEN_KEY);
        }
    }
}

/// In-memory key/value store with the same keys as localStorage
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: &Credential) -> Self {
        let store = Self::new();
        store.save(credential);
        store
    }

    pub fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<Credential> {
        credential_from(
            self.get_item(ACCESS_TOKEN_KEY),
            self.get_item(CREATED_AT_TOKEN_KEY),
        )
    }

    fn save(&self, credential: &Credential) {
        self.set_item(ACCESS_TOKEN_KEY, &credential.access_token);
        self.set_item(CREATED_AT_TOKEN_KEY, &credential.created_at_token);
    }

    fn clear(&self) {
        let mut items = self.items.borrow_mut();
        items.remove(ACCESS_TOKEN_KEY);
        items.remove(CREATED_AT_TOKEN_KEY);
    }
}
