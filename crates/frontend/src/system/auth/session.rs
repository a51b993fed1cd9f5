use contracts::system::auth::Credential;
use std::cell::RefCell;
use std::rc::Rc;

use super::storage::{CredentialStore, LocalStorageStore};

/// Entry point of the console (sign-in form)
pub const SIGN_IN_PATH: &str = "/";
/// Where a fresh sign-in lands
pub const HOME_PATH: &str = "/orders";

/// Page navigation side effect
pub trait Navigator {
    fn go_to(&self, path: &str);

    fn go_to_sign_in(&self) {
        self.go_to(SIGN_IN_PATH);
    }
}

/// Full page navigation through `window.location`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn go_to(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                log::error!("Navigation to {} failed: {:?}", path, e);
            }
        }
    }
}

/// Records navigations instead of performing them
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_string());
    }
}

/// Сессия администратора, создаётся один раз на загрузку страницы.
///
/// Every component that talks to the API receives a clone of this object
/// instead of reading storage on its own.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn CredentialStore>,
    navigator: Rc<dyn Navigator>,
}

impl Session {
    pub fn new(store: Rc<dyn CredentialStore>, navigator: Rc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    pub fn browser() -> Self {
        Self::new(Rc::new(LocalStorageStore), Rc::new(BrowserNavigator))
    }

    pub fn current(&self) -> Option<Credential> {
        self.store.load()
    }

    pub fn set(&self, credential: &Credential) {
        self.store.save(credential);
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Credential for a page that needs one.
    ///
    /// Without a credential the page is sent to sign-in and `None` is
    /// returned; the caller should render nothing further.
    pub fn require(&self) -> Option<Credential> {
        let credential = self.current();
        if credential.is_none() {
            log::info!("No session, redirecting to sign-in");
            self.navigator.go_to_sign_in();
        }
        credential
    }

    /// The server no longer accepts the credential
    pub fn expire(&self) {
        log::warn!("Session expired, signing out");
        self.clear();
        self.navigator.go_to_sign_in();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::storage::MemoryStore;

    fn credential() -> Credential {
        Credential {
            access_token: "abc".into(),
            created_at_token: "2024-01-01T00:00:00".into(),
        }
    }

    #[test]
    fn test_require_without_credential_redirects() {
        let navigator = Rc::new(RecordingNavigator::default());
        let session = Session::new(Rc::new(MemoryStore::new()), navigator.clone());

        assert_eq!(session.require(), None);
        assert_eq!(navigator.visited(), vec![SIGN_IN_PATH.to_string()]);
    }

    #[test]
    fn test_require_with_credential_stays() {
        let navigator = Rc::new(RecordingNavigator::default());
        let session = Session::new(
            Rc::new(MemoryStore::with_credential(&credential())),
            navigator.clone(),
        );

        assert_eq!(session.require(), Some(credential()));
        assert!(navigator.visited().is_empty());
    }

    #[test]
    fn test_expire_clears_and_redirects() {
        let navigator = Rc::new(RecordingNavigator::default());
        let session = Session::new(
            Rc::new(MemoryStore::with_credential(&credential())),
            navigator.clone(),
        );

        session.expire();
        assert_eq!(session.current(), None);
        assert_eq!(navigator.visited(), vec![SIGN_IN_PATH.to_string()]);
    }
}
