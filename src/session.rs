//! Explicit authentication state.
//!
//! A [`Session`] is created signed out, or hydrated from a persisted token that
//! is validated against the backend before it is trusted. It is passed to
//! whatever needs the bearer token; nothing else writes the token.

use crate::error::{RepositoryError, SessionError};
use crate::model::{ProfileUpdate, User};
use crate::repository::{AuthApi, AuthGrant};
use async_trait::async_trait;
use log::{info, warn};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Persistence for the single bearer token
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> io::Result<Option<String>>;
    async fn save(&self, token: &str) -> io::Result<()>;
    async fn clear(&self) -> io::Result<()>;
}

/// Keeps the token in a file, creating parent directories on save
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTokenStore { path: path.into() }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> io::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, token).await
    }

    async fn clear(&self) -> io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Keeps the token for the lifetime of the process
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        MemoryTokenStore {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> io::Result<Option<String>> {
        Ok(self.slot().clone())
    }

    async fn save(&self, token: &str) -> io::Result<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> io::Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// The signed-in user and their bearer token, if any
pub struct Session {
    store: Arc<dyn TokenStore>,
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// A signed-out session backed by `store`
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Session {
            store,
            token: None,
            user: None,
        }
    }

    /// A signed-out session that persists nothing
    pub fn anonymous() -> Self {
        Self::new(Arc::new(MemoryTokenStore::default()))
    }

    /// Restore a session from the persisted token.
    ///
    /// The token is only kept if the backend still resolves it to an account;
    /// otherwise it is removed from the store and the session starts signed out.
    pub async fn hydrate(
        store: Arc<dyn TokenStore>,
        auth: &dyn AuthApi,
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(store);

        if let Some(token) = session.store.load().await? {
            match auth.profile(&token).await {
                Ok(user) => {
                    info!("Restored session for {}", user.display_name());
                    session.token = Some(token);
                    session.user = Some(user);
                }
                Err(e) => {
                    warn!("Discarding stored session token: {}", e);
                    session.store.clear().await?;
                }
            }
        }

        Ok(session)
    }

    pub async fn sign_up(
        &mut self,
        auth: &dyn AuthApi,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<&User, SessionError> {
        let grant = auth.sign_up(email, password, full_name).await?;
        self.establish(grant).await
    }

    pub async fn sign_in(
        &mut self,
        auth: &dyn AuthApi,
        email: &str,
        password: &str,
    ) -> Result<&User, SessionError> {
        let grant = auth.sign_in(email, password).await?;
        self.establish(grant).await
    }

    /// Forget the user and token, in memory and in the store
    pub async fn sign_out(&mut self) -> Result<(), SessionError> {
        self.token = None;
        self.user = None;
        self.store.clear().await?;
        Ok(())
    }

    pub async fn update_profile(
        &mut self,
        auth: &dyn AuthApi,
        update: &ProfileUpdate,
    ) -> Result<&User, SessionError> {
        let user = auth.update_profile(self.require_token()?, update).await?;
        Ok(self.user.insert(user))
    }

    /// Re-read the account from the backend
    pub async fn refresh_profile(&mut self, auth: &dyn AuthApi) -> Result<&User, SessionError> {
        let user = auth.profile(self.require_token()?).await?;
        Ok(self.user.insert(user))
    }

    async fn establish(&mut self, grant: AuthGrant) -> Result<&User, SessionError> {
        self.store.save(&grant.token).await?;
        self.token = Some(grant.token);
        Ok(self.user.insert(grant.user))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Both a validated user and a token are present
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// The bearer token, or [`RepositoryError::NotAuthenticated`]
    pub fn require_token(&self) -> Result<&str, RepositoryError> {
        self.token().ok_or(RepositoryError::NotAuthenticated)
    }
}
