use crate::kv::KvStore;
use async_trait::async_trait;
use braillevoice_core::types::{SessionRecord, UserAccount};
use std::sync::Arc;
use thiserror::Error;

pub const AUTH_KEY: &str = "braillevoice_auth";

/// What the auth endpoints answered. `Denied` is an application-level
/// refusal carrying the server's detail; transport failures come back as
/// `Err` from the gateway instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthReply {
    Granted { token: String, user: UserAccount },
    Denied { detail: String },
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> anyhow::Result<AuthReply>;
    async fn register(&self, username: &str, email: &str, password: &str)
    -> anyhow::Result<AuthReply>;
    async fn logout(&self, token: &str) -> anyhow::Result<()>;
    /// `Ok(false)` covers both a negative `authenticated` flag and a non-2xx
    /// answer; both mean the stored token is untrusted.
    async fn check(&self, token: &str) -> anyhow::Result<bool>;
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// The server's detail message, surfaced verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("Unable to reach the server. Please try again.")]
    Transport(anyhow::Error),
    #[error("Another request is already in progress")]
    InFlight,
}

/// Owns the authenticated identity for the current client context and keeps
/// it consistent with the persisted record.
pub struct SessionManager {
    store: Arc<dyn KvStore>,
    gateway: Arc<dyn AuthGateway>,
    session: Option<SessionRecord>,
}

impl SessionManager {
    /// Constructs the manager and restores any persisted session. A record
    /// that fails to parse is discarded, not retried.
    pub fn new(store: Arc<dyn KvStore>, gateway: Arc<dyn AuthGateway>) -> Self {
        let session = match store.get(AUTH_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<SessionRecord>(&raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("discarding malformed stored session: {e}");
                    let _ = store.remove(AUTH_KEY);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("failed to read stored session: {e:#}");
                None
            }
        };

        Self { store, gateway, session }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// The bearer header set for authenticated calls, empty when signed out.
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        match &self.session {
            Some(s) => vec![braillevoice_api::request::bearer_header(&s.token)],
            None => vec![],
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let reply = self
            .gateway
            .login(username, password)
            .await
            .map_err(AuthError::Transport)?;
        self.absorb_grant(reply)
    }

    /// Fails fast on a password mismatch; no network call is made in that
    /// case.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let reply = self
            .gateway
            .register(username, email, password)
            .await
            .map_err(AuthError::Transport)?;
        self.absorb_grant(reply)
    }

    /// Notifies the server best-effort, then clears local state regardless.
    pub async fn logout(&mut self) -> anyhow::Result<()> {
        let Some(record) = self.session.clone() else {
            return Ok(());
        };

        if let Err(e) = self.gateway.logout(&record.token).await {
            // Local teardown must succeed whatever the network does.
            log::warn!("logout notification failed: {e:#}");
        }

        self.clear()
    }

    /// Revalidates a restored session against the server. Any untrusted
    /// answer destroys the local session.
    pub async fn validate_token(&mut self) -> bool {
        let Some(record) = self.session.clone() else {
            return false;
        };

        match self.gateway.check(&record.token).await {
            Ok(true) => true,
            Ok(false) => {
                let _ = self.clear();
                false
            }
            Err(e) => {
                log::warn!("token validation failed: {e:#}");
                let _ = self.clear();
                false
            }
        }
    }

    fn absorb_grant(&mut self, reply: AuthReply) -> Result<(), AuthError> {
        match reply {
            AuthReply::Granted { token, user } => {
                let record = SessionRecord { token, user };
                let raw = serde_json::to_string(&record).map_err(|e| {
                    AuthError::Transport(anyhow::Error::new(e).context("encode session record"))
                })?;
                self.store
                    .set(AUTH_KEY, &raw)
                    .map_err(AuthError::Transport)?;
                self.session = Some(record);
                Ok(())
            }
            AuthReply::Denied { detail } => Err(AuthError::Rejected(detail)),
        }
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        self.session = None;
        self.store.remove(AUTH_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedGateway {
        reply: AuthReply,
        check_ok: bool,
        calls: AtomicUsize,
    }

    impl ScriptedGateway {
        fn granting() -> Self {
            Self {
                reply: AuthReply::Granted {
                    token: "tok-1".into(),
                    user: UserAccount {
                        username: "amina".into(),
                        email: "amina@example.com".into(),
                    },
                },
                check_ok: true,
                calls: AtomicUsize::new(0),
            }
        }

        fn denying(detail: &str) -> Self {
            Self {
                reply: AuthReply::Denied { detail: detail.into() },
                check_ok: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AuthGateway for ScriptedGateway {
        async fn login(&self, _u: &str, _p: &str) -> anyhow::Result<AuthReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }

        async fn register(&self, _u: &str, _e: &str, _p: &str) -> anyhow::Result<AuthReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }

        async fn logout(&self, _t: &str) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow::anyhow!("network unreachable"))
        }

        async fn check(&self, _t: &str) -> anyhow::Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.check_ok)
        }
    }

    fn manager(gateway: ScriptedGateway) -> (Arc<MemoryKvStore>, SessionManager) {
        let store = Arc::new(MemoryKvStore::new());
        let mgr = SessionManager::new(store.clone(), Arc::new(gateway));
        (store, mgr)
    }

    #[tokio::test]
    async fn login_establishes_and_persists_the_session() {
        let (store, mut mgr) = manager(ScriptedGateway::granting());
        assert!(!mgr.is_authenticated());

        mgr.login("amina", "pw").await.unwrap();
        assert!(mgr.is_authenticated());
        assert_eq!(mgr.current_user().unwrap().username, "amina");
        assert_eq!(
            mgr.auth_headers(),
            vec![("Authorization".to_string(), "Bearer tok-1".to_string())]
        );

        let raw = store.get(AUTH_KEY).unwrap().unwrap();
        let record: SessionRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.token, "tok-1");
    }

    #[tokio::test]
    async fn denied_login_surfaces_the_detail_verbatim() {
        let (store, mut mgr) = manager(ScriptedGateway::denying("Invalid credentials"));
        let err = mgr.login("amina", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!mgr.is_authenticated());
        assert_eq!(store.get(AUTH_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn register_mismatch_never_reaches_the_network() {
        let gateway = ScriptedGateway::granting();
        let store: Arc<MemoryKvStore> = Arc::new(MemoryKvStore::new());
        let gateway = Arc::new(gateway);
        let mut mgr = SessionManager::new(store, gateway.clone());

        let err = mgr
            .register("amina", "a@b.c", "pw1", "pw2")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn logout_clears_locally_even_when_the_notify_fails() {
        let (store, mut mgr) = manager(ScriptedGateway::granting());
        mgr.login("amina", "pw").await.unwrap();

        mgr.logout().await.unwrap();
        assert!(!mgr.is_authenticated());
        assert!(mgr.auth_headers().is_empty());
        assert_eq!(store.get(AUTH_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn restore_then_failed_validation_destroys_the_session() {
        let store: Arc<MemoryKvStore> = Arc::new(MemoryKvStore::new());
        let record = SessionRecord {
            token: "stale".into(),
            user: UserAccount {
                username: "amina".into(),
                email: "amina@example.com".into(),
            },
        };
        store
            .set(AUTH_KEY, &serde_json::to_string(&record).unwrap())
            .unwrap();

        let mut mgr =
            SessionManager::new(store.clone(), Arc::new(ScriptedGateway::denying("x")));
        assert!(mgr.is_authenticated());

        assert!(!mgr.validate_token().await);
        assert!(!mgr.is_authenticated());
        assert_eq!(store.get(AUTH_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_stored_record_is_discarded() {
        let store: Arc<MemoryKvStore> = Arc::new(MemoryKvStore::new());
        store.set(AUTH_KEY, "{not json").unwrap();

        let mgr = SessionManager::new(store.clone(), Arc::new(ScriptedGateway::granting()));
        assert!(!mgr.is_authenticated());
        assert_eq!(store.get(AUTH_KEY).unwrap(), None);
    }
}
