//! Dual-backend login.
//!
//! Both backends are asked at once under one shared deadline. Once both
//! have answered (or the deadline fires) the winner is picked by fixed
//! priority, never by who answered first.

use std::sync::Arc;
use std::time::Duration;

use dashboard_core::{AppConfig, ResolvedSession};
use dashboard_store::KeyValueStore;
use tokio::time::Instant;

use crate::backend::AuthBackend;
use crate::backends::{GpgBackend, ValescoBackend};
use crate::credentials::Credentials;
use crate::error::AuthError;
use crate::session::CandidateSession;

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

pub struct SessionResolver {
    primary: Arc<dyn AuthBackend>,
    secondary: Arc<dyn AuthBackend>,
    store: Arc<dyn KeyValueStore>,
    deadline: Duration,
}

impl SessionResolver {
    /// `primary` wins whenever it yields a valid session.
    pub fn new(
        primary: Arc<dyn AuthBackend>,
        secondary: Arc<dyn AuthBackend>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            primary,
            secondary,
            store,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// GPG first, Valesco second, endpoints and timeouts from config.
    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, AuthError> {
        let request_timeout = config.auth.request_timeout();
        let gpg = GpgBackend::new(&config.backends.gpg, request_timeout)?;
        let valesco = ValescoBackend::new(&config.backends.valesco, request_timeout)?;
        Ok(Self::new(Arc::new(gpg), Arc::new(valesco), store)
            .with_deadline(config.auth.login_timeout()))
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Log in against both backends and persist the winning session.
    ///
    /// The store is wiped before any request goes out, so a failed attempt
    /// also ends whatever session existed before it.
    pub async fn resolve(&self, credentials: &Credentials) -> Result<ResolvedSession, AuthError> {
        self.store.clear().await?;
        tracing::debug!("Store purged before login");

        let primary = self.attempt(self.primary.as_ref(), credentials);
        let secondary = self.attempt(self.secondary.as_ref(), credentials);
        let deadline = tokio::time::sleep(self.deadline);
        tokio::pin!(primary, secondary, deadline);

        // Each slot is filled at most once; after the loop nothing is polled again.
        let mut primary_out: Option<Option<CandidateSession>> = None;
        let mut secondary_out: Option<Option<CandidateSession>> = None;
        let mut timed_out = false;

        while primary_out.is_none() || secondary_out.is_none() {
            tokio::select! {
                biased;
                out = &mut primary, if primary_out.is_none() => primary_out = Some(out),
                out = &mut secondary, if secondary_out.is_none() => secondary_out = Some(out),
                () = &mut deadline => {
                    timed_out = true;
                    break;
                }
            }
        }

        // On a deadline, whatever has already settled still competes by priority:
        // a valid secondary wins over a primary that never answered.
        let winner = primary_out.flatten().or_else(|| secondary_out.flatten());
        let Some(candidate) = winner else {
            if timed_out {
                tracing::warn!("Login deadline of {:?} passed without a valid session", self.deadline);
                return Err(AuthError::Timeout);
            }
            tracing::warn!("Neither backend accepted the credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let session = candidate.into_resolved();
        self.store.save_session(&session).await?;
        tracing::info!(
            "Logged in to {} as {} ({})",
            session.backend.display_name(),
            session.user.username,
            session.user.role_label()
        );
        Ok(session)
    }

    /// Wipe the session and all cached data. No network call.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub async fn current_session(&self) -> Result<Option<ResolvedSession>, AuthError> {
        Ok(self.store.load_session().await?)
    }

    /// One backend's login, collapsed to "valid candidate or nothing".
    async fn attempt(
        &self,
        backend: &dyn AuthBackend,
        credentials: &Credentials,
    ) -> Option<CandidateSession> {
        let expected = backend.backend();
        let started = Instant::now();
        let result = backend
            .login(credentials)
            .await
            .and_then(CandidateSession::try_from);

        match result {
            Ok(candidate) if candidate.backend() == expected => {
                tracing::debug!("{} login succeeded in {:?}", expected.display_name(), started.elapsed());
                Some(candidate)
            }
            Ok(candidate) => {
                tracing::warn!(
                    "{} login returned a {} session, ignoring",
                    expected.display_name(),
                    candidate.backend().display_name()
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    "{} login failed after {:?}: {e}",
                    expected.display_name(),
                    started.elapsed()
                );
                None
            }
        }
    }
}
