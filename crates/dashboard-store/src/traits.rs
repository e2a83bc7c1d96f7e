use async_trait::async_trait;
use dashboard_core::ResolvedSession;

use crate::error::StoreResult;

/// Slot holding the serialized resolved session.
pub const SESSION_KEY: &str = "auth";

/// Process-wide key-value storage for the session and cached entities.
///
/// Uses `async-trait` for object safety (`dyn KeyValueStore`).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Remove every entry, session slot included.
    async fn clear(&self) -> StoreResult<()>;

    // -- Session slot ---

    /// Read the persisted session. A slot that no longer parses is dropped
    /// and reported as no session.
    async fn load_session(&self) -> StoreResult<Option<ResolvedSession>> {
        let Some(raw) = self.get(SESSION_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Discarding unreadable session entry: {e}");
                self.remove(SESSION_KEY).await?;
                Ok(None)
            }
        }
    }

    /// Overwrite the session slot.
    async fn save_session(&self, session: &ResolvedSession) -> StoreResult<()> {
        let raw = serde_json::to_string(session)?;
        self.set(SESSION_KEY, &raw).await
    }

    async fn remove_session(&self) -> StoreResult<()> {
        self.remove(SESSION_KEY).await
    }

    /// Drop cached entries but keep the session slot.
    async fn clear_cache(&self) -> StoreResult<()> {
        let session = self.get(SESSION_KEY).await?;
        self.clear().await?;
        if let Some(raw) = session {
            self.set(SESSION_KEY, &raw).await?;
        }
        Ok(())
    }
}
