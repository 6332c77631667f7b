//! Draft stores.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, query, query_scalar};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    clock::{Clock, SystemClock},
    database::Db,
    domain::drafts::{codec, errors::DraftStoreError, models::OrderDraft},
};

const GET_DRAFT_SQL: &str = include_str!("sql/get_draft.sql");
const UPSERT_DRAFT_SQL: &str = include_str!("sql/upsert_draft.sql");
const DELETE_DRAFT_SQL: &str = include_str!("sql/delete_draft.sql");

const MAX_SESSION_KEY_LEN: usize = 128;

/// How long the memory store keeps a draft nobody has touched.
pub const MEMORY_DRAFT_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Opaque client-held key identifying one shopping session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("session keys must be 1-{MAX_SESSION_KEY_LEN} characters of [A-Za-z0-9_-]")]
pub struct InvalidSessionKey;

impl SessionKey {
    /// Validate a client supplied key.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSessionKey`] for empty, oversized, or non-token keys.
    pub fn parse(value: &str) -> Result<Self, InvalidSessionKey> {
        let valid = !value.is_empty()
            && value.len() <= MAX_SESSION_KEY_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidSessionKey)
        }
    }

    /// Mint a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-session persistence for drafts. Expiry of abandoned drafts is the
/// store's own concern.
#[automock]
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// The stored draft, if the session has one.
    async fn load(&self, session: &SessionKey) -> Result<Option<OrderDraft>, DraftStoreError>;

    /// Replace the session's draft.
    async fn save(&self, session: &SessionKey, draft: &OrderDraft) -> Result<(), DraftStoreError>;

    /// Forget the session's draft. Clearing an unknown session is not an error.
    async fn clear(&self, session: &SessionKey) -> Result<(), DraftStoreError>;
}

/// Postgres-backed store; survives restarts and is shared between instances.
#[derive(Debug, Clone)]
pub struct PgDraftStore {
    db: Db,
}

impl PgDraftStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DraftStore for PgDraftStore {
    async fn load(&self, session: &SessionKey) -> Result<Option<OrderDraft>, DraftStoreError> {
        let mut tx = self.db.begin_transaction().await?;

        let payload = query_scalar::<Postgres, String>(GET_DRAFT_SQL)
            .bind(session.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(payload.as_deref().map(codec::decode).transpose()?)
    }

    async fn save(&self, session: &SessionKey, draft: &OrderDraft) -> Result<(), DraftStoreError> {
        let payload = codec::encode(draft)?;

        let mut tx = self.db.begin_transaction().await?;

        query(UPSERT_DRAFT_SQL)
            .bind(session.as_str())
            .bind(payload)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, session: &SessionKey) -> Result<(), DraftStoreError> {
        let mut tx = self.db.begin_transaction().await?;

        query(DELETE_DRAFT_SQL)
            .bind(session.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

/// Process-local store. Drafts are kept encoded so that every load goes
/// through the same codec as the Postgres store.
///
/// A draft left untouched for longer than the TTL is treated as gone and is
/// swept out on the next save.
#[derive(Debug)]
pub struct MemoryDraftStore {
    drafts: RwLock<FxHashMap<SessionKey, StoredDraft>>,
    ttl: SignedDuration,
    clock: Arc<dyn Clock>,
}

#[derive(Debug)]
struct StoredDraft {
    payload: String,
    saved_at: Timestamp,
}

impl StoredDraft {
    fn is_live(&self, now: Timestamp, ttl: SignedDuration) -> bool {
        now.duration_since(self.saved_at) <= ttl
    }
}

impl MemoryDraftStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(MEMORY_DRAFT_TTL, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_ttl(ttl: SignedDuration, clock: Arc<dyn Clock>) -> Self {
        Self {
            drafts: RwLock::default(),
            ttl,
            clock,
        }
    }
}

impl Default for MemoryDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn load(&self, session: &SessionKey) -> Result<Option<OrderDraft>, DraftStoreError> {
        let now = self.clock.now();
        let drafts = self.drafts.read().await;

        Ok(drafts
            .get(session)
            .filter(|stored| stored.is_live(now, self.ttl))
            .map(|stored| codec::decode(&stored.payload))
            .transpose()?)
    }

    async fn save(&self, session: &SessionKey, draft: &OrderDraft) -> Result<(), DraftStoreError> {
        let payload = codec::encode(draft)?;
        let now = self.clock.now();
        let mut drafts = self.drafts.write().await;

        drafts.retain(|_, stored| stored.is_live(now, self.ttl));
        drafts.insert(
            session.clone(),
            StoredDraft {
                payload,
                saved_at: now,
            },
        );

        Ok(())
    }

    async fn clear(&self, session: &SessionKey) -> Result<(), DraftStoreError> {
        self.drafts.write().await.remove(session);

        Ok(())
    }
}
