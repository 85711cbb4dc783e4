//! Client session identity
//!
//! One session id per client install: created the first time it is needed,
//! persisted through a [`SessionStore`], and read-only afterwards. The id is
//! carried explicitly in a [`SessionContext`] value.

use crate::error::{AudiobookError, Result};
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const SESSION_PREFIX: &str = "session_";
const SESSION_SUFFIX_LEN: usize = 9;

/// Session identifier of the form `session_{unix_ms}_{9 base36 chars}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh id for the given creation time
    pub fn generate(timestamp_ms: i64) -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SESSION_SUFFIX_LEN)
            .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
            .collect();
        Self(format!("{SESSION_PREFIX}{timestamp_ms}_{suffix}"))
    }

    /// Parse a previously persisted id
    pub fn parse(value: &str) -> Result<Self> {
        let rest = value
            .strip_prefix(SESSION_PREFIX)
            .ok_or_else(|| AudiobookError::validation(format!("Invalid session id: {value}")))?;
        let (millis, suffix) = rest
            .split_once('_')
            .ok_or_else(|| AudiobookError::validation(format!("Invalid session id: {value}")))?;

        let well_formed = !millis.is_empty()
            && millis.chars().all(|c| c.is_ascii_digit())
            && !suffix.is_empty()
            && suffix.chars().all(|c| c.is_ascii_alphanumeric());
        if !well_formed {
            return Err(AudiobookError::validation(format!(
                "Invalid session id: {value}"
            )));
        }

        Ok(Self(value.to_string()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persistence for the session id
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the persisted session id, if any
    async fn load_session_id(&self) -> Result<Option<String>>;

    /// Persist the session id
    async fn save_session_id(&self, id: &SessionId) -> Result<()>;
}

/// Explicitly passed session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session_id: SessionId,
}

impl SessionContext {
    /// Context for a known session id
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id }
    }

    /// Load the persisted session, creating and persisting one on first use
    pub async fn get_or_create<S>(store: &S) -> Result<Self>
    where
        S: SessionStore + ?Sized,
    {
        if let Some(existing) = store.load_session_id().await? {
            return Ok(Self::new(SessionId::parse(&existing)?));
        }

        let session_id = SessionId::generate(chrono::Utc::now().timestamp_millis());
        store.save_session_id(&session_id).await?;
        Ok(Self::new(session_id))
    }

    /// The session id
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }
}
