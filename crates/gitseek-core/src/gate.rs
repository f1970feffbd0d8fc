// Usage gate - the only thing we consume from the sign-in flow
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::{Error, Result};

/// Anonymous sessions get this long before they have to sign in
pub const SESSION_LIMIT: Duration = Duration::from_secs(30 * 60);

/// A stored session older than this is replaced by a fresh one
pub const SESSION_RENEWAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Answers "may I keep operating?" before each network request
pub trait UsageGate: Send + Sync {
    fn may_continue(&self) -> bool;
}

/// Signed-in users are never gated
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl UsageGate for Unlimited {
    fn may_continue(&self) -> bool {
        true
    }
}

/// Allows requests until a fixed amount of wall-clock time has passed since
/// the session started
#[derive(Debug, Clone)]
pub struct SessionTimer {
    started_at: DateTime<Utc>,
    limit: Duration,
}

impl SessionTimer {
    /// Continue a session that began at `started_at`
    pub fn resume(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            limit: SESSION_LIMIT,
        }
    }

    pub fn with_limit(limit: Duration) -> Self {
        Self {
            started_at: Utc::now(),
            limit,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        self.limit.saturating_sub(elapsed(self.started_at, now))
    }

    pub fn remaining(&self) -> Duration {
        self.remaining_at(Utc::now())
    }
}

impl UsageGate for SessionTimer {
    fn may_continue(&self) -> bool {
        !self.remaining().is_zero()
    }
}

/// A clock that went backwards counts as no time elapsed
fn elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - since).to_std().unwrap_or(Duration::ZERO)
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    started_at: DateTime<Utc>,
}

/// Remembers when the anonymous session started, so the limit holds across
/// separate invocations
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/gitseek/session.json`
    pub fn default_location() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| Error::ConfigError("Could not find data directory".into()))?;
        Ok(Self::new(dir.join("gitseek").join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resume the stored session, or start and store a new one when there is
    /// none or it is older than `SESSION_RENEWAL`
    pub fn resume_or_start(&self, now: DateTime<Utc>) -> Result<SessionTimer> {
        if let Some(started_at) = self.load()? {
            if elapsed(started_at, now) < SESSION_RENEWAL {
                debug!("Resuming session started at {}", started_at);
                return Ok(SessionTimer::resume(started_at));
            }
        }

        self.save(now)?;
        debug!("Started new session at {}", now);
        Ok(SessionTimer::resume(now))
    }

    fn load(&self) -> Result<Option<DateTime<Utc>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let record: SessionRecord = serde_json::from_str(&contents)?;
        Ok(Some(record.started_at))
    }

    fn save(&self, started_at: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&SessionRecord { started_at })?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}
