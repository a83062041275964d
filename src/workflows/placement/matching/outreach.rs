use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::super::domain::{MatchCandidate, TeacherId};

/// Lookup failures from the contact history store.
#[derive(Debug, thiserror::Error)]
pub enum ContactLogError {
    #[error("contact log unavailable: {0}")]
    Unavailable(String),
}

/// Narrow data-access capability injected by the caller: the most recent
/// time a teacher was notified about any job. Everything else in the
/// pipeline stays pure and needs no store to test against.
#[async_trait]
pub trait ContactLog: Send + Sync {
    async fn last_contacted(
        &self,
        teacher: &TeacherId,
    ) -> Result<Option<DateTime<Utc>>, ContactLogError>;
}

/// Drop candidates contacted within the recontact window.
///
/// Survivors carry the timestamp the log reported. Lookup errors propagate
/// unmodified; no candidate is silently kept or dropped on failure.
pub async fn suppress_recent_contacts<C>(
    candidates: Vec<MatchCandidate>,
    contacts: &C,
    window: Duration,
    now: DateTime<Utc>,
) -> Result<Vec<MatchCandidate>, ContactLogError>
where
    C: ContactLog + ?Sized,
{
    let mut survivors = Vec::with_capacity(candidates.len());

    for mut candidate in candidates {
        let last_contacted = contacts.last_contacted(&candidate.profile.teacher_id).await?;
        candidate.last_contacted_at = last_contacted;

        let recently_contacted = last_contacted
            .map(|contacted_at| now.signed_duration_since(contacted_at) < window)
            .unwrap_or(false);

        if !recently_contacted {
            survivors.push(candidate);
        }
    }

    Ok(survivors)
}

/// Mutex-backed contact log for the demo server, the CLI, and tests.
#[derive(Debug, Default)]
pub struct InMemoryContactLog {
    entries: Mutex<HashMap<TeacherId, DateTime<Utc>>>,
}

impl InMemoryContactLog {
    pub fn record(&self, teacher: TeacherId, contacted_at: DateTime<Utc>) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let slot = entries.entry(teacher).or_insert(contacted_at);
        if contacted_at > *slot {
            *slot = contacted_at;
        }
    }
}

#[async_trait]
impl ContactLog for InMemoryContactLog {
    async fn last_contacted(
        &self,
        teacher: &TeacherId,
    ) -> Result<Option<DateTime<Utc>>, ContactLogError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(teacher).copied())
    }
}
