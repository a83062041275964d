use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use super::super::domain::{JobPosting, MatchCandidate};
use super::outreach::{suppress_recent_contacts, ContactLog, ContactLogError};
use super::pipeline::{CandidateFilterPipeline, FilterStats};
use super::scoring::{score_candidate, MatchQuality, MatchWeights, ScoreBreakdown};
use crate::config::ScreeningConfig;

/// Shortlist failures. Contact-log errors surface transparently so the
/// caller sees the collaborator's own error, not a rewrapped one.
#[derive(Debug, thiserror::Error)]
pub enum ShortlistError {
    #[error(transparent)]
    Contacts(#[from] ContactLogError),
}

/// One ranked shortlist entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch {
    pub candidate: MatchCandidate,
    pub score: f32,
    pub quality: MatchQuality,
    pub breakdown: ScoreBreakdown,
}

/// Ranked survivors plus the diagnostics recruiters see next to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortlist {
    pub entries: Vec<ScoredMatch>,
    pub stats: FilterStats,
    /// Candidates dropped by recontact suppression after the pure stages.
    pub recontact_suppressed: usize,
}

/// Composes the filter pipeline, recontact suppression, and scoring into
/// the shortlist operation behind the API and CLI.
pub struct ShortlistService<C> {
    pipeline: CandidateFilterPipeline,
    weights: MatchWeights,
    contacts: Arc<C>,
    recontact_window: Duration,
}

impl<C> ShortlistService<C>
where
    C: ContactLog + 'static,
{
    pub fn new(
        pipeline: CandidateFilterPipeline,
        weights: MatchWeights,
        contacts: Arc<C>,
        config: &ScreeningConfig,
    ) -> Self {
        Self {
            pipeline,
            weights,
            contacts,
            recontact_window: Duration::days(config.recontact_window_days),
        }
    }

    pub fn pipeline(&self) -> &CandidateFilterPipeline {
        &self.pipeline
    }

    /// Filter, suppress recent contacts, score, and rank a match batch.
    ///
    /// The pure stages cannot fail; the only error source is the injected
    /// contact log, and its errors pass through unmodified.
    pub async fn shortlist(
        &self,
        candidates: Vec<MatchCandidate>,
        job: &JobPosting,
        now: DateTime<Utc>,
    ) -> Result<Shortlist, ShortlistError> {
        let outcome = self.pipeline.apply(candidates, job, now.date_naive());
        let stats = outcome.stats;

        let survivors = suppress_recent_contacts(
            outcome.survivors,
            self.contacts.as_ref(),
            self.recontact_window,
            now,
        )
        .await?;
        let recontact_suppressed = stats.after_subject - survivors.len();

        let mut entries: Vec<ScoredMatch> = survivors
            .into_iter()
            .map(|candidate| {
                let (score, breakdown) = score_candidate(&candidate, job, &self.weights);
                ScoredMatch {
                    candidate,
                    score,
                    quality: MatchQuality::from_score(score),
                    breakdown,
                }
            })
            .collect();
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(
            job_id = %job.job_id,
            initial = stats.initial,
            shortlisted = entries.len(),
            recontact_suppressed,
            "shortlist assembled"
        );

        Ok(Shortlist {
            entries,
            stats,
            recontact_suppressed,
        })
    }
}
