use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::{JobPosting, MatchCandidate};
use super::super::screening::EligibilityEngine;
use crate::config::ScreeningConfig;

/// Dials controlling the drop thresholds of the filter stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterPolicy {
    /// How far a candidate's salary floor may exceed the offer, in percent.
    pub salary_tolerance_pct: f32,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            salary_tolerance_pct: ScreeningConfig::DEFAULT_SALARY_TOLERANCE_PCT,
        }
    }
}

impl From<&ScreeningConfig> for FilterPolicy {
    fn from(config: &ScreeningConfig) -> Self {
        Self {
            salary_tolerance_pct: config.salary_tolerance_pct,
        }
    }
}

/// Candidate counts entering the pipeline and surviving each stage, in
/// stage order. Recorded regardless of whether a stage removed anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    pub initial: usize,
    pub after_visa: usize,
    pub after_experience: usize,
    pub after_salary: usize,
    /// Annotation only; always equals `after_salary`.
    pub after_subject: usize,
}

/// Survivors plus the per-stage diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    pub survivors: Vec<MatchCandidate>,
    pub stats: FilterStats,
}

/// Reduces a match batch against a job posting through the fixed stage
/// sequence: visa, experience, salary, subject annotation. All stages are
/// pure and synchronous; recontact suppression lives in
/// [`super::outreach`] because it is the only stage that needs I/O.
pub struct CandidateFilterPipeline {
    engine: EligibilityEngine,
    policy: FilterPolicy,
}

impl CandidateFilterPipeline {
    pub fn new(engine: EligibilityEngine, policy: FilterPolicy) -> Self {
        Self { engine, policy }
    }

    pub fn standard() -> Self {
        Self::new(EligibilityEngine::standard(), FilterPolicy::default())
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Run all stages over the batch. An empty input or a stage that drops
    /// everyone is a normal outcome reflected in the stats, never an error.
    pub fn apply(
        &self,
        candidates: Vec<MatchCandidate>,
        job: &JobPosting,
        today: NaiveDate,
    ) -> FilterOutcome {
        let initial = candidates.len();

        let survivors: Vec<MatchCandidate> = candidates
            .into_iter()
            .filter(|candidate| {
                self.engine
                    .check(&candidate.profile, &job.country, today)
                    .eligible
            })
            .collect();
        let after_visa = survivors.len();

        let survivors: Vec<MatchCandidate> = survivors
            .into_iter()
            .filter(|candidate| {
                candidate.profile.years_experience.unwrap_or(0) >= job.min_years_experience
            })
            .collect();
        let after_experience = survivors.len();

        let ceiling =
            f64::from(job.salary_usd) * (1.0 + f64::from(self.policy.salary_tolerance_pct) / 100.0);
        let survivors: Vec<MatchCandidate> = survivors
            .into_iter()
            .filter_map(|mut candidate| match candidate.profile.min_salary_usd {
                None => Some(candidate),
                Some(floor) if f64::from(floor) <= ceiling => {
                    candidate.salary_stretch = floor > job.salary_usd;
                    Some(candidate)
                }
                Some(_) => None,
            })
            .collect();
        let after_salary = survivors.len();

        let survivors: Vec<MatchCandidate> = survivors
            .into_iter()
            .map(|mut candidate| {
                candidate.subject_match = subject_overlap(&candidate.profile.subjects, &job.subject);
                candidate
            })
            .collect();
        let after_subject = survivors.len();

        FilterOutcome {
            survivors,
            stats: FilterStats {
                initial,
                after_visa,
                after_experience,
                after_salary,
                after_subject,
            },
        }
    }
}

impl Default for CandidateFilterPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Case-insensitive substring containment in either direction, so
/// "Business English" matches a posting for "English" and vice versa.
fn subject_overlap(subjects: &[String], job_subject: &str) -> bool {
    let posted = job_subject.trim().to_lowercase();
    if posted.is_empty() {
        return false;
    }

    subjects.iter().any(|subject| {
        let taught = subject.trim().to_lowercase();
        !taught.is_empty() && (taught.contains(&posted) || posted.contains(&taught))
    })
}
