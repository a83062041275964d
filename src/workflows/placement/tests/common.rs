use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::config::ScreeningConfig;
use crate::workflows::placement::domain::{
    CandidateProfile, DegreeLevel, JobPosting, MatchCandidate, TeacherId,
};
use crate::workflows::placement::matching::{
    CandidateFilterPipeline, ContactLog, ContactLogError, InMemoryContactLog, MatchWeights,
    ShortlistService,
};
use crate::workflows::placement::screening::EligibilityEngine;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
}

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).single().expect("valid timestamp")
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::standard()
}

/// A profile that clears every destination's catalog as of [`today`].
pub(super) fn qualified_profile(id: &str) -> CandidateProfile {
    CandidateProfile {
        teacher_id: TeacherId(id.to_string()),
        full_name: "Dana Whitfield".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1993, 3, 15),
        citizenship: Some("US".to_string()),
        highest_degree: Some(DegreeLevel::Masters),
        years_experience: Some(5),
        has_teaching_certification: true,
        background_check_cleared: true,
        has_criminal_record: false,
        preferred_countries: vec!["KR".to_string(), "JP".to_string()],
        min_salary_usd: Some(2200),
        subjects: vec!["English".to_string()],
        video_quality_score: Some(0.9),
    }
}

pub(super) fn job() -> JobPosting {
    JobPosting {
        job_id: "job-001".to_string(),
        school_name: "Gangnam Language Academy".to_string(),
        country: "KR".to_string(),
        subject: "English".to_string(),
        salary_usd: 2400,
        min_years_experience: 2,
    }
}

pub(super) fn match_candidate(id: &str, similarity: f32) -> MatchCandidate {
    MatchCandidate::new(qualified_profile(id), similarity)
}

pub(super) fn pipeline() -> CandidateFilterPipeline {
    CandidateFilterPipeline::standard()
}

pub(super) fn shortlist_service(
    contacts: Arc<InMemoryContactLog>,
) -> ShortlistService<InMemoryContactLog> {
    ShortlistService::new(
        pipeline(),
        MatchWeights::default(),
        contacts,
        &ScreeningConfig::default(),
    )
}

/// Contact log that always fails, for error propagation checks.
pub(super) struct FailingContactLog;

#[async_trait]
impl ContactLog for FailingContactLog {
    async fn last_contacted(
        &self,
        _teacher: &TeacherId,
    ) -> Result<Option<DateTime<Utc>>, ContactLogError> {
        Err(ContactLogError::Unavailable(
            "outreach datastore offline".to_string(),
        ))
    }
}
