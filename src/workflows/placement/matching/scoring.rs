use serde::{Deserialize, Serialize};

use super::super::domain::{JobPosting, MatchCandidate};

/// Years of experience at which the experience component saturates.
const EXPERIENCE_CAP_YEARS: f32 = 10.0;

/// Neutral stand-in when no intro video has been reviewed yet.
const NEUTRAL_VIDEO_QUALITY: f32 = 0.5;

/// Weights of the composite match score components. The standard weights
/// sum to 1.0 so the composite lands on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub similarity: f32,
    pub subject_match: f32,
    pub salary_alignment: f32,
    pub video_quality: f32,
    pub experience: f32,
}

impl MatchWeights {
    pub fn total(&self) -> f32 {
        self.similarity
            + self.subject_match
            + self.salary_alignment
            + self.video_quality
            + self.experience
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            similarity: 0.35,
            subject_match: 0.20,
            salary_alignment: 0.15,
            video_quality: 0.15,
            experience: 0.15,
        }
    }
}

/// Per-component contributions in [0, 1], kept for audit display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub similarity: f32,
    pub subject_match: f32,
    pub salary_alignment: f32,
    pub video_quality: f32,
    pub experience: f32,
}

/// Display bands partitioning the 0-100 composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchQuality {
    Excellent,
    Great,
    Good,
    Fair,
}

impl MatchQuality {
    pub fn from_score(score: f32) -> Self {
        if score >= 85.0 {
            MatchQuality::Excellent
        } else if score >= 70.0 {
            MatchQuality::Great
        } else if score >= 50.0 {
            MatchQuality::Good
        } else {
            MatchQuality::Fair
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchQuality::Excellent => "excellent",
            MatchQuality::Great => "great",
            MatchQuality::Good => "good",
            MatchQuality::Fair => "fair",
        }
    }
}

/// Composite 0-100 match score for a candidate against a posting.
///
/// The similarity component is an externally supplied input in [0, 1];
/// this module only clamps it. The subject component reads the flag set by
/// the pipeline's annotation stage.
pub fn score_candidate(
    candidate: &MatchCandidate,
    job: &JobPosting,
    weights: &MatchWeights,
) -> (f32, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        similarity: candidate.similarity.clamp(0.0, 1.0),
        subject_match: if candidate.subject_match { 1.0 } else { 0.0 },
        salary_alignment: salary_alignment(candidate.profile.min_salary_usd, job.salary_usd),
        video_quality: candidate
            .profile
            .video_quality_score
            .unwrap_or(NEUTRAL_VIDEO_QUALITY)
            .clamp(0.0, 1.0),
        experience: (f32::from(candidate.profile.years_experience.unwrap_or(0))
            / EXPERIENCE_CAP_YEARS)
            .clamp(0.0, 1.0),
    };

    let weighted = weights.similarity * breakdown.similarity
        + weights.subject_match * breakdown.subject_match
        + weights.salary_alignment * breakdown.salary_alignment
        + weights.video_quality * breakdown.video_quality
        + weights.experience * breakdown.experience;

    ((weighted * 100.0).clamp(0.0, 100.0), breakdown)
}

/// 1.0 when the candidate's floor fits the offer, falling off toward 0 as
/// the floor exceeds it. Candidates without a stated floor count as fully
/// aligned.
fn salary_alignment(min_salary_usd: Option<u32>, offered_usd: u32) -> f32 {
    match min_salary_usd {
        None | Some(0) => 1.0,
        Some(floor) if floor <= offered_usd => 1.0,
        Some(floor) => (offered_usd as f32 / floor as f32).clamp(0.0, 1.0),
    }
}
