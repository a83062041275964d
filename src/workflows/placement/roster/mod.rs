//! Candidate roster import from the board's ATS CSV export.

mod parser;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::domain::{CandidateProfile, MatchCandidate, TeacherId};

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster line {line}: {message}")]
    Row { line: usize, message: String },
}

/// Builds match candidates from an ATS roster export.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MatchCandidate>, RosterImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<MatchCandidate>, RosterImportError> {
        let records = parser::parse_records(reader)?;
        let candidates: Vec<MatchCandidate> = records
            .into_iter()
            .map(|record| {
                let profile = CandidateProfile {
                    teacher_id: TeacherId(record.teacher_id),
                    full_name: record.full_name,
                    birth_date: record.birth_date,
                    citizenship: record.citizenship,
                    highest_degree: record.highest_degree,
                    years_experience: record.years_experience,
                    has_teaching_certification: record.has_teaching_certification,
                    background_check_cleared: record.background_check_cleared,
                    has_criminal_record: record.has_criminal_record,
                    preferred_countries: record.preferred_countries,
                    min_salary_usd: record.min_salary_usd,
                    subjects: record.subjects,
                    video_quality_score: record.video_quality_score,
                };

                MatchCandidate {
                    profile,
                    similarity: record.similarity,
                    last_contacted_at: record.last_contacted_at,
                    subject_match: false,
                    salary_stretch: false,
                }
            })
            .collect();

        debug!(imported = candidates.len(), "roster import complete");
        Ok(candidates)
    }
}
