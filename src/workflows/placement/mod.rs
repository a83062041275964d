//! Visa screening and candidate matching for teacher placements.
//!
//! `screening` evaluates a candidate against per-country visa requirement
//! catalogs and reports failures as data rather than errors, so batch
//! evaluation never aborts on a single non-eligible profile. `matching`
//! reduces a batch of match candidates against a job posting through a
//! fixed sequence of filter stages and ranks the survivors. `roster`
//! imports candidate batches from the board's ATS CSV export.

pub mod domain;
pub mod matching;
pub mod roster;
pub mod screening;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidateProfile, CountryCode, DegreeLevel, JobPosting, MatchCandidate, TeacherId,
};
pub use matching::{
    CandidateFilterPipeline, ContactLog, ContactLogError, FilterOutcome, FilterPolicy,
    FilterStats, InMemoryContactLog, MatchQuality, MatchWeights, ScoredMatch, Shortlist,
    ShortlistError, ShortlistService,
};
pub use roster::RosterImporter;
pub use screening::{
    EligibilityEngine, EligibilityResult, FailedRequirement, RequirementCatalog,
    RequirementPriority,
};
