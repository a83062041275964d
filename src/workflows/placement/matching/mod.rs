mod outreach;
mod pipeline;
mod scoring;
mod service;

pub use outreach::{suppress_recent_contacts, ContactLog, ContactLogError, InMemoryContactLog};
pub use pipeline::{CandidateFilterPipeline, FilterOutcome, FilterPolicy, FilterStats};
pub use scoring::{score_candidate, MatchQuality, MatchWeights, ScoreBreakdown};
pub use service::{ScoredMatch, Shortlist, ShortlistError, ShortlistService};
